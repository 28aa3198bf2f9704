//! Intent classification by literal keyword containment.
//!
//! A [`KeywordTable`] is an ordered list of rules. The first rule whose
//! scope fits the message and whose keyword set has a substring hit wins.
//! Reply-scoped rules only run for replies; standalone rules only run for
//! messages that are not replies, so a reply that matches no reply rule is
//! [`Intent::None`] even when it mentions a list keyword.

use crate::config::KeywordsConfig;
use crate::task::TaskStatus;

/// The action a message represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Create,
    MarkDone,
    MarkInProgress,
    MarkWaiting,
    ListMine,
    ListAll,
    None,
}

impl Intent {
    /// Status written by a status-update intent.
    pub fn target_status(&self) -> Option<TaskStatus> {
        match self {
            Self::MarkDone => Some(TaskStatus::Done),
            Self::MarkInProgress => Some(TaskStatus::InProgress),
            Self::MarkWaiting => Some(TaskStatus::Waiting),
            _ => None,
        }
    }
}

/// Whether a rule applies to replies or to standalone messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyScope {
    Reply,
    Standalone,
}

/// One keyword set bound to the intent it triggers.
#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub intent: Intent,
    pub scope: ReplyScope,
    keywords: Vec<String>,
}

impl KeywordRule {
    /// Keywords are lowercased; empty ones are dropped since they would match anything.
    pub fn new<I, S>(intent: Intent, scope: ReplyScope, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords = keywords
            .into_iter()
            .map(|kw| kw.as_ref().trim().to_lowercase())
            .filter(|kw| !kw.is_empty())
            .collect();
        Self {
            intent,
            scope,
            keywords,
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn matches(&self, msg_lower: &str) -> bool {
        self.keywords.iter().any(|kw| msg_lower.contains(kw.as_str()))
    }
}

/// Ordered, immutable keyword rules. Order is precedence.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    rules: Vec<KeywordRule>,
}

pub const CREATE_KW: &[&str] = &["remember", "create task", "task"];
pub const DONE_KW: &[&str] = &["done", "finished", "completed"];
pub const IN_PROGRESS_KW: &[&str] = &["in progress", "working", "in process"];
pub const WAITING_KW: &[&str] = &["waiting", "paused", "on hold"];
pub const LIST_MINE_KW: &[&str] = &["my tasks"];
pub const LIST_ALL_KW: &[&str] = &["all tasks", "tasks"];

impl Default for KeywordTable {
    fn default() -> Self {
        Self::from_config(&KeywordsConfig::default())
    }
}

impl KeywordTable {
    pub fn new(rules: Vec<KeywordRule>) -> Self {
        Self { rules }
    }

    /// Build the table in fixed precedence order: create, done, in progress,
    /// waiting, my tasks, all tasks. Lists left unset keep the defaults.
    pub fn from_config(cfg: &KeywordsConfig) -> Self {
        fn pick<'a>(custom: &'a Option<Vec<String>>, fallback: &'a [&'a str]) -> Vec<&'a str> {
            match custom {
                Some(list) => list.iter().map(String::as_str).collect(),
                None => fallback.to_vec(),
            }
        }

        use ReplyScope::{Reply, Standalone};
        Self::new(vec![
            KeywordRule::new(Intent::Create, Reply, pick(&cfg.create, CREATE_KW)),
            KeywordRule::new(Intent::MarkDone, Reply, pick(&cfg.done, DONE_KW)),
            KeywordRule::new(
                Intent::MarkInProgress,
                Reply,
                pick(&cfg.in_progress, IN_PROGRESS_KW),
            ),
            KeywordRule::new(Intent::MarkWaiting, Reply, pick(&cfg.waiting, WAITING_KW)),
            KeywordRule::new(
                Intent::ListMine,
                Standalone,
                pick(&cfg.list_mine, LIST_MINE_KW),
            ),
            KeywordRule::new(
                Intent::ListAll,
                Standalone,
                pick(&cfg.list_all, LIST_ALL_KW),
            ),
        ])
    }

    pub fn rules(&self) -> &[KeywordRule] {
        &self.rules
    }

    /// Classify `text`; `has_reply` selects which rules are eligible.
    pub fn classify(&self, text: &str, has_reply: bool) -> Intent {
        let scope = if has_reply {
            ReplyScope::Reply
        } else {
            ReplyScope::Standalone
        };
        let msg_lower = text.to_lowercase();
        self.rules
            .iter()
            .filter(|rule| rule.scope == scope)
            .find(|rule| rule.matches(&msg_lower))
            .map(|rule| rule.intent)
            .unwrap_or(Intent::None)
    }
}
