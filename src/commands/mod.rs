//! Built-in bot commands: /start, /help, /tasks, /mytasks.


use crate::lifecycle::Lifecycle;
use taskbot_core::{intent::Intent, message::IncomingMessage, traits::TaskStore};

/// Known bot commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Tasks,
    MyTasks,
}

impl Command {
    /// Parse a command from message text. Returns `None` for text that is
    /// not a command or names an unknown one.
    pub fn parse(text: &str) -> Option<Self> {
        let first = text.split_whitespace().next()?;
        // Strip @botname suffix (e.g. "/help@taskbot" → "/help").
        let cmd = first.split('@').next().unwrap_or(first);
        match cmd {
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            "/tasks" => Some(Self::Tasks),
            "/mytasks" => Some(Self::MyTasks),
            _ => None,
        }
    }
}

/// Handle a command and return the reply text.
pub async fn handle<S: TaskStore>(
    cmd: Command,
    lifecycle: &Lifecycle<S>,
    msg: &IncomingMessage,
) -> Option<String> {
    match cmd {
        Command::Start => Some(start_text().to_string()),
        Command::Help => Some(help_text().to_string()),
        Command::Tasks => lifecycle.run(Intent::ListAll, msg).await,
        Command::MyTasks => lifecycle.run(Intent::ListMine, msg).await,
    }
}

fn start_text() -> &'static str {
    "Hi! I keep track of tasks in this chat. \
     Reply to a message to turn it into a task, then reply again to update its status.\n\n\
     Commands:\n\
     /tasks - all pending tasks\n\
     /mytasks - tasks assigned to you\n\
     /help - how to use the bot"
}

fn help_text() -> &'static str {
    "How to use the bot:\n\n\
     1. Create a task: reply to the message that describes it with \"remember\" \
     or \"create task\". The author of that message becomes the assignee. \
     Add a date like 2025-06-01 to set a due date.\n\
     2. Update a task: reply to the same message with \"done\", \"in progress\" \
     or \"waiting\".\n\
     3. Commands:\n\
     \x20  /tasks - all pending tasks\n\
     \x20  /mytasks - tasks assigned to you\n\
     You can also just write \"my tasks\" or \"all tasks\"."
}
