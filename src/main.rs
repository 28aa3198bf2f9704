mod commands;
mod gateway;
mod lifecycle;

use clap::{Parser, Subcommand};
use lifecycle::Lifecycle;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use taskbot_channels::telegram::TelegramChannel;
use taskbot_core::{
    config::{self, shellexpand},
    intent::KeywordTable,
    traits::{Channel, TaskStore},
};
use taskbot_memory::Store;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "taskbot",
    version,
    about = "Taskbot — chat-bound task tracker for Telegram groups"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot.
    Start,
    /// Show configuration and task store status.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(&cli.config)?;
    let _log_guard = init_logging(&cfg);

    match cli.command {
        Commands::Start => {
            config::validate(&cfg)?;

            let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
            if let Some(ref tg) = cfg.channel.telegram {
                channels.insert("telegram".to_string(), Arc::new(TelegramChannel::new(tg)));
            }

            let store = Store::new(&cfg.memory).await?;
            let lifecycle = Lifecycle::new(
                store,
                KeywordTable::from_config(&cfg.keywords),
                cfg.tasks.duplicate_policy,
            );

            println!("{} — starting...", cfg.bot.name);
            let gw = Arc::new(gateway::Gateway::new(channels, lifecycle));
            gw.run().await?;
        }
        Commands::Status => {
            println!("{} — Status Check\n", cfg.bot.name);
            println!("Config: {}", cli.config);
            println!("Database: {}", shellexpand(&cfg.memory.db_path));
            println!("Duplicate policy: {:?}", cfg.tasks.duplicate_policy);

            match cfg.channel.telegram {
                Some(ref tg) if tg.enabled && !tg.bot_token.is_empty() => {
                    println!("  telegram: configured")
                }
                Some(ref tg) if tg.enabled => println!("  telegram: enabled but missing bot_token"),
                Some(_) => println!("  telegram: disabled"),
                None => println!("  telegram: not configured"),
            }

            let store = Store::new(&cfg.memory).await?;
            let pending = store.list_pending().await?;
            println!("  pending tasks: {}", pending.len());
            store.close().await;
        }
    }

    Ok(())
}

/// Log to stdout and to a daily-rotated file under `{data_dir}/logs/`.
///
/// `RUST_LOG` takes precedence over the configured level. The returned guard
/// flushes the file writer on drop and must live until exit. If the log
/// directory cannot be created, logging continues on stdout only.
fn init_logging(cfg: &config::Config) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cfg.bot.log_level));

    let log_dir = PathBuf::from(shellexpand(&cfg.bot.data_dir)).join("logs");
    let (file_layer, guard) = match RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("taskbot")
        .filename_suffix("log")
        .build(&log_dir)
    {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("file logging disabled ({}): {e}", log_dir.display());
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}
