use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use readbot::bot::transport::ConsoleTransport;
use readbot::bot::{Bot, Intent};
use readbot::config::Config;
use readbot::feed::{Category, Fetcher};
use readbot::scheduler;
use readbot::session::{ChatId, SessionStore};

type ConsoleBot = Bot<Fetcher, ConsoleTransport>;

/// Get the config directory path (~/.config/readbot/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("readbot"))
}

#[derive(Parser, Debug)]
#[command(name = "readbot", about = "Feed reading bot with a console chat")]
struct Args {
    /// Config file (default: ~/.config/readbot/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Chat id of the console subscriber
    #[arg(long, default_value_t = 1)]
    chat_id: i64,

    /// Print one article from a category (devops, setup, random) and exit
    #[arg(long, value_name = "CATEGORY")]
    once: Option<String>,

    /// Run the daily broadcast immediately and exit
    #[arg(long)]
    daily_now: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr; stdout carries the console chat
    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    let daily_time = config.daily_time()?;

    let fetcher = Fetcher::new(&config.user_agent, config.fetch_timeout())
        .context("Failed to create HTTP client")?;
    let sessions = Arc::new(SessionStore::new());
    let bot = Arc::new(Bot::new(
        fetcher,
        ConsoleTransport,
        Arc::clone(&sessions),
        config.bot_settings()?,
    ));
    let chat_id = ChatId(args.chat_id);

    if let Some(key) = args.once.as_deref() {
        let category = Category::from_key(key)
            .with_context(|| format!("Unknown category '{key}' (try devops, setup, random)"))?;
        bot.handle(chat_id, Intent::ShowCategory(category)).await?;
        return Ok(());
    }

    if args.daily_now {
        sessions.register(chat_id);
        let report = bot.send_daily().await;
        if report.failed > 0 {
            anyhow::bail!("Daily broadcast failed for {} subscriber(s)", report.failed);
        }
        return Ok(());
    }

    bot.handle(chat_id, Intent::Start).await?;
    eprintln!("Type /start, /help, /addtopic <topic> or button data (e.g. menu). Ctrl+D quits.");

    tokio::select! {
        result = console_loop(Arc::clone(&bot), chat_id) => result?,
        _ = scheduler::run_daily(Arc::clone(&bot), daily_time) => {}
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted");
        }
    }

    println!("Goodbye!");
    Ok(())
}

/// Reads chat input from stdin until EOF.
///
/// Lines starting with `/` are commands; anything else is callback data, as
/// if the matching inline button had been pressed.
async fn console_loop(bot: Arc<ConsoleBot>, chat_id: ChatId) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        let intent = if input.starts_with('/') {
            Intent::from_command(input)
        } else {
            Intent::from_callback(input)
        };
        if let Err(e) = bot.handle(chat_id, intent).await {
            tracing::warn!(chat_id = %chat_id, error = %e, "Failed to deliver reply");
        }
    }

    Ok(())
}
