use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use feedlog::config::Config;
use feedlog::intent::Intents;
use feedlog::storage::Store;

/// Get the config directory path (~/.config/feedlog/)
fn config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("feedlog"))
}

#[derive(Parser, Debug)]
#[command(name = "feedlog", about = "Baby feeding log with daily summaries")]
struct Args {
    /// Path to the config file (defaults to ~/.config/feedlog/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a feeding happening now, with an optional volume in ounces
    Record {
        /// Volume in ounces; a missing or unparsable value uses the
        /// configured default
        ounces: Option<String>,
    },
    /// Report the most recent recorded feeding
    Last,
    /// Report how many times and how much the baby was fed today
    Summary,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config_dir = config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }

    let config_path = args
        .config
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)?;
    config.apply_env();

    let timezone = config.reference_timezone()?;

    let db_path = config.resolve_database_path(&config_dir);
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;
    let store = Store::open(db_path_str)
        .await
        .context("Failed to open the feeding store")?;

    let intents = Intents::new(store, timezone, config.default_ounces);
    let reply = match args.command {
        Command::Record { ounces } => intents.record_feeding(ounces.as_deref()).await,
        Command::Last => intents.latest_feeding().await,
        Command::Summary => intents.daily_summary().await,
    };
    println!("{reply}");

    Ok(())
}
