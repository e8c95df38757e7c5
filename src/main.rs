use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{ConfigCommand, DrinksCommand, LogCommand, StatusCommand};
use config::Config;
use drink_track_core::{JsonFileStore, SystemClock, Tracker};

#[derive(Parser)]
#[command(name = "drink")]
#[command(version)]
#[command(about = "Track what you drink against a daily goal", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the drinks you can log
    Drinks(DrinksCommand),

    /// Log a drink
    Log(LogCommand),

    /// Show today's intake, calories and goal progress
    Status(StatusCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "drinktrack=warn,drink_track_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match &cli.command {
        Some(Commands::Drinks(cmd)) => {
            let mut tracker = open_tracker(&config)?;
            cmd.run(&mut tracker)?;
        }
        Some(Commands::Log(cmd)) => {
            let mut tracker = open_tracker(&config)?;
            cmd.run(&mut tracker)?;
        }
        Some(Commands::Status(cmd)) => {
            let mut tracker = open_tracker(&config)?;
            cmd.run(&mut tracker)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

fn open_tracker(config: &Config) -> Result<Tracker<JsonFileStore>, Box<dyn std::error::Error>> {
    let store = JsonFileStore::new(config.data_file.value.clone());
    let tracker = Tracker::open(store, SystemClock, config.daily_goal_ml.value)?;
    Ok(tracker)
}
