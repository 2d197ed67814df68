//! matching-dice CLI: play one seeded match and append it to the game log.

use clap::Parser;
use matching_dice::core::{MatchConfig, DEFAULT_LOG_PATH};
use matching_dice::session::play;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matching-dice")]
#[command(about = "Dealer and four threaded players play matching dice")]
struct Args {
    /// Seed for the die roller
    seed: u64,

    /// Game log file (appended to)
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Only show warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show coordination debug output
    #[arg(short, long)]
    verbose: bool,

    /// Print the match report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = MatchConfig::new(args.seed)
        .with_log_path(args.log_file)
        .with_echo(!args.quiet);

    let report = play(&config)?;
    info!(
        winner = %report.winner,
        turns = report.turns.len(),
        "match finished"
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(())
}
