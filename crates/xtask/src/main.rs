//! Development tasks for adventure data.
//!
//! This binary provides development utilities using the cargo-xtask pattern.
//! Run with: `cargo xtask <command>`

mod commands;
mod dirs;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Pack, TailLogs};

/// Development tasks for adventure data
#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tools for adventure data files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Pack a RON world into binary data files
    Pack(Pack),

    /// Dump an index or a decoded record from packed data files
    Inspect(Inspect),

    /// Monitor client logs in real-time
    TailLogs(TailLogs),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for ADVENTURE_DATA_DIR and friends)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Command::Pack(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
        Command::TailLogs(cmd) => cmd.execute(),
    }
}
