//! Lasca CLI - Command-line interface
//!
//! Commands:
//! - show: Print a position, its legal moves and render model
//! - play: Replay a list of moves and report the outcome
//! - selfplay: Run random games and check how they end
//! - perft: Count move sequences to a fixed depth

mod perft_cmd;
mod play_cmd;
mod selfplay;
mod setup;
mod show;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lasca")]
#[command(about = "Lasca rules engine")]
struct Cli {
    /// Rules JSON file (defaults to standard 7x7 Lasca)
    #[arg(long, global = true, value_name = "FILE")]
    rules: Option<PathBuf>,

    /// Board size when no rules file is given
    #[arg(long, global = true)]
    size: Option<u8>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a position
    Show(show::ShowArgs),
    /// Replay moves given in notation
    Play(play_cmd::PlayArgs),
    /// Play random games
    Selfplay(selfplay::SelfplayArgs),
    /// Count move sequences
    Perft(perft_cmd::PerftArgs),
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let rules = setup::load_rules(cli.rules.as_deref(), cli.size)?;

    match cli.command {
        Commands::Show(args) => show::run(args, &rules),
        Commands::Play(args) => play_cmd::run(args, &rules),
        Commands::Selfplay(args) => selfplay::run(args, &rules),
        Commands::Perft(args) => perft_cmd::run(args, &rules),
    }
}
