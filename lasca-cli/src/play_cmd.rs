//! Play command - replay moves in notation
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: collect_moves(), replay(), report()
//! - Level 3: notation parsing (delegated to lasca-core)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use lasca_core::{parse_action, GameState, GameStatus, Rules};

use crate::setup::{initial_state, PositionArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Moves such as c3-d4 or e5xc3xa1
    pub moves: Vec<String>,

    /// Read whitespace-separated moves from a file (move numbers like `1.` are skipped)
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub position: PositionArgs,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Outcome of a replay
#[derive(Debug, Serialize)]
struct PlayReport {
    pgn: String,
    position: String,
    status: GameStatus,
    move_number: u32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: PlayArgs, rules: &Rules) -> Result<()> {
    let moves = collect_moves(&args)?;
    let start = initial_state(&args.position, rules)?;

    tracing::info!("Replaying {} moves", moves.len());

    let state = replay(start, &moves)?;
    report(&state, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn collect_moves(args: &PlayArgs) -> Result<Vec<String>> {
    let mut moves = Vec::new();
    if let Some(path) = &args.file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read moves: {}", path.display()))?;
        moves.extend(tokens(&content));
    }
    moves.extend(args.moves.iter().cloned());
    Ok(moves)
}

/// Apply each move in turn, stopping at the first illegal one
pub fn replay(mut state: GameState, moves: &[String]) -> Result<GameState> {
    for (i, text) in moves.iter().enumerate() {
        let action = parse_action(text, &state)
            .with_context(|| format!("Move {} ({}) rejected", i + 1, text))?;
        state = state
            .apply_action(&action)
            .with_context(|| format!("Move {} ({}) rejected", i + 1, text))?;
    }
    Ok(state)
}

fn report(state: &GameState, json: bool) -> Result<()> {
    let report = PlayReport {
        pgn: state.pgn(),
        position: state.position_string(),
        status: state.status(),
        move_number: state.move_number(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report.pgn);
        print!("{}", crate::show::describe(state));
    }
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Move tokens from a game record, skipping move numbers
fn tokens(content: &str) -> impl Iterator<Item = String> + '_ {
    content
        .split_whitespace()
        .filter(|t| !t.ends_with('.'))
        .map(str::to_string)
}
