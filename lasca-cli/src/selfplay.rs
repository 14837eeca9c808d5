//! Selfplay command - random games between two random movers
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_games(), report_results()
//! - Level 3: compute_statistics()

use anyhow::Result;
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use lasca_core::{random_playout, GameState, GameStatus, Rules};

use crate::setup::{initial_state, PositionArgs};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Stop a game after this many plies
    #[arg(long, default_value = "400")]
    pub max_plies: u32,

    /// Random seed (random if omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub position: PositionArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    status: GameStatus,
    plies: u32,
    pgn: String,
}

/// Aggregated results
#[derive(Clone, Debug, Serialize)]
struct SelfplayResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    unfinished: usize,
    avg_plies: f32,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: SelfplayArgs, rules: &Rules) -> Result<()> {
    let start = initial_state(&args.position, rules)?;

    tracing::info!(
        "Starting selfplay: {} games, max {} plies",
        args.games,
        args.max_plies
    );

    let records = play_games(&start, &args);
    let results = compute_statistics(records);
    report_results(&results, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_games(start: &GameState, args: &SelfplayArgs) -> Vec<GameRecord> {
    let mut rng = match args.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    (0..args.games)
        .map(|i| {
            let result = random_playout(start, args.max_plies, &mut rng);
            let record = GameRecord {
                game_number: i + 1,
                status: result.status(),
                plies: result.plies,
                pgn: result.final_state.pgn(),
            };
            tracing::info!("Game {}: {:?} ({} plies)", record.game_number, record.status, record.plies);
            record
        })
        .collect()
}

fn report_results(results: &SelfplayResults, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    println!("Games:      {}", results.games.len());
    println!("Red wins:   {}", results.red_wins);
    println!("Blue wins:  {}", results.blue_wins);
    println!("Unfinished: {}", results.unfinished);
    println!("Avg plies:  {:.1}", results.avg_plies);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn compute_statistics(games: Vec<GameRecord>) -> SelfplayResults {
    let count = |status: GameStatus| games.iter().filter(|g| g.status == status).count();
    let red_wins = count(GameStatus::RedWon);
    let blue_wins = count(GameStatus::BlueWon);
    let unfinished = count(GameStatus::InProgress);
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        games.iter().map(|g| g.plies as f32).sum::<f32>() / games.len() as f32
    };

    SelfplayResults {
        games,
        red_wins,
        blue_wins,
        unfinished,
        avg_plies,
    }
}
