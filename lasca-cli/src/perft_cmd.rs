//! Perft command - count move sequences per depth

use anyhow::Result;
use clap::Args;

use lasca_core::{perft, Rules};

use crate::setup::{initial_state, PositionArgs};

#[derive(Args)]
pub struct PerftArgs {
    /// Deepest ply to count
    #[arg(long, default_value = "4")]
    pub depth: u32,

    #[command(flatten)]
    pub position: PositionArgs,
}

pub fn run(args: PerftArgs, rules: &Rules) -> Result<()> {
    let state = initial_state(&args.position, rules)?;

    for depth in 1..=args.depth {
        let start = std::time::Instant::now();
        let nodes = perft(&state, depth);
        tracing::debug!("perft {} took {:?}", depth, start.elapsed());
        println!("perft {depth}: {nodes}");
    }
    Ok(())
}
