//! Shared setup: rules loading and starting positions

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use lasca_core::{from_position_string, GameState, Rules, Team};

/// Side to move, as given on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TeamArg {
    Red,
    Blue,
}

impl From<TeamArg> for Team {
    fn from(arg: TeamArg) -> Self {
        match arg {
            TeamArg::Red => Team::Red,
            TeamArg::Blue => Team::Blue,
        }
    }
}

/// Starting position options shared by several commands
#[derive(Args, Clone, Debug)]
pub struct PositionArgs {
    /// Position string to start from instead of the opening
    #[arg(long)]
    pub position: Option<String>,

    /// Side to move in --position
    #[arg(long, value_enum, default_value = "red")]
    pub turn: TeamArg,
}

/// Rules from a JSON file, or the standard rules on a board of `size`
pub fn load_rules(path: Option<&Path>, size: Option<u8>) -> Result<Rules> {
    let mut rules = match path {
        Some(path) => Rules::load(path)
            .with_context(|| format!("Failed to load rules: {}", path.display()))?,
        None => Rules::default(),
    };
    if let Some(size) = size {
        rules.size = size;
    }
    tracing::debug!("rules: {:?}", rules);
    Ok(rules)
}

/// Opening position, or the one given with --position
pub fn initial_state(args: &PositionArgs, rules: &Rules) -> Result<GameState> {
    match &args.position {
        Some(text) => {
            let board = from_position_string(text)
                .with_context(|| format!("Failed to parse position {text:?}"))?;
            Ok(GameState::from_position(board, args.turn.into(), rules.clone()))
        }
        None => GameState::with_rules(rules.clone()).context("Failed to set up the opening"),
    }
}
