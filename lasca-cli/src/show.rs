//! Show command - print a position and its legal moves

use anyhow::Result;
use clap::Args;

use lasca_core::{action_notation, to_render_model, GameState, Rules};

use crate::setup::{initial_state, PositionArgs};

#[derive(Args)]
pub struct ShowArgs {
    #[command(flatten)]
    pub position: PositionArgs,

    /// Print the render model as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ShowArgs, rules: &Rules) -> Result<()> {
    let state = initial_state(&args.position, rules)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&to_render_model(state.board()))?);
    } else {
        print!("{}", describe(&state));
    }
    Ok(())
}

/// Diagram, position string, side to move and legal moves
pub fn describe(state: &GameState) -> String {
    let size = state.board().size();
    let moves: Vec<String> = state
        .legal_actions()
        .actions()
        .iter()
        .map(|a| action_notation(a, size))
        .collect();

    let mut out = format!("{}\n", state.board());
    out.push_str(&format!("position: {}\n", state.position_string()));
    out.push_str(&format!("to move:  {:?}\n", state.turn()));
    out.push_str(&format!("status:   {:?}\n", state.status()));
    out.push_str(&format!("legal:    {}\n", moves.join(" ")));
    out
}
