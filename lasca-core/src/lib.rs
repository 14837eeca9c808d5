//! Lasca Core - rules engine
//!
//! This crate provides the game logic for Lasca, the stacking draughts game:
//! - Board geometry (dense square grid, diagonal stepping)
//! - Pieces and piles (top piece controls the pile)
//! - Move and capture-chain generation with mandatory capture
//! - Immutable game state with history, promotion and win detection
//! - Position strings, move notation and a render model for collaborators
//! - Random playouts and perft counting

pub mod error;
pub mod board;
pub mod pieces;
pub mod movegen;
mod apply;
pub mod game;
pub mod notation;
pub mod ruleset;
pub mod playout;

// Re-exports for convenient access
pub use error::{LascaError, Result};
pub use board::{Board, Square, DIAGONALS, STANDARD_SIZE, SUPPORTED_SIZES};
pub use pieces::{controlling_rank, controlling_team, Piece, Pile, Rank, Team};
pub use movegen::{
    capture_chains, continuation_captures, legal_actions, simple_moves, Action, ActionSet,
    CaptureChain, SimpleMove, Step,
};
pub use game::{GameState, GameStatus};
pub use notation::{
    action_notation, from_position_string, parse_action, resolve_action, to_position_string,
    to_render_model, RenderModel, RenderSquare,
};
pub use ruleset::{CaptureRule, Rules};
pub use playout::{perft, random_playout, seeded_playout, PlayoutResult};
