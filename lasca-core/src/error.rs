//! Error type shared by every engine operation

use thiserror::Error;

/// Failures reported by the rules engine
///
/// None of these are fatal: a rejected action leaves the caller's state as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LascaError {
    #[error("square ({row}, {col}) is off the board")]
    OutOfRange { row: i16, col: i16 },

    #[error("illegal move: {0}")]
    IllegalMove(String),

    #[error("invalid position string: {0}")]
    InvalidPosition(String),

    #[error("unsupported board size {0} (expected 6 or 7)")]
    InvalidSize(u8),
}

pub type Result<T> = std::result::Result<T, LascaError>;
