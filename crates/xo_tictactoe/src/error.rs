//! Errors reported by the game engine.
//!
//! Every rejection leaves the board, the round and the tournament exactly as
//! they were, so a caller can retry with corrected input.

use serde::{Deserialize, Serialize};

/// Why a move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum IllegalMoveReason {
    /// Row or column outside `0..3`.
    #[display("coordinates out of range")]
    OutOfRange,
    /// Square already holds a symbol.
    #[display("square is already occupied")]
    Occupied,
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlayError {
    /// Out-of-range coordinate or occupied square.
    #[display("Illegal move at ({row}, {col}): {reason}")]
    IllegalMove {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
        /// What was wrong with it.
        reason: IllegalMoveReason,
    },

    /// The round (or the whole tournament) has already finished.
    #[display("Round is already over")]
    RoundAlreadyOver,

    /// Human input arrived while the computer is to move.
    #[display("It is not a human player's turn")]
    NotHumanTurn,

    /// The computer was asked to move on a human's turn.
    #[display("It is not the computer's turn")]
    NotAutomatedTurn,

    /// Move selection was requested on a full board.
    #[display("No legal move available")]
    NoLegalMove,

    /// A tournament needs at least one round.
    #[display("A tournament needs at least one round")]
    NoRounds,
}

impl std::error::Error for PlayError {}
