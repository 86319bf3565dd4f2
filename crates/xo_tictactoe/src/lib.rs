//! Tic-tac-toe game logic.
//!
//! - [`Board`]: the 3x3 grid
//! - [`rules`]: win and draw detection
//! - [`MoveSelector`]: computer opponent (random, win/block, minimax)
//! - [`GameRound`]: turn-taking for one round
//! - [`Tournament`]: a fixed number of rounds with a running score
//!
//! Nothing here performs I/O or waits on a clock; the caller decides when
//! the computer moves and what to do with the final result.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod round;
pub mod rules;
mod selector;
mod tournament;
mod types;

pub use error::{IllegalMoveReason, PlayError};
pub use round::{GameRound, RoundOutcome, RoundStatus};
pub use selector::{minimax_move, random_move, winning_move, Difficulty, MoveSelector};
pub use tournament::{
    Controller, MoveReport, OverallResult, PlayerRoles, Progress, Tournament, TournamentScore,
    TournamentState, TournamentSummary,
};
pub use types::{Board, BoardParseError, Cell, Move, Symbol, SIZE};
