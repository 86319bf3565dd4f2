//! Sources of human moves.

mod human;
mod scripted;

pub use human::{parse_move, stdin_lines, HumanPlayer};
pub use scripted::ScriptedPlayer;

use anyhow::Result;
use xo_tictactoe::{Board, Move, Symbol};

/// What a player did when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerAction {
    /// Place a mark.
    Place(Move),
    /// Input that does not name a square.
    Unrecognized(String),
    /// Player left the session.
    Quit,
}

/// Trait for players that submit moves from outside the engine.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Waits for this player's next action on `board`, playing `symbol`.
    async fn get_move(&mut self, board: &Board, symbol: Symbol) -> Result<PlayerAction>;

    /// Drops input that arrived while it was not this player's turn.
    /// Returns how many entries were dropped.
    fn discard_pending(&mut self) -> usize {
        0
    }

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
