//! Player replaying a fixed list of moves.

use super::{Player, PlayerAction};
use anyhow::Result;
use derive_new::new;
use std::collections::VecDeque;
use xo_tictactoe::{Board, Move, Symbol};

/// Plays queued moves in order and quits when they run out.
#[derive(Debug, Clone, new)]
pub struct ScriptedPlayer {
    #[new(into)]
    name: String,
    #[new(into)]
    moves: VecDeque<Move>,
}

#[async_trait::async_trait]
impl Player for ScriptedPlayer {
    async fn get_move(&mut self, _board: &Board, _symbol: Symbol) -> Result<PlayerAction> {
        Ok(self
            .moves
            .pop_front()
            .map_or(PlayerAction::Quit, PlayerAction::Place))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
