//! Turn-taking state machine for a single round.

use crate::error::PlayError;
use crate::rules::{is_full, winner};
use crate::selector::MoveSelector;
use crate::types::{Board, Move, Symbol};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Current status of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundStatus {
    /// Moves are still accepted.
    InProgress,
    /// A symbol completed a line.
    Won(Symbol),
    /// Board filled with no line.
    Drawn,
}

impl RoundStatus {
    /// Terminal outcome, if the round is over.
    pub fn outcome(self) -> Option<RoundOutcome> {
        match self {
            RoundStatus::InProgress => None,
            RoundStatus::Won(symbol) => Some(RoundOutcome::Win(symbol)),
            RoundStatus::Drawn => Some(RoundOutcome::Draw),
        }
    }
}

/// Outcome of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// Symbol won the round.
    Win(Symbol),
    /// Round ended in a draw.
    Draw,
}

impl RoundOutcome {
    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Symbol> {
        match self {
            RoundOutcome::Win(symbol) => Some(symbol),
            RoundOutcome::Draw => None,
        }
    }
}

impl std::fmt::Display for RoundOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoundOutcome::Win(symbol) => write!(f, "{symbol} wins"),
            RoundOutcome::Draw => write!(f, "Draw"),
        }
    }
}

/// One round: empty board to win or draw. First always opens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRound {
    board: Board,
    to_move: Symbol,
    status: RoundStatus,
    history: Vec<Move>,
}

impl GameRound {
    /// Creates a round with an empty board.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Symbol::First,
            status: RoundStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Symbol to move. After the round ends this is the symbol that made
    /// the last move.
    pub fn to_move(&self) -> Symbol {
        self.to_move
    }

    /// Returns the round status.
    pub fn status(&self) -> RoundStatus {
        self.status
    }

    /// Terminal outcome, if any.
    pub fn outcome(&self) -> Option<RoundOutcome> {
        self.status.outcome()
    }

    /// Returns true once the round is won or drawn.
    pub fn is_over(&self) -> bool {
        self.status != RoundStatus::InProgress
    }

    /// Moves committed so far, in order.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Places the mark of the side to move.
    ///
    /// # Errors
    ///
    /// - [`PlayError::RoundAlreadyOver`] once the round is terminal
    /// - [`PlayError::IllegalMove`] for an occupied or out-of-range square
    #[instrument(skip(self), fields(symbol = %self.to_move))]
    pub fn play(&mut self, mv: Move) -> Result<RoundStatus, PlayError> {
        if self.is_over() {
            return Err(PlayError::RoundAlreadyOver);
        }

        self.board.set(mv.row, mv.col, self.to_move)?;
        self.history.push(mv);
        debug!(%mv, "Move committed");

        self.status = if let Some(symbol) = winner(&self.board) {
            info!(winner = %symbol, "Round won");
            RoundStatus::Won(symbol)
        } else if is_full(&self.board) {
            info!("Round drawn");
            RoundStatus::Drawn
        } else {
            self.to_move = self.to_move.opponent();
            RoundStatus::InProgress
        };

        Ok(self.status)
    }

    /// Lets `selector` choose a move on a snapshot of the board and
    /// commits it.
    ///
    /// # Errors
    ///
    /// - [`PlayError::RoundAlreadyOver`] once the round is terminal
    /// - [`PlayError::NotAutomatedTurn`] if the selector plays the other symbol
    pub fn play_automated<R: Rng>(
        &mut self,
        selector: &mut MoveSelector<R>,
    ) -> Result<(Move, RoundStatus), PlayError> {
        if self.is_over() {
            return Err(PlayError::RoundAlreadyOver);
        }
        if selector.symbol() != self.to_move {
            return Err(PlayError::NotAutomatedTurn);
        }

        let snapshot = self.board;
        let mv = selector.select(&snapshot)?;
        let status = self.play(mv)?;
        Ok((mv, status))
    }

    /// Rebuilds a round by replaying `moves` from an empty board.
    ///
    /// # Errors
    ///
    /// Fails on the first move the round refuses.
    pub fn replay(moves: &[Move]) -> Result<Self, PlayError> {
        let mut round = Self::new();
        for mv in moves {
            round.play(*mv)?;
        }
        Ok(round)
    }
}

impl Default for GameRound {
    fn default() -> Self {
        Self::new()
    }
}
