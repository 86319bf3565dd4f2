//! Move selection for the computer opponent.
//!
//! Three tiers, chosen by [`Difficulty`]:
//! - Easy: uniform random empty square
//! - Medium: win if possible, else block, else random
//! - Hard: full-depth minimax (random opening on a blank board)
//!
//! Every speculative placement works on a copy of the board; the live
//! board is only ever changed by the round that commits the chosen move.

use crate::error::PlayError;
use crate::rules::{has_won, is_full};
use crate::types::{Board, Move, Symbol};
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Score of a win found at the root of the search.
const WIN_SCORE: i32 = 10;

/// Strength of the computer opponent.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Random play.
    #[default]
    Easy,
    /// One-ply win/block heuristic.
    Medium,
    /// Perfect play.
    Hard,
}

/// Chooses moves for one symbol at a fixed difficulty.
#[derive(Debug, Clone)]
pub struct MoveSelector<R = ChaCha8Rng> {
    difficulty: Difficulty,
    symbol: Symbol,
    rng: R,
}

impl MoveSelector<ChaCha8Rng> {
    /// Creates a selector seeded from the thread RNG.
    pub fn new(difficulty: Difficulty, symbol: Symbol) -> Self {
        Self::with_seed(difficulty, symbol, rand::random())
    }

    /// Creates a selector with reproducible random choices.
    pub fn with_seed(difficulty: Difficulty, symbol: Symbol, seed: u64) -> Self {
        Self::with_rng(difficulty, symbol, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MoveSelector<R> {
    /// Creates a selector drawing randomness from `rng`.
    pub fn with_rng(difficulty: Difficulty, symbol: Symbol, rng: R) -> Self {
        Self {
            difficulty,
            symbol,
            rng,
        }
    }

    /// Difficulty tier.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Symbol this selector plays.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Picks the next move for this selector's symbol.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoLegalMove`] if the board is full.
    #[instrument(skip(self, board), fields(difficulty = %self.difficulty, symbol = %self.symbol))]
    pub fn select(&mut self, board: &Board) -> Result<Move, PlayError> {
        if is_full(board) {
            return Err(PlayError::NoLegalMove);
        }

        let mv = match self.difficulty {
            Difficulty::Easy => random_move(board, &mut self.rng),
            Difficulty::Medium => winning_move(board, self.symbol)
                .or_else(|| winning_move(board, self.symbol.opponent()))
                .or_else(|| random_move(board, &mut self.rng)),
            Difficulty::Hard if board.is_blank() => random_move(board, &mut self.rng),
            Difficulty::Hard => minimax_move(board, self.symbol),
        }
        .ok_or(PlayError::NoLegalMove)?;

        debug!(%mv, "Selected move");
        Ok(mv)
    }
}

/// Uniformly random empty square, or `None` on a full board.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Move> {
    board.empty_moves().choose(rng).copied()
}

/// First empty square (row-major) that completes a line for `symbol`.
pub fn winning_move(board: &Board, symbol: Symbol) -> Option<Move> {
    board
        .empty_moves()
        .into_iter()
        .find(|mv| has_won(&board.with_move(*mv, symbol), symbol))
}

/// Best move for `me` by exhaustive minimax.
///
/// Ties go to the first move in row-major order.
pub fn minimax_move(board: &Board, me: Symbol) -> Option<Move> {
    let mut best: Option<(Move, i32)> = None;
    for mv in board.empty_moves() {
        let score = minimax(&board.with_move(mv, me), me, false, 0);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

/// Minimax value of `board` from `me`'s point of view.
///
/// `depth` counts plies made since the search root, so quicker wins score
/// higher and slower losses score less badly.
fn minimax(board: &Board, me: Symbol, maximizing: bool, depth: i32) -> i32 {
    if has_won(board, me) {
        return WIN_SCORE - depth;
    }
    if has_won(board, me.opponent()) {
        return depth - WIN_SCORE;
    }
    if is_full(board) {
        return 0;
    }

    let mover = if maximizing { me } else { me.opponent() };
    let scores = board
        .empty_moves()
        .into_iter()
        .map(|mv| minimax(&board.with_move(mv, mover), me, !maximizing, depth + 1));

    if maximizing {
        scores.max().unwrap_or(0)
    } else {
        scores.min().unwrap_or(0)
    }
}
