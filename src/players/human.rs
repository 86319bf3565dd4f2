//! Human player reading moves from text lines.

use super::{Player, PlayerAction};
use anyhow::Result;
use std::io::BufRead;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use xo_tictactoe::{Board, Move, Symbol};

/// Human player fed by a channel of input lines.
pub struct HumanPlayer {
    name: String,
    input_rx: mpsc::UnboundedReceiver<String>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(name: impl Into<String>, input_rx: mpsc::UnboundedReceiver<String>) -> Self {
        Self {
            name: name.into(),
            input_rx,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _board: &Board, symbol: Symbol) -> Result<PlayerAction> {
        debug!(player = %self.name, %symbol, "Waiting for input");
        let Some(line) = self.input_rx.recv().await else {
            debug!(player = %self.name, "Input closed");
            return Ok(PlayerAction::Quit);
        };

        let text = line.trim();
        if matches!(text, "q" | "quit" | "exit") {
            return Ok(PlayerAction::Quit);
        }
        Ok(match parse_move(text) {
            Some(mv) => PlayerAction::Place(mv),
            None => PlayerAction::Unrecognized(text.to_string()),
        })
    }

    fn discard_pending(&mut self) -> usize {
        let mut dropped = 0;
        while self.input_rx.try_recv().is_ok() {
            dropped += 1;
        }
        if dropped > 0 {
            debug!(player = %self.name, dropped, "Discarded early input");
        }
        dropped
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Parses `"1"`..`"9"` (board key, row-major) or `"row col"` (0-based,
/// separated by space or comma).
///
/// Coordinates are not range-checked here; the engine reports
/// out-of-range squares as illegal moves.
pub fn parse_move(input: &str) -> Option<Move> {
    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [key] => {
            let key: usize = key.parse().ok()?;
            key.checked_sub(1).and_then(Move::from_index)
        }
        [row, col] => Some(Move::new(row.parse().ok()?, col.parse().ok()?)),
        _ => None,
    }
}

/// Spawns a thread forwarding stdin lines to a channel.
pub fn stdin_lines() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}
