//! xo - terminal tic-tac-toe tournaments
//!
//! The game rules, computer opponents and tournament bookkeeping live in
//! [`xo_tictactoe`]. This crate adds the session around them.
//!
//! # Architecture
//!
//! - **Config**: TOML settings with command-line overrides
//! - **Players**: sources of human moves (stdin or scripted)
//! - **Orchestrator**: drives a tournament and emits [`GameEvent`]s
//! - **Render**: turns events into terminal text
//! - **Store**: keeps finished tournament results
//!
//! # Example
//!
//! ```no_run
//! use std::collections::VecDeque;
//! use xo::{GameConfig, Orchestrator, ScriptedPlayer};
//! use xo_tictactoe::Move;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().with_rounds(1);
//! let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
//! let human = ScriptedPlayer::new("script", VecDeque::from([Move::new(1, 1)]));
//! let summary = Orchestrator::new(Box::new(human), tx)
//!     .run(config.start_tournament()?)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
mod config;
mod orchestrator;
pub mod players;
pub mod render;
mod store;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator};

// Crate-level exports - Players
pub use players::{HumanPlayer, Player, PlayerAction, ScriptedPlayer};

// Crate-level exports - Storage
pub use store::{JsonLinesStore, ResultStore, StoreError, StoredResult};
