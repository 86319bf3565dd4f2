//! Runs a tournament between a human input source and the engine.
//!
//! The orchestrator is the scheduling side of the game: it waits a short,
//! human-noticeable delay before the computer moves, pauses between rounds,
//! and hands the finished result to storage. Computer moves are searched on
//! the blocking pool with the tournament moved into the task, so no human
//! move can be applied while a search is running.

use crate::config::GameConfig;
use crate::players::{Player, PlayerAction};
use crate::store::{ResultStore, StoredResult};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use xo_tictactoe::{
    Board, Controller, Move, MoveReport, PlayError, Progress, RoundOutcome, Symbol, Tournament,
    TournamentScore, TournamentSummary,
};

/// Messages sent from orchestrator to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A round began.
    RoundStarted {
        /// 1-based round number.
        round: u32,
        /// Rounds in the tournament.
        total_rounds: u32,
    },
    /// A side is about to move.
    TurnStarted {
        /// Symbol to move.
        symbol: Symbol,
        /// Who controls it.
        controller: Controller,
        /// Board before the move.
        board: Board,
    },
    /// A move was committed.
    MovePlayed {
        /// Symbol that moved.
        symbol: Symbol,
        /// Square played.
        mv: Move,
    },
    /// Input was refused; the same side moves again.
    MoveRejected {
        /// Why it was refused.
        reason: String,
    },
    /// A round ended.
    RoundFinished {
        /// 1-based round number.
        round: u32,
        /// How it ended.
        outcome: RoundOutcome,
        /// Board at the end of the round.
        board: Board,
        /// Score including this round.
        score: TournamentScore,
    },
    /// The last round ended.
    TournamentFinished(TournamentSummary),
    /// The result was handed to storage.
    ResultSaved(StoredResult),
    /// Storage refused the result.
    SaveFailed(String),
    /// The human left before the end.
    PlayerLeft,
}

/// Orchestrates one tournament.
pub struct Orchestrator {
    human: Box<dyn Player>,
    store: Option<Arc<dyn ResultStore>>,
    bot_delay: Duration,
    round_pause: Duration,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates an orchestrator with no delays and no storage.
    pub fn new(human: Box<dyn Player>, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self {
            human,
            store: None,
            bot_delay: Duration::ZERO,
            round_pause: Duration::ZERO,
            event_tx,
        }
    }

    /// Creates an orchestrator using the delays from `config`.
    pub fn from_config(
        config: &GameConfig,
        human: Box<dyn Player>,
        event_tx: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self::new(human, event_tx).with_delays(config.bot_delay(), config.round_pause())
    }

    /// Sets the pause before computer moves and between rounds.
    pub fn with_delays(mut self, bot_delay: Duration, round_pause: Duration) -> Self {
        self.bot_delay = bot_delay;
        self.round_pause = round_pause;
        self
    }

    /// Hands the final result to `store`.
    pub fn with_store(mut self, store: Arc<dyn ResultStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Plays `tournament` to the end.
    ///
    /// Returns the final tally, or `None` if the human quit early.
    #[instrument(skip_all, fields(human = %self.human.name()))]
    pub async fn run(mut self, mut tournament: Tournament) -> Result<Option<TournamentSummary>> {
        info!("Starting tournament orchestration");

        self.emit(GameEvent::RoundStarted {
            round: tournament.state().round_index(),
            total_rounds: tournament.state().total_rounds(),
        })?;

        while let Some((symbol, controller)) = tournament.pending_turn() {
            self.emit(GameEvent::TurnStarted {
                symbol,
                controller,
                board: *tournament.state().round().board(),
            })?;

            let mut dropped = 0;
            let report = match controller {
                Controller::Automated(_) => {
                    tokio::time::sleep(self.bot_delay).await;
                    let (returned, result) = tokio::task::spawn_blocking(move || {
                        let result = tournament.poll_automated_move();
                        (tournament, result)
                    })
                    .await
                    .context("Computer move task failed")?;
                    tournament = returned;

                    dropped = self.human.discard_pending();
                    result.context("Computer could not move")?
                }
                Controller::Human => {
                    let board = *tournament.state().round().board();
                    match self.human.get_move(&board, symbol).await? {
                        PlayerAction::Place(mv) => {
                            match tournament.submit_human_move(mv.row, mv.col) {
                                Ok(report) => report,
                                Err(e @ PlayError::IllegalMove { .. }) => {
                                    debug!(error = %e, "Human move rejected");
                                    self.emit(GameEvent::MoveRejected {
                                        reason: e.to_string(),
                                    })?;
                                    continue;
                                }
                                Err(e) => return Err(e.into()),
                            }
                        }
                        PlayerAction::Unrecognized(text) => {
                            self.emit(GameEvent::MoveRejected {
                                reason: format!("Unrecognized input '{}'", text),
                            })?;
                            continue;
                        }
                        PlayerAction::Quit => {
                            info!("Player left before the tournament ended");
                            self.emit(GameEvent::PlayerLeft)?;
                            return Ok(None);
                        }
                    }
                }
            };

            self.emit(GameEvent::MovePlayed {
                symbol: report.symbol,
                mv: report.mv,
            })?;
            if dropped > 0 {
                self.emit(GameEvent::MoveRejected {
                    reason: PlayError::NotHumanTurn.to_string(),
                })?;
            }

            if let Some(summary) = self.after_move(&tournament, report).await? {
                return Ok(Some(summary));
            }
        }

        Ok(tournament.result().copied())
    }

    /// Handles round and tournament ends after a committed move.
    async fn after_move(
        &self,
        tournament: &Tournament,
        report: MoveReport,
    ) -> Result<Option<TournamentSummary>> {
        match report.progress {
            Progress::InProgress => Ok(None),
            Progress::RoundOver {
                outcome,
                final_board,
            } => {
                let state = tournament.state();
                self.emit(GameEvent::RoundFinished {
                    round: state.round_index() - 1,
                    outcome,
                    board: final_board,
                    score: state.score(),
                })?;
                tokio::time::sleep(self.round_pause).await;
                self.emit(GameEvent::RoundStarted {
                    round: state.round_index(),
                    total_rounds: state.total_rounds(),
                })?;
                Ok(None)
            }
            Progress::TournamentOver {
                outcome,
                final_board,
                summary,
            } => {
                self.emit(GameEvent::RoundFinished {
                    round: tournament.state().round_index(),
                    outcome,
                    board: final_board,
                    score: tournament.current_score(),
                })?;
                self.emit(GameEvent::TournamentFinished(summary))?;
                self.save(&summary)?;
                Ok(Some(summary))
            }
        }
    }

    fn save(&self, summary: &TournamentSummary) -> Result<()> {
        let Some(store) = &self.store else {
            return Ok(());
        };
        match store.save(summary) {
            Ok(record) => self.emit(GameEvent::ResultSaved(record)),
            Err(e) => {
                warn!(error = %e, "Failed to save tournament result");
                self.emit(GameEvent::SaveFailed(e.message))
            }
        }
    }

    fn emit(&self, event: GameEvent) -> Result<()> {
        self.event_tx
            .send(event)
            .context("Presentation channel closed")?;
        Ok(())
    }
}
