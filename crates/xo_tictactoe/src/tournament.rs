//! Fixed-length tournaments of rounds with cumulative scoring.
//!
//! A [`Tournament`] owns the whole mutable state of a session: the active
//! round, the running score and the computer opponent. Callers drive it by
//! forwarding human moves and asking for computer moves; everything else
//! (scoring, starting the next round, the final verdict) happens inside the
//! move that ends a round.

use crate::error::PlayError;
use crate::round::{GameRound, RoundOutcome, RoundStatus};
use crate::selector::{Difficulty, MoveSelector};
use crate::types::{Board, Move, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Who controls a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    /// Moves are submitted from outside.
    Human,
    /// Moves come from a [`MoveSelector`].
    Automated(Difficulty),
}

/// Controller assignment for both symbols, fixed for a tournament.
///
/// At most one side is automated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawRoles")]
pub struct PlayerRoles {
    first: Controller,
    second: Controller,
}

/// Unchecked form of [`PlayerRoles`] as it appears in serialized data.
#[derive(Deserialize)]
struct RawRoles {
    first: Controller,
    second: Controller,
}

impl TryFrom<RawRoles> for PlayerRoles {
    type Error = &'static str;

    fn try_from(raw: RawRoles) -> Result<Self, Self::Error> {
        match (raw.first, raw.second) {
            (Controller::Automated(_), Controller::Automated(_)) => {
                Err("at most one side can be automated")
            }
            (first, second) => Ok(Self { first, second }),
        }
    }
}

impl PlayerRoles {
    /// Human plays `human`; the computer plays the other symbol.
    pub fn against_computer(human: Symbol, difficulty: Difficulty) -> Self {
        let computer = Controller::Automated(difficulty);
        match human {
            Symbol::First => Self {
                first: Controller::Human,
                second: computer,
            },
            Symbol::Second => Self {
                first: computer,
                second: Controller::Human,
            },
        }
    }

    /// Two humans sharing one input.
    pub fn hot_seat() -> Self {
        Self {
            first: Controller::Human,
            second: Controller::Human,
        }
    }

    /// Controller of `symbol`.
    pub fn controller(&self, symbol: Symbol) -> Controller {
        match symbol {
            Symbol::First => self.first,
            Symbol::Second => self.second,
        }
    }

    /// The computer's symbol and strength, if there is a computer.
    pub fn automated(&self) -> Option<(Symbol, Difficulty)> {
        [Symbol::First, Symbol::Second]
            .into_iter()
            .find_map(|symbol| match self.controller(symbol) {
                Controller::Automated(difficulty) => Some((symbol, difficulty)),
                Controller::Human => None,
            })
    }
}

/// Running tally. Counters only ever go up, one step per finished round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TournamentScore {
    wins_first: u32,
    wins_second: u32,
    draws: u32,
}

impl TournamentScore {
    /// Rounds won by X.
    pub fn wins_first(&self) -> u32 {
        self.wins_first
    }

    /// Rounds won by O.
    pub fn wins_second(&self) -> u32 {
        self.wins_second
    }

    /// Drawn rounds.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Wins for `symbol`.
    pub fn wins(&self, symbol: Symbol) -> u32 {
        match symbol {
            Symbol::First => self.wins_first,
            Symbol::Second => self.wins_second,
        }
    }

    /// Rounds counted so far.
    pub fn completed(&self) -> u32 {
        self.wins_first + self.wins_second + self.draws
    }

    /// Tournament verdict if it ended with this score.
    pub fn standing(&self) -> OverallResult {
        match self.wins_first.cmp(&self.wins_second) {
            std::cmp::Ordering::Greater => OverallResult::Winner(Symbol::First),
            std::cmp::Ordering::Less => OverallResult::Winner(Symbol::Second),
            std::cmp::Ordering::Equal => OverallResult::Tie,
        }
    }

    fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(Symbol::First) => self.wins_first += 1,
            RoundOutcome::Win(Symbol::Second) => self.wins_second += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
    }
}

/// Final verdict. Equal win counts tie, however many rounds were drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallResult {
    /// Strictly more round wins.
    Winner(Symbol),
    /// Same number of round wins.
    Tie,
}

impl std::fmt::Display for OverallResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OverallResult::Winner(symbol) => write!(f, "{symbol} wins the tournament"),
            OverallResult::Tie => write!(f, "Tournament tied"),
        }
    }
}

/// Result of a finished tournament, as handed to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TournamentSummary {
    /// Rounds won by X.
    pub wins_first: u32,
    /// Rounds won by O.
    pub wins_second: u32,
    /// Drawn rounds.
    pub draws: u32,
    /// Rounds played.
    pub total_rounds: u32,
    /// Overall verdict.
    pub overall: OverallResult,
}

/// Snapshot of a running tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentState {
    round_index: u32,
    total_rounds: u32,
    score: TournamentScore,
    round: GameRound,
}

impl TournamentState {
    /// 1-based index of the active (or last) round.
    pub fn round_index(&self) -> u32 {
        self.round_index
    }

    /// Rounds the tournament will play.
    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    /// Running score.
    pub fn score(&self) -> TournamentScore {
        self.score
    }

    /// Active round. After the tournament ends this is the final round.
    pub fn round(&self) -> &GameRound {
        &self.round
    }
}

/// What a committed move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Same round continues.
    InProgress,
    /// Round finished and the next one has already started.
    RoundOver {
        /// How the round ended.
        outcome: RoundOutcome,
        /// Board as it was when the round ended.
        final_board: Board,
    },
    /// Last round finished.
    TournamentOver {
        /// How the last round ended.
        outcome: RoundOutcome,
        /// Board as it was when the round ended.
        final_board: Board,
        /// Final tally.
        summary: TournamentSummary,
    },
}

/// A move accepted by the tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    /// Symbol that moved.
    pub symbol: Symbol,
    /// Where it moved.
    pub mv: Move,
    /// Consequence of the move.
    pub progress: Progress,
}

/// A tournament of `total_rounds` rounds.
#[derive(Debug, Clone)]
pub struct Tournament {
    state: TournamentState,
    roles: PlayerRoles,
    selector: Option<MoveSelector>,
    result: Option<TournamentSummary>,
}

impl Tournament {
    /// Human against the computer: the human plays `human`, the computer
    /// the other symbol at `difficulty`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoRounds`] if `total_rounds` is zero.
    pub fn against_computer(
        total_rounds: u32,
        human: Symbol,
        difficulty: Difficulty,
    ) -> Result<Self, PlayError> {
        Self::start(total_rounds, PlayerRoles::against_computer(human, difficulty))
    }

    /// Starts a tournament with a randomly seeded computer opponent.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoRounds`] if `total_rounds` is zero.
    pub fn start(total_rounds: u32, roles: PlayerRoles) -> Result<Self, PlayError> {
        Self::start_seeded(total_rounds, roles, rand::random())
    }

    /// Starts a tournament whose computer opponent is reproducible.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoRounds`] if `total_rounds` is zero.
    #[instrument(skip(roles), fields(automated = ?roles.automated()))]
    pub fn start_seeded(
        total_rounds: u32,
        roles: PlayerRoles,
        seed: u64,
    ) -> Result<Self, PlayError> {
        if total_rounds == 0 {
            warn!("Refusing to start a tournament without rounds");
            return Err(PlayError::NoRounds);
        }

        let selector = roles
            .automated()
            .map(|(symbol, difficulty)| MoveSelector::with_seed(difficulty, symbol, seed));

        info!(total_rounds, "Tournament started");
        Ok(Self {
            state: TournamentState {
                round_index: 1,
                total_rounds,
                score: TournamentScore::default(),
                round: GameRound::new(),
            },
            roles,
            selector,
            result: None,
        })
    }

    /// Current snapshot.
    pub fn state(&self) -> &TournamentState {
        &self.state
    }

    /// Controller assignment.
    pub fn roles(&self) -> PlayerRoles {
        self.roles
    }

    /// Running score.
    pub fn current_score(&self) -> TournamentScore {
        self.state.score
    }

    /// Final tally; `None` until the last round has ended.
    pub fn result(&self) -> Option<&TournamentSummary> {
        self.result.as_ref()
    }

    /// Returns true once the last round has ended.
    pub fn is_finished(&self) -> bool {
        self.result.is_some()
    }

    /// Symbol to move and who controls it, or `None` once finished.
    pub fn pending_turn(&self) -> Option<(Symbol, Controller)> {
        if self.is_finished() {
            return None;
        }
        let symbol = self.state.round.to_move();
        Some((symbol, self.roles.controller(symbol)))
    }

    /// Applies a move for the human whose turn it is.
    ///
    /// # Errors
    ///
    /// - [`PlayError::RoundAlreadyOver`] after the last round
    /// - [`PlayError::NotHumanTurn`] while the computer is to move
    /// - [`PlayError::IllegalMove`] for an occupied or out-of-range square
    #[instrument(skip(self), fields(round = self.state.round_index))]
    pub fn submit_human_move(&mut self, row: usize, col: usize) -> Result<MoveReport, PlayError> {
        let (symbol, controller) = self.pending_turn().ok_or(PlayError::RoundAlreadyOver)?;
        if controller != Controller::Human {
            debug!(%symbol, "Human move during computer turn");
            return Err(PlayError::NotHumanTurn);
        }

        let mv = Move::new(row, col);
        let status = self.state.round.play(mv)?;
        Ok(self.after_move(symbol, mv, status))
    }

    /// Lets the computer choose and commit its move.
    ///
    /// # Errors
    ///
    /// - [`PlayError::RoundAlreadyOver`] after the last round
    /// - [`PlayError::NotAutomatedTurn`] while a human is to move
    #[instrument(skip(self), fields(round = self.state.round_index))]
    pub fn poll_automated_move(&mut self) -> Result<MoveReport, PlayError> {
        let (symbol, controller) = self.pending_turn().ok_or(PlayError::RoundAlreadyOver)?;
        let selector = match (controller, self.selector.as_mut()) {
            (Controller::Automated(_), Some(selector)) => selector,
            _ => return Err(PlayError::NotAutomatedTurn),
        };

        let (mv, status) = self.state.round.play_automated(selector)?;
        Ok(self.after_move(symbol, mv, status))
    }

    /// Scores a finished round and moves on.
    fn after_move(&mut self, symbol: Symbol, mv: Move, status: RoundStatus) -> MoveReport {
        let progress = match status.outcome() {
            None => Progress::InProgress,
            Some(outcome) => self.finish_round(outcome),
        };
        MoveReport {
            symbol,
            mv,
            progress,
        }
    }

    fn finish_round(&mut self, outcome: RoundOutcome) -> Progress {
        let final_board = *self.state.round.board();
        self.state.score.record(outcome);
        info!(
            round = self.state.round_index,
            %outcome,
            wins_first = self.state.score.wins_first,
            wins_second = self.state.score.wins_second,
            draws = self.state.score.draws,
            "Round finished"
        );

        if self.state.round_index < self.state.total_rounds {
            self.state.round_index += 1;
            self.state.round = GameRound::new();
            return Progress::RoundOver {
                outcome,
                final_board,
            };
        }

        let score = self.state.score;
        let summary = TournamentSummary {
            wins_first: score.wins_first,
            wins_second: score.wins_second,
            draws: score.draws,
            total_rounds: self.state.total_rounds,
            overall: score.standing(),
        };
        info!(overall = %summary.overall, "Tournament finished");
        self.result = Some(summary);
        Progress::TournamentOver {
            outcome,
            final_board,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_reject_two_computers() {
        let json = r#"{"first":{"Automated":"hard"},"second":{"Automated":"easy"}}"#;
        let err = serde_json::from_str::<PlayerRoles>(json).unwrap_err();
        assert!(err.to_string().contains("at most one side"));

        let roles = PlayerRoles::against_computer(Symbol::Second, Difficulty::Medium);
        let json = serde_json::to_string(&roles).unwrap();
        assert_eq!(serde_json::from_str::<PlayerRoles>(&json).unwrap(), roles);
    }

    #[test]
    fn test_summary_serializes_symbol_names() {
        let mut t = Tournament::start(1, PlayerRoles::hot_seat()).unwrap();
        let Progress::TournamentOver { summary, .. } = x_wins(&mut t).progress else {
            panic!("single round should end the tournament");
        };
        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["overall"]["Winner"], "X");
        assert_eq!(json["wins_first"], 1);
        let back: TournamentSummary = serde_json::from_value(json).unwrap();
        assert_eq!(back, summary);
    }

    /// Top-row win for X in a hot-seat round.
    fn x_wins(t: &mut Tournament) -> MoveReport {
        t.submit_human_move(0, 0).unwrap();
        t.submit_human_move(1, 0).unwrap();
        t.submit_human_move(0, 1).unwrap();
        t.submit_human_move(1, 1).unwrap();
        t.submit_human_move(0, 2).unwrap()
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = Tournament::start(0, PlayerRoles::hot_seat()).unwrap_err();
        assert_eq!(err, PlayError::NoRounds);
    }

    #[test]
    fn test_round_win_starts_next_round() {
        let mut t = Tournament::start(2, PlayerRoles::hot_seat()).unwrap();
        let report = x_wins(&mut t);
        assert_eq!(report.symbol, Symbol::First);
        match report.progress {
            Progress::RoundOver {
                outcome,
                final_board,
            } => {
                assert_eq!(outcome, RoundOutcome::Win(Symbol::First));
                assert_eq!(final_board.count(Symbol::First), 3);
            }
            other => panic!("expected RoundOver, got {other:?}"),
        }
        assert_eq!(t.state().round_index(), 2);
        assert!(t.state().round().board().is_blank());
        assert_eq!(t.state().round().to_move(), Symbol::First);
        assert_eq!(t.current_score().wins_first(), 1);
        assert!(t.result().is_none());
    }

    #[test]
    fn test_final_round_populates_result() {
        let mut t = Tournament::start(1, PlayerRoles::hot_seat()).unwrap();
        let report = x_wins(&mut t);
        let Progress::TournamentOver { summary, .. } = report.progress else {
            panic!("expected TournamentOver");
        };
        assert_eq!(summary.overall, OverallResult::Winner(Symbol::First));
        assert_eq!(t.result(), Some(&summary));
        assert_eq!(t.state().round_index(), 1);
        assert_eq!(t.pending_turn(), None);
        assert_eq!(t.submit_human_move(2, 2), Err(PlayError::RoundAlreadyOver));
    }

    #[test]
    fn test_human_cannot_move_for_computer() {
        let mut t =
            Tournament::start_seeded(1, PlayerRoles::against_computer(Symbol::Second, Difficulty::Easy), 4)
                .unwrap();
        assert_eq!(t.submit_human_move(1, 1), Err(PlayError::NotHumanTurn));
        assert!(t.state().round().board().is_blank());

        let report = t.poll_automated_move().unwrap();
        assert_eq!(report.symbol, Symbol::First);
        assert_eq!(t.poll_automated_move(), Err(PlayError::NotAutomatedTurn));
    }

    #[test]
    fn test_hot_seat_has_no_computer() {
        let mut t = Tournament::start(1, PlayerRoles::hot_seat()).unwrap();
        assert_eq!(t.poll_automated_move(), Err(PlayError::NotAutomatedTurn));
        assert_eq!(t.roles().automated(), None);
    }

    #[test]
    fn test_illegal_move_leaves_state_alone() {
        let mut t = Tournament::start(1, PlayerRoles::hot_seat()).unwrap();
        t.submit_human_move(1, 1).unwrap();
        let before = t.state().clone();
        assert!(matches!(
            t.submit_human_move(1, 1),
            Err(PlayError::IllegalMove { .. })
        ));
        assert!(matches!(
            t.submit_human_move(5, 0),
            Err(PlayError::IllegalMove { .. })
        ));
        assert_eq!(t.state(), &before);
    }

    #[test]
    fn test_equal_wins_tie_regardless_of_draws() {
        let mut score = TournamentScore::default();
        score.record(RoundOutcome::Win(Symbol::First));
        score.record(RoundOutcome::Win(Symbol::Second));
        score.record(RoundOutcome::Draw);
        score.record(RoundOutcome::Draw);
        assert_eq!(score.standing(), OverallResult::Tie);
        assert_eq!(score.completed(), 4);

        let all_draws = TournamentScore {
            draws: 3,
            ..TournamentScore::default()
        };
        assert_eq!(all_draws.standing(), OverallResult::Tie);
    }

    #[test]
    fn test_roles_assign_computer_to_other_symbol() {
        let roles = PlayerRoles::against_computer(Symbol::First, Difficulty::Hard);
        assert_eq!(roles.controller(Symbol::First), Controller::Human);
        assert_eq!(
            roles.automated(),
            Some((Symbol::Second, Difficulty::Hard))
        );
    }
}
