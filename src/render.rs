//! Plain-text presentation of game events.

use crate::orchestrator::GameEvent;
use crate::store::StoredResult;
use xo_tictactoe::{Controller, OverallResult, RoundOutcome, TournamentScore, TournamentSummary};

/// Formats the running score.
pub fn score_line(score: &TournamentScore) -> String {
    format!(
        "Score  X: {}  O: {}  Draws: {}",
        score.wins_first(),
        score.wins_second(),
        score.draws()
    )
}

/// Formats the final tally.
pub fn summary_text(summary: &TournamentSummary) -> String {
    let banner = match summary.overall {
        OverallResult::Winner(symbol) => format!("*** Player {} wins the tournament! ***", symbol),
        OverallResult::Tie => "*** Perfect tie! ***".to_string(),
    };
    format!(
        "{}\nX: {}  O: {}  Draws: {}  ({} rounds)",
        banner, summary.wins_first, summary.wins_second, summary.draws, summary.total_rounds
    )
}

/// One line per stored tournament, for the history listing.
pub fn history_line(record: &StoredResult) -> String {
    let s = &record.summary;
    let verdict = match s.overall {
        OverallResult::Winner(symbol) => format!("{} won", symbol),
        OverallResult::Tie => "tie".to_string(),
    };
    format!(
        "{}  {:<6}  X {} - {} O, {} draws, {} rounds",
        record.saved_at.format("%Y-%m-%d %H:%M"),
        verdict,
        s.wins_first,
        s.wins_second,
        s.draws,
        s.total_rounds
    )
}

/// Text shown for an event, or `None` for events with nothing to show.
pub fn render_event(event: &GameEvent) -> Option<String> {
    let text = match event {
        GameEvent::RoundStarted {
            round,
            total_rounds,
        } => format!("\n=== Round {}/{} ===", round, total_rounds),
        GameEvent::TurnStarted {
            symbol,
            controller,
            board,
        } => {
            let prompt = match controller {
                Controller::Human => format!("{} to move (1-9, or 'row col'; q quits):", symbol),
                Controller::Automated(difficulty) => {
                    format!("Computer ({}, {}) is thinking...", symbol, difficulty)
                }
            };
            format!("\n{}\n\n{}", board.display(), prompt)
        }
        GameEvent::MovePlayed { symbol, mv } => format!("{} plays {}", symbol, mv),
        GameEvent::MoveRejected { reason } => format!("Rejected: {}", reason),
        GameEvent::RoundFinished {
            round,
            outcome,
            board,
            score,
        } => {
            let verdict = match outcome {
                RoundOutcome::Win(symbol) => format!("Player {} wins round {}!", symbol, round),
                RoundOutcome::Draw => format!("Round {} is a draw.", round),
            };
            format!("\n{}\n\n{}\n{}", board.display(), verdict, score_line(score))
        }
        GameEvent::TournamentFinished(summary) => format!("\n{}", summary_text(summary)),
        GameEvent::ResultSaved(_) => "Result saved.".to_string(),
        GameEvent::SaveFailed(reason) => format!("Could not save result: {}", reason),
        GameEvent::PlayerLeft => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use xo_tictactoe::{Board, Difficulty, Move, Symbol};

    #[test]
    fn test_summary_text_names_winner() {
        let summary = TournamentSummary {
            wins_first: 3,
            wins_second: 1,
            draws: 1,
            total_rounds: 5,
            overall: OverallResult::Winner(Symbol::First),
        };
        let text = summary_text(&summary);
        assert!(text.contains("Player X wins"));
        assert!(text.contains("(5 rounds)"));
    }

    #[test]
    fn test_turn_prompt_depends_on_controller() {
        let human = render_event(&GameEvent::TurnStarted {
            symbol: Symbol::Second,
            controller: Controller::Human,
            board: Board::new(),
        })
        .unwrap();
        assert!(human.contains("O to move"));

        let computer = render_event(&GameEvent::TurnStarted {
            symbol: Symbol::First,
            controller: Controller::Automated(Difficulty::Hard),
            board: Board::new(),
        })
        .unwrap();
        assert!(computer.contains("Computer (X, hard)"));
    }

    #[test]
    fn test_move_played_shows_coordinates() {
        let text = render_event(&GameEvent::MovePlayed {
            symbol: Symbol::First,
            mv: Move::new(2, 1),
        })
        .unwrap();
        assert_eq!(text, "X plays (2, 1)");
    }
}
