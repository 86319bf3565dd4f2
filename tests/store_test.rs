//! Tests for the JSON-lines result store.

use std::io::Write;
use tempfile::{NamedTempFile, TempDir};
use xo::{JsonLinesStore, ResultStore};
use xo_tictactoe::{OverallResult, Symbol, TournamentSummary};

fn summary(wins_first: u32, wins_second: u32, draws: u32) -> TournamentSummary {
    let overall = match wins_first.cmp(&wins_second) {
        std::cmp::Ordering::Greater => OverallResult::Winner(Symbol::First),
        std::cmp::Ordering::Less => OverallResult::Winner(Symbol::Second),
        std::cmp::Ordering::Equal => OverallResult::Tie,
    };
    TournamentSummary {
        wins_first,
        wins_second,
        draws,
        total_rounds: wins_first + wins_second + draws,
        overall,
    }
}

#[test]
fn test_missing_file_is_empty_history() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonLinesStore::new(dir.path().join("none.jsonl"));
    assert!(store.load_all().unwrap().is_empty());
}

#[test]
fn test_saved_results_load_in_order() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonLinesStore::new(dir.path().join("results.jsonl"));

    let first = store.save(&summary(3, 1, 1)).unwrap();
    let second = store.save(&summary(1, 1, 3)).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, vec![first, second]);
    assert_eq!(loaded[1].summary.overall, OverallResult::Tie);
}

#[test]
fn test_unreadable_lines_are_skipped() {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    writeln!(file, "not json").unwrap();
    let store = JsonLinesStore::new(file.path().to_path_buf());
    store.save(&summary(0, 2, 0)).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].summary.wins_second, 2);
}

#[test]
fn test_unwritable_path_reports_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = JsonLinesStore::new(dir.path().join("missing").join("results.jsonl"));
    let err = store.save(&summary(1, 0, 0)).unwrap_err();
    assert!(err.message.contains("Failed to open"));
}
