//! Storage for finished tournaments.

use chrono::{DateTime, Utc};
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};
use xo_tictactoe::TournamentSummary;

/// A tournament summary with the time it was stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    /// When the result was saved.
    pub saved_at: DateTime<Utc>,
    /// Final tally.
    pub summary: TournamentSummary,
}

/// Accepts finished tournaments.
pub trait ResultStore: Send + Sync {
    /// Stores one finished tournament.
    fn save(&self, summary: &TournamentSummary) -> Result<StoredResult, StoreError>;

    /// Returns every stored result, oldest first.
    fn load_all(&self) -> Result<Vec<StoredResult>, StoreError>;
}

/// Appends results to a file, one JSON object per line.
#[derive(Debug, Clone, new)]
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    /// File backing this store.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ResultStore for JsonLinesStore {
    #[instrument(skip(self, summary), fields(path = %self.path.display(), overall = ?summary.overall))]
    fn save(&self, summary: &TournamentSummary) -> Result<StoredResult, StoreError> {
        let record = StoredResult {
            saved_at: Utc::now(),
            summary: *summary,
        };
        let line = serde_json::to_string(&record)
            .map_err(|e| StoreError::new(format!("Failed to encode result: {}", e)))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to open '{}': {}", self.path.display(), e)))?;
        writeln!(file, "{}", line)
            .map_err(|e| StoreError::new(format!("Failed to write '{}': {}", self.path.display(), e)))?;

        info!("Tournament result saved");
        Ok(record)
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> Result<Vec<StoredResult>, StoreError> {
        if !self.path.exists() {
            debug!("No results file yet");
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| StoreError::new(format!("Failed to read '{}': {}", self.path.display(), e)))?;

        let mut results = Vec::new();
        for (number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StoredResult>(line) {
                Ok(record) => results.push(record),
                Err(e) => {
                    warn!(line = number + 1, error = %e, "Skipping unreadable result");
                }
            }
        }

        debug!(count = results.len(), "Results loaded");
        Ok(results)
    }
}

/// Storage error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Store error: {} at {}:{}", message, file, line)]
pub struct StoreError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl StoreError {
    /// Creates a new storage error with caller location tracking.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
