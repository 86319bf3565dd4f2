//! Session configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, instrument};
use xo_tictactoe::{Difficulty, PlayError, PlayerRoles, Symbol, Tournament};

/// Settings for one tournament session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
#[serde(default)]
pub struct GameConfig {
    /// Rounds in the tournament.
    rounds: u32,

    /// Play against the computer (otherwise two humans share the terminal).
    versus_computer: bool,

    /// Symbol the human plays against the computer.
    human_symbol: Symbol,

    /// Computer strength.
    difficulty: Difficulty,

    /// Pause before each computer move, in milliseconds.
    bot_delay_ms: u64,

    /// Pause between rounds, in milliseconds.
    round_pause_ms: u64,

    /// Seed for the computer's random choices.
    seed: Option<u64>,

    /// Where finished tournaments are appended, if anywhere.
    results_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: 5,
            versus_computer: true,
            human_symbol: Symbol::First,
            difficulty: Difficulty::Easy,
            bot_delay_ms: 500,
            round_pause_ms: 2000,
            seed: None,
            results_path: None,
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file. Missing keys keep their defaults.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(rounds = config.rounds, difficulty = %config.difficulty, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings no tournament can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rounds == 0 {
            return Err(ConfigError::new("rounds must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Controller assignment implied by these settings.
    pub fn roles(&self) -> PlayerRoles {
        if self.versus_computer {
            PlayerRoles::against_computer(self.human_symbol, self.difficulty)
        } else {
            PlayerRoles::hot_seat()
        }
    }

    /// Starts a tournament with these settings.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::NoRounds`] if `rounds` is zero.
    pub fn start_tournament(&self) -> Result<Tournament, PlayError> {
        match self.seed {
            Some(seed) => Tournament::start_seeded(self.rounds, self.roles(), seed),
            None => Tournament::start(self.rounds, self.roles()),
        }
    }

    /// Pause before each computer move.
    pub fn bot_delay(&self) -> Duration {
        Duration::from_millis(self.bot_delay_ms)
    }

    /// Pause between rounds.
    pub fn round_pause(&self) -> Duration {
        Duration::from_millis(self.round_pause_ms)
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xo_tictactoe::Controller;

    #[test]
    fn test_defaults_match_original_settings() {
        let config = GameConfig::default();
        assert_eq!(*config.rounds(), 5);
        assert_eq!(*config.human_symbol(), Symbol::First);
        assert_eq!(config.bot_delay(), Duration::from_millis(500));
        assert_eq!(config.round_pause(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml("rounds = 3\ndifficulty = \"hard\"\nhuman_symbol = \"O\"\n")
            .unwrap();
        assert_eq!(*config.rounds(), 3);
        assert_eq!(*config.difficulty(), Difficulty::Hard);
        assert_eq!(*config.human_symbol(), Symbol::Second);
        assert_eq!(*config.bot_delay_ms(), 500);
        assert!(config.results_path().is_none());
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let err = GameConfig::from_toml("rounds = 0").unwrap_err();
        assert!(err.message.contains("rounds"));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(GameConfig::from_toml("rounds = \"five\"").is_err());
    }

    #[test]
    fn test_roles_follow_mode() {
        let config = GameConfig::default().with_human_symbol(Symbol::Second);
        assert_eq!(config.roles().controller(Symbol::Second), Controller::Human);
        assert_eq!(
            config.roles().controller(Symbol::First),
            Controller::Automated(Difficulty::Easy)
        );

        let hot_seat = config.with_versus_computer(false);
        assert_eq!(hot_seat.roles().automated(), None);
    }

    #[test]
    fn test_start_tournament_uses_rounds() {
        let config = GameConfig::default().with_rounds(3).with_seed(Some(8));
        let tournament = config.start_tournament().unwrap();
        assert_eq!(tournament.state().total_rounds(), 3);

        let empty = GameConfig::default().with_rounds(0);
        assert_eq!(empty.start_tournament().unwrap_err(), PlayError::NoRounds);
    }
}
