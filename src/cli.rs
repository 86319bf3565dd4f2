//! Command-line interface for xo.

use crate::config::GameConfig;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use xo_tictactoe::{Difficulty, Symbol};

/// xo - tic-tac-toe tournaments in the terminal
#[derive(Parser, Debug)]
#[command(name = "xo")]
#[command(about = "Play best-of-N tic-tac-toe against the computer or a friend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a tournament
    Play(PlayArgs),

    /// List saved tournament results
    History {
        /// Results file written by `play --save`
        #[arg(long, default_value = "xo_results.jsonl")]
        results: PathBuf,
    },
}

/// Options for `xo play`. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of rounds
    #[arg(short, long)]
    pub rounds: Option<u32>,

    /// Symbol you play (X moves first)
    #[arg(short, long)]
    pub symbol: Option<Symbol>,

    /// Computer strength: easy, medium or hard
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Two humans take turns at the same terminal
    #[arg(long)]
    pub hot_seat: bool,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Append the final result to this file
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Skip the pauses before computer moves and between rounds
    #[arg(long)]
    pub fast: bool,
}

impl PlayArgs {
    /// Loads the config file, if any, and applies flag overrides.
    pub fn load_config(&self) -> Result<GameConfig> {
        let base = match &self.config {
            Some(path) => GameConfig::from_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
            None => GameConfig::default(),
        };
        self.apply(base)
    }

    /// Applies flag overrides to `config`.
    pub fn apply(&self, mut config: GameConfig) -> Result<GameConfig> {
        if let Some(rounds) = self.rounds {
            config = config.with_rounds(rounds);
        }
        if let Some(symbol) = self.symbol {
            config = config.with_human_symbol(symbol);
        }
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty);
        }
        if self.hot_seat {
            config = config.with_versus_computer(false);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if self.save.is_some() {
            config = config.with_results_path(self.save.clone());
        }
        if self.fast {
            config = config.with_bot_delay_ms(0).with_round_pause_ms(0);
        }
        config.validate()?;
        debug!(?config, "Effective configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from([
            "xo", "play", "--rounds", "3", "--symbol", "o", "--difficulty", "Hard", "--fast",
        ])
        .unwrap();
        let Command::Play(args) = cli.command else {
            panic!("expected play");
        };
        assert_eq!(args.rounds, Some(3));
        assert_eq!(args.symbol, Some(Symbol::Second));
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert!(args.fast);
    }

    #[test]
    fn test_flags_override_config() {
        let args = PlayArgs {
            rounds: Some(1),
            hot_seat: true,
            fast: true,
            ..PlayArgs::default()
        };
        let config = args.apply(GameConfig::default()).unwrap();
        assert_eq!(*config.rounds(), 1);
        assert!(!config.versus_computer());
        assert_eq!(*config.bot_delay_ms(), 0);
        assert_eq!(*config.round_pause_ms(), 0);
    }

    #[test]
    fn test_zero_rounds_flag_rejected() {
        let args = PlayArgs {
            rounds: Some(0),
            ..PlayArgs::default()
        };
        assert!(args.apply(GameConfig::default()).is_err());
    }

    #[test]
    fn test_history_default_path() {
        let cli = Cli::try_parse_from(["xo", "history"]).unwrap();
        let Command::History { results } = cli.command else {
            panic!("expected history");
        };
        assert_eq!(results, PathBuf::from("xo_results.jsonl"));
    }
}
