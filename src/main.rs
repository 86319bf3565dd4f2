//! xo - terminal tic-tac-toe tournaments.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use xo::cli::{Cli, Command, PlayArgs};
use xo::players::stdin_lines;
use xo::render::{history_line, render_event};
use xo::{HumanPlayer, JsonLinesStore, Orchestrator, ResultStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs to stderr, game output to stdout
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play(args) => run_play(args).await,
        Command::History { results } => run_history(results),
    }
}

/// Play one tournament in the terminal.
#[instrument(skip_all)]
async fn run_play(args: PlayArgs) -> Result<()> {
    let config = args.load_config()?;
    let tournament = config.start_tournament()?;
    info!(rounds = config.rounds(), versus_computer = config.versus_computer(), "Starting session");

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if let Some(text) = render_event(&event) {
                println!("{}", text);
            }
        }
    });

    let human = HumanPlayer::new("You", stdin_lines());
    let mut orchestrator = Orchestrator::from_config(&config, Box::new(human), event_tx);
    if let Some(path) = config.results_path() {
        orchestrator = orchestrator.with_store(Arc::new(JsonLinesStore::new(path.clone())));
    }

    let summary = orchestrator.run(tournament).await?;
    printer.await.context("Event printer failed")?;

    if summary.is_none() {
        println!("Goodbye.");
    }
    Ok(())
}

/// Print stored tournament results.
#[instrument(fields(path = %results.display()))]
fn run_history(results: std::path::PathBuf) -> Result<()> {
    let store = JsonLinesStore::new(results);
    let records = store.load_all()?;
    if records.is_empty() {
        println!("No saved tournaments in {}", store.path().display());
        return Ok(());
    }
    for record in &records {
        println!("{}", history_line(record));
    }
    Ok(())
}
