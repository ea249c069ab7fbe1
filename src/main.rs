//! Hero tic-tac-toe - Unified CLI
//!
//! Play the rule-based opponent, ask it for a move, or benchmark it.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use hero_tictactoe::{BoardConsistent, Board, Mark, RuleEngine, Settings, rules, simulate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let settings = Settings::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load settings from {}", cli.config.display()))?;

    match cli.command {
        Command::Play { delay_ms } => {
            let settings = settings.with_overrides(delay_ms, cli.seed);
            tui::run_tui(settings).await
        }
        Command::Suggest { board, side } => {
            initialize_tracing();
            let settings = settings.with_overrides(None, cli.seed);
            run_suggest(&board, side.into(), *settings.seed())
        }
        Command::Simulate { games, json } => {
            initialize_tracing();
            let settings = settings.with_overrides(None, cli.seed);
            run_simulate(games, json, *settings.seed())
        }
    }
}

/// Print the engine's choice for a board given on the command line
#[instrument]
fn run_suggest(board: &str, side: Mark, seed: Option<u64>) -> Result<()> {
    let board: Board = board.parse().context("Invalid board")?;
    BoardConsistent::check(&board)?;
    if let Some(outcome) = rules::evaluate(&board) {
        bail!("Game is already over: {}", outcome);
    }

    let decision = RuleEngine::from_seed(seed).decide(&board, side, side.opponent())?;
    info!(?decision, "Suggestion computed");

    println!("{}\n", board.display());
    println!(
        "{} plays {} ({}) via {}",
        side,
        decision.position.to_index(),
        decision.position.label(),
        decision.strategy
    );
    Ok(())
}

/// Run headless self-play and print the tally
#[instrument]
fn run_simulate(games: usize, json: bool, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };

    let tally = simulate(games, seed, &mut rng)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&tally)?);
    } else {
        println!("{}", tally);
    }
    Ok(())
}

fn initialize_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,hero_tictactoe=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
