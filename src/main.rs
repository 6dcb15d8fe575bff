//! Strictly Othello - command-line match runner.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use strictly_othello::{ConsoleObserver, Game, Orchestrator, Position, build_players};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => run_match(args).await,
        Command::Replay { moves } => run_replay(&moves),
    }
}

/// Play one match on the console
#[instrument(skip_all)]
async fn run_match(args: PlayArgs) -> Result<()> {
    let config = args.into_config()?;
    info!(?config, "Starting match");

    let (black, white) = build_players(&config);
    let observer = ConsoleObserver::new(std::io::stdout());
    let mut orchestrator = Orchestrator::new(black, white, Box::new(observer))
        .with_max_rejections(*config.max_rejections());

    let score = orchestrator.run().await?;
    info!(winner = ?score.winner(), "Match complete");
    Ok(())
}

/// Replay a move list and print where it leads
#[instrument]
fn run_replay(moves: &str) -> Result<()> {
    let positions: Vec<Position> =
        serde_json::from_str(moves).context("Moves must be a JSON list of [x, y] pairs")?;
    let game = Game::replay(&positions)?;

    print!("{}", game.board());
    match game.turn() {
        Some(color) => println!("{} to move", color),
        None => println!("The game is over!"),
    }
    println!("{}", game.score());
    Ok(())
}
