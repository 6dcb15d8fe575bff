//! Command-line interface for strictly_othello.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use strictly_othello::{MatchConfig, PlayerKind};

/// Strictly Othello - play Othello between humans and computer players
#[derive(Parser, Debug)]
#[command(name = "strictly_othello")]
#[command(about = "Othello rules engine and match runner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one match to completion
    Play(PlayArgs),

    /// Replay a move list and print the resulting position
    Replay {
        /// JSON list of [x, y] positions, e.g. '[[2,3],[2,2]]'
        moves: String,
    },
}

/// Options for a match. Flags override the config file.
#[derive(Args, Debug, Default)]
pub struct PlayArgs {
    /// Path to a TOML match configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Who plays black
    #[arg(long, value_enum)]
    pub black: Option<PlayerKind>,

    /// Who plays white
    #[arg(long, value_enum)]
    pub white: Option<PlayerKind>,

    /// Seed for the computer players' tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Abort after this many invalid moves in a row
    #[arg(long)]
    pub max_rejections: Option<u32>,
}

impl PlayArgs {
    /// Loads the config file, if any, and applies flag overrides.
    pub fn into_config(self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => MatchConfig::from_file(path)?,
            None => MatchConfig::default(),
        };

        if let Some(kind) = self.black {
            let settings = config.black().clone().with_kind(kind);
            config = config.with_black(settings);
        }
        if let Some(kind) = self.white {
            let settings = config.white().clone().with_kind(kind);
            config = config.with_white(settings);
        }
        if self.seed.is_some() {
            config = config.with_seed(self.seed);
        }
        if self.max_rejections.is_some() {
            config = config.with_max_rejections(self.max_rejections);
        }

        Ok(config)
    }
}
