//! Player trait and implementations.

mod greedy;
mod human;

pub use greedy::GreedyPlayer;
pub use human::HumanPlayer;

use crate::config::{MatchConfig, PlayerKind, PlayerSettings};
use crate::games::othello::{Color, Game, Position};
use crate::io::{self, InputChannel};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument};

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player for the side to move in `game`.
    ///
    /// The move is not checked here; the orchestrator validates it and asks
    /// again if the board rejects it.
    async fn get_move(&mut self, game: &Game) -> Result<Position>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Builds the black and white players described by `config`.
///
/// Human players share a single console channel.
#[instrument(skip(config))]
pub fn build_players(config: &MatchConfig) -> (Box<dyn Player>, Box<dyn Player>) {
    let needs_console = [config.black(), config.white()]
        .iter()
        .any(|settings| *settings.kind() == PlayerKind::Human);
    let console = needs_console.then(|| Arc::new(Mutex::new(io::console())));

    let black = build_player(Color::Black, config.black(), config, console.clone());
    let white = build_player(Color::White, config.white(), config, console);
    info!(black = %black.name(), white = %white.name(), "Players ready");
    (black, white)
}

fn build_player<I>(
    color: Color,
    settings: &PlayerSettings,
    config: &MatchConfig,
    console: Option<I>,
) -> Box<dyn Player>
where
    I: InputChannel + 'static,
{
    let name = settings.display_name(color);
    match (settings.kind(), console) {
        (PlayerKind::Human, Some(input)) => {
            Box::new(HumanPlayer::new(name, input).with_max_attempts(*config.max_rejections()))
        }
        _ => {
            // Distinct streams per side so a seeded match is not mirrored.
            let seed = (*config.seed()).map(|seed| match color {
                Color::Black => seed,
                Color::White => seed.wrapping_add(1),
            });
            match seed {
                Some(seed) => Box::new(GreedyPlayer::seeded(name, seed)),
                None => Box::new(GreedyPlayer::new(name)),
            }
        }
    }
}
