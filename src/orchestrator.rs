//! Match orchestration between two players.

use crate::games::othello::{Color, Game, MoveError, Score, Step};
use crate::observer::{GameEvent, GameObserver};
use crate::players::Player;
use anyhow::{Context, Result, bail};
use tracing::{debug, info, instrument, warn};

/// Drives a match to completion.
///
/// Asks the player whose turn it is for a move, validates and applies it,
/// and reports every step to the observer. Forced passes never reach a
/// player.
pub struct Orchestrator {
    game: Game,
    black: Box<dyn Player>,
    white: Box<dyn Player>,
    observer: Box<dyn GameObserver>,
    max_rejections: Option<u32>,
}

impl Orchestrator {
    /// Creates an orchestrator for a fresh game.
    pub fn new(
        black: Box<dyn Player>,
        white: Box<dyn Player>,
        observer: Box<dyn GameObserver>,
    ) -> Self {
        Self {
            game: Game::new(),
            black,
            white,
            observer,
            max_rejections: None,
        }
    }

    /// Starts from `game` instead of a fresh one.
    pub fn with_game(mut self, game: Game) -> Self {
        self.game = game;
        self
    }

    /// Aborts the match after this many rejected moves in a row.
    pub fn with_max_rejections(mut self, max_rejections: Option<u32>) -> Self {
        self.max_rejections = max_rejections;
        self
    }

    /// Returns the game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Runs the game loop until neither side can move.
    ///
    /// Returns the final score.
    ///
    /// # Errors
    ///
    /// Fails if a player cannot produce a move, the rejection limit is hit,
    /// or the observer fails.
    #[instrument(skip(self), fields(black = %self.black.name(), white = %self.white.name()))]
    pub async fn run(&mut self) -> Result<Score> {
        info!("Starting match");

        loop {
            match self.game.advance() {
                Step::Over(score) => {
                    self.observer.on_event(&GameEvent::GameOver {
                        board: self.game.board().clone(),
                        score,
                    })?;
                    info!(
                        white = score.white,
                        black = score.black,
                        plies = self.game.plies(),
                        "Match finished"
                    );
                    return Ok(score);
                }
                Step::Passed(color) => self.observer.on_event(&GameEvent::Passed(color))?,
                Step::ToMove(color) => self.play_turn(color).await?,
            }
        }
    }

    /// Asks `color`'s player for moves until one is accepted.
    async fn play_turn(&mut self, color: Color) -> Result<()> {
        let mut rejections = 0;

        loop {
            let player = match color {
                Color::Black => &mut self.black,
                Color::White => &mut self.white,
            };
            let name = player.name().to_string();

            self.observer.on_event(&GameEvent::TurnStarted {
                color,
                player: name.clone(),
                board: self.game.board().clone(),
            })?;

            debug!(player = %name, %color, "Waiting for move");
            let position = player
                .get_move(&self.game)
                .await
                .with_context(|| format!("{} could not produce a move", name))?;

            match self.game.play(position) {
                Ok(flipped) => {
                    self.observer.on_event(&GameEvent::MoveMade {
                        color,
                        player: name,
                        position,
                        flipped,
                    })?;
                    return Ok(());
                }
                Err(MoveError::Rejected(mv)) => {
                    warn!(player = %name, %mv, "Rejected move");
                    self.observer.on_event(&GameEvent::InvalidMove {
                        color,
                        player: name.clone(),
                        position,
                    })?;

                    rejections += 1;
                    if let Some(max) = self.max_rejections
                        && rejections >= max
                    {
                        bail!("{} made {} invalid moves in a row", name, rejections);
                    }
                }
                Err(e) => return Err(e).context("Failed to apply move"),
            }
        }
    }
}
