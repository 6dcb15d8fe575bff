//! Human player that answers prompts on an input channel.

use super::Player;
use crate::games::othello::{Game, Position};
use crate::io::InputChannel;
use anyhow::{Result, anyhow, bail};
use tracing::{debug, warn};

/// Human player using a line-based input channel.
pub struct HumanPlayer<I> {
    name: String,
    input: I,
    max_attempts: Option<u32>,
}

impl<I: InputChannel> HumanPlayer<I> {
    /// Creates a new human player reading from `input`.
    pub fn new(name: impl Into<String>, input: I) -> Self {
        Self {
            name: name.into(),
            input,
            max_attempts: None,
        }
    }

    /// Gives up after this many unreadable answers in a row.
    pub fn with_max_attempts(mut self, max_attempts: Option<u32>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Returns the input channel.
    pub fn input(&self) -> &I {
        &self.input
    }
}

#[async_trait::async_trait]
impl<I: InputChannel> Player for HumanPlayer<I> {
    async fn get_move(&mut self, game: &Game) -> Result<Position> {
        let color = game.turn().ok_or_else(|| anyhow!("Game is already over"))?;
        let question = format!("{}, where do you want to move?", color);
        let mut failures = 0;

        loop {
            let answer = self.input.prompt(&question).await?;
            match answer.parse::<Position>() {
                Ok(position) => {
                    debug!(player = %self.name, %position, "Read move");
                    return Ok(position);
                }
                Err(e) => {
                    warn!(player = %self.name, error = %e, "Unreadable move");
                    self.input.notify("Invalid move!").await?;
                    failures += 1;
                    if let Some(max) = self.max_attempts
                        && failures >= max
                    {
                        bail!("{} gave {} unreadable moves in a row", self.name, failures);
                    }
                }
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
