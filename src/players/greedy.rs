//! Greedy computer player: takes the move that flips the most pieces.

use super::Player;
use crate::games::othello::{Board, Color, Game, Position};
use anyhow::{Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Picks uniformly among the moves with the highest capture count.
pub struct GreedyPlayer {
    name: String,
    rng: StdRng,
}

impl GreedyPlayer {
    /// Creates a greedy player with an entropy-seeded tie-breaker.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a greedy player whose tie-breaking is reproducible.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// All legal moves for `color` that capture the most pieces, in board
    /// scan order. Empty when `color` cannot move.
    #[instrument(skip(board))]
    pub fn best_moves(board: &Board, color: Color) -> Vec<Position> {
        let scored: Vec<(Position, usize)> = board
            .valid_moves(color)
            .into_iter()
            .map(|pos| (pos, board.positions_to_flip(pos, color).len()))
            .collect();

        let most = scored.iter().map(|&(_, flips)| flips).max().unwrap_or(0);
        scored
            .into_iter()
            .filter(|&(_, flips)| flips == most)
            .map(|(pos, _)| pos)
            .collect()
    }
}

#[async_trait::async_trait]
impl Player for GreedyPlayer {
    async fn get_move(&mut self, game: &Game) -> Result<Position> {
        let color = game.turn().ok_or_else(|| anyhow!("Game is already over"))?;
        let candidates = Self::best_moves(game.board(), color);

        let choice = candidates
            .choose(&mut self.rng)
            .copied()
            .ok_or_else(|| anyhow!("No valid moves available for {}", color))?;

        debug!(ai = %self.name, position = %choice, tied = candidates.len(), "AI chose position");
        Ok(choice)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
