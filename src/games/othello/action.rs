//! Moves and turn records.
//!
//! A move is the intent to place a piece; a turn is what actually happened
//! when the game advanced, including forced passes.

use super::board::BoardError;
use super::types::{Color, Position};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// A placement: a color putting a piece at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The color placing the piece.
    pub color: Color,
    /// Where the piece goes.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.color, self.position)
    }
}

/// One entry of the game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    /// A piece was placed and the listed pieces flipped.
    Placed {
        /// The placement.
        mv: Move,
        /// Captured positions, in scan order.
        flipped: Vec<Position>,
    },
    /// The color had no legal move and the turn passed.
    Passed(Color),
}

impl Turn {
    /// Returns the placement if this turn was one.
    pub fn placement(&self) -> Option<&Move> {
        match self {
            Turn::Placed { mv, .. } => Some(mv),
            Turn::Passed(_) => None,
        }
    }
}

/// Error that can occur when applying a move to a game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum MoveError {
    /// The game is already over.
    #[display("Game is already over")]
    GameOver,

    /// The move is not legal for the side to move.
    #[display("Rejected move {_0}")]
    Rejected(#[error(not(source))] Move),

    /// The board refused the placement.
    #[from]
    #[display("{_0}")]
    Board(BoardError),

    /// A postcondition failed after the move was applied.
    #[display("Invariant violation: {_0}")]
    InvariantViolation(#[error(not(source))] String),
}
