//! Othello (Reversi) rules and turn state machine.

mod action;
mod board;
mod game;
pub mod invariants;
mod types;

pub use action::{Move, MoveError, Turn};
pub use board::{Board, BoardError};
pub use game::{Game, GameStatus, ReplayError, Step};
pub use types::{
    BOARD_SIZE, Color, DIRECTIONS, Direction, Piece, Position, PositionParseError, Score,
};
