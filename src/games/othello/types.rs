//! Core domain types for Othello.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Side length of the board.
pub const BOARD_SIZE: i8 = 8;

/// Color of a piece, and of the side that places it.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Color {
    /// Black (moves first).
    Black,
    /// White.
    White,
}

impl Color {
    /// Returns the other color.
    pub fn opponent(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Single-character symbol used when rendering the board.
    pub fn symbol(self) -> char {
        match self {
            Color::Black => 'B',
            Color::White => 'W',
        }
    }
}

/// A piece on the board. Its color changes when captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
}

impl Piece {
    /// Creates a piece of the given color.
    pub fn new(color: Color) -> Self {
        Self { color }
    }

    /// Returns the piece's current color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Swaps the piece to the opposite color.
    pub fn flip(&mut self) {
        self.color = self.color.opponent();
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color.symbol())
    }
}

/// A board coordinate. `x` is the column, `y` the row.
///
/// Coordinates are signed so that off-board positions such as `[-1,3]`
/// can be expressed and rejected rather than wrapped.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[serde(from = "[i8; 2]", into = "[i8; 2]")]
pub struct Position {
    /// Column, 0-7 when on the board.
    pub x: i8,
    /// Row, 0-7 when on the board.
    pub y: i8,
}

impl Position {
    /// Returns the neighbouring position one step along `dir`.
    pub fn step(self, dir: Direction) -> Self {
        Self {
            x: self.x.saturating_add(dir.dx),
            y: self.y.saturating_add(dir.dy),
        }
    }

    /// All 64 board positions, outer loop over `x`, inner over `y`.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..BOARD_SIZE).flat_map(|x| (0..BOARD_SIZE).map(move |y| Position::new(x, y)))
    }
}

impl From<[i8; 2]> for Position {
    fn from([x, y]: [i8; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Position> for [i8; 2] {
    fn from(pos: Position) -> Self {
        [pos.x, pos.y]
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

/// Failure to read a position from text.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Cannot read {input:?} as a position: {reason}")]
pub struct PositionParseError {
    /// The rejected input.
    pub input: String,
    /// Why it was rejected.
    pub reason: String,
}

impl PositionParseError {
    fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Position {
    type Err = PositionParseError;

    /// Accepts a bracketed pair `[x, y]` or a bare `x,y`.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with('[') {
            return serde_json::from_str(trimmed)
                .map_err(|e| PositionParseError::new(s, e.to_string()));
        }

        let mut parts = trimmed.split(',').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(x), Some(y), None) => {
                let x = x
                    .parse::<i8>()
                    .map_err(|e| PositionParseError::new(s, format!("column: {}", e)))?;
                let y = y
                    .parse::<i8>()
                    .map_err(|e| PositionParseError::new(s, format!("row: {}", e)))?;
                Ok(Position::new(x, y))
            }
            _ => Err(PositionParseError::new(s, "expected [x, y]")),
        }
    }
}

/// A unit scan vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    /// Column delta.
    pub dx: i8,
    /// Row delta.
    pub dy: i8,
}

/// The eight scan directions, in the order their captures are reported.
pub const DIRECTIONS: [Direction; 8] = [
    Direction { dx: 0, dy: 1 },
    Direction { dx: 1, dy: 1 },
    Direction { dx: 1, dy: 0 },
    Direction { dx: 1, dy: -1 },
    Direction { dx: 0, dy: -1 },
    Direction { dx: -1, dy: -1 },
    Direction { dx: -1, dy: 0 },
    Direction { dx: -1, dy: 1 },
];

/// Piece tally for both colors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, derive_new::new,
)]
pub struct Score {
    /// White pieces on the board.
    pub white: usize,
    /// Black pieces on the board.
    pub black: usize,
}

impl Score {
    /// Returns the leading color, or `None` on a tie.
    pub fn winner(&self) -> Option<Color> {
        match self.white.cmp(&self.black) {
            std::cmp::Ordering::Greater => Some(Color::White),
            std::cmp::Ordering::Less => Some(Color::Black),
            std::cmp::Ordering::Equal => None,
        }
    }

    /// Total pieces on the board.
    pub fn total(&self) -> usize {
        self.white + self.black
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Final score - White: {} Black: {}", self.white, self.black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_toggles() {
        assert_eq!(Color::Black.opponent(), Color::White);
        assert_eq!(Color::White.opponent().opponent(), Color::White);
    }

    #[test]
    fn test_color_renders_lowercase() {
        assert_eq!(Color::Black.to_string(), "black");
        assert_eq!("white".parse::<Color>().unwrap(), Color::White);
    }

    #[test]
    fn test_piece_flip() {
        let mut piece = Piece::new(Color::White);
        piece.flip();
        assert_eq!(piece.color(), Color::Black);
        assert_eq!(piece.to_string(), "B");
    }

    #[test]
    fn test_parse_bracketed_pair() {
        assert_eq!("[2, 3]".parse::<Position>().unwrap(), Position::new(2, 3));
        assert_eq!(" [7,0]\n".parse::<Position>().unwrap(), Position::new(7, 0));
        assert_eq!("[-1,3]".parse::<Position>().unwrap(), Position::new(-1, 3));
    }

    #[test]
    fn test_parse_bare_pair() {
        assert_eq!("4, 5".parse::<Position>().unwrap(), Position::new(4, 5));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for input in ["", "hello", "[1]", "[1,2,3]", "1,2,3", "[a,b]", "[300,1]", "3"] {
            assert!(input.parse::<Position>().is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_position_display_matches_parse_format() {
        let pos = Position::new(3, 4);
        assert_eq!(pos.to_string(), "[3,4]");
        assert_eq!(pos.to_string().parse::<Position>().unwrap(), pos);
    }

    #[test]
    fn test_all_positions_row_major() {
        let all: Vec<_> = Position::all().collect();
        assert_eq!(all.len(), 64);
        assert_eq!(all[0], Position::new(0, 0));
        assert_eq!(all[1], Position::new(0, 1));
        assert_eq!(all[8], Position::new(1, 0));
    }

    #[test]
    fn test_score_winner() {
        assert_eq!(Score::new(10, 3).winner(), Some(Color::White));
        assert_eq!(Score::new(3, 10).winner(), Some(Color::Black));
        assert_eq!(Score::new(5, 5).winner(), None);
        assert_eq!(Score::new(2, 2).to_string(), "Final score - White: 2 Black: 2");
    }
}
