//! The 8x8 Othello board: move legality, capture, placement and scoring.

use super::types::{BOARD_SIZE, Color, DIRECTIONS, Direction, Piece, Position, Score};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{debug, instrument};

const SIDE: usize = BOARD_SIZE as usize;

/// Errors raised by board operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardError {
    /// A position outside the grid was dereferenced.
    #[display("Position {_0} is off the board")]
    OutOfBounds(#[error(not(source))] Position),

    /// A placement that would capture nothing, or lands on an occupied or
    /// off-board cell.
    #[display("Invalid move: {color} cannot play {position}")]
    InvalidMove {
        /// Where the piece was to go.
        position: Position,
        /// Who tried to place it.
        color: Color,
    },

    /// A textual layout could not be read.
    #[display("Invalid board layout: {_0}")]
    Layout(#[error(not(source))] String),
}

/// Othello board. Cells are indexed `grid[x][y]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    grid: [[Option<Piece>; SIDE]; SIDE],
}

impl Board {
    /// Creates a board in the standard starting configuration.
    #[instrument]
    pub fn new() -> Self {
        let mut grid = [[None; SIDE]; SIDE];
        grid[3][3] = Some(Piece::new(Color::White));
        grid[4][4] = Some(Piece::new(Color::White));
        grid[3][4] = Some(Piece::new(Color::Black));
        grid[4][3] = Some(Piece::new(Color::Black));
        Self { grid }
    }

    /// Returns true iff both coordinates lie in `0..8`.
    pub fn is_valid_pos(&self, pos: Position) -> bool {
        (0..BOARD_SIZE).contains(&pos.x) && (0..BOARD_SIZE).contains(&pos.y)
    }

    /// Returns the piece at `pos`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if `pos` is not on the board.
    pub fn get_piece(&self, pos: Position) -> Result<Option<Piece>, BoardError> {
        if !self.is_valid_pos(pos) {
            return Err(BoardError::OutOfBounds(pos));
        }
        Ok(self.grid[pos.x as usize][pos.y as usize])
    }

    /// Returns true if a piece sits at `pos`. Off-board cells are never occupied.
    pub fn is_occupied(&self, pos: Position) -> bool {
        matches!(self.get_piece(pos), Ok(Some(_)))
    }

    /// Returns true if the piece at `pos` has the given color.
    pub fn is_mine(&self, pos: Position, color: Color) -> bool {
        matches!(self.get_piece(pos), Ok(Some(piece)) if piece.color() == color)
    }

    /// Scans from `pos` along one direction, collecting opposing pieces
    /// that would be captured by `color` playing at `pos`.
    fn scan(&self, pos: Position, color: Color, dir: Direction) -> Vec<Position> {
        let mut captured = Vec::new();
        let mut cursor = pos;

        loop {
            cursor = cursor.step(dir);
            match self.get_piece(cursor) {
                Ok(Some(piece)) if piece.color() == color => return captured,
                Ok(Some(_)) => captured.push(cursor),
                // Off the edge or an empty cell: nothing is bracketed.
                Ok(None) | Err(_) => return Vec::new(),
            }
        }
    }

    /// Every position that `color` would capture by playing at `pos`.
    ///
    /// Captures are grouped by direction in [`DIRECTIONS`] order, nearest
    /// first within each group. An immediately adjacent friendly piece
    /// contributes nothing for its direction.
    pub fn positions_to_flip(&self, pos: Position, color: Color) -> Vec<Position> {
        DIRECTIONS
            .iter()
            .flat_map(|&dir| self.scan(pos, color, dir))
            .collect()
    }

    /// Returns true if `color` may legally play at `pos`.
    pub fn valid_move(&self, pos: Position, color: Color) -> bool {
        self.is_valid_pos(pos)
            && !self.is_occupied(pos)
            && DIRECTIONS
                .iter()
                .any(|&dir| !self.scan(pos, color, dir).is_empty())
    }

    /// All legal moves for `color`, outer loop over `x`, inner over `y`.
    #[instrument(skip(self))]
    pub fn valid_moves(&self, color: Color) -> Vec<Position> {
        Position::all()
            .filter(|&pos| self.valid_move(pos, color))
            .collect()
    }

    /// Returns true if `color` has at least one legal move.
    pub fn has_move(&self, color: Color) -> bool {
        Position::all().any(|pos| self.valid_move(pos, color))
    }

    /// Places a `color` piece at `pos` and flips every captured piece.
    ///
    /// Returns the positions that were flipped.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidMove`] if the move is not legal; the
    /// board is left untouched.
    #[instrument(skip_all, fields(position = %pos, color = %color))]
    pub fn place_piece(
        &mut self,
        pos: Position,
        color: Color,
    ) -> Result<Vec<Position>, BoardError> {
        if !self.valid_move(pos, color) {
            return Err(BoardError::InvalidMove {
                position: pos,
                color,
            });
        }

        let flips = self.positions_to_flip(pos, color);
        self.grid[pos.x as usize][pos.y as usize] = Some(Piece::new(color));
        for flip in &flips {
            if let Some(piece) = self.grid[flip.x as usize][flip.y as usize].as_mut() {
                piece.flip();
            }
        }

        debug!(flipped = flips.len(), "Piece placed");
        Ok(flips)
    }

    /// Returns true once neither color can move.
    pub fn is_over(&self) -> bool {
        !(self.has_move(Color::White) || self.has_move(Color::Black))
    }

    /// Tallies the pieces of each color.
    pub fn results(&self) -> Score {
        self.grid
            .iter()
            .flatten()
            .flatten()
            .fold(Score::default(), |mut score, piece| {
                match piece.color() {
                    Color::White => score.white += 1,
                    Color::Black => score.black += 1,
                }
                score
            })
    }

    /// Number of occupied cells.
    pub fn occupied(&self) -> usize {
        self.results().total()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, " ")?;
        for x in 0..SIDE {
            write!(f, " {}", x)?;
        }
        writeln!(f)?;

        for y in 0..SIDE {
            write!(f, "{}", y)?;
            for x in 0..SIDE {
                match self.grid[x][y] {
                    Some(piece) => write!(f, " {}", piece)?,
                    None => write!(f, " _")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = BoardError;

    /// Reads eight rows of eight cells: `B`, `W`, and `.` or `_` for empty.
    /// Whitespace is ignored, so the rendered board minus its header works too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|c| !c.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();

        if rows.len() != SIDE {
            return Err(BoardError::Layout(format!(
                "expected {} rows, found {}",
                SIDE,
                rows.len()
            )));
        }

        let mut grid = [[None; SIDE]; SIDE];
        for (y, row) in rows.iter().enumerate() {
            if row.len() != SIDE {
                return Err(BoardError::Layout(format!(
                    "row {} has {} cells",
                    y,
                    row.len()
                )));
            }
            for (x, cell) in row.iter().enumerate() {
                grid[x][y] = match cell {
                    'B' | 'b' => Some(Piece::new(Color::Black)),
                    'W' | 'w' => Some(Piece::new(Color::White)),
                    '.' | '_' => None,
                    other => {
                        return Err(BoardError::Layout(format!(
                            "unexpected {:?} at row {} column {}",
                            other, y, x
                        )));
                    }
                };
            }
        }

        Ok(Self { grid })
    }
}
