//! Turn state machine for an Othello match.
//!
//! The game owns the board and whose turn it is. Each call to
//! [`Game::advance`] settles one step of the turn rules: the game either
//! ends, the side to move passes, or it waits for a placement via
//! [`Game::play`].

use super::action::{Move, MoveError, Turn};
use super::board::Board;
use super::invariants::{InvariantSet, InvariantViolation, OthelloInvariants};
use super::types::{Color, Position, Score};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Play continues with this color to move.
    InProgress(Color),
    /// Neither side can move; final tally.
    Over(Score),
}

/// Outcome of one [`Game::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The game has ended.
    Over(Score),
    /// The color had no legal move; the turn passed to its opponent.
    Passed(Color),
    /// The color has at least one legal move and must place a piece.
    ToMove(Color),
}

/// A move list that could not be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Move {index} could not be replayed: {source}")]
pub struct ReplayError {
    /// Zero-based index into the move list.
    pub index: usize,
    /// Why the move failed.
    pub source: MoveError,
}

/// An Othello match in progress or finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    initial: Board,
    board: Board,
    status: GameStatus,
    history: Vec<Turn>,
}

impl Game {
    /// Creates a game on the standard starting board, black to move.
    #[instrument]
    pub fn new() -> Self {
        Self::with_board(Board::new(), Color::Black)
    }

    /// Creates a game from an arbitrary position.
    #[instrument(skip(board))]
    pub fn with_board(board: Board, turn: Color) -> Self {
        Self {
            initial: board.clone(),
            board,
            status: GameStatus::InProgress(turn),
            history: Vec::new(),
        }
    }

    /// Replays a list of placements from the starting position.
    ///
    /// Forced passes are inserted automatically, so the list holds only
    /// the positions actually played, alternating as the rules dictate.
    ///
    /// # Errors
    ///
    /// Returns the index of the first move that is illegal or that comes
    /// after the game has ended.
    #[instrument(skip(positions), fields(moves = positions.len()))]
    pub fn replay(positions: &[Position]) -> Result<Self, ReplayError> {
        let mut game = Self::new();

        for (index, &position) in positions.iter().enumerate() {
            if let Step::Over(_) = game.settle() {
                return Err(ReplayError {
                    index,
                    source: MoveError::GameOver,
                });
            }
            game.play(position)
                .map_err(|source| ReplayError { index, source })?;
        }

        game.settle();
        Ok(game)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board the game started from.
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns the color to move, or `None` once the game is over.
    pub fn turn(&self) -> Option<Color> {
        match self.status {
            GameStatus::InProgress(color) => Some(color),
            GameStatus::Over(_) => None,
        }
    }

    /// Returns true once the game has been found over.
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    /// Returns the turn history.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Number of pieces placed so far.
    pub fn plies(&self) -> usize {
        self.history.iter().filter_map(Turn::placement).count()
    }

    /// Current piece tally.
    pub fn score(&self) -> Score {
        self.board.results()
    }

    /// Settles one step of the turn rules.
    ///
    /// Ends the game when neither side can move, and passes the turn when
    /// only the side to move is stuck. Otherwise reports who must move.
    #[instrument(skip(self))]
    pub fn advance(&mut self) -> Step {
        let turn = match self.status {
            GameStatus::Over(score) => return Step::Over(score),
            GameStatus::InProgress(turn) => turn,
        };

        if self.board.is_over() {
            let score = self.board.results();
            info!(white = score.white, black = score.black, "Game over");
            self.status = GameStatus::Over(score);
            return Step::Over(score);
        }

        if !self.board.has_move(turn) {
            info!(color = %turn, "No legal move, passing");
            self.history.push(Turn::Passed(turn));
            self.status = GameStatus::InProgress(turn.opponent());
            return Step::Passed(turn);
        }

        Step::ToMove(turn)
    }

    /// Advances through any forced passes until a side must move or the
    /// game ends.
    pub fn settle(&mut self) -> Step {
        loop {
            match self.advance() {
                Step::Passed(_) => continue,
                step => return step,
            }
        }
    }

    /// Places a piece for the side to move and hands the turn over.
    ///
    /// Returns the flipped positions.
    ///
    /// # Errors
    ///
    /// - [`MoveError::GameOver`] once the game has ended
    /// - [`MoveError::Rejected`] if the move is not legal for the side to move
    /// - [`MoveError::InvariantViolation`] if a debug-build postcondition fails
    #[instrument(skip(self), fields(turn = ?self.turn()))]
    pub fn play(&mut self, position: Position) -> Result<Vec<Position>, MoveError> {
        let turn = self.turn().ok_or(MoveError::GameOver)?;
        let mv = Move::new(turn, position);

        if !self.board.valid_move(position, turn) {
            debug!(%mv, "Rejected illegal move");
            return Err(MoveError::Rejected(mv));
        }

        let flipped = self.board.place_piece(position, turn)?;
        self.history.push(Turn::Placed {
            mv,
            flipped: flipped.clone(),
        });
        self.status = GameStatus::InProgress(turn.opponent());

        if cfg!(debug_assertions) {
            self.check_invariants().map_err(|violations| {
                warn!(?violations, "Invariant check failed");
                MoveError::InvariantViolation(
                    violations
                        .iter()
                        .map(|v| v.description.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                )
            })?;
        }

        Ok(flipped)
    }

    /// Checks every game invariant against the current state.
    pub fn check_invariants(&self) -> Result<(), Vec<InvariantViolation>> {
        OthelloInvariants::check_all(self)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: i8, y: i8) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn test_new_game_black_to_move() {
        let mut game = Game::new();
        assert_eq!(game.turn(), Some(Color::Black));
        assert_eq!(game.advance(), Step::ToMove(Color::Black));
        assert_eq!(game.score(), Score::new(2, 2));
    }

    #[test]
    fn test_play_toggles_turn() {
        let mut game = Game::new();
        let flipped = game.play(pos(2, 3)).unwrap();
        assert_eq!(flipped, vec![pos(3, 3)]);
        assert_eq!(game.turn(), Some(Color::White));
        assert_eq!(game.plies(), 1);
    }

    #[test]
    fn test_rejected_move_keeps_turn() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(
            game.play(pos(0, 0)),
            Err(MoveError::Rejected(Move::new(Color::Black, pos(0, 0))))
        );
        assert_eq!(game, before);
    }

    #[test]
    fn test_forced_pass() {
        let board: Board = "\
            BW......\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........\n\
            ........"
            .parse()
            .unwrap();
        let mut game = Game::with_board(board, Color::White);

        assert_eq!(game.advance(), Step::Passed(Color::White));
        assert_eq!(game.history(), &[Turn::Passed(Color::White)]);
        assert_eq!(game.advance(), Step::ToMove(Color::Black));
        assert_eq!(game.board().results(), Score::new(1, 1));

        game.play(pos(2, 0)).unwrap();
        assert_eq!(game.advance(), Step::Over(Score::new(0, 3)));
        assert!(game.is_over());
        assert_eq!(game.play(pos(3, 0)), Err(MoveError::GameOver));
    }

    #[test]
    fn test_replay_known_opening() {
        let game = Game::replay(&[pos(2, 3), pos(2, 2), pos(2, 1)]).unwrap();
        assert_eq!(game.plies(), 3);
        assert_eq!(game.turn(), Some(Color::White));
        assert!(game.check_invariants().is_ok());
    }

    #[test]
    fn test_replay_reports_bad_index() {
        let err = Game::replay(&[pos(2, 3), pos(2, 3)]).unwrap_err();
        assert_eq!(err.index, 1);
        assert!(matches!(err.source, MoveError::Rejected(_)));
    }

    #[test]
    fn test_shortest_game() {
        // Black wipes out white in nine placements.
        let moves = [
            pos(4, 5),
            pos(5, 3),
            pos(4, 2),
            pos(3, 5),
            pos(2, 4),
            pos(5, 5),
            pos(4, 6),
            pos(5, 4),
            pos(6, 4),
        ];
        let game = Game::replay(&moves).unwrap();
        assert!(game.is_over());
        assert_eq!(game.status(), GameStatus::Over(Score::new(0, 13)));
    }
}
