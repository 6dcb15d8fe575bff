//! Game events and the sinks that report them.

use crate::games::othello::{Board, Color, Position, Score};
use anyhow::Result;
use std::io::Write;
use tokio::sync::mpsc;

/// Messages sent from the orchestrator as a match unfolds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A player is about to be asked for a move.
    TurnStarted {
        /// Side to move.
        color: Color,
        /// Player being asked.
        player: String,
        /// Board at the time of asking.
        board: Board,
    },
    /// A move was accepted.
    MoveMade {
        /// Side that moved.
        color: Color,
        /// Player who moved.
        player: String,
        /// Where the piece went.
        position: Position,
        /// Pieces captured by the move.
        flipped: Vec<Position>,
    },
    /// A move was rejected and will be asked for again.
    InvalidMove {
        /// Side to move.
        color: Color,
        /// Player whose move was rejected.
        player: String,
        /// The rejected position.
        position: Position,
    },
    /// The side had no legal move and the turn passed.
    Passed(Color),
    /// Neither side can move.
    GameOver {
        /// Final board.
        board: Board,
        /// Final tally.
        score: Score,
    },
}

/// Receives game events.
pub trait GameObserver: Send {
    /// Handles one event.
    fn on_event(&mut self, event: &GameEvent) -> Result<()>;
}

/// Forwards events over a channel.
impl GameObserver for mpsc::UnboundedSender<GameEvent> {
    fn on_event(&mut self, event: &GameEvent) -> Result<()> {
        self.send(event.clone())?;
        Ok(())
    }
}

/// Renders events as text, one report per line.
pub struct ConsoleObserver<W> {
    out: W,
}

impl<W: Write + Send> ConsoleObserver<W> {
    /// Creates an observer writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> GameObserver for ConsoleObserver<W> {
    fn on_event(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::TurnStarted { board, .. } => write!(self.out, "{}", board)?,
            GameEvent::MoveMade {
                player, position, ..
            } => writeln!(self.out, "{} move: {}", player, position)?,
            GameEvent::InvalidMove { .. } => writeln!(self.out, "Invalid move!")?,
            GameEvent::Passed(color) => writeln!(self.out, "{} has no move!", color)?,
            GameEvent::GameOver { board, score } => {
                write!(self.out, "{}", board)?;
                writeln!(self.out, "The game is over!")?;
                writeln!(self.out, "{}", score)?;
            }
        }
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(event: GameEvent) -> String {
        let mut observer = ConsoleObserver::new(Vec::new());
        observer.on_event(&event).unwrap();
        String::from_utf8(observer.into_inner()).unwrap()
    }

    #[test]
    fn test_renders_pass() {
        assert_eq!(render(GameEvent::Passed(Color::White)), "white has no move!\n");
    }

    #[test]
    fn test_renders_rejection() {
        let event = GameEvent::InvalidMove {
            color: Color::Black,
            player: "alice".into(),
            position: Position::new(0, 0),
        };
        assert_eq!(render(event), "Invalid move!\n");
    }

    #[test]
    fn test_renders_move() {
        let event = GameEvent::MoveMade {
            color: Color::Black,
            player: "Computer (black)".into(),
            position: Position::new(2, 3),
            flipped: vec![Position::new(3, 3)],
        };
        assert_eq!(render(event), "Computer (black) move: [2,3]\n");
    }

    #[test]
    fn test_renders_final_score() {
        let board = Board::new();
        let text = render(GameEvent::GameOver {
            score: board.results(),
            board,
        });
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[9], "The game is over!");
        assert_eq!(lines[10], "Final score - White: 2 Black: 2");
    }

    #[test]
    fn test_channel_forwards_events() {
        let (mut tx, mut rx) = mpsc::unbounded_channel();
        tx.on_event(&GameEvent::Passed(Color::Black)).unwrap();
        assert_eq!(rx.try_recv().unwrap(), GameEvent::Passed(Color::Black));
    }
}
