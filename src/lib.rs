//! Strictly Othello - rules engine and match runner for Othello (Reversi).
//!
//! # Architecture
//!
//! - **Games**: the board (move legality, captures, scoring) and the turn
//!   state machine
//! - **Players**: human (console) and greedy computer players
//! - **Orchestrator**: drives a match, validating moves and reporting events
//! - **Config**: TOML match configuration
//!
//! # Example
//!
//! ```no_run
//! use strictly_othello::{ConsoleObserver, GreedyPlayer, Orchestrator};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let mut orchestrator = Orchestrator::new(
//!     Box::new(GreedyPlayer::new("Black")),
//!     Box::new(GreedyPlayer::new("White")),
//!     Box::new(ConsoleObserver::new(std::io::stdout())),
//! );
//! let score = orchestrator.run().await?;
//! println!("{}", score);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod io;
mod observer;
mod orchestrator;
mod players;

// Crate-level exports - Configuration
pub use config::{ConfigError, MatchConfig, PlayerKind, PlayerSettings};

// Crate-level exports - Game types
pub use games::othello::{
    BOARD_SIZE, Board, BoardError, Color, DIRECTIONS, Direction, Game, GameStatus, Move,
    MoveError, Piece, Position, PositionParseError, ReplayError, Score, Step, Turn, invariants,
};

// Crate-level exports - Input
pub use io::{ConsoleInput, InputChannel, LineInput, console};

// Crate-level exports - Events
pub use observer::{ConsoleObserver, GameEvent, GameObserver};

// Crate-level exports - Orchestration
pub use orchestrator::Orchestrator;

// Crate-level exports - Players
pub use players::{GreedyPlayer, HumanPlayer, Player, build_players};
