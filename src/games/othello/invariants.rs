//! First-class invariants for Othello.
//!
//! Invariants are properties that must hold after every placement. They
//! are checked in debug builds by [`Game::play`] and can be tested on
//! their own.

use super::action::Turn;
use super::game::Game;

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();

        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }

        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

/// Invariant: each placement adds exactly one piece and none are removed.
pub struct PieceCountInvariant;

impl Invariant<Game> for PieceCountInvariant {
    fn holds(game: &Game) -> bool {
        game.board().occupied() == game.initial_board().occupied() + game.plies()
    }

    fn description() -> &'static str {
        "Occupied cells equal the starting pieces plus one per placement"
    }
}

/// Invariant: the board is exactly the starting board transformed by the
/// recorded placements and their flips.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let mut replayed = game.initial_board().clone();

        for turn in game.history() {
            if let Turn::Placed { mv, flipped } = turn {
                match replayed.place_piece(mv.position, mv.color) {
                    Ok(actual) if actual == *flipped => {}
                    _ => return false,
                }
            }
        }

        replayed == *game.board()
    }

    fn description() -> &'static str {
        "Board matches the replayed move history"
    }
}

/// Every invariant an Othello game maintains.
pub type OthelloInvariants = (PieceCountInvariant, HistoryConsistentInvariant);
