//! First-class invariants for tic-tac-toe.
//!
//! Invariants are logical properties that must hold throughout game execution.
//! They are testable independently and serve as documentation of system guarantees.

use super::{Board, Move};

/// Anything that carries a board together with the moves that produced it.
pub trait MoveRecord {
    /// Current board.
    fn board(&self) -> &Board;

    /// Moves applied since the board was empty, oldest first.
    fn history(&self) -> &[Move];
}

/// A logical property that must hold for a given state.
///
/// Invariants express system guarantees that should never be violated.
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

/// A set of invariants that can be checked together.
///
/// Implementations are provided for tuples.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with a list of
    /// violations if any invariant fails.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
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

pub mod history_consistent;
pub mod mark_balance;
pub mod monotonic_board;

pub use history_consistent::HistoryConsistentInvariant;
pub use mark_balance::MarkBalanceInvariant;
pub use monotonic_board::MonotonicBoardInvariant;

/// All tic-tac-toe invariants as a composable set.
pub type TicTacToeInvariants = (
    MonotonicBoardInvariant,
    MarkBalanceInvariant,
    HistoryConsistentInvariant,
);

#[cfg(test)]
pub(crate) mod testing {
    use super::super::{rules, Player, Position};
    use super::*;

    /// Plain board + history pair for exercising invariants directly.
    #[derive(Debug, Clone, Default)]
    pub(crate) struct Record {
        pub(crate) board: Board,
        pub(crate) history: Vec<Move>,
    }

    impl Record {
        /// Plays `moves` without validation.
        pub(crate) fn replay(moves: &[(Player, Position)]) -> Self {
            let mut record = Self::default();
            for &(player, position) in moves {
                record.board = rules::apply_move(&record.board, position, player);
                record.history.push(Move::new(player, position));
            }
            record
        }
    }

    impl MoveRecord for Record {
        fn board(&self) -> &Board {
            &self.board
        }

        fn history(&self) -> &[Move] {
            &self.history
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Player, Position, Square};
    use super::testing::Record;
    use super::*;

    #[test]
    fn test_invariant_set_holds_for_empty_game() {
        assert!(TicTacToeInvariants::check_all(&Record::default()).is_ok());
    }

    #[test]
    fn test_invariant_set_holds_after_moves() {
        let record = Record::replay(&[
            (Player::X, Position::TopLeft),
            (Player::O, Position::Center),
            (Player::X, Position::TopRight),
        ]);
        assert!(TicTacToeInvariants::check_all(&record).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_violations() {
        let mut record = Record::replay(&[(Player::X, Position::Center)]);
        // Corrupt the board
        record.board.set(Position::TopLeft, Square::Occupied(Player::O));

        let violations = TicTacToeInvariants::check_all(&record).unwrap_err();
        assert!(!violations.is_empty());
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (MonotonicBoardInvariant, MarkBalanceInvariant);
        assert!(TwoInvariants::check_all(&Record::default()).is_ok());
    }
}
