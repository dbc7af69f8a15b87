//! Errors surfaced by the turn controller.

use derive_more::Display;

/// The controller and the rules engine disagree about the game.
///
/// These are defects, not gameplay: a rejected move is never reported
/// here, it is simply ignored.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ControllerError {
    /// The computer was asked to move on a board with no empty cell.
    #[display("Computer asked to move with no empty cell (session {generation})")]
    NoEmptyCells {
        /// Session the move was scheduled for.
        generation: u64,
    },

    /// A board invariant failed after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ControllerError {}
