//! Monotonic board invariant: squares never change once set.

use super::super::{Board, Square};
use super::{Invariant, MoveRecord};

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Once a square transitions from Empty to Occupied, it never changes.
/// This is verified by replaying the move history and comparing.
pub struct MonotonicBoardInvariant;

impl<S: MoveRecord> Invariant<S> for MonotonicBoardInvariant {
    fn holds(state: &S) -> bool {
        let mut reconstructed = Board::new();

        for mov in state.history() {
            // Square must be empty before placing
            if !reconstructed.is_empty(mov.position) {
                return false;
            }
            reconstructed.set(mov.position, Square::Occupied(mov.player));
        }

        reconstructed == *state.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
