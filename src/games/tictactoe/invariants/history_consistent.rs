//! History consistency invariant: history length matches occupied squares.

use super::{Invariant, MoveRecord};

/// Invariant: History length equals number of occupied squares.
///
/// Every move in history corresponds to exactly one occupied square.
/// No moves are missing, no squares are filled without a move.
pub struct HistoryConsistentInvariant;

impl<S: MoveRecord> Invariant<S> for HistoryConsistentInvariant {
    fn holds(state: &S) -> bool {
        state.history().len() == state.board().occupied()
    }

    fn description() -> &'static str {
        "History length matches number of occupied squares"
    }
}
