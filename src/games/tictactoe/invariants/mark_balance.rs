//! Mark balance invariant: X moves first and players alternate.

use super::super::Player;
use super::{Invariant, MoveRecord};

/// Invariant: X never leads O by more than one mark, and O never leads X.
///
/// Also checks that the history itself alternates starting from X.
pub struct MarkBalanceInvariant;

impl<S: MoveRecord> Invariant<S> for MarkBalanceInvariant {
    fn holds(state: &S) -> bool {
        let board = state.board();
        let x_count = board.count(Player::X);
        let o_count = board.count(Player::O);
        if x_count < o_count || x_count - o_count > 1 {
            return false;
        }

        state
            .history()
            .iter()
            .enumerate()
            .all(|(i, mov)| mov.player == if i % 2 == 0 { Player::X } else { Player::O })
    }

    fn description() -> &'static str {
        "Marks alternate from X (X count - O count is 0 or 1)"
    }
}
