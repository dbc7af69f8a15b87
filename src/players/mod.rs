//! Computer move selection.
//!
//! The computer plays uniformly at random among open cells. The random
//! source sits behind [`CellPicker`] so games can be replayed with a fixed
//! seed or a scripted sequence.

mod random;
mod scripted;

pub use random::RandomPicker;
pub use scripted::ScriptedPicker;

use crate::games::tictactoe::{Board, Position};
use tracing::{debug, instrument};

/// Source of indices into the list of open cells.
pub trait CellPicker {
    /// Returns an index in `0..open`. `open` is always at least 1.
    fn pick(&mut self, open: usize) -> usize;

    /// Returns the picker's display name.
    fn name(&self) -> &str;
}

impl<P: CellPicker + ?Sized> CellPicker for Box<P> {
    fn pick(&mut self, open: usize) -> usize {
        (**self).pick(open)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Chooses the computer's cell among the empty squares of `board`.
///
/// Open cells are listed in ascending index order; an out-of-range pick is
/// clamped to the last one. Returns `None` when the board has no empty cell.
#[instrument(skip(picker, board), fields(picker = picker.name()))]
pub fn choose_cell<P: CellPicker + ?Sized>(picker: &mut P, board: &Board) -> Option<Position> {
    let open = Position::valid_moves(board);
    if open.is_empty() {
        return None;
    }

    let index = picker.pick(open.len()).min(open.len() - 1);
    let position = open[index];
    debug!(open = open.len(), index, %position, "Computer chose cell");
    Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{rules, Player};

    #[test]
    fn test_single_open_cell_is_always_chosen() {
        let mut board = Board::new();
        let moves = [0, 1, 2, 4, 3, 5, 7, 6];
        for (i, index) in moves.into_iter().enumerate() {
            let mark = if i % 2 == 0 { Player::X } else { Player::O };
            let pos = Position::from_index(index).unwrap();
            board = rules::apply_move(&board, pos, mark);
        }

        for seed in 0..20 {
            let mut picker = RandomPicker::seeded(seed);
            assert_eq!(choose_cell(&mut picker, &board), Some(Position::BottomRight));
        }
        let mut scripted = ScriptedPicker::new([7]);
        assert_eq!(choose_cell(&mut scripted, &board), Some(Position::BottomRight));
    }

    #[test]
    fn test_full_board_has_no_choice() {
        let board = Board::from_squares([crate::games::tictactoe::Square::Occupied(Player::X); 9]);
        let mut picker = ScriptedPicker::new([0]);
        assert_eq!(choose_cell(&mut picker, &board), None);
    }

    #[test]
    fn test_scripted_pick_indexes_open_cells() {
        let board = rules::apply_move(&Board::new(), Position::TopLeft, Player::X);
        let mut picker = ScriptedPicker::new([0, 3]);
        assert_eq!(choose_cell(&mut picker, &board), Some(Position::TopCenter));
        assert_eq!(choose_cell(&mut picker, &board), Some(Position::Center));
    }
}
