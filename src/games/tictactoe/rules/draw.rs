//! Full-board detection for tic-tac-toe.

use super::super::{Board, Square};
use tracing::instrument;

/// Whether every cell is occupied.
///
/// A full board only counts as a tie once [`super::check_winner`] finds no
/// line; [`super::evaluate`] checks lines first.
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Position};
    use super::super::{apply_move, check_winner};
    use super::*;

    fn play(cells: &[usize]) -> Board {
        cells.iter().enumerate().fold(Board::new(), |board, (turn, &index)| {
            let mark = if turn % 2 == 0 { Player::X } else { Player::O };
            let pos = Position::from_index(index).unwrap();
            apply_move(&board, pos, mark)
        })
    }

    #[test]
    fn test_fresh_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_eight_cells_not_full() {
        assert!(!is_full(&play(&[0, 1, 2, 4, 3, 5, 7, 6])));
    }

    #[test]
    fn test_tie_board_full_without_line() {
        // X O X / X O O / O X X
        let board = play(&[0, 4, 2, 1, 7, 6, 3, 5, 8]);
        assert!(is_full(&board));
        assert_eq!(check_winner(&board), None);
    }
}
