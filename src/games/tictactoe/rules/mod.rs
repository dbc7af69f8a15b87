//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating a board according
//! to tic-tac-toe rules. Nothing here holds state between calls; the
//! turn controller owns the board and feeds it through these functions.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{check_winner, LINES};

use super::{Board, GameStatus, MoveError, Player, Position, Square};
use tracing::instrument;

/// Checks whether `mark` may play `cell_index` on `board`.
///
/// Rejects when the board is already terminal, when the index is outside
/// 0-8, when the cell is occupied, or when the board says it is the other
/// mark's turn. Has no side effects.
#[instrument(skip(board))]
pub fn validate_move(board: &Board, cell_index: usize, mark: Player) -> Result<Position, MoveError> {
    if evaluate(board).is_terminal() {
        return Err(MoveError::GameOver);
    }

    let pos = Position::from_index(cell_index).ok_or(MoveError::OutOfRange(cell_index))?;

    if !board.is_empty(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }

    if board.next_to_move() != mark {
        return Err(MoveError::WrongPlayer(mark));
    }

    Ok(pos)
}

/// Returns `board` with `mark` placed at `pos`.
///
/// The move must already have passed [`validate_move`]. Terminal state is
/// not checked here.
#[instrument(skip(board))]
pub fn apply_move(board: &Board, pos: Position, mark: Player) -> Board {
    let mut next = *board;
    next.set(pos, Square::Occupied(mark));
    next
}

/// Derives the game status from the board alone.
#[instrument(skip(board))]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(winner) = check_winner(board) {
        GameStatus::Won(winner)
    } else if is_full(board) {
        GameStatus::Draw
    } else {
        GameStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from(cells: &str) -> Board {
        let mut squares = [Square::Empty; 9];
        for (square, c) in squares.iter_mut().zip(cells.chars()) {
            *square = match c {
                'X' => Square::Occupied(Player::X),
                'O' => Square::Occupied(Player::O),
                _ => Square::Empty,
            };
        }
        Board::from_squares(squares)
    }

    #[test]
    fn test_evaluate_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), GameStatus::InProgress);
    }

    #[test]
    fn test_evaluate_top_row_win() {
        assert_eq!(evaluate(&board_from("XXXOO____")), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_evaluate_full_board_tie() {
        assert_eq!(evaluate(&board_from("XOXXOOOXX")), GameStatus::Draw);
    }

    #[test]
    fn test_evaluate_win_on_full_board_is_not_tie() {
        // X completes the main diagonal with the last empty cell
        assert_eq!(evaluate(&board_from("XOOOXXXOX")), GameStatus::Won(Player::X));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let board = Board::new();
        assert_eq!(validate_move(&board, 9, Player::X), Err(MoveError::OutOfRange(9)));
        assert_eq!(
            validate_move(&board, usize::MAX, Player::X),
            Err(MoveError::OutOfRange(usize::MAX))
        );
    }

    #[test]
    fn test_validate_rejects_occupied() {
        let board = board_from("X________");
        assert_eq!(
            validate_move(&board, 0, Player::O),
            Err(MoveError::SquareOccupied(Position::TopLeft))
        );
    }

    #[test]
    fn test_validate_rejects_wrong_turn() {
        let board = board_from("X________");
        assert_eq!(validate_move(&board, 4, Player::X), Err(MoveError::WrongPlayer(Player::X)));
        assert_eq!(validate_move(&board, 4, Player::O), Ok(Position::Center));
    }

    #[test]
    fn test_validate_rejects_after_game_over() {
        let board = board_from("XXXOO____");
        assert_eq!(validate_move(&board, 5, Player::O), Err(MoveError::GameOver));
    }

    #[test]
    fn test_validate_is_idempotent() {
        let board = board_from("XO_______");
        for index in 0..12 {
            for mark in [Player::X, Player::O] {
                assert_eq!(validate_move(&board, index, mark), validate_move(&board, index, mark));
            }
        }
    }

    #[test]
    fn test_apply_move_sets_only_target() {
        let board = board_from("X________");
        let next = apply_move(&board, Position::Center, Player::O);
        assert_eq!(next, board_from("X___O____"));
        // input untouched
        assert_eq!(board, board_from("X________"));
    }
}
