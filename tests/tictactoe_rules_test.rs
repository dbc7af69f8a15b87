//! Property checks for the rules engine through the public API.

use countdown_tictactoe::{
    Board, GameStatus, InvariantSet, Mark, Move, MoveError, MoveRecord, Position, Square,
    TicTacToeInvariants, apply_move, evaluate, validate_move,
};

/// Builds a board from nine characters: `X`, `O` or anything else for empty.
fn board_from(cells: &str) -> Board {
    let mut squares = [Square::Empty; 9];
    for (square, c) in squares.iter_mut().zip(cells.chars()) {
        *square = match c {
            'X' => Square::Occupied(Mark::X),
            'O' => Square::Occupied(Mark::O),
            _ => Square::Empty,
        };
    }
    Board::from_squares(squares)
}

struct Played {
    board: Board,
    history: Vec<Move>,
}

impl MoveRecord for Played {
    fn board(&self) -> &Board {
        &self.board
    }

    fn history(&self) -> &[Move] {
        &self.history
    }
}

#[test]
fn test_human_row_wins() {
    assert_eq!(evaluate(&board_from("XXXOO____")), GameStatus::Won(Mark::X));
}

#[test]
fn test_full_board_without_line_is_draw() {
    assert_eq!(evaluate(&board_from("XOXXOOOXX")), GameStatus::Draw);
}

#[test]
fn test_validation_is_idempotent() {
    let board = board_from("X___O____");
    let first = validate_move(&board, 2, Mark::X);
    assert_eq!(first, validate_move(&board, 2, Mark::X));
    assert_eq!(first, Ok(Position::TopRight));
    assert_eq!(board, board_from("X___O____"));
}

#[test]
fn test_rejections() {
    let board = board_from("X___O____");
    for index in [9, 10, usize::MAX] {
        assert_eq!(validate_move(&board, index, Mark::X), Err(MoveError::OutOfRange(index)));
    }
    assert_eq!(
        validate_move(&board, 4, Mark::X),
        Err(MoveError::SquareOccupied(Position::Center))
    );
    assert_eq!(validate_move(&board, 1, Mark::O), Err(MoveError::WrongPlayer(Mark::O)));
    assert_eq!(
        validate_move(&board_from("XXXOO____"), 8, Mark::O),
        Err(MoveError::GameOver)
    );
}

/// Plays every legal game from the empty board and checks each position reached.
#[test]
fn test_all_reachable_boards_hold_invariants() {
    fn explore(played: &mut Played, mark: Mark, visited: &mut usize) {
        *visited += 1;
        assert!(TicTacToeInvariants::check_all(&*played).is_ok());
        let x = played.board.count(Mark::X);
        let o = played.board.count(Mark::O);
        assert!(x == o || x == o + 1);

        if evaluate(&played.board).is_terminal() {
            return;
        }
        for pos in Position::valid_moves(&played.board) {
            let before = played.board;
            let checked = validate_move(&before, pos.to_index(), mark);
            assert_eq!(checked, Ok(pos));

            played.board = apply_move(&before, pos, mark);
            played.history.push(Move::new(mark, pos));
            explore(played, mark.opponent(), visited);
            played.history.pop();
            played.board = before;
        }
    }

    let mut played = Played {
        board: Board::new(),
        history: Vec::new(),
    };
    let mut visited = 0;
    explore(&mut played, Mark::X, &mut visited);
    // Game-tree node count for tic-tac-toe stopping at wins.
    assert_eq!(visited, 549_946);
}
