//! The single game session owned by the turn controller.

use crate::games::tictactoe::{
    Board, GameStatus, Mark, Move, MoveError, MoveRecord, evaluate, rules,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Result of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    /// Seconds left for the active turn after the decrement.
    Remaining(u32),
    /// The active player ran out of time.
    Expired,
}

/// Board, status, turn and countdown for one game.
///
/// The status is cached from the board after every move, except after a
/// timeout where it records the forfeit winner without touching the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    /// Incremented for every new game; tags timers belonging to this session.
    generation: u64,
    board: Board,
    status: GameStatus,
    to_move: Mark,
    countdown: u32,
    history: Vec<Move>,
}

impl GameSession {
    /// Creates a fresh session: empty board, X to move, full countdown.
    #[instrument]
    pub fn new(generation: u64, countdown_secs: u32) -> Self {
        info!(generation, countdown_secs, "Creating new game session");
        Self {
            generation,
            board: Board::new(),
            status: GameStatus::InProgress,
            to_move: Mark::X,
            countdown: countdown_secs,
            history: Vec::new(),
        }
    }

    /// Session generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Mark whose turn it is. Meaningful only while the status is in progress.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Whole seconds left for the active turn.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Validates and applies a move for `mark`, then re-evaluates the board.
    ///
    /// Rejects moves for the mark that is not active. On rejection nothing
    /// changes.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn place(&mut self, cell_index: usize, mark: Mark) -> Result<Move, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if mark != self.to_move {
            return Err(MoveError::WrongPlayer(mark));
        }

        let position = rules::validate_move(&self.board, cell_index, mark)?;
        self.board = rules::apply_move(&self.board, position, mark);
        self.status = evaluate(&self.board);

        let mov = Move::new(mark, position);
        self.history.push(mov);

        info!(%mov, status = ?self.status, "Move applied");
        Ok(mov)
    }

    /// Hands the turn to the opponent and restarts the countdown.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn pass_turn(&mut self, countdown_secs: u32) -> Mark {
        self.to_move = self.to_move.opponent();
        self.countdown = countdown_secs;
        debug!(to_move = %self.to_move, "Turn passed");
        self.to_move
    }

    /// Decrements the countdown by one second.
    ///
    /// Returns [`Countdown::Expired`] once the countdown would go below zero;
    /// the stored value then stays at zero.
    pub fn tick(&mut self) -> Countdown {
        match self.countdown.checked_sub(1) {
            Some(remaining) => {
                self.countdown = remaining;
                Countdown::Remaining(remaining)
            }
            None => Countdown::Expired,
        }
    }

    /// Ends the game in favour of the opponent of the active mark.
    ///
    /// The board is left as it is. Returns the winner.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn forfeit(&mut self) -> Mark {
        let winner = self.to_move.opponent();
        info!(timed_out = %self.to_move, %winner, "Turn timed out");
        self.status = GameStatus::Won(winner);
        winner
    }
}

#[cfg(test)]
impl GameSession {
    /// Builds an in-progress session around an arbitrary board.
    pub(crate) fn with_board(generation: u64, board: Board, to_move: Mark) -> Self {
        Self {
            generation,
            board,
            status: GameStatus::InProgress,
            to_move,
            countdown: 30,
            history: Vec::new(),
        }
    }
}

impl MoveRecord for GameSession {
    fn board(&self) -> &Board {
        &self.board
    }

    fn history(&self) -> &[Move] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::{Position, Square};

    #[test]
    fn test_new_session_defaults() {
        let session = GameSession::new(3, 30);
        assert_eq!(session.generation(), 3);
        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.to_move(), Mark::X);
        assert_eq!(session.countdown(), 30);
        assert_eq!(*session.board(), Board::new());
    }

    #[test]
    fn test_place_applies_and_records() {
        let mut session = GameSession::new(1, 30);
        let mov = session.place(4, Mark::X).unwrap();
        assert_eq!(mov, Move::new(Mark::X, Position::Center));
        assert_eq!(session.board().get(Position::Center), Square::Occupied(Mark::X));
        assert_eq!(session.history(), &[mov]);
    }

    #[test]
    fn test_place_rejects_inactive_mark_without_change() {
        let mut session = GameSession::new(1, 30);
        let before = session.clone();
        assert_eq!(session.place(0, Mark::O), Err(MoveError::WrongPlayer(Mark::O)));
        assert_eq!(session, before);
    }

    #[test]
    fn test_tick_expires_after_zero() {
        let mut session = GameSession::new(1, 2);
        assert_eq!(session.tick(), Countdown::Remaining(1));
        assert_eq!(session.tick(), Countdown::Remaining(0));
        assert_eq!(session.tick(), Countdown::Expired);
        assert_eq!(session.countdown(), 0);
    }

    #[test]
    fn test_forfeit_keeps_board() {
        let mut session = GameSession::new(1, 30);
        assert_eq!(session.forfeit(), Mark::O);
        assert_eq!(session.status(), GameStatus::Won(Mark::O));
        assert_eq!(session.board().occupied(), 0);
        assert_eq!(session.place(0, Mark::X), Err(MoveError::GameOver));
    }

    #[test]
    fn test_pass_turn_resets_countdown() {
        let mut session = GameSession::new(1, 30);
        session.tick();
        session.place(0, Mark::X).unwrap();
        assert_eq!(session.pass_turn(30), Mark::O);
        assert_eq!(session.countdown(), 30);
    }
}
