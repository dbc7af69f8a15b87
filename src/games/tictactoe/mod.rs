//! Tic-tac-toe board, moves and rules.

mod action;
pub mod invariants;
mod position;
pub mod rules;
mod types;

pub use action::{Move, MoveError};
pub use invariants::{
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation, MarkBalanceInvariant,
    MonotonicBoardInvariant, MoveRecord, TicTacToeInvariants,
};
pub use position::Position;
pub use rules::{apply_move, evaluate, validate_move};
pub use types::{Board, GameStatus, Player, Square};

/// Alias for clarity in session management.
pub type Mark = Player;
