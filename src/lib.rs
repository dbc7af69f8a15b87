//! Countdown tic-tac-toe - a timed single-player game engine
//!
//! The human plays X against a computer that plays O at random. Each turn
//! runs against a countdown; running out of time loses the game.
//!
//! # Architecture
//!
//! - **Rules**: pure move validation, application and board evaluation
//! - **Session**: board, turn, countdown and history for one game
//! - **Scheduler**: cancellable timers on a virtual clock
//! - **Controller**: the turn state machine tying them together
//! - **Notify**: outbound events for a UI shell
//!
//! # Example
//!
//! ```
//! use countdown_tictactoe::{ControllerState, GameEvent, ScriptedPicker, TimingConfig, TurnController};
//! use std::time::Duration;
//!
//! let mut controller = TurnController::new(
//!     TimingConfig::default(),
//!     Vec::<GameEvent>::new(),
//!     ScriptedPicker::new([0]),
//! );
//! controller.start_new_game();
//! controller.cell_selected(4)?;
//! controller.advance(Duration::from_secs(1))?;
//! assert_eq!(controller.state(), ControllerState::AwaitingHuman);
//! # Ok::<(), countdown_tictactoe::ControllerError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod controller;
mod error;
mod games;
mod notify;
mod players;
mod scheduler;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, TimingConfig};

// Crate-level exports - Turn controller
pub use controller::{ControllerState, TurnController};
pub use error::ControllerError;

// Crate-level exports - Notifications
pub use notify::{ChannelSink, GameEvent, NotificationSink, Outcome};

// Crate-level exports - Computer players
pub use players::{CellPicker, RandomPicker, ScriptedPicker, choose_cell};

// Crate-level exports - Timers and session
pub use scheduler::{Fired, Scheduler, TimerHandle, TimerKind};
pub use session::{Countdown, GameSession};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, GameStatus, Mark, Move, MoveError, Position, Square, apply_move, evaluate,
    validate_move,
    Player as TicTacToePlayer,
};

// Crate-level exports - Board invariants
pub use games::tictactoe::{
    HistoryConsistentInvariant, Invariant, InvariantSet, InvariantViolation,
    MarkBalanceInvariant, MonotonicBoardInvariant, MoveRecord, TicTacToeInvariants,
};
