//! Outbound notifications from the turn controller.
//!
//! The controller never renders anything. Every visible change goes
//! through a [`NotificationSink`], which a UI shell implements.

use crate::games::tictactoe::{Mark, Position};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

/// Terminal outcome of a game, from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// X completed a line, or O timed out.
    #[display("You win")]
    HumanWins,
    /// O completed a line, or X timed out.
    #[display("You lost")]
    ComputerWins,
    /// Board filled with no line.
    #[display("It's a tie")]
    Tie,
}

impl Outcome {
    /// Maps a winner (or `None` for a tie) to an outcome.
    pub fn for_winner(winner: Option<Mark>) -> Self {
        match winner {
            Some(Mark::X) => Outcome::HumanWins,
            Some(Mark::O) => Outcome::ComputerWins,
            None => Outcome::Tie,
        }
    }
}

/// One notification, as a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    /// A cell was filled.
    BoardChanged {
        /// Cell that was filled.
        position: Position,
        /// Mark placed there.
        mark: Mark,
    },
    /// The active turn changed.
    TurnChanged {
        /// Mark now to move.
        mark: Mark,
    },
    /// Countdown for the active turn, once per second and on every reset.
    CountdownTick {
        /// Whole seconds left.
        seconds_remaining: u32,
    },
    /// The game ended.
    GameEnded {
        /// How it ended.
        outcome: Outcome,
    },
    /// A new game started with an empty board.
    NewGameStarted,
}

/// Receiver of controller notifications.
///
/// Implementors only need [`NotificationSink::notify`]; the named callbacks
/// wrap their arguments into a [`GameEvent`].
pub trait NotificationSink {
    /// Receives one event.
    fn notify(&mut self, event: GameEvent);

    /// A cell was filled.
    fn on_board_changed(&mut self, position: Position, mark: Mark) {
        self.notify(GameEvent::BoardChanged { position, mark });
    }

    /// Whose turn it now is.
    fn on_turn_changed(&mut self, mark: Mark) {
        self.notify(GameEvent::TurnChanged { mark });
    }

    /// Seconds left for the active turn.
    fn on_countdown_tick(&mut self, seconds_remaining: u32) {
        self.notify(GameEvent::CountdownTick { seconds_remaining });
    }

    /// The game ended.
    fn on_game_ended(&mut self, outcome: Outcome) {
        self.notify(GameEvent::GameEnded { outcome });
    }

    /// A fresh game started.
    fn on_new_game_started(&mut self) {
        self.notify(GameEvent::NewGameStarted);
    }
}

/// Records every event in order.
impl NotificationSink for Vec<GameEvent> {
    fn notify(&mut self, event: GameEvent) {
        self.push(event);
    }
}

/// Forwards events to an async consumer over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl ChannelSink {
    /// Creates a sink and the receiving end of its channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<GameEvent>) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        (Self { event_tx }, event_rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&mut self, event: GameEvent) {
        if let Err(e) = self.event_tx.send(event) {
            warn!(event = ?e.0, "Event receiver dropped");
        }
    }
}
