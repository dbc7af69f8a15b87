//! Line-oriented terminal shell for the turn controller.

use countdown_tictactoe::{Board, GameEvent, Mark, NotificationSink, Outcome, Position, Square};
use std::io::Write;
use tracing::{debug, warn};

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Select a cell by 0-based index.
    Select(usize),
    /// Abandon the current game and start another.
    NewGame,
    /// Leave the program.
    Quit,
}

impl ShellCommand {
    /// Parses a line: `1`-`9` (row-major), a position label, `n` or `q`.
    ///
    /// Numbers outside 1-9 still parse, to an out-of-range index the
    /// controller rejects.
    pub fn parse(line: &str) -> Option<Self> {
        let input = line.trim();
        if input.is_empty() {
            return None;
        }

        match input.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => return Some(Self::Quit),
            "n" | "new" => return Some(Self::NewGame),
            _ => {}
        }

        if let Ok(number) = input.parse::<usize>() {
            return Some(Self::Select(number.checked_sub(1).unwrap_or(usize::MAX)));
        }

        Position::from_label(input).map(|pos| Self::Select(pos.to_index()))
    }
}

/// Writes controller events to a terminal, as text or JSON lines.
#[derive(Debug)]
pub struct TerminalSink<W> {
    out: W,
    json: bool,
    board: Board,
}

impl<W: Write> TerminalSink<W> {
    /// Creates a sink writing to `out`.
    pub fn new(out: W, json: bool) -> Self {
        Self {
            out,
            json,
            board: Board::new(),
        }
    }

    /// Board as the sink has seen it.
    pub fn board(&self) -> &Board {
        &self.board
    }

    fn render(&self, event: &GameEvent) -> Option<String> {
        match *event {
            GameEvent::NewGameStarted => Some(format!(
                "\n=== New game ===\n{}\nEnter 1-9 to play, n for a new game, q to quit.",
                self.board.display()
            )),
            GameEvent::BoardChanged { position, mark } => {
                Some(format!("{} takes {}\n{}", mark, position, self.board.display()))
            }
            GameEvent::TurnChanged { mark: Mark::X } => Some("Your turn (X)".to_string()),
            GameEvent::TurnChanged { mark: Mark::O } => Some("Computer is thinking (O)".to_string()),
            GameEvent::CountdownTick { seconds_remaining }
                if seconds_remaining % 10 == 0 || seconds_remaining <= 5 =>
            {
                Some(format!("  {}s left", seconds_remaining))
            }
            GameEvent::CountdownTick { .. } => None,
            GameEvent::GameEnded { outcome } => Some(match outcome {
                Outcome::Tie => format!("{}!", outcome),
                _ => format!("{}! Next game in a moment...", outcome),
            }),
        }
    }
}

impl<W: Write> NotificationSink for TerminalSink<W> {
    fn notify(&mut self, event: GameEvent) {
        match event {
            GameEvent::NewGameStarted => self.board = Board::new(),
            GameEvent::BoardChanged { position, mark } => {
                self.board.set(position, Square::Occupied(mark))
            }
            _ => {}
        }

        let line = if self.json {
            match serde_json::to_string(&event) {
                Ok(json) => Some(json),
                Err(e) => {
                    warn!(error = %e, ?event, "Failed to encode event");
                    None
                }
            }
        } else {
            self.render(&event)
        };

        let Some(line) = line else {
            debug!(?event, "Event not rendered");
            return;
        };
        if let Err(e) = writeln!(self.out, "{}", line).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write to terminal");
        }
    }
}
