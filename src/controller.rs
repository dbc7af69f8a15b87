//! Turn controller: one timed game against the computer, start to restart.
//!
//! The controller owns the [`GameSession`], a [`Scheduler`] for its three
//! timers, the notification sink and the computer's cell picker. Input
//! arrives through [`TurnController::cell_selected`] and
//! [`TurnController::new_game_requested`]; time arrives through
//! [`TurnController::advance`]. Anything that arrives in a state not
//! expecting it is ignored.

use crate::config::TimingConfig;
use crate::error::ControllerError;
use crate::games::tictactoe::{InvariantSet, Mark, TicTacToeInvariants};
use crate::notify::{NotificationSink, Outcome};
use crate::players::{CellPicker, choose_cell};
use crate::scheduler::{Fired, Scheduler, TimerHandle, TimerKind};
use crate::session::{Countdown, GameSession};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// Where the controller is in the game cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControllerState {
    /// No game has started yet.
    Idle,
    /// Waiting for the human (X) to select a cell.
    AwaitingHuman,
    /// Computer (O) move is scheduled.
    AwaitingComputer,
    /// Result emitted; restart is scheduled.
    Finished,
}

/// Drives one session at a time through the human/computer turn cycle.
#[derive(Debug)]
pub struct TurnController<S, P> {
    config: TimingConfig,
    session: GameSession,
    state: ControllerState,
    scheduler: Scheduler,
    countdown_timer: Option<TimerHandle>,
    computer_timer: Option<TimerHandle>,
    restart_timer: Option<TimerHandle>,
    sink: S,
    picker: P,
}

impl<S: NotificationSink, P: CellPicker> TurnController<S, P> {
    /// Creates an idle controller. Call [`Self::start_new_game`] to begin.
    #[instrument(skip(sink, picker), fields(picker = picker.name()))]
    pub fn new(config: TimingConfig, sink: S, picker: P) -> Self {
        info!("Creating turn controller");
        let session = GameSession::new(0, *config.countdown_secs());
        Self {
            config,
            session,
            state: ControllerState::Idle,
            scheduler: Scheduler::new(),
            countdown_timer: None,
            computer_timer: None,
            restart_timer: None,
            sink,
            picker,
        }
    }

    /// Current controller state.
    pub fn state(&self) -> ControllerState {
        self.state
    }

    /// The running session, or `None` while idle.
    pub fn session(&self) -> Option<&GameSession> {
        match self.state {
            ControllerState::Idle => None,
            _ => Some(&self.session),
        }
    }

    /// Timing in use.
    pub fn config(&self) -> &TimingConfig {
        &self.config
    }

    /// Virtual time since the controller was created.
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Time until the next pending timer, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// The notification sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Mutable access to the notification sink.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Cancels everything from the previous session and starts a fresh game
    /// with X to move.
    #[instrument(skip(self), fields(previous = self.session.generation()))]
    pub fn start_new_game(&mut self) {
        self.scheduler.cancel_all();
        self.countdown_timer = None;
        self.computer_timer = None;
        self.restart_timer = None;

        let countdown = *self.config.countdown_secs();
        self.session = GameSession::new(self.session.generation() + 1, countdown);
        self.state = ControllerState::AwaitingHuman;
        self.restart_countdown();

        info!(generation = self.session.generation(), "New game started");
        self.sink.on_new_game_started();
        self.sink.on_turn_changed(self.session.to_move());
        self.sink.on_countdown_tick(countdown);
    }

    /// Forces a new game from any state.
    pub fn new_game_requested(&mut self) {
        info!(state = ?self.state, "New game requested");
        self.start_new_game();
    }

    /// Human input: cell `index` (0-8) was selected.
    pub fn cell_selected(&mut self, index: usize) -> Result<(), ControllerError> {
        self.submit_human_move(index)
    }

    /// Plays X at `cell_index` when it is the human's turn.
    ///
    /// Rejected or out-of-turn input is ignored and returns `Ok`. An error
    /// means the board broke an invariant after the move.
    #[instrument(skip(self), fields(generation = self.session.generation(), state = ?self.state))]
    pub fn submit_human_move(&mut self, cell_index: usize) -> Result<(), ControllerError> {
        if self.state != ControllerState::AwaitingHuman {
            debug!("Ignoring cell selection outside the human's turn");
            return Ok(());
        }

        let mov = match self.session.place(cell_index, Mark::X) {
            Ok(mov) => mov,
            Err(e) => {
                debug!(error = %e, "Rejected human move");
                return Ok(());
            }
        };
        self.sink.on_board_changed(mov.position, mov.player);
        self.verify_invariants()?;

        if self.session.status().is_terminal() {
            self.finish(Outcome::for_winner(self.session.status().winner()));
            return Ok(());
        }

        let next = self.session.pass_turn(*self.config.countdown_secs());
        self.state = ControllerState::AwaitingComputer;
        self.restart_countdown();
        self.computer_timer = Some(self.scheduler.schedule_once(
            self.config.computer_delay(),
            TimerKind::ComputerMove,
            self.session.generation(),
        ));
        self.sink.on_turn_changed(next);
        self.sink.on_countdown_tick(self.session.countdown());
        Ok(())
    }

    /// Advances virtual time by `elapsed`, firing every timer that comes due
    /// in deadline order.
    pub fn advance(&mut self, elapsed: Duration) -> Result<(), ControllerError> {
        let target = self.scheduler.now() + elapsed;
        while let Some(fired) = self.scheduler.pop_due(target) {
            self.dispatch(fired)?;
        }
        self.scheduler.advance_to(target);
        Ok(())
    }

    fn dispatch(&mut self, fired: Fired) -> Result<(), ControllerError> {
        if fired.generation != self.session.generation() {
            debug!(?fired, current = self.session.generation(), "Dropping stale timer");
            return Ok(());
        }

        match fired.kind {
            TimerKind::Countdown => {
                self.countdown_tick();
                Ok(())
            }
            TimerKind::ComputerMove => {
                self.computer_timer = None;
                self.resolve_computer_move()
            }
            TimerKind::Restart => {
                self.restart_timer = None;
                self.start_new_game();
                Ok(())
            }
        }
    }

    /// One elapsed second for the active player. Expiry is an automatic loss.
    #[instrument(skip(self), fields(generation = self.session.generation(), state = ?self.state))]
    fn countdown_tick(&mut self) {
        if !matches!(
            self.state,
            ControllerState::AwaitingHuman | ControllerState::AwaitingComputer
        ) {
            debug!("Ignoring countdown tick outside an active turn");
            return;
        }

        match self.session.tick() {
            Countdown::Remaining(seconds) => self.sink.on_countdown_tick(seconds),
            Countdown::Expired => {
                self.stop_countdown();
                let winner = self.session.forfeit();
                self.finish(Outcome::for_winner(Some(winner)));
            }
        }
    }

    /// Plays O on a random empty cell.
    #[instrument(skip(self), fields(generation = self.session.generation(), state = ?self.state))]
    fn resolve_computer_move(&mut self) -> Result<(), ControllerError> {
        if self.state != ControllerState::AwaitingComputer {
            debug!("Ignoring computer move outside the computer's turn");
            return Ok(());
        }

        let Some(position) = choose_cell(&mut self.picker, self.session.board()) else {
            let err = ControllerError::NoEmptyCells {
                generation: self.session.generation(),
            };
            error!(board = %self.session.board().display(), "{}", err);
            return Err(err);
        };

        let mov = self
            .session
            .place(position.to_index(), Mark::O)
            .map_err(|e| {
                error!(error = %e, %position, "Computer move rejected by rules engine");
                ControllerError::InvariantViolation(format!("computer move rejected: {}", e))
            })?;
        self.sink.on_board_changed(mov.position, mov.player);
        self.verify_invariants()?;

        if self.session.status().is_terminal() {
            self.finish(Outcome::for_winner(self.session.status().winner()));
            return Ok(());
        }

        let next = self.session.pass_turn(*self.config.countdown_secs());
        self.state = ControllerState::AwaitingHuman;
        self.restart_countdown();
        self.sink.on_turn_changed(next);
        self.sink.on_countdown_tick(self.session.countdown());
        Ok(())
    }

    /// Emits the result, stops the turn timers and schedules the restart.
    #[instrument(skip(self), fields(generation = self.session.generation()))]
    fn finish(&mut self, outcome: Outcome) {
        self.state = ControllerState::Finished;
        self.stop_countdown();
        if let Some(handle) = self.computer_timer.take() {
            self.scheduler.cancel(handle);
        }

        info!(%outcome, status = ?self.session.status(), "Game over");
        self.sink.on_game_ended(outcome);

        self.restart_timer = Some(self.scheduler.schedule_once(
            self.config.restart_delay(),
            TimerKind::Restart,
            self.session.generation(),
        ));
    }

    /// Re-arms the countdown so the next decrement is one full period away.
    fn restart_countdown(&mut self) {
        self.stop_countdown();
        self.countdown_timer = Some(self.scheduler.schedule_repeating(
            self.config.tick(),
            TimerKind::Countdown,
            self.session.generation(),
        ));
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown_timer.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn verify_invariants(&self) -> Result<(), ControllerError> {
        <TicTacToeInvariants as InvariantSet<GameSession>>::check_all(&self.session).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Board invariants violated");
            ControllerError::InvariantViolation(descriptions)
        })
    }
}
