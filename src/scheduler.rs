//! Cancellable timers on a virtual clock.
//!
//! The scheduler never sleeps. Its clock only moves when the owner pops due
//! timers up to a target instant, which keeps every delay in the game
//! deterministic under test and lets a real-time driver decide how long to
//! wait between calls.

use std::time::Duration;
use tracing::{debug, instrument, trace};

/// What a timer does when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Recurring per-second countdown for the active turn.
    Countdown,
    /// One-shot delayed computer move.
    ComputerMove,
    /// One-shot automatic restart after a result.
    Restart,
}

/// Handle returned when scheduling; used to cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Handle of the timer (still valid for recurring timers).
    pub handle: TimerHandle,
    /// Timer kind.
    pub kind: TimerKind,
    /// Session generation the timer was scheduled for.
    pub generation: u64,
    /// Virtual instant the timer fired at.
    pub at: Duration,
}

#[derive(Debug, Clone)]
struct Timer {
    handle: TimerHandle,
    kind: TimerKind,
    generation: u64,
    deadline: Duration,
    period: Option<Duration>,
}

/// Timer queue driven by an explicit virtual clock.
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    timers: Vec<Timer>,
}

impl Scheduler {
    /// Creates an empty scheduler at virtual time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Whether the timer behind `handle` is still pending.
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.timers.iter().any(|t| t.handle == handle)
    }

    /// Schedules a timer that fires once, `delay` from now.
    #[instrument(skip(self))]
    pub fn schedule_once(&mut self, delay: Duration, kind: TimerKind, generation: u64) -> TimerHandle {
        self.push(delay, None, kind, generation)
    }

    /// Schedules a timer that fires every `period`, starting one period from now.
    ///
    /// A zero period is raised to one millisecond so the timer cannot fire
    /// forever at a single instant.
    #[instrument(skip(self))]
    pub fn schedule_repeating(
        &mut self,
        period: Duration,
        kind: TimerKind,
        generation: u64,
    ) -> TimerHandle {
        let period = period.max(Duration::from_millis(1));
        self.push(period, Some(period), kind, generation)
    }

    fn push(
        &mut self,
        delay: Duration,
        period: Option<Duration>,
        kind: TimerKind,
        generation: u64,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        let deadline = self.now + delay;
        debug!(?handle, ?kind, generation, ?deadline, "Timer scheduled");
        self.timers.push(Timer {
            handle,
            kind,
            generation,
            deadline,
            period,
        });
        handle
    }

    /// Cancels a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.handle != handle);
        let cancelled = self.timers.len() != before;
        if cancelled {
            debug!(?handle, "Timer cancelled");
        }
        cancelled
    }

    /// Cancels every pending timer.
    pub fn cancel_all(&mut self) {
        if !self.timers.is_empty() {
            debug!(count = self.timers.len(), "Cancelling all timers");
        }
        self.timers.clear();
    }

    /// Time from now until the earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers
            .iter()
            .map(|t| t.deadline.saturating_sub(self.now))
            .min()
    }

    /// Pops the earliest timer due at or before `until` and moves the clock to
    /// its deadline.
    ///
    /// Timers with equal deadlines fire in scheduling order. Recurring timers
    /// are re-armed one period later. Returns `None` when nothing is due; the
    /// clock is then left unchanged, so callers finish with [`Self::advance_to`].
    pub fn pop_due(&mut self, until: Duration) -> Option<Fired> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline <= until)
            .min_by_key(|(_, t)| (t.deadline, t.handle))
            .map(|(i, _)| i)?;

        let timer = &mut self.timers[index];
        let fired = Fired {
            handle: timer.handle,
            kind: timer.kind,
            generation: timer.generation,
            at: timer.deadline,
        };
        let period = timer.period;
        if let Some(period) = period {
            timer.deadline += period;
        } else {
            self.timers.remove(index);
        }
        self.now = self.now.max(fired.at);

        trace!(?fired, "Timer fired");
        Some(fired)
    }

    /// Moves the clock forward to `instant` without firing anything.
    pub fn advance_to(&mut self, instant: Duration) {
        self.now = self.now.max(instant);
    }
}
