//! Scripted picker for reproducible games.

use super::CellPicker;
use std::collections::VecDeque;
use tracing::debug;

/// Replays a fixed sequence of picks, then keeps picking the first open cell.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPicker {
    picks: VecDeque<usize>,
}

impl ScriptedPicker {
    /// Creates a picker that returns `picks` in order.
    pub fn new(picks: impl IntoIterator<Item = usize>) -> Self {
        Self {
            picks: picks.into_iter().collect(),
        }
    }

    /// Picks not yet consumed.
    pub fn remaining(&self) -> usize {
        self.picks.len()
    }
}

impl CellPicker for ScriptedPicker {
    fn pick(&mut self, open: usize) -> usize {
        let pick = self.picks.pop_front().unwrap_or(0);
        debug!(pick, open, "Scripted pick");
        pick
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}
