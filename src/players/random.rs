//! Uniform random picker.

use super::CellPicker;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

/// Picks uniformly at random with a seedable RNG.
#[derive(Debug, Clone)]
pub struct RandomPicker {
    name: String,
    rng: StdRng,
}

impl RandomPicker {
    /// Creates a picker seeded from the operating system.
    pub fn from_entropy() -> Self {
        info!("Creating random picker from OS entropy");
        Self {
            name: "Computer".to_string(),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible picker.
    pub fn seeded(seed: u64) -> Self {
        info!(seed, "Creating seeded random picker");
        Self {
            name: format!("Computer (seed {seed})"),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl CellPicker for RandomPicker {
    fn pick(&mut self, open: usize) -> usize {
        self.rng.random_range(0..open.max(1))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_stay_in_range() {
        let mut picker = RandomPicker::seeded(7);
        for open in 1..=9 {
            for _ in 0..50 {
                assert!(picker.pick(open) < open);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = RandomPicker::seeded(42);
        let mut b = RandomPicker::seeded(42);
        let seq_a: Vec<_> = (0..20).map(|_| a.pick(9)).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.pick(9)).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_every_cell_reachable() {
        let mut picker = RandomPicker::seeded(1);
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[picker.pick(9)] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }
}
