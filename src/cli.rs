//! Command-line interface for countdown_tictactoe.

use clap::Parser;
use std::path::PathBuf;

/// Countdown tic-tac-toe - beat the computer before the clock runs out
#[derive(Parser, Debug)]
#[command(name = "countdown_tictactoe")]
#[command(about = "Timed tic-tac-toe against a random computer player", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML timing config (defaults apply when omitted)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed for the computer's random picks (reproducible games)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Write every game event as one JSON line instead of drawing the board
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["countdown_tictactoe"]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        assert!(!cli.json);
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "countdown_tictactoe",
            "--config",
            "timing.toml",
            "--seed",
            "7",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("timing.toml")));
        assert_eq!(cli.seed, Some(7));
        assert!(cli.json);
    }
}
