//! Countdown tic-tac-toe - terminal front end
//!
//! Reads moves from stdin and drives the turn controller in real time.

#![warn(missing_docs)]

mod cli;
mod shell;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use countdown_tictactoe::{CellPicker, NotificationSink, RandomPicker, TimingConfig, TurnController};
use shell::{ShellCommand, TerminalSink};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

/// Sleep used when no timer is pending.
const IDLE_WAIT: Duration = Duration::from_secs(3600);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Log to a file so stdout stays the game view
    let log_file = std::fs::File::create("countdown_tictactoe.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,countdown_tictactoe=debug")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();

    info!(?cli, "Starting countdown tic-tac-toe");

    let config = match &cli.config {
        Some(path) => TimingConfig::from_file(path)?,
        None => TimingConfig::default(),
    };
    let picker = match cli.seed {
        Some(seed) => RandomPicker::seeded(seed),
        None => RandomPicker::from_entropy(),
    };
    let sink = TerminalSink::new(std::io::stdout(), cli.json);

    run(TurnController::new(config, sink, picker)).await
}

/// Feeds stdin commands and wall-clock time into the controller until quit or EOF.
#[instrument(skip_all)]
async fn run<S: NotificationSink, P: CellPicker>(mut controller: TurnController<S, P>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last = Instant::now();

    controller.start_new_game();

    loop {
        let wait = controller.next_deadline().unwrap_or(IDLE_WAIT);

        tokio::select! {
            line = lines.next_line() => {
                let now = Instant::now();
                controller.advance(now - last)?;
                last = now;

                let Some(line) = line? else {
                    info!("Input closed");
                    break;
                };
                match ShellCommand::parse(&line) {
                    Some(ShellCommand::Select(index)) => controller.cell_selected(index)?,
                    Some(ShellCommand::NewGame) => controller.new_game_requested(),
                    Some(ShellCommand::Quit) => {
                        info!("Quit requested");
                        break;
                    }
                    None => debug!(%line, "Unrecognised input"),
                }
            }
            _ = sleep(wait) => {
                let now = Instant::now();
                controller.advance(now - last)?;
                last = now;
            }
        }
    }

    info!(virtual_time = ?controller.now(), "Shutting down");
    Ok(())
}
