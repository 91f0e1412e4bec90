//! Wiring analyzer - Entry Point
//!
//! Lives in the `wiring` facade crate next to the library so the binary and
//! the library share one name.
//!
//! | Command | Description |
//! |---------|-------------|
//! | `wiring analyze <SNAPSHOT>` | Print the registration plan and diagnostics |
//! | `wiring codes` | List diagnostic codes |
//!
//! Exit status: 0 when the run passes, 1 when diagnostics reach the
//! `--fail-on` threshold, 2 on configuration or input errors.

use clap::Parser;
use std::process::ExitCode;
use wiring::cli::{Cli, execute, load_config};
use wiring::infrastructure::init_logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let outcome = load_config(cli.config.as_deref()).and_then(|config| {
        init_logging(&config.logging)?;
        execute(&cli.command, &config)
    });

    match outcome {
        Ok(outcome) => {
            print!("{}", outcome.output);
            if outcome.passed {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(2)
        }
    }
}
