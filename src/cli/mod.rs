//! CLI module for chirpstore
//!
//! Provides command-line interface for:
//! - init: create the snapshot file
//! - exec: answer JSON requests from stdin

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{exec, init, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}
