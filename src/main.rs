//! chirpstore CLI entry point
//!
//! Parses arguments, runs the command, logs any error as a FATAL event on
//! stderr and exits non-zero on failure. All logic lives in the `cli`
//! module.

use chirpstore::cli;
use chirpstore::observability::Logger;

fn main() {
    if let Err(e) = cli::run() {
        Logger::fatal(
            "COMMAND_FAILED",
            &[("code", e.code().code()), ("message", e.message())],
        );
        std::process::exit(1);
    }
}
