//! CLI command implementations

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde_json::json;

use crate::api::{ApiError, ApiHandler, Response};
use crate::config::Config;
use crate::observability::Logger;
use crate::store::Store;

use super::args::Command;
use super::errors::CliResult;

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Init { config } => init(config.as_deref()),
        Command::Exec { config } => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            exec(config.as_deref(), stdin.lock(), stdout.lock())
        }
    }
}

/// Load the config file, or defaults when no path is given
fn load_config(path: Option<&Path>) -> CliResult<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => Ok(Config::default()),
    }
}

fn open_store(config: &Config) -> CliResult<Store> {
    let store = Store::open_with_hasher(config.db_path(), config.hasher()?)?;
    Logger::info(
        "STORE_OPENED",
        &[("path", store.path().display().to_string().as_str())],
    );
    Ok(store)
}

/// Create the snapshot file if missing and report its path
pub fn init(config_path: Option<&Path>) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;

    let response = Response::success(json!({ "db_path": store.path().display().to_string() }));
    let mut stdout = io::stdout();
    writeln!(stdout, "{}", response.to_json())?;
    stdout.flush()?;

    Ok(())
}

/// Answer one JSON request per input line with one JSON response line.
///
/// Blank lines are skipped. Request failures, including lines that are not
/// valid UTF-8, are reported in-band and do not stop the loop.
pub fn exec<R: BufRead, W: Write>(
    config_path: Option<&Path>,
    mut input: R,
    mut output: W,
) -> CliResult<()> {
    let config = load_config(config_path)?;
    let store = open_store(&config)?;
    let handler = ApiHandler::new(&store);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        let response = match std::str::from_utf8(trim_line_ending(&buf)) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => handler.handle(line),
            Err(e) => Response::error(&ApiError::invalid_request(format!(
                "request is not valid UTF-8: {}",
                e
            ))),
        };

        writeln!(output, "{}", response.to_json())?;
        output.flush()?;
    }

    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
