//! CLI argument definitions using clap
//!
//! Commands:
//! - chirpstore init [--config <path>]
//! - chirpstore exec [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// chirpstore - a single-file record store for chirps and users
#[derive(Parser, Debug)]
#[command(name = "chirpstore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the snapshot file if it does not exist
    Init {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Execute JSON requests read line by line from stdin
    Exec {
        /// Path to configuration file (defaults apply when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
