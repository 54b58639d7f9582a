//! Configuration file
//!
//! ```json
//! { "db_path": "./database.json", "hash_memory_kib": 19456, "hash_iterations": 2 }
//! ```
//!
//! Every field is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::Argon2Hasher;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Path of the snapshot file
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Argon2 memory cost in KiB
    #[serde(default = "default_hash_memory_kib")]
    pub hash_memory_kib: u32,

    /// Argon2 iteration count
    #[serde(default = "default_hash_iterations")]
    pub hash_iterations: u32,
}

fn default_db_path() -> String {
    "./database.json".to_string()
}
fn default_hash_memory_kib() -> u32 {
    19 * 1024
}
fn default_hash_iterations() -> u32 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            hash_memory_kib: default_hash_memory_kib(),
            hash_iterations: default_hash_iterations(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_json(&content)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".to_string()));
        }

        if self.hash_memory_kib == 0 {
            return Err(ConfigError::Invalid("hash_memory_kib must be > 0".to_string()));
        }

        if self.hash_iterations == 0 {
            return Err(ConfigError::Invalid("hash_iterations must be > 0".to_string()));
        }

        Ok(())
    }

    /// Get the snapshot file path
    pub fn db_path(&self) -> &Path {
        Path::new(&self.db_path)
    }

    /// Build the password hasher described by this config
    pub fn hasher(&self) -> Result<Argon2Hasher, ConfigError> {
        Argon2Hasher::with_cost(self.hash_memory_kib, self.hash_iterations).map_err(|_| {
            ConfigError::Invalid(format!(
                "unsupported argon2 cost: memory {} KiB, {} iterations",
                self.hash_memory_kib, self.hash_iterations
            ))
        })
    }
}
