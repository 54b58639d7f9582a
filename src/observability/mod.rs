//! Observability for chirpstore
//!
//! Structured JSON event logging. Logging is read-only: it never changes
//! the outcome of the operation that emits it.
//!
//! ```ignore
//! use chirpstore::observability::Logger;
//!
//! Logger::info("CHIRP_CREATED", &[("chirp_id", "1")]);
//! ```

mod logger;

pub use logger::{Logger, Severity};
