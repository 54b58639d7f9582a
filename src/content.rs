//! Chirp body filtering
//!
//! Applied by the request layer before a body reaches the store.

use thiserror::Error;

/// Maximum chirp length in characters
pub const MAX_CHIRP_LENGTH: usize = 140;

const BLOCKED_WORDS: [&str; 3] = ["kerfuffle", "sharbert", "fornax"];
const REPLACEMENT: &str = "****";

/// Rejected chirp bodies
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("Chirp is too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
}

/// Checks the length limit and returns the cleaned body
pub fn validate_chirp(body: &str) -> Result<String, ContentError> {
    let length = body.chars().count();
    if length > MAX_CHIRP_LENGTH {
        return Err(ContentError::TooLong {
            length,
            max: MAX_CHIRP_LENGTH,
        });
    }

    Ok(clean_chirp(body))
}

/// Masks blocked words.
///
/// Words are split on single spaces and matched case-insensitively as a
/// whole, so a blocked word with punctuation attached is kept.
pub fn clean_chirp(body: &str) -> String {
    body.split(' ')
        .map(|word| {
            if BLOCKED_WORDS.contains(&word.to_lowercase().as_str()) {
                REPLACEMENT
            } else {
                word
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
