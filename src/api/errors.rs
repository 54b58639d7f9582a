//! API error types
//!
//! API errors either originate in the request layer (bad JSON, rejected
//! chirp body) or pass a store error through with its code and status.

use std::fmt;

use crate::content::ContentError;
use crate::errors::StoreError;

/// Request-layer error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Request is not valid JSON or not a known operation
    InvalidRequest,
    /// Chirp body rejected by the content filter
    ChirpTooLong,
}

impl ApiErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidRequest => "INVALID_REQUEST",
            ApiErrorCode::ChirpTooLong => "CHIRP_TOO_LONG",
        }
    }
}

/// API error with the store's code preserved on pass-through
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: &'static str,
    status: u16,
    message: String,
}

impl ApiError {
    /// Create an invalid request error
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self {
            code: ApiErrorCode::InvalidRequest.code(),
            status: 400,
            message: reason.into(),
        }
    }

    /// Returns the error code string
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Returns the HTTP status a transport layer should use
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self {
            code: err.code(),
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl From<ContentError> for ApiError {
    fn from(err: ContentError) -> Self {
        match err {
            ContentError::TooLong { .. } => Self {
                code: ApiErrorCode::ChirpTooLong.code(),
                status: 400,
                message: err.to_string(),
            },
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_request(format!("Invalid request: {}", err))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.code, self.status, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Entity;

    #[test]
    fn test_store_error_passes_through() {
        let err = ApiError::from(StoreError::NotFound(Entity::Chirp));
        assert_eq!(err.code(), "CHIRP_NOT_FOUND");
        assert_eq!(err.status(), 404);
    }

    #[test]
    fn test_content_error_is_bad_request() {
        let err = ApiError::from(ContentError::TooLong { length: 200, max: 140 });
        assert_eq!(err.code(), "CHIRP_TOO_LONG");
        assert_eq!(err.status(), 400);
    }
}
