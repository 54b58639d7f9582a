//! API response types

use serde::Serialize;
use serde_json::Value;

use super::errors::ApiError;

/// Success response
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse {
    pub status: &'static str,
    pub data: Value,
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: &'static str,
    pub http_status: u16,
    pub message: String,
}

impl ErrorResponse {
    /// Create from an API error
    pub fn from_error(err: &ApiError) -> Self {
        Self {
            status: "error",
            code: err.code(),
            http_status: err.status(),
            message: err.message().to_string(),
        }
    }
}

/// Unified response type
#[derive(Debug, Clone)]
pub enum Response {
    Success(SuccessResponse),
    Error(ErrorResponse),
}

impl Response {
    /// Create a success response
    pub fn success(data: Value) -> Self {
        Response::Success(SuccessResponse {
            status: "ok",
            data,
        })
    }

    /// Create an error response
    pub fn error(err: &ApiError) -> Self {
        Response::Error(ErrorResponse::from_error(err))
    }

    /// Returns whether this is a success response
    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }

    /// Convert to a single JSON line
    pub fn to_json(&self) -> String {
        let encoded = match self {
            Response::Success(s) => serde_json::to_string(s),
            Response::Error(e) => serde_json::to_string(e),
        };
        encoded.unwrap_or_else(|_| {
            r#"{"status":"error","code":"INTERNAL","http_status":500,"message":"response encoding failed"}"#
                .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_json() {
        let json = Response::success(serde_json::json!({"id": 1})).to_json();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["status"], "ok");
        assert_eq!(parsed["data"]["id"], 1);
    }

    #[test]
    fn test_error_json() {
        let response = Response::error(&ApiError::invalid_request("bad"));
        assert!(!response.is_success());

        let parsed: Value = serde_json::from_str(&response.to_json()).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["code"], "INVALID_REQUEST");
        assert_eq!(parsed["http_status"], 400);
        assert_eq!(parsed["message"], "bad");
    }
}
