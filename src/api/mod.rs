//! Request layer for chirpstore
//!
//! Typed request and response records, one per store operation. Callers
//! feed JSON lines to `ApiHandler::handle` and get JSON lines back; errors
//! carry the HTTP status a transport layer would answer with.

mod errors;
mod handler;
mod request;
mod response;

pub use errors::{ApiError, ApiErrorCode, ApiResult};
pub use handler::ApiHandler;
pub use request::{
    CreateChirpRequest, CredentialsRequest, DeleteChirpRequest, GetChirpRequest, GetUserRequest,
    ListChirpsRequest, Request, TokenRequest, UpdateUserRequest, UpgradeUserRequest,
};
pub use response::{ErrorResponse, Response, SuccessResponse};
