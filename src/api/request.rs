//! API request types
//!
//! One JSON object per request, tagged by `op`.

use serde::Deserialize;

use crate::snapshot::{ChirpId, UserId};
use crate::store::SortOrder;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateChirpRequest {
    pub author_id: UserId,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetChirpRequest {
    pub id: ChirpId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListChirpsRequest {
    #[serde(default)]
    pub author_id: Option<UserId>,
    #[serde(default)]
    pub sort: SortOrder,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteChirpRequest {
    pub id: ChirpId,
    pub requesting_user_id: UserId,
}

/// Used by both `create_user` and `login`
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GetUserRequest {
    pub email: String,
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateUserRequest {
    pub id: UserId,
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for UpdateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateUserRequest")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpgradeUserRequest {
    pub id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenRequest {
    pub token: String,
}

/// Unified request envelope
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Request {
    CreateChirp(CreateChirpRequest),
    GetChirp(GetChirpRequest),
    ListChirps(ListChirpsRequest),
    DeleteChirp(DeleteChirpRequest),
    CreateUser(CredentialsRequest),
    GetUser(GetUserRequest),
    UpdateUser(UpdateUserRequest),
    Login(CredentialsRequest),
    UpgradeUser(UpgradeUserRequest),
    RevokeToken(TokenRequest),
    IsTokenRevoked(TokenRequest),
}

impl Request {
    /// Parse a request from one line of JSON
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
