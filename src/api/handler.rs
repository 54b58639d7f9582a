//! API Handler for chirpstore
//!
//! Turns one request line into one store call and one response. The
//! handler holds no state of its own; all synchronization lives in the
//! `Store`.

use serde_json::{json, Value};

use crate::content::validate_chirp;
use crate::observability::Logger;
use crate::snapshot::{Chirp, UserProfile};
use crate::store::Store;

use super::errors::{ApiError, ApiResult};
use super::request::Request;
use super::response::Response;

/// Request dispatcher over a shared store
pub struct ApiHandler<'a> {
    store: &'a Store,
}

impl<'a> ApiHandler<'a> {
    /// Create a handler over `store`
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Handle a raw JSON request line
    pub fn handle(&self, json_request: &str) -> Response {
        let result = Request::parse(json_request)
            .map_err(ApiError::from)
            .and_then(|request| self.dispatch(request));

        match result {
            Ok(data) => Response::success(data),
            Err(err) => {
                if err.status() >= 500 {
                    Logger::error(
                        "REQUEST_FAILED",
                        &[("code", err.code()), ("message", err.message())],
                    );
                }
                Response::error(&err)
            }
        }
    }

    /// Execute a parsed request
    pub fn dispatch(&self, request: Request) -> ApiResult<Value> {
        match request {
            Request::CreateChirp(req) => {
                let body = validate_chirp(&req.body)?;
                let chirp = self.store.create_chirp(req.author_id, body)?;
                Ok(chirp_json(&chirp))
            }
            Request::GetChirp(req) => Ok(chirp_json(&self.store.get_chirp(req.id)?)),
            Request::ListChirps(req) => {
                let chirps = self.store.list_chirps(req.author_id, req.sort)?;
                Ok(Value::Array(chirps.iter().map(chirp_json).collect()))
            }
            Request::DeleteChirp(req) => {
                self.store.delete_chirp(req.id, req.requesting_user_id)?;
                Ok(Value::Null)
            }
            Request::CreateUser(req) => {
                let user = self.store.create_user(&req.email, &req.password)?;
                Ok(profile_json(&user.profile()))
            }
            Request::GetUser(req) => {
                let user = self.store.get_user_by_email(&req.email)?;
                Ok(profile_json(&user.profile()))
            }
            Request::UpdateUser(req) => {
                let user = self
                    .store
                    .update_user_credentials(req.id, &req.email, &req.password)?;
                Ok(profile_json(&user.profile()))
            }
            Request::Login(req) => {
                let user = self.store.verify_password(&req.email, &req.password)?;
                Ok(profile_json(&user.profile()))
            }
            Request::UpgradeUser(req) => {
                self.store.upgrade_user(req.id)?;
                Ok(Value::Null)
            }
            Request::RevokeToken(req) => {
                self.store.revoke_token(&req.token)?;
                Ok(Value::Null)
            }
            Request::IsTokenRevoked(req) => {
                let revoked = self.store.is_token_revoked(&req.token)?;
                Ok(json!({ "revoked": revoked }))
            }
        }
    }
}

fn chirp_json(chirp: &Chirp) -> Value {
    json!({
        "id": chirp.id,
        "author_id": chirp.author_id,
        "body": chirp.body,
    })
}

fn profile_json(profile: &UserProfile) -> Value {
    json!({
        "id": profile.id,
        "email": profile.email,
        "is_upgraded": profile.is_upgraded,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Argon2Hasher;
    use tempfile::TempDir;

    fn setup() -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let store = Store::open_with_hasher(
            dir.path().join("database.json"),
            Argon2Hasher::with_cost(1024, 1).unwrap(),
        )
        .unwrap();
        (dir, store)
    }

    fn call(handler: &ApiHandler<'_>, line: &str) -> Value {
        serde_json::from_str(&handler.handle(line).to_json()).unwrap()
    }

    #[test]
    fn test_create_chirp_is_cleaned() {
        let (_dir, store) = setup();
        let handler = ApiHandler::new(&store);

        let resp = call(&handler, r#"{"op":"create_chirp","author_id":7,"body":"what a kerfuffle"}"#);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["data"]["id"], 1);
        assert_eq!(resp["data"]["body"], "what a ****");
    }

    #[test]
    fn test_long_chirp_rejected_without_write() {
        let (_dir, store) = setup();
        let handler = ApiHandler::new(&store);
        let line = json!({"op": "create_chirp", "author_id": 1, "body": "x".repeat(141)}).to_string();

        let resp = call(&handler, &line);
        assert_eq!(resp["code"], "CHIRP_TOO_LONG");
        assert_eq!(resp["http_status"], 400);
        assert!(store.list_chirps(None, Default::default()).unwrap().is_empty());
    }

    #[test]
    fn test_user_responses_never_include_hash() {
        let (_dir, store) = setup();
        let handler = ApiHandler::new(&store);

        let created = handler
            .handle(r#"{"op":"create_user","email":"A@B.C","password":"pw"}"#)
            .to_json();
        let login = handler
            .handle(r#"{"op":"login","email":"a@b.c","password":"pw"}"#)
            .to_json();

        for json in [&created, &login] {
            assert!(json.contains("\"email\":\"a@b.c\""));
            assert!(!json.contains("password"));
            assert!(!json.contains("argon2"));
        }
    }

    #[test]
    fn test_error_mapping() {
        let (_dir, store) = setup();
        let handler = ApiHandler::new(&store);
        call(&handler, r#"{"op":"create_chirp","author_id":1,"body":"hi"}"#);

        let forbidden = call(&handler, r#"{"op":"delete_chirp","id":1,"requesting_user_id":2}"#);
        assert_eq!(forbidden["code"], "FORBIDDEN");
        assert_eq!(forbidden["http_status"], 403);

        let missing = call(&handler, r#"{"op":"get_chirp","id":9}"#);
        assert_eq!(missing["http_status"], 404);

        call(&handler, r#"{"op":"revoke_token","token":"t"}"#);
        let again = call(&handler, r#"{"op":"revoke_token","token":"t"}"#);
        assert_eq!(again["code"], "TOKEN_ALREADY_REVOKED");
        assert_eq!(again["http_status"], 409);

        let revoked = call(&handler, r#"{"op":"is_token_revoked","token":"t"}"#);
        assert_eq!(revoked["data"]["revoked"], true);

        let bad = call(&handler, "not json");
        assert_eq!(bad["code"], "INVALID_REQUEST");
        assert_eq!(bad["http_status"], 400);
    }
}
