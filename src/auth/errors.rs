//! API Error Taxonomy
//! Mission: Map every internal failure kind onto the HTTP contract in one place

use crate::auth::credentials::CredentialError;
use crate::auth::user_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

/// Every way an authentication request can fail.
///
/// Each variant carries exactly one status code and one client-visible
/// message; the whole wire contract lives in the single match below.
#[derive(Debug)]
pub enum ApiError {
    /// Signup rule violations, already joined into one message
    Validation(String),
    /// Username already taken
    Conflict,
    /// Unknown user or wrong password; the two are indistinguishable here
    InvalidCredentials,
    /// Protected request without an Authorization header
    NoToken,
    /// Protected request whose token failed verification
    InvalidToken,
    /// Store failure, its message passed through to the client
    Storage(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate => ApiError::Conflict,
            StoreError::Backend(message) => ApiError::Storage(message),
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        match err {
            // Folded so responses cannot be used to probe for usernames
            CredentialError::UserNotFound | CredentialError::InvalidPassword => {
                ApiError::InvalidCredentials
            }
            CredentialError::Store(e) => e.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Conflict => (StatusCode::BAD_REQUEST, "User already exists.".to_string()),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid User/Password Combination".to_string(),
            ),
            ApiError::NoToken => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized - No Token".to_string(),
            ),
            ApiError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized - Invalid Token".to_string(),
            ),
            ApiError::Storage(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}
