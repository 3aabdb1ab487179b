//! Authentication Models
//! Mission: Define the wire-level request/response structures and the token payload

use serde::{Deserialize, Serialize};

/// JWT Claims payload
///
/// The token carries nothing but the authenticated identity. There is no
/// expiry claim; tokens stay valid until the signing secret changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: String,
}

/// Signup request body
///
/// Both fields are optional on the wire so that an absent field reaches the
/// rule checks (and produces a "not given" message) instead of being bounced
/// by the JSON deserializer.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Token request body
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Token response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
