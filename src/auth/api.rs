//! Authentication API Endpoints
//! Mission: Provide the signup and token issuance endpoints

use crate::auth::{
    credentials::validate_credentials,
    errors::ApiError,
    jwt::TokenService,
    models::{SignupRequest, TokenRequest, TokenResponse},
    signup::validate_signup,
    user_store::UserStore,
};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared auth state
#[derive(Clone)]
pub struct AuthState {
    pub user_store: Arc<dyn UserStore>,
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    pub fn new(user_store: Arc<dyn UserStore>, tokens: Arc<TokenService>) -> Self {
        Self { user_store, tokens }
    }
}

/// Signup endpoint - POST /signup
///
/// Runs the rule checks, then creates the account. Success is a bare 200
/// with an empty body; every failure carries a `message` JSON object.
pub async fn signup(
    State(state): State<AuthState>,
    Json(payload): Json<SignupRequest>,
) -> Result<StatusCode, ApiError> {
    let valid =
        validate_signup(&payload).map_err(|errors| ApiError::Validation(errors.join(" ")))?;

    if state.user_store.username_exists(&valid.username).await? {
        warn!("❌ Signup rejected, username taken: {}", valid.username);
        return Err(ApiError::Conflict);
    }

    // A concurrent signup can still win the race here; the UNIQUE constraint
    // surfaces that as Duplicate and the `?` maps it to the same conflict.
    let user = state
        .user_store
        .create_user(&valid.username, &valid.password)
        .await?;

    info!("✅ Signup successful: {}", user.username);

    Ok(StatusCode::OK)
}

/// Token endpoint - POST /token
///
/// Verifies credentials and answers with a signed token for the identity.
pub async fn token(
    State(state): State<AuthState>,
    Json(payload): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    // Absent fields count as wrong credentials, not as a malformed request
    let username = payload.username.unwrap_or_default();
    let password = payload.password.unwrap_or_default();

    info!("🔐 Token request: {}", username);

    let user = validate_credentials(state.user_store.as_ref(), &username, &password)
        .await
        .map_err(|err| {
            warn!("❌ Token request rejected for {}: {:?}", username, err);
            ApiError::from(err)
        })?;

    let token = state
        .tokens
        .issue(&user.username)
        .map_err(|e| ApiError::Storage(e.to_string()))?;

    info!("✅ Token issued: {}", user.username);

    Ok(Json(TokenResponse { token }))
}
