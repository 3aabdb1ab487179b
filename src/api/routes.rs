use axum::{
    middleware,
    response::Json,
    routing::{get, post},
    Extension, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::auth::{api as auth_api, models::Claims, token_gate, AuthState};

/// Create the application router
///
/// Three surfaces: the auth endpoints, the gated routes behind the token
/// gate, and the open routes. The gate layer gets its own handle to the
/// token service, so issuance and verification always share key material.
pub fn create_router(auth_state: AuthState) -> Router {
    let tokens = auth_state.tokens.clone();

    let auth_routes = Router::new()
        .route("/signup", post(auth_api::signup))
        .route("/token", post(auth_api::token))
        .with_state(auth_state);

    let protected_routes = Router::new()
        .route("/secure", get(secure))
        .route_layer(middleware::from_fn_with_state(tokens, token_gate));

    let open_routes = Router::new()
        .route("/unsecure", get(unsecure))
        .route("/health", get(health_check));

    Router::new()
        .merge(auth_routes)
        .merge(protected_routes)
        .merge(open_routes)
        .layer(middleware::from_fn(crate::middleware::request_logging))
        .layer(CorsLayer::permissive())
}

// ===== Route Handlers =====

/// Protected route - only reachable through the token gate
async fn secure(Extension(claims): Extension<Claims>) -> Json<Value> {
    info!("🔓 Secure route accessed by {}", claims.user);
    Json(json!({ "message": "Successful Access" }))
}

/// Open counterpart to the protected route
async fn unsecure() -> Json<Value> {
    Json(json!({ "message": "This is an unsecure route." }))
}

/// Health check endpoint
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ===== Request/Response Types =====

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}
