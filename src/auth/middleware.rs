//! Token Gate Middleware
//! Mission: Protect routes by verifying the token on every request

use crate::auth::{errors::ApiError, jwt::TokenService, models::Claims};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Gate middleware that verifies the session token
///
/// The token travels as the raw value of the `Authorization` header; this
/// protocol has no `Bearer ` prefix. Verification is stateless, so any
/// instance holding the secret can admit a request. Decoded claims go into
/// the request extensions for downstream handlers.
pub async fn token_gate(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::NoToken)?;

    let claims = tokens.verify(token).map_err(|_| ApiError::InvalidToken)?;

    debug!("🔓 Gate admitted {}", claims.user);

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extract claims from request (use after the gate)
pub fn extract_claims(req: &Request) -> Option<&Claims> {
    req.extensions().get::<Claims>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware,
        routing::get,
        Extension, Json, Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn gated_app(tokens: Arc<TokenService>) -> Router {
        Router::new()
            .route(
                "/secure",
                get(|Extension(claims): Extension<Claims>| async move {
                    Json(json!({ "user": claims.user }))
                }),
            )
            .route_layer(middleware::from_fn_with_state(tokens, token_gate))
    }

    fn get_secure(token: Option<&str>) -> HttpRequest<Body> {
        let mut builder = HttpRequest::builder().uri("/secure");
        if let Some(token) = token {
            builder = builder.header("Authorization", token);
        }
        builder.body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_missing_token_rejected() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let app = gated_app(tokens);

        let response = app.oneshot(get_secure(None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Unauthorized - No Token"
        );
    }

    #[tokio::test]
    async fn test_blank_header_counts_as_missing() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let app = gated_app(tokens);

        let response = app.oneshot(get_secure(Some("   "))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Unauthorized - No Token"
        );
    }

    #[tokio::test]
    async fn test_garbage_token_rejected() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let app = gated_app(tokens);

        let response = app.oneshot(get_secure(Some("not.a.token"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Unauthorized - Invalid Token"
        );
    }

    #[tokio::test]
    async fn test_valid_token_admitted_with_claims() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let token = tokens.issue("alice").unwrap();
        let app = gated_app(tokens);

        let response = app.oneshot(get_secure(Some(&token))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // The handler saw the claims the gate attached
        assert_eq!(body_json(response).await["user"], "alice");
    }

    #[tokio::test]
    async fn test_bearer_prefix_is_not_stripped() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let token = tokens.issue("alice").unwrap();
        let app = gated_app(tokens);

        // The raw header value is the token; a Bearer prefix makes it invalid
        let bearer = format!("Bearer {}", token);
        let response = app.oneshot(get_secure(Some(&bearer))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Unauthorized - Invalid Token"
        );
    }

    #[tokio::test]
    async fn test_token_from_other_secret_rejected() {
        let tokens = Arc::new(TokenService::new("test-secret-key-12345"));
        let foreign = TokenService::new("another-secret").issue("alice").unwrap();
        let app = gated_app(tokens);

        let response = app.oneshot(get_secure(Some(&foreign))).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["message"],
            "Unauthorized - Invalid Token"
        );
    }

    #[test]
    fn test_extract_claims_from_request() {
        let mut req = HttpRequest::new(Body::empty());

        assert!(extract_claims(&req).is_none());

        let claims = Claims {
            user: "alice".to_string(),
        };
        req.extensions_mut().insert(claims);

        let extracted = extract_claims(&req);
        assert!(extracted.is_some());
        assert_eq!(extracted.unwrap().user, "alice");
    }
}
