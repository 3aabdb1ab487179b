//! Authgate - JWT Authentication Gate
//! Mission: Turn a credential check into a signed token, then verify that
//! token statelessly in front of protected routes

use anyhow::{Context, Result};
use dotenv::dotenv;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authgate::{
    api::create_router,
    auth::{AuthState, SqliteUserStore, TokenService},
    config::Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    load_env();
    init_tracing();

    info!("🚀 Authgate starting");

    let config = Config::from_env().context("Failed to load configuration")?;

    let user_store =
        Arc::new(SqliteUserStore::new(&config.database_path).context("Failed to open user store")?);
    let tokens = Arc::new(TokenService::new(&config.token_secret));
    let auth_state = AuthState::new(user_store, tokens);

    info!("🔐 User store initialized at: {}", config.database_path);

    let app = create_router(auth_state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("🎯 API server listening on {}", addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Initialize tracing with env-filter overrides
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authgate=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_env() {
    // 1) Standard dotenv search (cwd + parents)
    let _ = dotenv();

    // 2) Also try the crate-root .env (common when running with
    // --manifest-path from elsewhere)
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let crate_env = manifest_dir.join(".env");
    if crate_env.exists() {
        let _ = dotenv::from_path(&crate_env);
    }
}
