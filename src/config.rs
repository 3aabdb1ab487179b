//! Runtime Configuration
//! Mission: Resolve ports, paths, and the signing secret once at startup

use anyhow::Result;
use std::env;
use std::path::PathBuf;

/// Application configuration
///
/// The signing secret lives here and nowhere else; whoever needs it gets it
/// handed over at construction time instead of reading the environment
/// ambiently.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    pub token_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .unwrap_or(3000);

        let database_path = resolve_data_path(env::var("AUTH_DB_PATH").ok(), "authgate_users.db");

        let token_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "dev-secret-change-in-production-minimum-32-characters".to_string());

        Ok(Self {
            port,
            database_path,
            token_secret,
        })
    }
}

fn default_data_path(filename: &str) -> String {
    // Anchor defaults to the crate directory
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    base.join(filename).to_string_lossy().to_string()
}

fn resolve_data_path(env_value: Option<String>, default_filename: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let Some(raw) = env_value.filter(|v| !v.trim().is_empty()) else {
        return default_data_path(default_filename);
    };

    let p = PathBuf::from(raw);
    if p.is_absolute() {
        return p.to_string_lossy().to_string();
    }

    // Treat relative paths as relative to the crate directory, not the
    // caller's cwd.
    base.join(p).to_string_lossy().to_string()
}
