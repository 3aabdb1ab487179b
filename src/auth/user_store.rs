//! User Storage
//! Mission: Persist user accounts behind a store capability with SQLite

use async_trait::async_trait;
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::Utc;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::fmt;
use tracing::info;
use uuid::Uuid;

/// Failure kinds a store operation can produce.
///
/// `Duplicate` is kept distinct so the signup path can answer with a
/// conflict instead of a server error when two requests race on the same
/// username.
#[derive(Debug)]
pub enum StoreError {
    /// The username is already taken (UNIQUE constraint).
    Duplicate,
    /// Any other backing-store failure, with its message preserved.
    Backend(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Duplicate => write!(f, "username already exists"),
            StoreError::Backend(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                StoreError::Duplicate
            }
            _ => StoreError::Backend(err.to_string()),
        }
    }
}

impl From<bcrypt::BcryptError> for StoreError {
    fn from(err: bcrypt::BcryptError) -> Self {
        StoreError::Backend(err.to_string())
    }
}

/// A persisted user account
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // bcrypt hash - never serialize
    pub created_at: String,
}

impl UserRecord {
    /// Compare a candidate password against the stored bcrypt hash.
    pub fn verify_password(&self, candidate: &str) -> Result<bool, StoreError> {
        Ok(verify(candidate, &self.password_hash)?)
    }
}

/// Store capability consumed by the authentication core
///
/// The handlers only ever see this trait; the SQLite backend below is wired
/// in at startup.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Check whether a username is already taken.
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError>;

    /// Fetch a user by username, `None` when no such account exists.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Hash the password and persist a new account.
    ///
    /// Returns `StoreError::Duplicate` when the username is taken; the
    /// existing record is never overwritten.
    async fn create_user(&self, username: &str, password: &str) -> Result<UserRecord, StoreError>;
}

/// User storage with SQLite backend
pub struct SqliteUserStore {
    db_path: String,
}

impl SqliteUserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str) -> Result<Self, StoreError> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<(), StoreError> {
        let conn = self.open()?;

        // Users table
        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    // Each operation opens its own connection; every call is individually
    // atomic and the store needs no shared connection state.
    fn open(&self) -> Result<Connection, StoreError> {
        Ok(Connection::open(&self.db_path)?)
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn username_exists(&self, username: &str) -> Result<bool, StoreError> {
        let conn = self.open()?;

        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM users WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )?;

        Ok(count > 0)
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        let conn = self.open()?;

        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, created_at
             FROM users WHERE username = ?1",
        )?;

        let row_result = stmt.query_row(params![username], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        });

        match row_result {
            Ok((id, username, password_hash, created_at)) => {
                let id = Uuid::parse_str(&id).map_err(|e| StoreError::Backend(e.to_string()))?;
                Ok(Some(UserRecord {
                    id,
                    username,
                    password_hash,
                    created_at,
                }))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_user(&self, username: &str, password: &str) -> Result<UserRecord, StoreError> {
        let password_hash = hash(password, DEFAULT_COST)?;

        let user = UserRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash,
            created_at: Utc::now().to_rfc3339(),
        };

        let conn = self.open()?;
        conn.execute(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.username,
                user.password_hash,
                user.created_at,
            ],
        )?;

        info!("✅ Created user: {}", user.username);

        Ok(user)
    }
}
