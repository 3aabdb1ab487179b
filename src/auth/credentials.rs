//! Credential Checks
//! Mission: Resolve a username/password pair to a stored account

use crate::auth::user_store::{StoreError, UserRecord, UserStore};
use tracing::debug;

/// Why a credential check failed.
///
/// `UserNotFound` and `InvalidPassword` stay distinct here for logging; the
/// HTTP boundary folds them into one response so callers cannot probe which
/// usernames exist.
#[derive(Debug)]
pub enum CredentialError {
    UserNotFound,
    InvalidPassword,
    Store(StoreError),
}

impl From<StoreError> for CredentialError {
    fn from(err: StoreError) -> Self {
        CredentialError::Store(err)
    }
}

/// Check a username/password pair against the store.
///
/// Returns the stored record on success so the caller can issue a token for
/// the canonical username.
pub async fn validate_credentials(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<UserRecord, CredentialError> {
    let user = store
        .get_user_by_username(username)
        .await?
        .ok_or(CredentialError::UserNotFound)?;

    if user.verify_password(password)? {
        debug!("Credentials accepted for {}", user.username);
        Ok(user)
    } else {
        Err(CredentialError::InvalidPassword)
    }
}
