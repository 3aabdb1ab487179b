//! Signup Rules
//! Mission: Check account requests against the username and password rules

use crate::auth::models::SignupRequest;

/// Minimum username length, inclusive
pub const MIN_USERNAME_LENGTH: usize = 2;
/// Maximum username length, inclusive
pub const MAX_USERNAME_LENGTH: usize = 12;
/// Passwords must be strictly longer than this
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// A signup request whose fields passed every rule
#[derive(Debug)]
pub struct ValidSignup {
    pub username: String,
    pub password: String,
}

/// Check a signup request against the account rules.
///
/// Every rule is evaluated; nothing short-circuits. A request that breaks
/// several rules gets every message back at once, in rule order.
pub fn validate_signup(request: &SignupRequest) -> Result<ValidSignup, Vec<&'static str>> {
    let mut errors = Vec::new();

    let username = match request.username.as_deref() {
        None => {
            errors.push("Username not given.");
            None
        }
        Some(username) => {
            // chars(), not bytes: multi-byte usernames count per character
            let length = username.chars().count();
            if length < MIN_USERNAME_LENGTH {
                errors.push("Username too short, it must be at least 2 characters.");
            }
            if length > MAX_USERNAME_LENGTH {
                errors.push("Username too long, it must be no more than 12 characters.");
            }
            Some(username)
        }
    };

    let password = match request.password.as_deref() {
        None => {
            errors.push("Password not given.");
            None
        }
        Some(password) => {
            // The bound is exclusive: a 6-character password is rejected
            // even though the message says "at least 6".
            if password.chars().count() <= MIN_PASSWORD_LENGTH {
                errors.push("Password too short, it must be at least 6 characters.");
            }
            Some(password)
        }
    };

    match (username, password) {
        (Some(username), Some(password)) if errors.is_empty() => Ok(ValidSignup {
            username: username.to_string(),
            password: password.to_string(),
        }),
        // A missing field always pushed a message, so this arm never carries
        // an empty list
        _ => Err(errors),
    }
}
