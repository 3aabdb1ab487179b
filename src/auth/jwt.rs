//! JWT Token Handler
//! Mission: Sign and verify session tokens with a single shared secret

use crate::auth::models::Claims;
use anyhow::{Context, Result};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Token service for issuing and verifying session tokens
///
/// Constructed once from the configured secret and handed to both the token
/// endpoint and the gate middleware, so the two sides can never disagree on
/// key material.
pub struct TokenService {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a new token service from the signing secret
    pub fn new(secret: &str) -> Self {
        // Tokens carry only the identity claim, so the default validation
        // (which insists on `exp`) would reject every one of them.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        Self {
            header: Header::default(),
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Sign a token for an already-authenticated identity.
    ///
    /// With no timestamp claims in the payload, issuance is deterministic:
    /// the same username under the same secret yields a byte-identical token.
    pub fn issue(&self, username: &str) -> Result<String> {
        let claims = Claims {
            user: username.to_string(),
        };

        debug!("Issuing token for {}", username);

        encode(&self.header, &claims, &self.encoding_key).context("Failed to sign token")
    }

    /// Verify a token's structure and signature and extract its claims.
    ///
    /// The signature comparison inside `decode` is constant-time, so a
    /// forged token learns nothing from response timing.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let decoded = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Invalid token")?;

        debug!("Verified token for {}", decoded.claims.user);

        Ok(decoded.claims)
    }
}
