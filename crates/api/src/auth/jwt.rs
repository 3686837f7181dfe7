//! JWT generation/validation for access and refresh tokens.
//!
//! Both token kinds are HS256-signed JWTs carrying a [`Claims`] payload;
//! the refresh flow must recover the user from the token alone, so the
//! refresh token encodes the user id too. Only the SHA-256 hash of a
//! refresh token is persisted server-side, so a database leak does not
//! compromise active sessions. Whether a refresh token is *live* is
//! decided by [`check_refresh_token`], never by signature validity alone.

use cliphub_core::types::DbId;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4); makes consecutively issued
    /// tokens distinct even within the same second.
    pub jti: String,
}

/// Configuration for JWT token generation and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

/// Default access token expiry in minutes.
const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var                    | Required | Default |
    /// |----------------------------|----------|---------|
    /// | `JWT_SECRET`               | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS`   | no       | `15`    |
    /// | `JWT_REFRESH_EXPIRY_DAYS`  | no       | `7`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let refresh_token_expiry_days: i64 = std::env::var("JWT_REFRESH_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_REFRESH_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            access_token_expiry_mins,
            refresh_token_expiry_days,
        }
    }
}

fn sign(claims: &Claims, config: &JwtConfig) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(), // HS256
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Generate a short-lived HS256 access token for the given user.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.access_token_expiry_mins * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    sign(&claims, config)
}

/// Generate a long-lived HS256 refresh token for the given user.
///
/// The caller must persist [`hash_refresh_token`] of the result as the
/// user's live session value; the plaintext goes to the client only.
pub fn generate_refresh_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        exp: now + config.refresh_token_expiry_days * 24 * 60 * 60,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };
    sign(&claims, config)
}

/// Validate and decode a token, returning the embedded [`Claims`].
///
/// Validates the signature and expiration automatically. Used for access
/// tokens, and by the refresh flow to recover the encoded user before the
/// persisted-value comparison.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )?;
    Ok(token_data.claims)
}

/// Compute the SHA-256 hex digest of a refresh token.
pub fn hash_refresh_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Outcome of checking a presented refresh token against the persisted
/// session value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshCheck {
    /// Signature and expiry verify, and the token is the one currently
    /// persisted for its user.
    Valid { user_id: DbId },
    /// Signature verifies but the token is past its expiry.
    Expired,
    /// The token is malformed or signed with a different secret.
    SignatureInvalid,
    /// Structurally valid but not the live session value: superseded by a
    /// later rotation, or the user has no session at all.
    Revoked,
}

/// Check a presented refresh token.
///
/// Verifies signature and expiry structurally first, then
/// equality-compares the token's hash against the persisted session value
/// (`None` when the user has no live session). Both checks must pass: a
/// structurally valid but superseded token yields [`RefreshCheck::Revoked`].
pub fn check_refresh_token(
    token: &str,
    stored_hash: Option<&str>,
    config: &JwtConfig,
) -> RefreshCheck {
    let claims = match validate_token(token, config) {
        Ok(claims) => claims,
        Err(e) => {
            return match e.kind() {
                ErrorKind::ExpiredSignature => RefreshCheck::Expired,
                _ => RefreshCheck::SignatureInvalid,
            }
        }
    };

    match stored_hash {
        Some(stored) if stored == hash_refresh_token(token) => {
            RefreshCheck::Valid { user_id: claims.sub }
        }
        _ => RefreshCheck::Revoked,
    }
}
