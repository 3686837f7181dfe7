//! User session model.

use cliphub_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A user's single session row from the `user_sessions` table.
///
/// Holds the hash of the one refresh token currently live for the user;
/// the plaintext token is never stored.
#[derive(Debug, Clone, FromRow)]
pub struct UserSession {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
