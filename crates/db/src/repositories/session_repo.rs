//! Repository for the `user_sessions` table.
//!
//! A user has at most one session row (`uq_sessions_user`); writing a new
//! refresh-token hash through [`SessionRepo::upsert`] atomically replaces
//! the previous one, which is how rotation invalidates superseded tokens.

use cliphub_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::session::UserSession;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, refresh_token_hash, expires_at, created_at, updated_at";

/// Provides operations for user sessions. The sole writer of the
/// persisted refresh-token hash.
pub struct SessionRepo;

impl SessionRepo {
    /// Insert or replace the user's session row with a new refresh-token
    /// hash, returning the stored row.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        refresh_token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<UserSession, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_sessions (user_id, refresh_token_hash, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_sessions_user DO UPDATE
             SET refresh_token_hash = EXCLUDED.refresh_token_hash,
                 expires_at = EXCLUDED.expires_at,
                 updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .bind(refresh_token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find the user's live session, if any. Expired rows are treated as
    /// absent.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSession>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_sessions
             WHERE user_id = $1 AND expires_at > NOW()"
        );
        sqlx::query_as::<_, UserSession>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the user's session row, making any previously issued refresh
    /// token permanently unusable. Returns `true` if a row was deleted.
    pub async fn delete_for_user(pool: &PgPool, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
