//! Repository for the `likes` table.

use cliphub_core::types::DbId;
use sqlx::PgPool;

use crate::models::like::Like;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, video_id, created_at";

/// Provides operations for video likes.
///
/// Duplicate likes are rejected by the `uq_likes_user_video` constraint;
/// callers classify the resulting unique violation, there is no
/// check-then-insert here.
pub struct LikeRepo;

impl LikeRepo {
    /// Insert a like, returning the created row.
    pub async fn create(pool: &PgPool, user_id: DbId, video_id: DbId) -> Result<Like, sqlx::Error> {
        let query = format!(
            "INSERT INTO likes (user_id, video_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Like>(&query)
            .bind(user_id)
            .bind(video_id)
            .fetch_one(pool)
            .await
    }

    /// Remove a user's like for a video. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, video_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND video_id = $2")
            .bind(user_id)
            .bind(video_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count likes for a video.
    pub async fn count_for_video(pool: &PgPool, video_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE video_id = $1")
            .bind(video_id)
            .fetch_one(pool)
            .await
    }
}
