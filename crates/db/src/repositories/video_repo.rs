//! Repository for the `videos` table.

use cliphub_core::types::DbId;
use sqlx::PgPool;

use crate::models::video::{CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, video_url, thumbnail_url, title, description, \
                        is_published, owner_id, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    ///
    /// Callers must only reach this once every attempted upload has
    /// produced a durable locator; the table itself rejects an empty
    /// `video_url`.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (video_url, thumbnail_url, title, description, is_published, owner_id)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.video_url)
            .bind(&input.thumbnail_url)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.is_published)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Find a video by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count all video rows. Used by tests asserting the all-or-nothing
    /// ingestion contract.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM videos")
            .fetch_one(pool)
            .await
    }
}
