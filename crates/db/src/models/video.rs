//! Video entity model and DTOs.

use cliphub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A video row from the `videos` table.
///
/// `video_url` is always non-empty; `thumbnail_url` is the empty string
/// when no thumbnail was submitted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub video_url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub owner_id: DbId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a video row once every attempted upload has succeeded.
pub struct CreateVideo {
    pub video_url: String,
    pub thumbnail_url: String,
    pub title: String,
    pub description: String,
    pub is_published: bool,
    pub owner_id: DbId,
}
