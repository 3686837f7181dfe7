//! Like entity model.

use cliphub_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A like row from the `likes` table. The (user, video) pair is unique.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub video_id: DbId,
    pub created_at: Timestamp,
}
