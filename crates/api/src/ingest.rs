//! The video ingestion pipeline: validate, upload, persist.
//!
//! Stages run strictly in order; a failure at any stage is terminal for
//! the request (no retries) and maps to a distinct [`CoreError`] kind.
//! From the caller's point of view the operation is all-or-nothing: a
//! record is only created once every attempted upload has produced a
//! durable locator.

use cliphub_core::error::CoreError;
use cliphub_core::types::DbId;
use cliphub_db::models::video::{CreateVideo, Video};
use cliphub_db::repositories::VideoRepo;
use cliphub_storage::{AssetKind, MediaStore, StorageError};
use sqlx::PgPool;

use crate::staging::VideoSubmission;

/// Check the required text fields. Runs before any upload I/O so an
/// incomplete submission never touches the remote store.
fn validate_fields(submission: &VideoSubmission) -> Result<(String, String, bool), CoreError> {
    let title = submission
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(CoreError::MissingField("title"))?
        .to_string();

    let description = submission
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or(CoreError::MissingField("description"))?
        .to_string();

    Ok((title, description, submission.is_published.unwrap_or(true)))
}

/// Run the full ingestion pipeline for one submission.
///
/// Order: field validation, primary upload, optional secondary upload,
/// metadata commit. The uploader consumes each staged copy whatever the
/// outcome. A failure after the primary upload succeeded leaves its
/// remote resource unreferenced -- the store exposes no delete keyed by
/// locator, so the orphan is accepted and the failure reported.
pub async fn ingest_video(
    pool: &PgPool,
    store: &dyn MediaStore,
    owner_id: DbId,
    submission: VideoSubmission,
) -> Result<Video, CoreError> {
    let (title, description, is_published) = validate_fields(&submission)?;

    let video_file = submission.video.ok_or(CoreError::MissingAsset("video"))?;

    let primary = store
        .upload(video_file, AssetKind::Video)
        .await
        .map_err(upload_error)?;

    let thumbnail_url = match submission.thumbnail {
        Some(staged) => {
            store
                .upload(staged, AssetKind::Image)
                .await
                .map_err(upload_error)?
                .secure_url
        }
        None => String::new(),
    };

    VideoRepo::create(
        pool,
        &CreateVideo {
            video_url: primary.secure_url,
            thumbnail_url,
            title,
            description,
            is_published,
            owner_id,
        },
    )
    .await
    .map_err(|e| CoreError::Persistence(e.to_string()))
}

fn upload_error(err: StorageError) -> CoreError {
    CoreError::Upload(err.to_string())
}
