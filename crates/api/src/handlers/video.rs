//! Handlers for the `/videos` resource (ingestion).

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use cliphub_db::models::video::Video;

use crate::error::AppResult;
use crate::ingest;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::staging;
use crate::state::AppState;

/// POST /api/v1/videos
///
/// Ingest a video: stage the multipart submission locally, upload the
/// primary (and optional thumbnail) to the remote media store, then
/// persist the record stamped with the caller's identity. The staging
/// subdirectory is swept whatever the outcome.
pub async fn upload_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<Video>>)> {
    let submission = staging::collect_submission(multipart, &state.config.staging_dir).await?;
    let staging_dir = submission.staging_dir.clone();

    let result = ingest::ingest_video(
        &state.pool,
        state.media_store.as_ref(),
        auth_user.user_id,
        submission,
    )
    .await;

    staging::sweep(&staging_dir).await;

    let video = result?;
    tracing::info!(video_id = video.id, owner_id = video.owner_id, "Video ingested");

    Ok((StatusCode::CREATED, Json(DataResponse { data: video })))
}
