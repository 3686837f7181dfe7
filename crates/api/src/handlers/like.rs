//! Handlers for video likes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use cliphub_core::error::CoreError;
use cliphub_core::types::DbId;
use cliphub_db::is_unique_violation;
use cliphub_db::models::like::Like;
use cliphub_db::repositories::{LikeRepo, VideoRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/videos/{id}/like
///
/// Like a video. The (user, video) pair is unique at the store level;
/// a duplicate attempt yields 409 without touching the existing row.
pub async fn like_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(video_id): Path<DbId>,
) -> AppResult<(StatusCode, Json<DataResponse<Like>>)> {
    VideoRepo::find_by_id(&state.pool, video_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "video",
            id: video_id,
        })?;

    let like = match LikeRepo::create(&state.pool, auth_user.user_id, video_id).await {
        Ok(like) => like,
        Err(ref e) if is_unique_violation(e, "uq_likes_user_video") => {
            return Err(AppError::Core(CoreError::DuplicateLike));
        }
        Err(e) => return Err(e.into()),
    };

    Ok((StatusCode::CREATED, Json(DataResponse { data: like })))
}

/// DELETE /api/v1/videos/{id}/like
///
/// Remove the caller's like. Returns 204, or 404 if no like exists.
pub async fn unlike_video(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(video_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = LikeRepo::delete(&state.pool, auth_user.user_id, video_id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "like",
            id: video_id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
