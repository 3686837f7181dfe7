//! Local staging of multipart ingestion submissions.
//!
//! The transport layer drains the multipart stream and writes each file
//! field into a per-request subdirectory of the staging root; downstream
//! components only ever see [`StagedFile`] handles. Presence of each
//! declared field is structural (`Option<StagedFile>`), never probed.

use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use axum::extract::Multipart;
use cliphub_storage::StagedFile;
use uuid::Uuid;

use crate::error::AppError;

/// One parsed ingestion submission: text fields plus staged file handles.
///
/// `staging_dir` is the request-exclusive subdirectory holding the staged
/// files; sweep it once the request is finished, success or failure.
#[derive(Debug)]
pub struct VideoSubmission {
    pub staging_dir: PathBuf,
    pub title: Option<String>,
    pub description: Option<String>,
    pub is_published: Option<bool>,
    pub video: Option<StagedFile>,
    pub thumbnail: Option<StagedFile>,
}

/// Drain a multipart request into the staging area.
///
/// Stages the first file received for each of the `video` and `thumbnail`
/// fields under a fresh per-request subdirectory of `staging_root`;
/// unknown fields are ignored. If draining fails partway, everything
/// already staged for this request is swept before the error is returned.
pub async fn collect_submission(
    multipart: Multipart,
    staging_root: &Path,
) -> Result<VideoSubmission, AppError> {
    let staging_dir = staging_root.join(Uuid::new_v4().to_string());
    tokio::fs::create_dir_all(&staging_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to create staging dir: {e}")))?;

    match drain_fields(multipart, &staging_dir).await {
        Ok(submission) => Ok(submission),
        Err(e) => {
            sweep(&staging_dir).await;
            Err(e)
        }
    }
}

async fn drain_fields(
    mut multipart: Multipart,
    staging_dir: &Path,
) -> Result<VideoSubmission, AppError> {
    let mut submission = VideoSubmission {
        staging_dir: staging_dir.to_path_buf(),
        title: None,
        description: None,
        is_published: None,
        video: None,
        thumbnail: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "title" => submission.title = Some(text_field(field).await?),
            "description" => submission.description = Some(text_field(field).await?),
            "isPublished" => {
                let raw = text_field(field).await?;
                let parsed = parse_bool(&raw).ok_or_else(|| {
                    AppError::BadRequest(format!("Invalid isPublished value: {raw}"))
                })?;
                submission.is_published = Some(parsed);
            }
            "video" if submission.video.is_none() => {
                submission.video = Some(stage_field(field, staging_dir, "video").await?);
            }
            "thumbnail" if submission.thumbnail.is_none() => {
                submission.thumbnail = Some(stage_field(field, staging_dir, "thumbnail").await?);
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// Remove a request's staging subdirectory and anything left inside it.
///
/// Uploads consume their own files; this sweep catches files that never
/// reached an upload (validation failures, unattempted secondaries) and
/// the directory itself. Failures are logged, not escalated.
pub async fn sweep(staging_dir: &Path) {
    match tokio::fs::remove_dir_all(staging_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                path = %staging_dir.display(),
                error = %e,
                "Failed to sweep staging directory"
            );
        }
    }
}

async fn text_field(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Write one file field into the staging directory, prefixed by its field
/// name so same-named uploads cannot collide.
async fn stage_field(
    field: Field<'_>,
    staging_dir: &Path,
    label: &str,
) -> Result<StagedFile, AppError> {
    let filename = field
        .file_name()
        .and_then(|n| n.rsplit(['/', '\\']).next())
        .filter(|n| !n.is_empty())
        .unwrap_or("upload")
        .to_string();

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let dest = staging_dir.join(format!("{label}-{filename}"));
    tokio::fs::write(&dest, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to stage upload: {e}")))?;

    Ok(StagedFile::new(dest))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}
