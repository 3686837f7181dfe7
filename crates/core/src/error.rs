use crate::types::DbId;

/// Domain-level errors shared by every cliphub crate.
///
/// Each variant corresponds to one caller-visible failure kind; the API
/// layer maps them onto HTTP statuses and stable error codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A required text field was absent or empty. Detected before any
    /// upload I/O is attempted.
    #[error("Required field missing or empty: {0}")]
    MissingField(&'static str),

    /// The required primary file was not part of the submission.
    #[error("Required file missing: {0}")]
    MissingAsset(&'static str),

    /// The remote media store failed or returned no usable locator.
    #[error("Media store upload failed: {0}")]
    Upload(String),

    /// The database write after successful uploads failed. The uploaded
    /// remote resources are left unreferenced.
    #[error("Failed to persist record: {0}")]
    Persistence(String),

    /// A refresh token that does not match the live session value for its
    /// user, including tokens whose signature still verifies.
    #[error("Refresh token does not match a live session")]
    InvalidSession,

    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// A second like for the same (user, video) pair.
    #[error("Video already liked by this user")]
    DuplicateLike,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
