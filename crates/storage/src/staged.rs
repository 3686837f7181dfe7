//! Value types shared between the local stager and the remote uploader.

use std::path::PathBuf;

/// Which remote resource type an asset should be processed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Video,
    Image,
}

impl AssetKind {
    /// Resource-type hint sent to the media store.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Video => "video",
            AssetKind::Image => "image",
        }
    }
}

/// A file written to the local transient staging area, pending remote
/// upload.
///
/// A handle belongs to exactly one ingestion request. The uploader
/// removes the file from disk before returning, success or failure, so a
/// handle must not be reused after an upload attempt.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
}

impl StagedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// The durable result of a successful upload: a non-empty retrieval URL
/// plus the resource kind it was processed as. Immutable once produced.
#[derive(Debug, Clone)]
pub struct RemoteAsset {
    pub secure_url: String,
    pub kind: AssetKind,
}
