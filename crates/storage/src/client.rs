//! HTTP client for the remote media store.
//!
//! The store accepts a multipart POST (file part plus a `resource_type`
//! hint) and answers with a JSON body carrying the durable `secure_url`.
//! Whatever the outcome, the staged local copy is removed exactly once
//! before the call returns.

use std::io::ErrorKind;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::MediaStoreConfig;
use crate::staged::{AssetKind, RemoteAsset, StagedFile};

/// Errors produced by a media store upload.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read staged file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Media store request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Media store rejected the upload with status {0}")]
    Rejected(u16),

    #[error("Media store response contained no secure URL")]
    MissingLocator,
}

/// Remote object storage for ingested media.
///
/// Implementations must remove the staged local file exactly once before
/// returning, whether the upload succeeded or failed; cleanup failures
/// must never mask the upload outcome.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(
        &self,
        staged: StagedFile,
        kind: AssetKind,
    ) -> Result<RemoteAsset, StorageError>;
}

/// Body returned by the media store on a successful upload.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: String,
}

/// [`MediaStore`] implementation over the store's multipart HTTP API.
pub struct HttpMediaStore {
    client: reqwest::Client,
    config: MediaStoreConfig,
}

impl HttpMediaStore {
    /// Build a store client from immutable configuration.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed, which
    /// only happens with invalid TLS configuration at startup.
    pub fn new(config: MediaStoreConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build media store HTTP client");
        Self { client, config }
    }

    async fn send(
        &self,
        staged: &StagedFile,
        kind: AssetKind,
    ) -> Result<RemoteAsset, StorageError> {
        let bytes = tokio::fs::read(&staged.path).await?;
        let file_name = staged
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("resource_type", kind.as_str());

        let response = self
            .client
            .post(&self.config.upload_url)
            .header("x-api-key", &self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Rejected(status.as_u16()));
        }

        let body: UploadResponse = response.json().await?;
        if body.secure_url.is_empty() {
            return Err(StorageError::MissingLocator);
        }

        Ok(RemoteAsset {
            secure_url: body.secure_url,
            kind,
        })
    }
}

#[async_trait]
impl MediaStore for HttpMediaStore {
    async fn upload(
        &self,
        staged: StagedFile,
        kind: AssetKind,
    ) -> Result<RemoteAsset, StorageError> {
        let result = self.send(&staged, kind).await;
        remove_staged(&staged).await;
        result
    }
}

/// Delete a staged file, tolerating one that is already gone.
///
/// Cleanup failures are logged and swallowed; they must not mask the
/// upload outcome and do not affect the correctness of the response.
pub async fn remove_staged(staged: &StagedFile) {
    match tokio::fs::remove_file(&staged.path).await {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(
                path = %staged.path.display(),
                error = %e,
                "Failed to remove staged file"
            );
        }
    }
}
