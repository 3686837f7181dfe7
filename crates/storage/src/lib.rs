//! Remote media storage: staged-file handles, the [`MediaStore`] trait,
//! and the HTTP client implementation over the store's multipart API.

pub mod client;
pub mod config;
pub mod staged;

pub use client::{HttpMediaStore, MediaStore, StorageError};
pub use config::MediaStoreConfig;
pub use staged::{AssetKind, RemoteAsset, StagedFile};
