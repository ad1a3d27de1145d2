//! Storage abstraction trait
//!
//! This module defines the Storage trait that asset-byte backends must
//! implement.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The ingestion pipeline works against this trait without coupling to a
/// specific backend. Keys are always generated by the caller via the `keys`
/// module; a user-supplied filename is never a storage key.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` under `key` and return the publicly accessible URL.
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> StorageResult<String>;

    /// Fetch the bytes stored under `key`.
    async fn download(&self, key: &str) -> StorageResult<Vec<u8>>;

    /// Delete the object stored under `key`. Deleting a missing key is not
    /// an error.
    async fn delete(&self, key: &str) -> StorageResult<()>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> StorageResult<bool>;
}
