//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageArea;
use async_trait::async_trait;
use faceswap_core::AppError;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;
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

    #[error("Invalid file name: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(_) => AppError::NotFound("File not found".to_string()),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Stream of file chunks
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, StorageError>> + Send>>;

/// A file written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub area: StorageArea,
    pub filename: String,
}

impl StoredObject {
    /// Path the file is served from, for publicly served areas
    pub fn public_path(&self) -> Option<String> {
        self.area.public_path(&self.filename)
    }
}

/// Storage abstraction trait
///
/// Files are addressed by area and a single-component file name. Writers are
/// expected to pass unique names (see `keys`); `put` overwrites silently.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write a file
    async fn put(
        &self,
        area: StorageArea,
        filename: &str,
        data: Vec<u8>,
    ) -> StorageResult<StoredObject>;

    /// Read a whole file
    async fn get(&self, area: StorageArea, filename: &str) -> StorageResult<Vec<u8>>;

    /// Remove a file. Returns `NotFound` when there is nothing to remove.
    async fn delete(&self, area: StorageArea, filename: &str) -> StorageResult<()>;

    /// Check if a file exists
    async fn exists(&self, area: StorageArea, filename: &str) -> StorageResult<bool>;

    /// File names in an area, sorted
    async fn list(&self, area: StorageArea) -> StorageResult<Vec<String>>;

    /// Read a file as a stream of chunks (for serving)
    async fn download_stream(&self, area: StorageArea, filename: &str)
        -> StorageResult<ByteStream>;
}
