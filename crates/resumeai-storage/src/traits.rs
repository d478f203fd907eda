//! Storage abstraction trait
//!
//! This module defines the PendingStore trait that all pending-upload backends implement.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::PendingUpload;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Corrupt record: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Raw keyed access to the singleton pending-upload slot.
///
/// Backends do not apply expiry; `PendingUploadBridge` owns that policy.
#[async_trait]
pub trait PendingStore: Send + Sync {
    /// Write the record, replacing whatever was stored before
    async fn put(&self, record: &PendingUpload) -> StorageResult<()>;

    /// Read the stored record, if any
    async fn get(&self) -> StorageResult<Option<PendingUpload>>;

    /// Remove the stored record. Deleting an empty slot is not an error.
    async fn delete(&self) -> StorageResult<()>;
}
