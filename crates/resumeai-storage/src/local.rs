use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use resumeai_core::constants::PENDING_UPLOAD_KEY;

use crate::record::PendingUpload;
use crate::traits::{PendingStore, StorageError, StorageResult};

/// Local filesystem pending-upload store
///
/// The record is a single JSON file named after the singleton key inside `base_path`.
#[derive(Clone, Debug)]
pub struct LocalPendingStore {
    base_path: PathBuf,
}

impl LocalPendingStore {
    /// Create a new LocalPendingStore, creating `base_path` if needed
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalPendingStore { base_path })
    }

    pub fn record_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", PENDING_UPLOAD_KEY))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path.join(format!(".{}.json.tmp", PENDING_UPLOAD_KEY))
    }

    async fn write_atomic(&self, path: &Path, data: &[u8]) -> StorageResult<()> {
        let tmp = self.temp_path();

        let mut file = fs::File::create(&tmp).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", tmp.display(), e))
        })?;

        file.write_all(data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", tmp.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", tmp.display(), e))
        })?;

        fs::rename(&tmp, path).await.map_err(|e| {
            StorageError::WriteFailed(format!(
                "Failed to move {} to {}: {}",
                tmp.display(),
                path.display(),
                e
            ))
        })?;

        Ok(())
    }
}

#[async_trait]
impl PendingStore for LocalPendingStore {
    async fn put(&self, record: &PendingUpload) -> StorageResult<()> {
        let path = self.record_path();
        let data = record.to_json()?;
        let start = std::time::Instant::now();

        self.write_atomic(&path, &data).await?;

        tracing::info!(
            path = %path.display(),
            file_name = %record.file_name,
            size_bytes = record.file_bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Pending upload stored"
        );

        Ok(())
    }

    async fn get(&self) -> StorageResult<Option<PendingUpload>> {
        let path = self.record_path();

        let data = match fs::read(&path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StorageError::ReadFailed(format!(
                    "Failed to read file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let record = PendingUpload::from_json(&data)?;

        tracing::debug!(
            path = %path.display(),
            file_name = %record.file_name,
            "Pending upload read"
        );

        Ok(Some(record))
    }

    async fn delete(&self) -> StorageResult<()> {
        let path = self.record_path();

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Pending upload deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
