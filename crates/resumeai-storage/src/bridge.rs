//! Pending-upload bridge
//!
//! Parks the file a signed-out user tried to analyze, then hands it back exactly once
//! after login. Reads never fail: any storage problem reads as "nothing pending".

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use resumeai_core::UploadFile;

use crate::record::PendingUpload;
use crate::traits::{PendingStore, StorageResult};

#[derive(Clone)]
pub struct PendingUploadBridge {
    store: Arc<dyn PendingStore>,
    ttl: Duration,
}

impl PendingUploadBridge {
    pub fn new(store: Arc<dyn PendingStore>, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store the file and its form fields, replacing any earlier pending upload.
    ///
    /// Callers must await this before leaving for the login step.
    pub async fn save(
        &self,
        file: &UploadFile,
        form_fields: BTreeMap<String, String>,
    ) -> StorageResult<()> {
        let record = PendingUpload::new(file, form_fields);
        self.store.put(&record).await
    }

    /// The pending upload, if one exists and is not older than the TTL.
    pub async fn load(&self) -> Option<PendingUpload> {
        self.load_at(Utc::now()).await
    }

    /// `load` against an explicit clock. An expired record is deleted.
    pub async fn load_at(&self, now: DateTime<Utc>) -> Option<PendingUpload> {
        let record = match self.store.get().await {
            Ok(Some(record)) => record,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read pending upload, treating as absent");
                return None;
            }
        };

        if record.is_expired(self.ttl, now) {
            tracing::info!(
                file_name = %record.file_name,
                age_ms = record.age(now).as_millis() as u64,
                "Discarding expired pending upload"
            );
            self.clear().await;
            return None;
        }

        Some(record)
    }

    /// Delete the pending upload. Best effort: failures are logged, never returned.
    pub async fn clear(&self) {
        if let Err(e) = self.store.delete().await {
            tracing::warn!(error = %e, "Failed to clear pending upload");
        }
    }

    /// Load and clear in one step, for the post-login resume.
    pub async fn take(&self) -> Option<PendingUpload> {
        let record = self.load().await?;
        self.clear().await;
        Some(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryPendingStore;
    use crate::traits::StorageError;
    use async_trait::async_trait;
    use resumeai_core::JobInfo;

    const TTL: Duration = Duration::from_millis(3_600_000);

    struct FailingStore;

    #[async_trait]
    impl PendingStore for FailingStore {
        async fn put(&self, _record: &PendingUpload) -> StorageResult<()> {
            Err(StorageError::WriteFailed("disk full".into()))
        }

        async fn get(&self) -> StorageResult<Option<PendingUpload>> {
            Err(StorageError::ReadFailed("permission denied".into()))
        }

        async fn delete(&self) -> StorageResult<()> {
            Err(StorageError::DeleteFailed("permission denied".into()))
        }
    }

    fn job() -> JobInfo {
        JobInfo {
            job_title: "Backend Engineer".into(),
            company_name: "Acme".into(),
            job_description: "Rust, Postgres".into(),
        }
    }

    fn bridge() -> (PendingUploadBridge, MemoryPendingStore) {
        let store = MemoryPendingStore::new();
        (PendingUploadBridge::new(Arc::new(store.clone()), TTL), store)
    }

    #[tokio::test]
    async fn test_save_then_load_returns_same_upload() {
        let (bridge, _) = bridge();
        let file = UploadFile::new("cv.pdf", "application/pdf", vec![1, 2, 3, 4]);

        bridge.save(&file, job().to_form_fields()).await.unwrap();

        let pending = bridge.load().await.unwrap();
        assert_eq!(pending.to_upload_file(), file);
        assert_eq!(pending.job_info(), job());
    }

    #[tokio::test]
    async fn test_second_save_overwrites_first() {
        let (bridge, _) = bridge();
        let first = UploadFile::new("first.pdf", "application/pdf", vec![1]);
        let second = UploadFile::new("second.docx", "application/msword", vec![2, 2]);

        bridge.save(&first, BTreeMap::new()).await.unwrap();
        bridge.save(&second, BTreeMap::new()).await.unwrap();

        let pending = bridge.load().await.unwrap();
        assert_eq!(pending.file_name, "second.docx");
        assert_eq!(pending.file_bytes, vec![2, 2]);
    }

    #[tokio::test]
    async fn test_expired_record_is_absent_and_removed() {
        let (bridge, store) = bridge();
        let file = UploadFile::new("old.pdf", "application/pdf", vec![9]);
        let created = Utc::now() - chrono::Duration::milliseconds(3_600_001);
        store
            .put(&PendingUpload::created_at(&file, BTreeMap::new(), created))
            .await
            .unwrap();

        assert!(bridge.load().await.is_none());
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_within_ttl_is_kept() {
        let (bridge, store) = bridge();
        let file = UploadFile::new("fresh.pdf", "application/pdf", vec![9]);
        let created = Utc::now() - chrono::Duration::minutes(59);
        store
            .put(&PendingUpload::created_at(&file, BTreeMap::new(), created))
            .await
            .unwrap();

        assert!(bridge.load().await.is_some());
        assert!(store.get().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_take_reads_once() {
        let (bridge, _) = bridge();
        let file = UploadFile::new("cv.pdf", "application/pdf", vec![1]);
        bridge.save(&file, BTreeMap::new()).await.unwrap();

        assert!(bridge.take().await.is_some());
        assert!(bridge.take().await.is_none());
    }

    #[tokio::test]
    async fn test_storage_failures_degrade_to_absent() {
        let bridge = PendingUploadBridge::new(Arc::new(FailingStore), TTL);
        let file = UploadFile::new("cv.pdf", "application/pdf", vec![1]);

        assert!(bridge.save(&file, BTreeMap::new()).await.is_err());
        assert!(bridge.load().await.is_none());
        bridge.clear().await;
        assert!(bridge.take().await.is_none());
    }
}
