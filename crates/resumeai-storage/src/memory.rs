use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::record::PendingUpload;
use crate::traits::{PendingStore, StorageResult};

/// In-process store. Survives nothing beyond the process; used in tests and
/// embedded front ends that keep their own persistence.
#[derive(Clone, Default)]
pub struct MemoryPendingStore {
    slot: Arc<Mutex<Option<PendingUpload>>>,
}

impl MemoryPendingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PendingStore for MemoryPendingStore {
    async fn put(&self, record: &PendingUpload) -> StorageResult<()> {
        *self.slot.lock().await = Some(record.clone());
        Ok(())
    }

    async fn get(&self) -> StorageResult<Option<PendingUpload>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn delete(&self) -> StorageResult<()> {
        self.slot.lock().await.take();
        Ok(())
    }
}
