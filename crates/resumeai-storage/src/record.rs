use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

use resumeai_core::constants::PENDING_UPLOAD_KEY;
use resumeai_core::{JobInfo, UploadFile};

use crate::traits::{StorageError, StorageResult};

/// A file plus its form fields, parked while the user logs in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUpload {
    /// Always `PENDING_UPLOAD_KEY`
    pub id: String,
    pub file_name: String,
    pub file_type: String,
    pub file_bytes: Vec<u8>,
    pub form_fields: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
}

/// Persisted shape: bytes as base64, timestamp as epoch milliseconds
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    id: String,
    file_name: String,
    file_type: String,
    file_data: String,
    #[serde(default)]
    form_fields: BTreeMap<String, String>,
    created_at: i64,
}

impl PendingUpload {
    pub fn new(file: &UploadFile, form_fields: BTreeMap<String, String>) -> Self {
        Self::created_at(file, form_fields, Utc::now())
    }

    pub fn created_at(
        file: &UploadFile,
        form_fields: BTreeMap<String, String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: PENDING_UPLOAD_KEY.to_string(),
            file_name: file.file_name.clone(),
            file_type: file.content_type.clone(),
            file_bytes: file.bytes.clone(),
            form_fields,
            created_at,
        }
    }

    /// Age relative to `now`. A timestamp in the future counts as zero age.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        (now - self.created_at).to_std().unwrap_or(Duration::ZERO)
    }

    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.age(now) > ttl
    }

    /// Rebuild the upload exactly as it was selected.
    pub fn to_upload_file(&self) -> UploadFile {
        UploadFile::new(
            self.file_name.clone(),
            self.file_type.clone(),
            self.file_bytes.clone(),
        )
    }

    pub fn job_info(&self) -> JobInfo {
        JobInfo::from_form_fields(&self.form_fields)
    }

    pub fn to_json(&self) -> StorageResult<Vec<u8>> {
        let stored = StoredRecord {
            id: self.id.clone(),
            file_name: self.file_name.clone(),
            file_type: self.file_type.clone(),
            file_data: STANDARD.encode(&self.file_bytes),
            form_fields: self.form_fields.clone(),
            created_at: self.created_at.timestamp_millis(),
        };
        serde_json::to_vec(&stored).map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    pub fn from_json(data: &[u8]) -> StorageResult<Self> {
        let stored: StoredRecord =
            serde_json::from_slice(data).map_err(|e| StorageError::Corrupt(e.to_string()))?;

        let file_bytes = STANDARD
            .decode(stored.file_data.as_bytes())
            .map_err(|e| StorageError::Corrupt(format!("fileData is not base64: {}", e)))?;

        let created_at = Utc
            .timestamp_millis_opt(stored.created_at)
            .single()
            .ok_or_else(|| {
                StorageError::Corrupt(format!("createdAt out of range: {}", stored.created_at))
            })?;

        Ok(Self {
            id: stored.id,
            file_name: stored.file_name,
            file_type: stored.file_type,
            file_bytes,
            form_fields: stored.form_fields,
            created_at,
        })
    }
}
