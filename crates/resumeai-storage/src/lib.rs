//! ResumeAI Storage Library
//!
//! Holds at most one pending upload: the resume a signed-out user tried to analyze, kept
//! across the login so the analysis can resume afterwards.
//!
//! The record lives under a fixed singleton key, so saving always replaces the previous
//! one. Records older than the configured TTL are treated as absent and removed on read.

pub mod bridge;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
pub mod record;
pub mod traits;

// Re-export commonly used types
pub use bridge::PendingUploadBridge;
#[cfg(feature = "storage-local")]
pub use local::LocalPendingStore;
pub use memory::MemoryPendingStore;
pub use record::PendingUpload;
pub use traits::{PendingStore, StorageError, StorageResult};
