//! ResumeAI Core Library
//!
//! This crate provides the domain models, error types, configuration, and upload
//! validation shared by every ResumeAI client component.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, CreditError, ErrorMetadata, LogLevel};
pub use models::{JobInfo, UploadFile};
