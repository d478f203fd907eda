//! Validation modules

pub mod upload;

pub use upload::{validate_analyze_upload, validate_parse_upload};
