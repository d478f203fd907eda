//! Client-wide constants

use std::time::Duration;

/// Default backend base URL when `RESUMEAI_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://localhost:5100";

/// Default directory for client state (pending upload, session cookie).
pub const DEFAULT_DATA_DIR: &str = ".resumeai";

/// Rolling window for analyze actions.
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_millis(60_000);

/// Maximum analyze actions admitted per window.
pub const RATE_LIMIT_MAX_REQUESTS: usize = 3;

/// A pending upload older than this is discarded instead of resumed.
pub const PENDING_UPLOAD_TTL: Duration = Duration::from_millis(3_600_000);

/// Singleton key of the pending upload record.
pub const PENDING_UPLOAD_KEY: &str = "pending";

/// Credits granted to a freshly registered account.
pub const DEFAULT_SIGNUP_CREDITS: i64 = 3;

/// Credits an ATS analysis costs when the backend does not say otherwise.
pub const DEFAULT_REQUIRED_CREDITS: i64 = 1;

pub const MAX_ANALYZE_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
pub const MAX_PARSE_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted resume extensions for ATS analysis.
pub const ANALYZE_ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx"];

pub const PDF_CONTENT_TYPE: &str = "application/pdf";
