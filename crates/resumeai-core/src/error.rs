//! Error types module
//!
//! Every failure a client action can hit is folded into `ClientError`. The variants map
//! one-to-one onto how a front end reacts: show the server message, show an inline
//! validation hint, offer an upgrade, or wait out the rate limit.

use std::time::Duration;

use crate::constants::DEFAULT_REQUIRED_CREDITS;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like rate limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be presented to the user
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "CREDITS_EXHAUSTED")
    fn error_code(&self) -> &'static str;

    /// Whether re-triggering the same action may succeed
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the user
    fn suggested_action(&self) -> Option<&'static str>;

    /// User-facing message
    fn client_message(&self) -> String;

    /// Whether the front end should offer an upgrade path instead of a retry
    fn needs_upgrade(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

/// The account does not have enough credits for the requested action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CreditError {
    pub message: String,
    /// Credits the user currently has, as reported by the server
    pub credits: i64,
    /// Credits the action needs
    pub required: i64,
}

impl CreditError {
    pub fn new(message: impl Into<String>, credits: i64, required: i64) -> Self {
        Self {
            message: message.into(),
            credits,
            required,
        }
    }

    /// Credit error raised locally, before any request, for an exhausted free plan.
    pub fn exhausted(credits: i64) -> Self {
        Self::new(
            "You have used all your free credits. Please upgrade to continue.",
            credits,
            DEFAULT_REQUIRED_CREDITS,
        )
    }

    pub fn needs_upgrade(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Failed to connect to server: {0}")]
    Network(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error(transparent)]
    Credit(#[from] CreditError),

    #[error("Rate limit reached, retry in {} seconds", retry_after.as_secs().max(1))]
    RateLimited { retry_after: Duration },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            message: message.into(),
        }
    }

    /// HTTP status carried by server-side errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Credit(_) => Some(403),
            _ => None,
        }
    }

    pub fn as_credit(&self) -> Option<&CreditError> {
        match self {
            ClientError::Credit(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

/// Static metadata (code, recoverable, suggested_action, log_level) per variant.
fn client_error_static_metadata(
    err: &ClientError,
) -> (&'static str, bool, Option<&'static str>, LogLevel) {
    match err {
        ClientError::Network(_) => (
            "NETWORK_ERROR",
            true,
            Some("Check your connection and try again"),
            LogLevel::Warn,
        ),
        ClientError::Validation(_) => (
            "VALIDATION_ERROR",
            false,
            Some("Select a supported file and try again"),
            LogLevel::Debug,
        ),
        ClientError::Api { status, .. } if *status == 401 => (
            "UNAUTHORIZED",
            false,
            Some("Log in and try again"),
            LogLevel::Debug,
        ),
        ClientError::Api { status, .. } if *status >= 500 => {
            ("SERVER_ERROR", true, None, LogLevel::Error)
        }
        ClientError::Api { .. } => ("API_ERROR", false, None, LogLevel::Warn),
        ClientError::Credit(_) => (
            "CREDITS_EXHAUSTED",
            false,
            Some("Upgrade your plan to continue"),
            LogLevel::Debug,
        ),
        ClientError::RateLimited { .. } => (
            "RATE_LIMITED",
            true,
            Some("Wait for the rate limit window to pass"),
            LogLevel::Debug,
        ),
        ClientError::Storage(_) => ("STORAGE_ERROR", true, None, LogLevel::Warn),
        ClientError::Decode(_) => ("DECODE_ERROR", false, None, LogLevel::Error),
        ClientError::Config(_) => (
            "CONFIG_ERROR",
            false,
            Some("Fix the client configuration"),
            LogLevel::Error,
        ),
    }
}

impl ErrorMetadata for ClientError {
    fn error_code(&self) -> &'static str {
        client_error_static_metadata(self).0
    }

    fn is_recoverable(&self) -> bool {
        client_error_static_metadata(self).1
    }

    fn suggested_action(&self) -> Option<&'static str> {
        client_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            ClientError::Network(_) => "Failed to connect to server".to_string(),
            ClientError::Validation(ref msg) => msg.clone(),
            ClientError::Api { ref message, .. } => message.clone(),
            ClientError::Credit(ref e) => e.message.clone(),
            ClientError::RateLimited { .. } => self.to_string(),
            ClientError::Storage(_) => "Failed to save file. Please try again.".to_string(),
            ClientError::Decode(_) => "Unexpected response from server".to_string(),
            ClientError::Config(ref msg) => msg.clone(),
        }
    }

    fn needs_upgrade(&self) -> bool {
        matches!(self, ClientError::Credit(_))
    }

    fn log_level(&self) -> LogLevel {
        client_error_static_metadata(self).3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_error_is_distinguished() {
        let err = ClientError::from(CreditError::new("Insufficient credits", 0, 1));
        assert!(err.needs_upgrade());
        assert_eq!(err.error_code(), "CREDITS_EXHAUSTED");
        assert_eq!(err.as_credit().map(|c| c.credits), Some(0));
        assert_eq!(err.to_string(), "Insufficient credits");
    }

    #[test]
    fn api_error_uses_server_message() {
        let err = ClientError::api(422, "Could not parse resume");
        assert!(!err.needs_upgrade());
        assert_eq!(err.client_message(), "Could not parse resume");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn server_errors_are_recoverable() {
        assert!(ClientError::api(502, "Bad gateway").is_recoverable());
        assert!(!ClientError::api(400, "Bad request").is_recoverable());
        assert_eq!(ClientError::api(401, "Login").error_code(), "UNAUTHORIZED");
    }

    #[test]
    fn rate_limited_message_rounds_up_to_a_second() {
        let err = ClientError::RateLimited {
            retry_after: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "Rate limit reached, retry in 1 seconds");
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn network_error_hides_transport_detail() {
        let err = ClientError::Network("dns error: no such host".to_string());
        assert_eq!(err.client_message(), "Failed to connect to server");
    }
}
