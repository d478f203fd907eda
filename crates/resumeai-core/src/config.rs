//! Configuration module
//!
//! Client configuration is read from the environment (and a `.env` file when present).

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_API_URL, DEFAULT_DATA_DIR, PENDING_UPLOAD_TTL, RATE_LIMIT_MAX_REQUESTS,
    RATE_LIMIT_WINDOW,
};

/// Configuration shared by the API client, the pending-upload store and the rate limiter
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Backend base URL without trailing slash
    pub api_url: String,
    /// Directory holding the pending upload and the persisted session
    pub data_dir: PathBuf,
    pub rate_limit_window: Duration,
    pub rate_limit_max_requests: usize,
    pub pending_upload_ttl: Duration,
    /// Outbound request timeout. `None` keeps the HTTP client's default (no timeout).
    pub http_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            rate_limit_window: RATE_LIMIT_WINDOW,
            rate_limit_max_requests: RATE_LIMIT_MAX_REQUESTS,
            pending_upload_ttl: PENDING_UPLOAD_TTL,
            http_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_url = env::var("RESUMEAI_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or(defaults.api_url)
            .trim_end_matches('/')
            .to_string();

        let data_dir = env::var("RESUMEAI_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let rate_limit_window = env_number("RESUMEAI_RATE_LIMIT_WINDOW_MS", "milliseconds")?
            .map(Duration::from_millis)
            .unwrap_or(defaults.rate_limit_window);

        let rate_limit_max_requests = env_number("RESUMEAI_RATE_LIMIT_MAX", "requests")?
            .unwrap_or(defaults.rate_limit_max_requests);

        let pending_upload_ttl = env_number("RESUMEAI_PENDING_TTL_SECS", "seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.pending_upload_ttl);

        let http_timeout =
            env_number("RESUMEAI_HTTP_TIMEOUT_SECS", "seconds")?.map(Duration::from_secs);

        let config = Self {
            api_url,
            data_dir,
            rate_limit_window,
            rate_limit_max_requests,
            pending_upload_ttl,
            http_timeout,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "RESUMEAI_API_URL must be an http(s) URL, got '{}'",
                self.api_url
            ));
        }

        if self.rate_limit_window.is_zero() || self.rate_limit_max_requests == 0 {
            return Err(anyhow::anyhow!(
                "Rate limit window and max requests must both be greater than zero"
            ));
        }

        if self.pending_upload_ttl.is_zero() {
            return Err(anyhow::anyhow!(
                "RESUMEAI_PENDING_TTL_SECS must be greater than zero"
            ));
        }

        Ok(())
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

fn env_number<T: FromStr>(name: &str, unit: &str) -> Result<Option<T>, anyhow::Error> {
    parse_number(name, env::var(name).ok().as_deref(), unit)
}

/// Unset means "use the default"; a set but unparsable value is an error.
fn parse_number<T: FromStr>(
    name: &str,
    raw: Option<&str>,
    unit: &str,
) -> Result<Option<T>, anyhow::Error> {
    match raw {
        None => Ok(None),
        Some(v) => v
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} must be a number of {}, got '{}'", name, unit, v)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_product_limits() {
        let config = ClientConfig::default();
        assert_eq!(config.rate_limit_window, Duration::from_millis(60_000));
        assert_eq!(config.rate_limit_max_requests, 3);
        assert_eq!(config.pending_upload_ttl, Duration::from_millis(3_600_000));
        assert!(config.http_timeout.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_http_url() {
        let config = ClientConfig::default().with_api_url("localhost:5100");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_limits() {
        let mut config = ClientConfig::default();
        config.rate_limit_max_requests = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn with_api_url_trims_trailing_slash() {
        let config = ClientConfig::default().with_api_url("https://api.example.com/");
        assert_eq!(config.api_url, "https://api.example.com");
    }

    #[test]
    fn numeric_settings_reject_garbage_consistently() {
        for name in [
            "RESUMEAI_RATE_LIMIT_WINDOW_MS",
            "RESUMEAI_RATE_LIMIT_MAX",
            "RESUMEAI_PENDING_TTL_SECS",
            "RESUMEAI_HTTP_TIMEOUT_SECS",
        ] {
            let err = parse_number::<u64>(name, Some("ten"), "seconds").unwrap_err();
            assert!(err.to_string().starts_with(name));
        }
        assert!(parse_number::<usize>("RESUMEAI_RATE_LIMIT_MAX", Some("-1"), "requests").is_err());
    }

    #[test]
    fn numeric_settings_parse_or_stay_unset() {
        let max = parse_number::<usize>("RESUMEAI_RATE_LIMIT_MAX", Some(" 5 "), "requests");
        assert_eq!(max.unwrap(), Some(5));
        let ttl = parse_number::<u64>("RESUMEAI_PENDING_TTL_SECS", None, "seconds");
        assert_eq!(ttl.unwrap(), None);
    }
}
