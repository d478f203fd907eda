//! HTTP client for the ResumeAI backend.
//!
//! A pure transport adapter: builds requests against the configured base URL, carries the
//! session cookie on every call, and folds non-success responses into `ClientError`
//! (credit exhaustion becomes the distinguished `ClientError::Credit`). Successful payloads
//! are returned as the backend sent them. Domain methods live in [`api`].

pub mod api;

use anyhow::Context;
use bytes::Bytes;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder, Response, Url};
use resumeai_core::constants::{DEFAULT_REQUIRED_CREDITS, PDF_CONTENT_TYPE};
use resumeai_core::models::ApiErrorBody;
use resumeai_core::{ClientConfig, ClientError, ClientResult, CreditError};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_ERROR_MESSAGE: &str = "API request failed";
const CREDIT_ERROR_MESSAGE: &str = "Insufficient credits";

/// Binary payload of a download endpoint
#[derive(Debug, Clone)]
pub struct Download {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl Download {
    pub fn is_pdf(&self) -> bool {
        self.content_type
            .as_deref()
            .map(|ct| ct.contains(PDF_CONTENT_TYPE))
            .unwrap_or(false)
    }
}

/// HTTP client for the ResumeAI API with a cookie-backed session.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    cookies: Arc<Jar>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, None)
    }

    /// `timeout: None` leaves requests without a client-side deadline.
    pub fn with_timeout(base_url: impl Into<String>, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("Invalid API URL '{}': {}", base_url, e)))?;

        let cookies = Arc::new(Jar::default());
        let mut builder = Client::builder().cookie_provider(Arc::clone(&cookies));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            cookies,
        })
    }

    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Self::with_timeout(config.api_url.clone(), config.http_timeout)
    }

    /// Create client from environment: RESUMEAI_API_URL (or API_URL).
    pub fn from_env() -> anyhow::Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::from_config(&config).context("Failed to create API client")
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_url(&self) -> Option<Url> {
        Url::parse(&self.base_url).ok()
    }

    /// Session cookies for the API origin, as a `Cookie` header value.
    pub fn session_cookie(&self) -> Option<String> {
        let url = self.session_url()?;
        self.cookies
            .cookies(&url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
    }

    /// Load cookies exported by [`ApiClient::session_cookie`] into this client.
    pub fn restore_session(&self, cookie_header: &str) {
        let Some(url) = self.session_url() else {
            return;
        };
        for pair in cookie_header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            self.cookies.add_cookie_str(&format!("{}; Path=/", pair), &url);
        }
    }

    /// Send and normalize errors. Only success responses are returned.
    async fn send(&self, request: RequestBuilder, fallback: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        tracing::debug!(
            path = %response.url().path(),
            status = status.as_u16(),
            "API response"
        );

        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let error = error_from_response(status.as_u16(), &body, fallback);
        tracing::debug!(status = status.as_u16(), error = %error, "API request failed");
        Err(error)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> ClientResult<T> {
        let response = self.send(request, fallback).await?;

        let content_type = content_type_of(&response);
        if content_type
            .as_deref()
            .map(|ct| ct.contains(PDF_CONTENT_TYPE))
            .unwrap_or(false)
        {
            return Err(ClientError::Decode(
                "Expected a JSON response, received a PDF".to_string(),
            ));
        }

        let body = response.bytes().await.map_err(transport_error)?;
        serde_json::from_slice(&body).map_err(|e| {
            ClientError::Decode(format!("Failed to parse response as JSON: {}", e))
        })
    }

    async fn send_bytes(&self, request: RequestBuilder, fallback: &str) -> ClientResult<Download> {
        let response = self.send(request, fallback).await?;
        let content_type = content_type_of(&response);
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(Download {
            content_type,
            bytes,
        })
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send_json(request, DEFAULT_ERROR_MESSAGE).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned, B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        self.send_json(request, DEFAULT_ERROR_MESSAGE).await
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self
            .client
            .post(self.build_url(path))
            .header(CONTENT_TYPE, "application/json");
        self.send_json(request, DEFAULT_ERROR_MESSAGE).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
        fallback: &str,
    ) -> ClientResult<T> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        self.send_json(request, fallback).await
    }

    /// DELETE request. Deserializes JSON response.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.client.delete(self.build_url(path));
        self.send_json(request, DEFAULT_ERROR_MESSAGE).await
    }

    /// GET a binary payload.
    pub async fn get_bytes(&self, path: &str, fallback: &str) -> ClientResult<Download> {
        let request = self.client.get(self.build_url(path));
        self.send_bytes(request, fallback).await
    }

    /// POST JSON and receive a PDF.
    pub async fn post_json_for_pdf<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        fallback: &str,
    ) -> ClientResult<Download> {
        let request = self
            .client
            .post(self.build_url(path))
            .header(ACCEPT, PDF_CONTENT_TYPE)
            .json(body);
        self.send_bytes(request, fallback).await
    }

    /// Raw client for custom requests. Shares the session cookie jar.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

fn transport_error(err: reqwest::Error) -> ClientError {
    ClientError::Network(err.to_string())
}

fn content_type_of(response: &Response) -> Option<String> {
    response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Map a non-success response onto the client error taxonomy.
///
/// `needsUpgrade` or HTTP 403 means credit exhaustion; anything else carries the server
/// message (`message`, then `error`, then `fallback`).
pub fn error_from_response(status: u16, body: &[u8], fallback: &str) -> ClientError {
    let body = ApiErrorBody::parse(body);

    if body.needs_upgrade() || status == 403 {
        return ClientError::Credit(CreditError::new(
            body.message_or(CREDIT_ERROR_MESSAGE),
            body.credits.unwrap_or(0),
            body.required.unwrap_or(DEFAULT_REQUIRED_CREDITS),
        ));
    }

    ClientError::api(status, body.message_or(fallback))
}

// Re-export domain response types for convenience.
pub use resumeai_core::models::{
    AnalyzeResponse, AuthResponse, DashboardStatsResponse, HistoryResponse, ResumeData,
    Template,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_without_body_is_credit_error() {
        let err = error_from_response(403, b"", DEFAULT_ERROR_MESSAGE);
        assert_eq!(
            err.as_credit(),
            Some(&CreditError::new("Insufficient credits", 0, 1))
        );
    }

    #[test]
    fn needs_upgrade_flag_wins_over_status() {
        let err = error_from_response(
            402,
            br#"{"message":"Out of credits","credits":0,"required":2,"needsUpgrade":true}"#,
            DEFAULT_ERROR_MESSAGE,
        );
        let credit = err.as_credit().unwrap();
        assert_eq!(credit.message, "Out of credits");
        assert_eq!(credit.required, 2);
    }

    #[test]
    fn other_statuses_carry_server_message() {
        let err = error_from_response(400, br#"{"message":"No file uploaded"}"#, "x");
        assert!(matches!(
            err,
            ClientError::Api { status: 400, ref message } if message == "No file uploaded"
        ));
    }

    #[test]
    fn fallback_used_for_html_error_page() {
        let err = error_from_response(502, b"<html>Bad Gateway</html>", "Failed to generate PDF");
        assert_eq!(err.to_string(), "Failed to generate PDF");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        assert!(matches!(
            ApiClient::new("not a url"),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn build_url_joins_without_double_slash() {
        let client = ApiClient::new("http://localhost:5100/").unwrap();
        assert_eq!(client.build_url("/auth/login"), "http://localhost:5100/auth/login");
    }

    #[test]
    fn restored_session_is_exported_again() {
        let client = ApiClient::new("http://localhost:5100").unwrap();
        assert!(client.session_cookie().is_none());
        client.restore_session("token=abc123");
        assert_eq!(client.session_cookie().as_deref(), Some("token=abc123"));
    }
}
