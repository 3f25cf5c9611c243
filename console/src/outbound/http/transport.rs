//! Reqwest-backed HTTP transport.
//!
//! This adapter owns transport details only: URL joining, bearer
//! authentication, timeouts, status mapping, and lenient body decoding.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{CredentialStore, HttpTransport};
use crate::domain::{Error, ErrorCode};

/// Transport that sends every request to one API base URL.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    credentials: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// The base URL is normalised to end with `/` so relative endpoint paths
    /// join beneath it.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        user_agent: &str,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: with_trailing_slash(base_url),
            credentials,
        })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url, Error> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| Error::invalid_request(format!("invalid request path {path}: {error}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, Error> {
        let url = self.url(path)?;
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        let token = self
            .credentials
            .load()
            .map_err(|error| Error::internal(error.to_string()))?;
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        Ok(request)
    }

    async fn send(&self, method: Method, request: RequestBuilder) -> Result<Value, Error> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        debug!(%method, url = %response.url(), status = status.as_u16(), "response received");
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(decode_body(body.as_ref()))
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, Error> {
        let request = self.request(Method::GET, path)?.query(params);
        self.send(Method::GET, request).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let request = self.request(Method::POST, path)?.json(body);
        self.send(Method::POST, request).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let request = self.request(Method::PATCH, path)?.json(body);
        self.send(Method::PATCH, request).await
    }

    async fn delete(&self, path: &str) -> Result<Value, Error> {
        let request = self.request(Method::DELETE, path)?;
        self.send(Method::DELETE, request).await
    }
}

// Empty bodies are `null`; anything that is not JSON is kept as text.
fn decode_body(body: &[u8]) -> Value {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).trim().to_owned()))
}

fn map_transport_error(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::timeout(error.to_string())
    } else {
        Error::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> Error {
    let code = ErrorCode::from_status(status.as_u16()).unwrap_or(ErrorCode::Internal);
    let message = server_message(body).unwrap_or_else(|| {
        let preview = body_preview(body);
        if preview.is_empty() {
            format!("status {}", status.as_u16())
        } else {
            format!("status {}: {}", status.as_u16(), preview)
        }
    });
    Error::new(code, message).with_status(status.as_u16())
}

// The API reports failures as `{"error": "..."}`.
fn server_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_owned)
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
