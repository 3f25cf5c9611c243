//! Port for the HTTP collaborator every resource client goes through.
//!
//! Adapters own the base URL, authentication headers, timeouts, and status
//! mapping. Clients only see decoded JSON bodies or domain errors.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::Error;

/// Minimal JSON-over-HTTP surface used by the resource clients.
///
/// Paths are relative to the API base URL. Empty response bodies decode as
/// [`Value::Null`]; non-JSON bodies decode as [`Value::String`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// `GET path?params`.
    async fn get(&self, path: &str, params: &[(String, String)]) -> Result<Value, Error>;

    /// `POST path` with a JSON body.
    async fn post(&self, path: &str, body: &Value) -> Result<Value, Error>;

    /// `PATCH path` with a JSON body.
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, Error>;

    /// `DELETE path`.
    async fn delete(&self, path: &str) -> Result<Value, Error>;
}
