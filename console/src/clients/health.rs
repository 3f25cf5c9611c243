//! Liveness probe client.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::HttpTransport;
use crate::domain::{Endpoint, Error};

/// Client for `GET health`.
#[derive(Clone)]
pub struct HealthClient {
    transport: Arc<dyn HttpTransport>,
}

impl HealthClient {
    /// Bind the client to a transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Probe the API. Plain-text bodies are returned as-is; JSON bodies are
    /// returned in compact form.
    pub async fn check(&self) -> Result<String, Error> {
        let body = self.transport.get(Endpoint::Health.path(), &[]).await?;
        Ok(match body {
            Value::String(text) => text,
            Value::Null => String::new(),
            other => other.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockHttpTransport;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("ok"), "ok")]
    #[case(json!({"status": "ok"}), r#"{"status":"ok"}"#)]
    #[case(Value::Null, "")]
    #[tokio::test]
    async fn accepts_text_and_json_bodies(#[case] body: Value, #[case] expected: &str) {
        let mut transport = MockHttpTransport::new();
        transport
            .expect_get()
            .withf(|path, _| path == "health")
            .returning(move |_, _| Ok(body.clone()));

        let status = HealthClient::new(Arc::new(transport))
            .check()
            .await
            .expect("probe succeeds");
        assert_eq!(status, expected);
    }
}
