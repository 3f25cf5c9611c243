//! Token issuance client used by login.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::decode;
use crate::domain::ports::HttpTransport;
use crate::domain::{Endpoint, Error, LoginInput};

/// Client for `POST authentication/token`.
#[derive(Clone)]
pub struct AuthClient {
    transport: Arc<dyn HttpTransport>,
}

impl AuthClient {
    /// Bind the client to a transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Exchange credentials for a bearer token (`{"data": "<token>"}`).
    ///
    /// Persisting the token is the caller's job.
    pub async fn token(&self, credentials: &LoginInput) -> Result<String, Error> {
        let payload = decode::body(Endpoint::Token, credentials)?;
        debug!(email = %credentials.email, "requesting token");
        let body = self.transport.post(Endpoint::Token.path(), &payload).await?;
        match decode::unwrap_data(body) {
            Value::String(token) if !token.is_empty() => Ok(token),
            _ => Err(Error::unexpected_shape(format!(
                "{}: response carried no token",
                Endpoint::Token
            ))),
        }
    }
}
