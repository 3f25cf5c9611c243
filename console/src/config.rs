//! Console configuration loaded via OrthoConfig.
//!
//! Values come from `ASSET_CONSOLE_*` environment variables and any
//! configuration file OrthoConfig discovers. Every field is optional; the
//! accessors supply the defaults.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// API base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/";
/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Token file used when none is configured.
pub const DEFAULT_TOKEN_PATH: &str = ".asset-console-token";

fn default_user_agent() -> String {
    format!("asset-console/{}", env!("CARGO_PKG_VERSION"))
}

/// Errors raised while interpreting configured values.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// Loading the configuration layers failed.
    #[error("failed to load configuration: {0}")]
    Load(String),
    /// The configured base URL is not a valid absolute URL.
    #[error("invalid base URL {value}: {source}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Configuration values of the console's data layer.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ASSET_CONSOLE")]
pub struct ConsoleSettings {
    /// API base URL; endpoint paths are joined beneath it.
    pub base_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
    /// File holding the bearer token between runs.
    pub token_path: Option<PathBuf>,
    /// User-agent sent with every request.
    pub user_agent: Option<String>,
}

impl ConsoleSettings {
    /// Load settings from the environment and configuration files only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Load`] when a configuration layer is
    /// malformed.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from_iter([OsString::from("asset-console")])
            .map_err(|error| SettingsError::Load(error.to_string()))
    }

    /// Return the configured base URL, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not
    /// parse.
    pub fn base_url(&self) -> Result<Url, SettingsError> {
        let value = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        Url::parse(value).map_err(|source| SettingsError::InvalidBaseUrl {
            value: value.to_owned(),
            source,
        })
    }

    /// Return the configured request timeout, falling back to the default.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(
            self.timeout_secs
                .filter(|secs| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    /// Return the configured token path, falling back to the default.
    pub fn token_path(&self) -> PathBuf {
        self.token_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_PATH))
    }

    /// Return the configured user-agent, falling back to the default.
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(default_user_agent)
    }
}
