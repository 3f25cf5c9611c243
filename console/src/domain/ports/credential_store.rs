//! Port for the persisted API credential.

use super::define_port_error;

define_port_error! {
    /// Errors raised by credential store adapters.
    pub enum CredentialStoreError {
        /// Reading or writing the backing storage failed.
        Io { message: String } => "credential storage failed: {message}",
    }
}

/// Holds the bearer token between console runs.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Read the stored token, if any.
    fn load(&self) -> Result<Option<String>, CredentialStoreError>;

    /// Persist `token`, replacing any previous one.
    fn store(&self, token: &str) -> Result<(), CredentialStoreError>;

    /// Forget the stored token. Removing an absent token succeeds.
    fn remove(&self) -> Result<(), CredentialStoreError>;
}
