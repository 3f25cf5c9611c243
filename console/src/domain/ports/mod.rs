//! Domain ports: the collaborators the console's data layer drives.

mod macros;
pub(crate) use macros::define_port_error;

mod credential_store;
mod http_transport;
mod navigator;
mod notifier;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError};
#[cfg(test)]
pub use http_transport::MockHttpTransport;
pub use http_transport::HttpTransport;
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::{NavigationError, Navigator, StaticNavigator};
#[cfg(test)]
pub use notifier::MockNotifier;
pub use notifier::{Notifier, SilentNotifier};
