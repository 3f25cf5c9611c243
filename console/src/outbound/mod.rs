//! Outbound adapters implementing the domain ports.

pub mod credentials;
pub mod http;
pub mod navigation;
pub mod notify;

pub use credentials::{FileCredentialStore, InMemoryCredentialStore};
pub use http::ReqwestTransport;
pub use navigation::HistoryNavigator;
pub use notify::TracingNotifier;
