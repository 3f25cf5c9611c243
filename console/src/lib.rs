//! Data layer of the asset management admin console.
//!
//! Resource clients speak to the REST API through an [`HttpTransport`]
//! port, read queries share a keyed [`QueryCache`], mutations invalidate
//! the endpoints they touch, and the signed-in user lives in an explicit
//! [`SessionContext`].
//!
//! [`HttpTransport`]: domain::ports::HttpTransport
//! [`QueryCache`]: query::QueryCache
//! [`SessionContext`]: session::SessionContext

pub mod clients;
pub mod config;
pub mod data;
pub mod domain;
pub mod outbound;
pub mod query;
pub mod routes;
pub mod session;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use data::DataContext;
