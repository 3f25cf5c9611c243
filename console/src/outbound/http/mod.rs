//! HTTP adapter for the API server.

mod transport;

pub use transport::ReqwestTransport;
