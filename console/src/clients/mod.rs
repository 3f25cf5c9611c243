//! Typed REST clients, one per API resource.
//!
//! Clients own request shaping and envelope decoding only. Caching,
//! notifications, and invalidation live in [`crate::query`] and
//! [`crate::data`].

mod asset;
mod auth;
mod catalogue;
mod crud;
mod decode;
mod health;
mod macros;
mod user;

pub(crate) use macros::resource_client;

pub use asset::{AssetClient, AssetResource};
pub use auth::AuthClient;
pub use catalogue::{
    CategoryClient, CategoryResource, DepartmentClient, DepartmentResource, ManufacturerClient,
    ManufacturerResource, ModelClient, ModelResource, SupplierClient, SupplierResource,
};
pub use crud::{Crud, DEFAULT_SEARCH_JOIN, Resource};
pub use health::HealthClient;
pub use user::{UserClient, UserResource};
