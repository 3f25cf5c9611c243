//! Domain primitives of the asset console.
//!
//! Purpose: define the records the API serves, the inputs its write
//! operations accept, the keys under which reads are cached, and the ports
//! through which the data layer reaches the outside world. Types here are
//! transport agnostic; serde contracts are documented on each type.
//!
//! Public surface:
//! - Endpoint: logical API resource.
//! - Error / ErrorCode: failure surfaced by every read and write.
//! - RecordId: opaque identifier accepting string or integer ids.
//! - QueryKey / QueryOptions / Fetched / RecordPatch: read addressing and
//!   outcomes.

pub mod asset;
pub mod category;
pub mod department;
pub mod endpoint;
pub mod error;
pub mod manufacturer;
pub mod model;
pub mod ports;
pub mod query;
pub mod record_id;
pub mod supplier;
pub mod user;

pub use self::asset::{
    Asset, AssetCheckinInput, AssetCheckoutInput, AssetCreateInput, AssetPatch, AssetStatus,
    UnknownAssetStatus,
};
pub use self::category::{Category, CategoryCreateInput, CategoryPatch};
pub use self::department::{Department, DepartmentCreateInput, DepartmentPatch};
pub use self::endpoint::Endpoint;
pub use self::error::{Error, ErrorCode};
pub use self::manufacturer::{Manufacturer, ManufacturerCreateInput, ManufacturerPatch};
pub use self::model::{Model, ModelCreateInput, ModelPatch};
pub use self::query::{Fetched, QueryKey, QueryOptions, QueryScope, RecordPatch, SortOrder};
pub use self::record_id::RecordId;
pub use self::supplier::{Supplier, SupplierCreateInput, SupplierPatch};
pub use self::user::{
    DEFAULT_ROLE, LoginInput, ProfileUpdateInput, User, UserCreateInput, UserInfo, UserPatch,
};

/// Result alias used across clients, queries, and mutations.
///
/// # Examples
/// ```
/// use asset_console::domain::{ConsoleResult, Error};
///
/// fn lookup() -> ConsoleResult<u8> {
///     Err(Error::not_found("asset 7"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ConsoleResult<T> = Result<T, Error>;
