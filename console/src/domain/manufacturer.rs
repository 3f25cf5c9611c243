//! Asset manufacturers.

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Manufacturer as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Support contact address.
    #[serde(default)]
    pub email: String,
}

/// Payload for creating a manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerCreateInput {
    /// Display name.
    pub name: String,
    /// Support contact address.
    pub email: String,
}

/// Partial update of a manufacturer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
