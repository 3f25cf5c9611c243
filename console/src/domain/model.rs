//! Asset models (a manufacturer's product line within a category).

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Model as returned by the API.
///
/// Model snapshots embedded in assets only carry `id` and `name`; the other
/// fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Category the model belongs to.
    #[serde(default)]
    pub category_id: Option<RecordId>,
    /// Manufacturer producing the model.
    #[serde(default)]
    pub manufacturer_id: Option<RecordId>,
    /// Manufacturer's model number.
    #[serde(default)]
    pub model_number: String,
}

/// Payload for creating a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCreateInput {
    /// Display name.
    pub name: String,
    /// Category the model belongs to.
    pub category_id: RecordId,
    /// Manufacturer producing the model.
    pub manufacturer_id: RecordId,
    /// Manufacturer's model number.
    pub model_number: String,
}

/// Partial update of a model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
    /// New manufacturer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer_id: Option<RecordId>,
    /// New model number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_number: Option<String>,
}
