//! Asset records and the inputs of their write and workflow operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use super::{Model, RecordId};

/// Lifecycle state of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    /// On the shelf and ready to check out.
    Available,
    /// Checked out to a user.
    Assigned,
    /// Away for repair.
    Repair,
    /// No longer in service.
    Retired,
    /// Awaiting intake.
    Pending,
    /// Prepared but not yet deployed.
    ReadyToDeploy,
    /// Archived record.
    Archived,
    /// Broken beyond use.
    Broken,
    /// Lost or stolen.
    LostStolen,
}

impl AssetStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Assigned => "ASSIGNED",
            Self::Repair => "REPAIR",
            Self::Retired => "RETIRED",
            Self::Pending => "PENDING",
            Self::ReadyToDeploy => "READY_TO_DEPLOY",
            Self::Archived => "ARCHIVED",
            Self::Broken => "BROKEN",
            Self::LostStolen => "LOST_STOLEN",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a status string is not a known wire name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown asset status: {0}")]
pub struct UnknownAssetStatus(pub String);

impl FromStr for AssetStatus {
    type Err = UnknownAssetStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s {
            "AVAILABLE" => Self::Available,
            "ASSIGNED" => Self::Assigned,
            "REPAIR" => Self::Repair,
            "RETIRED" => Self::Retired,
            "PENDING" => Self::Pending,
            "READY_TO_DEPLOY" => Self::ReadyToDeploy,
            "ARCHIVED" => Self::Archived,
            "BROKEN" => Self::Broken,
            "LOST_STOLEN" => Self::LostStolen,
            other => return Err(UnknownAssetStatus(other.to_owned())),
        };
        Ok(status)
    }
}

// Assets created before statuses existed come back with an empty string.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<AssetStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

/// Asset as returned by the API.
///
/// `model` is an embedded snapshot taken when the asset was read, not a live
/// reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Record identifier.
    pub id: RecordId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Inventory tag.
    #[serde(default)]
    pub tag: String,
    /// Manufacturer serial number.
    #[serde(default)]
    pub serial_number: String,
    /// Lifecycle state, when the server knows one.
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<AssetStatus>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Embedded model snapshot.
    #[serde(default)]
    pub model: Option<Model>,
}

/// Payload for creating an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCreateInput {
    /// Display name.
    pub name: String,
    /// Inventory tag.
    pub tag: String,
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Free-form description.
    pub description: String,
    /// Initial lifecycle state.
    pub status: AssetStatus,
    /// Model the asset is an instance of.
    pub model_id: RecordId,
}

/// Partial update of an asset; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New inventory tag.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// New serial number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New lifecycle state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
    /// New model.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<RecordId>,
}

/// Payload for checking an asset out to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCheckoutInput {
    /// Asset name, echoed into the loan record.
    pub asset_name: String,
    /// Asset being checked out.
    pub asset_id: i64,
    /// User receiving the asset.
    pub user_id: i64,
    /// Checkout date as sent by the form (`YYYY-MM-DD` or RFC 3339).
    pub checkout_date: String,
    /// Expected return date, if any.
    pub expected_checkin_date: Option<String>,
    /// Free-form notes.
    pub notes: String,
}

/// Payload for returning an asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetCheckinInput {
    /// Asset name, echoed into the loan record.
    pub asset_name: String,
    /// Asset being returned.
    pub asset_id: i64,
    /// Return date.
    pub checkin_date: String,
    /// Status the asset returns in.
    pub status: AssetStatus,
    /// Free-form notes.
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_server_asset_with_embedded_model() {
        let asset: Asset = serde_json::from_value(json!({
            "id": 1,
            "name": "Laptop",
            "serialNumber": "SN-1",
            "tag": "T-1",
            "status": "AVAILABLE",
            "model": {"id": 3, "name": "X1"},
            "description": ""
        }))
        .expect("asset decodes");

        assert_eq!(asset.id, RecordId::from(1_i64));
        assert_eq!(asset.status, Some(AssetStatus::Available));
        assert_eq!(asset.model.map(|m| m.name), Some("X1".to_owned()));
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!(null))]
    #[case(json!("SOMETHING_ELSE"))]
    fn unknown_statuses_decode_as_none(#[case] status: serde_json::Value) {
        let asset: Asset =
            serde_json::from_value(json!({"id": "1", "status": status})).expect("asset decodes");
        assert!(asset.status.is_none());
    }

    #[rstest]
    #[case(AssetStatus::ReadyToDeploy)]
    #[case(AssetStatus::LostStolen)]
    fn wire_names_round_trip_through_from_str(#[case] status: AssetStatus) {
        assert_eq!(status.as_str().parse::<AssetStatus>(), Ok(status));
        assert_eq!(
            serde_json::to_value(status).expect("serialise status"),
            json!(status.as_str())
        );
    }

    #[rstest]
    fn checkout_payload_uses_camel_case_and_keeps_null_dates() {
        let input = AssetCheckoutInput {
            asset_name: "Laptop".to_owned(),
            asset_id: 7,
            user_id: 3,
            checkout_date: "2024-01-01".to_owned(),
            expected_checkin_date: None,
            notes: String::new(),
        };

        let value = serde_json::to_value(&input).expect("serialise checkout");
        assert_eq!(value["assetId"], 7);
        assert_eq!(value["userId"], 3);
        assert!(value["expectedCheckinDate"].is_null());
    }

    #[rstest]
    fn patch_omits_untouched_fields() {
        let patch = AssetPatch {
            name: Some("Renamed".to_owned()),
            ..AssetPatch::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).expect("serialise patch"),
            json!({"name": "Renamed"})
        );
    }
}
