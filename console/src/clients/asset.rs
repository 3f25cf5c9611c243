//! Asset client, including the checkout and checkin workflow endpoints.

use serde_json::Value;
use tracing::debug;

use super::{decode, resource_client};
use crate::domain::{
    Asset, AssetCheckinInput, AssetCheckoutInput, AssetCreateInput, AssetPatch, Endpoint, Error,
};

resource_client! {
    /// Client for asset records.
    pub struct AssetClient for AssetResource {
        endpoint: Endpoint::Assets,
        record: Asset,
        create: AssetCreateInput,
        patch: AssetPatch,
    }
}

fn workflow_path(asset_id: i64, action: &str) -> String {
    format!("{}/{action}", Endpoint::Assets.record_path(asset_id))
}

impl AssetClient {
    /// Check an asset out to a user.
    ///
    /// Posts the whole input to `assets/{assetId}/checkout` and returns the
    /// server's acknowledgement body untouched.
    pub async fn checkout(&self, input: &AssetCheckoutInput) -> Result<Value, Error> {
        let payload = decode::body(Endpoint::Assets, input)?;
        debug!(asset_id = input.asset_id, user_id = input.user_id, "checking asset out");
        self.crud
            .transport()
            .post(&workflow_path(input.asset_id, "checkout"), &payload)
            .await
    }

    /// Return an asset. Posts to `assets/{assetId}/checkin`.
    pub async fn checkin(&self, input: &AssetCheckinInput) -> Result<Value, Error> {
        let payload = decode::body(Endpoint::Assets, input)?;
        debug!(asset_id = input.asset_id, status = %input.status, "checking asset in");
        self.crud
            .transport()
            .post(&workflow_path(input.asset_id, "checkin"), &payload)
            .await
    }
}
