//! Asset reads and writes.

use std::sync::Arc;

use futures_util::FutureExt;
use serde_json::Value;

use super::DataContext;
use crate::domain::{
    Asset, AssetCheckinInput, AssetCheckoutInput, AssetCreateInput, AssetPatch, Endpoint,
    QueryOptions, RecordId, RecordPatch,
};
use crate::query::{DetailQuery, ListQuery, Mutation, MutationAction, PagedQuery};
use crate::routes::ASSETS_PATH;

impl DataContext {
    /// Asset list read.
    pub fn assets_query(&self, options: QueryOptions) -> ListQuery<Asset> {
        self.list_query(self.assets.crud(), options)
    }

    /// Paginated asset read.
    pub fn assets_page_query(&self, options: QueryOptions) -> PagedQuery<Asset> {
        self.page_query(self.assets.crud(), options)
    }

    /// Single asset read.
    pub fn asset_query(&self, id: impl Into<RecordId>) -> DetailQuery<Asset> {
        self.detail_query(self.assets.crud(), id.into())
    }

    /// Create an asset, then return to the asset list.
    pub fn create_asset_mutation(&self) -> Mutation<AssetCreateInput, Asset> {
        self.create_mutation(self.assets.crud())
            .navigate_to(ASSETS_PATH)
    }

    /// Update an asset, then return to the asset list.
    pub fn update_asset_mutation(&self) -> Mutation<RecordPatch<AssetPatch>, Asset> {
        self.update_mutation(self.assets.crud())
            .navigate_to(ASSETS_PATH)
    }

    /// Delete an asset.
    pub fn delete_asset_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.assets.crud())
    }

    /// Check an asset out to a user.
    pub fn checkout_asset_mutation(&self) -> Mutation<AssetCheckoutInput, Value> {
        let client = self.assets.clone();
        Mutation::new(
            self.effects.clone(),
            Endpoint::Assets,
            MutationAction::Checkout,
            Arc::new(move |input: AssetCheckoutInput| {
                let client = client.clone();
                async move { client.checkout(&input).await }.boxed()
            }),
        )
    }

    /// Return a checked-out asset.
    pub fn checkin_asset_mutation(&self) -> Mutation<AssetCheckinInput, Value> {
        let client = self.assets.clone();
        Mutation::new(
            self.effects.clone(),
            Endpoint::Assets,
            MutationAction::Checkin,
            Arc::new(move |input: AssetCheckinInput| {
                let client = client.clone();
                async move { client.checkin(&input).await }.boxed()
            }),
        )
    }
}
