//! Per-resource read queries and mutations.
//!
//! [`DataContext`] bundles the resource clients with the shared cache,
//! notifier, navigator, and session. Each resource module adds the
//! constructors a view calls (`assets_query`, `create_asset_mutation`, ...)
//! as methods on it.

mod asset;
mod catalogue;
mod user;

use std::sync::Arc;

use futures_util::FutureExt;

use crate::clients::{
    AssetClient, CategoryClient, Crud, DepartmentClient, HealthClient, ManufacturerClient,
    ModelClient, Resource, SupplierClient, UserClient,
};
use crate::domain::ports::{CredentialStore, HttpTransport, Navigator, Notifier};
use crate::domain::{QueryOptions, RecordId, RecordPatch};
use crate::query::{
    DetailQuery, ListQuery, Mutation, MutationAction, MutationEffects, PagedQuery, QueryCache,
};
use crate::session::SessionContext;

/// Entry point of the data layer.
#[derive(Clone)]
pub struct DataContext {
    effects: MutationEffects,
    session: SessionContext,
    assets: AssetClient,
    categories: CategoryClient,
    departments: DepartmentClient,
    manufacturers: ManufacturerClient,
    models: ModelClient,
    suppliers: SupplierClient,
    users: UserClient,
    health: HealthClient,
}

impl std::fmt::Debug for DataContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataContext")
            .field("cache", &self.effects.cache)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl DataContext {
    /// Wire every client to `transport` and share one cache and session.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let cache = QueryCache::new();
        let session = SessionContext::new(
            Arc::clone(&transport),
            credentials,
            cache.clone(),
            Arc::clone(&navigator),
        );
        Self {
            effects: MutationEffects {
                cache,
                notifier,
                navigator,
            },
            session,
            assets: AssetClient::new(Arc::clone(&transport)),
            categories: CategoryClient::new(Arc::clone(&transport)),
            departments: DepartmentClient::new(Arc::clone(&transport)),
            manufacturers: ManufacturerClient::new(Arc::clone(&transport)),
            models: ModelClient::new(Arc::clone(&transport)),
            suppliers: SupplierClient::new(Arc::clone(&transport)),
            users: UserClient::new(Arc::clone(&transport)),
            health: HealthClient::new(transport),
        }
    }

    /// Shared query cache.
    pub fn cache(&self) -> &QueryCache {
        &self.effects.cache
    }

    /// Session of the signed-in user.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Asset client.
    pub fn assets(&self) -> &AssetClient {
        &self.assets
    }

    /// Category client.
    pub fn categories(&self) -> &CategoryClient {
        &self.categories
    }

    /// Department client.
    pub fn departments(&self) -> &DepartmentClient {
        &self.departments
    }

    /// Manufacturer client.
    pub fn manufacturers(&self) -> &ManufacturerClient {
        &self.manufacturers
    }

    /// Model client.
    pub fn models(&self) -> &ModelClient {
        &self.models
    }

    /// Supplier client.
    pub fn suppliers(&self) -> &SupplierClient {
        &self.suppliers
    }

    /// User client.
    pub fn users(&self) -> &UserClient {
        &self.users
    }

    /// Liveness probe client.
    pub fn health(&self) -> &HealthClient {
        &self.health
    }

    fn list_query<R: Resource>(&self, crud: &Crud<R>, options: QueryOptions) -> ListQuery<R::Record> {
        let crud = crud.clone();
        ListQuery::new(
            self.effects.cache.clone(),
            R::ENDPOINT,
            options,
            Arc::new(move |options: QueryOptions| {
                let crud = crud.clone();
                async move { crud.all(&options).await }.boxed()
            }),
        )
    }

    fn page_query<R: Resource>(&self, crud: &Crud<R>, options: QueryOptions) -> PagedQuery<R::Record> {
        let crud = crud.clone();
        PagedQuery::new(
            self.effects.cache.clone(),
            R::ENDPOINT,
            options,
            Arc::new(move |options: QueryOptions| {
                let crud = crud.clone();
                async move { crud.paginated(&options).await }.boxed()
            }),
        )
    }

    fn detail_query<R: Resource>(&self, crud: &Crud<R>, id: RecordId) -> DetailQuery<R::Record> {
        let crud = crud.clone();
        DetailQuery::new(
            self.effects.cache.clone(),
            R::ENDPOINT,
            id,
            Arc::new(move |id: RecordId| {
                let crud = crud.clone();
                async move { crud.get(&id).await }.boxed()
            }),
        )
    }

    fn create_mutation<R: Resource>(&self, crud: &Crud<R>) -> Mutation<R::CreateInput, R::Record> {
        let crud = crud.clone();
        Mutation::new(
            self.effects.clone(),
            R::ENDPOINT,
            MutationAction::Create,
            Arc::new(move |input: R::CreateInput| {
                let crud = crud.clone();
                async move { crud.create(&input).await }.boxed()
            }),
        )
    }

    fn update_mutation<R: Resource>(
        &self,
        crud: &Crud<R>,
    ) -> Mutation<RecordPatch<R::Patch>, R::Record> {
        let crud = crud.clone();
        Mutation::new(
            self.effects.clone(),
            R::ENDPOINT,
            MutationAction::Update,
            Arc::new(move |patch: RecordPatch<R::Patch>| {
                let crud = crud.clone();
                async move { crud.patch(&patch).await }.boxed()
            }),
        )
    }

    fn delete_mutation<R: Resource>(&self, crud: &Crud<R>) -> Mutation<RecordId, ()> {
        let crud = crud.clone();
        Mutation::new(
            self.effects.clone(),
            R::ENDPOINT,
            MutationAction::Delete,
            Arc::new(move |id: RecordId| {
                let crud = crud.clone();
                async move { crud.delete(&id).await }.boxed()
            }),
        )
    }
}
