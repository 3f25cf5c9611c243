//! Generic CRUD client parameterised by a resource descriptor.
//!
//! Every resource client composes a [`Crud`] and re-exposes the operations
//! its resource supports, so each client's surface is an explicit list of
//! methods rather than a merged bag of capabilities.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use pagination::Paginator;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::decode;
use crate::domain::ports::HttpTransport;
use crate::domain::{Endpoint, Error, QueryOptions, RecordId, RecordPatch};

/// Join mode paginated reads use unless the caller picks another.
pub const DEFAULT_SEARCH_JOIN: &str = "and";

/// Describes one REST resource: where it lives and what it exchanges.
pub trait Resource: Send + Sync + 'static {
    /// Endpoint owning the resource's collection.
    const ENDPOINT: Endpoint;
    /// Record returned by reads and writes.
    type Record: DeserializeOwned + Clone + Send + Sync + 'static;
    /// Payload accepted by `create`.
    type CreateInput: Serialize + Send + Sync + 'static;
    /// Partial update accepted by `patch`.
    type Patch: Serialize + Send + Sync + 'static;
}

/// CRUD operations over one resource.
///
/// # Examples
/// ```rust,ignore
/// let categories = Crud::<CategoryResource>::new(transport);
/// let page = categories.paginated(&QueryOptions::page(1, 10)).await?;
/// ```
pub struct Crud<R> {
    transport: Arc<dyn HttpTransport>,
    resource: PhantomData<fn() -> R>,
}

impl<R> Clone for Crud<R> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for Crud<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Crud")
            .field("endpoint", &R::ENDPOINT)
            .finish_non_exhaustive()
    }
}

impl<R: Resource> Crud<R> {
    /// Bind the resource to a transport.
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            resource: PhantomData,
        }
    }

    /// Endpoint the resource lives under.
    pub fn endpoint(&self) -> Endpoint {
        R::ENDPOINT
    }

    /// Transport shared with sibling operations of the owning client.
    pub(crate) fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// List records. Options are forwarded as query parameters verbatim.
    pub async fn all(&self, options: &QueryOptions) -> Result<Vec<R::Record>, Error> {
        let params = options.to_params();
        debug!(endpoint = %R::ENDPOINT, params = params.len(), "listing records");
        let body = self.transport.get(R::ENDPOINT.path(), &params).await?;
        decode::list(R::ENDPOINT, body)
    }

    /// Read one record.
    ///
    /// A missing record surfaces as [`ErrorCode::NotFound`]; an empty
    /// envelope decodes as `None`.
    ///
    /// [`ErrorCode::NotFound`]: crate::domain::ErrorCode::NotFound
    pub async fn get(&self, id: &RecordId) -> Result<Option<R::Record>, Error> {
        debug!(endpoint = %R::ENDPOINT, %id, "reading record");
        let body = self.transport.get(&R::ENDPOINT.record_path(id), &[]).await?;
        decode::record(R::ENDPOINT, body)
    }

    /// Create a record and return it as the server stored it.
    pub async fn create(&self, input: &R::CreateInput) -> Result<R::Record, Error> {
        let payload = decode::body(R::ENDPOINT, input)?;
        debug!(endpoint = %R::ENDPOINT, "creating record");
        let body = self.transport.post(R::ENDPOINT.path(), &payload).await?;
        decode::required_record(R::ENDPOINT, body)
    }

    /// Apply a partial update. Only the patch fields are sent.
    pub async fn patch(&self, patch: &RecordPatch<R::Patch>) -> Result<R::Record, Error> {
        let payload = decode::body(R::ENDPOINT, patch)?;
        debug!(endpoint = %R::ENDPOINT, id = %patch.id, "updating record");
        let body = self
            .transport
            .patch(&R::ENDPOINT.record_path(&patch.id), &payload)
            .await?;
        decode::required_record(R::ENDPOINT, body)
    }

    /// Delete a record.
    pub async fn delete(&self, id: &RecordId) -> Result<(), Error> {
        debug!(endpoint = %R::ENDPOINT, %id, "deleting record");
        self.transport.delete(&R::ENDPOINT.record_path(id)).await?;
        Ok(())
    }

    /// Read one page of records.
    ///
    /// `searchJoin` defaults to [`DEFAULT_SEARCH_JOIN`]. Pages violating the
    /// envelope invariants are rejected as unexpected shapes.
    pub async fn paginated(&self, options: &QueryOptions) -> Result<Paginator<R::Record>, Error> {
        let params = options
            .clone()
            .with_default_search_join(DEFAULT_SEARCH_JOIN)
            .to_params();
        debug!(endpoint = %R::ENDPOINT, params = params.len(), "reading page");
        let body = self.transport.get(R::ENDPOINT.path(), &params).await?;
        decode::page(R::ENDPOINT, body)
    }
}
