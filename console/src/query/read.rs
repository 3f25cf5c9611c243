//! Read queries bound to one cache key each.
//!
//! A query owns its key and a fetcher. `fetch` drives the shared cache and
//! `state` projects the cache entry into the shape a view renders:
//! collections are empty (never absent) before the first response, and
//! `loading` stays true until the key holds a value or has failed.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use pagination::{Paginator, PaginatorInfo};

use super::cache::QueryCache;
use crate::domain::{Endpoint, Error, Fetched, QueryKey, QueryOptions, RecordId};

/// Boxed async operation producing a query's data.
pub type Fetcher<A, T> = Arc<dyn Fn(A) -> BoxFuture<'static, Result<T, Error>> + Send + Sync>;

/// View state of a plain list read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState<T> {
    /// Cached records; empty before the first response.
    pub records: Vec<T>,
    /// Failure of the latest fetch.
    pub error: Option<Error>,
    /// True while nothing is cached and the key has not failed.
    pub loading: bool,
}

/// View state of a paginated read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedState<T> {
    /// Rows of the cached page; empty before the first response.
    pub records: Vec<T>,
    /// Position of the cached page within the full record set.
    pub paginator_info: Option<PaginatorInfo>,
    /// Failure of the latest fetch.
    pub error: Option<Error>,
    /// True while nothing is cached and the key has not failed.
    pub loading: bool,
}

/// View state of a single-record read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState<T> {
    /// Outcome of the latest read.
    pub record: Fetched<T>,
    /// True while nothing is cached and the key has not failed.
    pub loading: bool,
}

/// Plain list read: key `[endpoint, List(options)]`.
pub struct ListQuery<T> {
    cache: QueryCache,
    key: QueryKey,
    options: QueryOptions,
    fetcher: Fetcher<QueryOptions, Vec<T>>,
}

impl<T> fmt::Debug for ListQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListQuery").field("key", &self.key).finish()
    }
}

impl<T> ListQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind a list read to `endpoint` and `options`.
    pub fn new(
        cache: QueryCache,
        endpoint: Endpoint,
        options: QueryOptions,
        fetcher: Fetcher<QueryOptions, Vec<T>>,
    ) -> Self {
        Self {
            cache,
            key: QueryKey::list(endpoint, options.clone()),
            options,
            fetcher,
        }
    }

    /// Cache key of the query.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Options the query reads with.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Switch to other options. Interest in the previous key is dropped.
    pub fn set_options(&mut self, options: QueryOptions) {
        self.key = QueryKey::list(self.key.endpoint(), options.clone());
        self.options = options;
    }

    /// Current view state, without fetching.
    pub fn state(&self) -> ListState<T> {
        let snapshot = self.cache.snapshot::<Vec<T>>(&self.key);
        ListState {
            loading: snapshot.data.is_none() && snapshot.error.is_none(),
            records: snapshot
                .data
                .map(|records| records.as_ref().clone())
                .unwrap_or_default(),
            error: snapshot.error,
        }
    }

    /// Fetch when the entry is absent or stale, then return the view state.
    pub async fn fetch(&self) -> ListState<T> {
        let fetcher = Arc::clone(&self.fetcher);
        let options = self.options.clone();
        // The outcome is recorded in the cache; `state` reads it back.
        let _ = self.cache.fetch(self.key.clone(), move || fetcher(options)).await;
        self.state()
    }
}

/// Paginated read: key `[endpoint, Page(options)]`.
pub struct PagedQuery<T> {
    cache: QueryCache,
    key: QueryKey,
    options: QueryOptions,
    fetcher: Fetcher<QueryOptions, Paginator<T>>,
}

impl<T> fmt::Debug for PagedQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedQuery").field("key", &self.key).finish()
    }
}

impl<T> PagedQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind a paginated read to `endpoint` and `options`.
    pub fn new(
        cache: QueryCache,
        endpoint: Endpoint,
        options: QueryOptions,
        fetcher: Fetcher<QueryOptions, Paginator<T>>,
    ) -> Self {
        Self {
            cache,
            key: QueryKey::page(endpoint, options.clone()),
            options,
            fetcher,
        }
    }

    /// Cache key of the query.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Options the query reads with.
    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// Switch to another page or filter.
    pub fn set_options(&mut self, options: QueryOptions) {
        self.key = QueryKey::page(self.key.endpoint(), options.clone());
        self.options = options;
    }

    /// Current view state, without fetching.
    pub fn state(&self) -> PagedState<T> {
        let snapshot = self.cache.snapshot::<Paginator<T>>(&self.key);
        let loading = snapshot.data.is_none() && snapshot.error.is_none();
        let (records, paginator_info) = match snapshot.data {
            Some(page) => (page.rows.clone(), Some(PaginatorInfo::from(page.as_ref()))),
            None => (Vec::new(), None),
        };
        PagedState {
            records,
            paginator_info,
            error: snapshot.error,
            loading,
        }
    }

    /// Fetch when the entry is absent or stale, then return the view state.
    pub async fn fetch(&self) -> PagedState<T> {
        let fetcher = Arc::clone(&self.fetcher);
        let options = self.options.clone();
        let _ = self.cache.fetch(self.key.clone(), move || fetcher(options)).await;
        self.state()
    }
}

/// Single-record read: key `[endpoint, Detail(id)]`.
pub struct DetailQuery<T> {
    cache: QueryCache,
    key: QueryKey,
    id: RecordId,
    fetcher: Fetcher<RecordId, Option<T>>,
}

impl<T> fmt::Debug for DetailQuery<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetailQuery").field("key", &self.key).finish()
    }
}

impl<T> DetailQuery<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Bind a detail read to `endpoint` and `id`.
    pub fn new(
        cache: QueryCache,
        endpoint: Endpoint,
        id: RecordId,
        fetcher: Fetcher<RecordId, Option<T>>,
    ) -> Self {
        Self {
            cache,
            key: QueryKey::detail(endpoint, id.clone()),
            id,
            fetcher,
        }
    }

    /// Cache key of the query.
    pub fn key(&self) -> &QueryKey {
        &self.key
    }

    /// Record the query reads.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Current view state, without fetching.
    ///
    /// A failure of the latest fetch takes precedence over stale data.
    pub fn state(&self) -> DetailState<T> {
        let snapshot = self.cache.snapshot::<Option<T>>(&self.key);
        let loading = snapshot.data.is_none() && snapshot.error.is_none();
        let record = match (snapshot.error, snapshot.data) {
            (Some(error), _) => Fetched::Failed(error),
            (None, Some(found)) => match found.as_ref() {
                Some(record) => Fetched::Found(record.clone()),
                None => Fetched::Empty,
            },
            (None, None) => Fetched::Empty,
        };
        DetailState { record, loading }
    }

    /// Fetch when the entry is absent or stale, then return the view state.
    pub async fn fetch(&self) -> DetailState<T> {
        let fetcher = Arc::clone(&self.fetcher);
        let id = self.id.clone();
        let _ = self.cache.fetch(self.key.clone(), move || fetcher(id)).await;
        self.state()
    }
}
