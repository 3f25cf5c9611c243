//! Shared, type-erased cache of read results.
//!
//! Entries are addressed by [`QueryKey`]. A fetch for a key that already has
//! a fetch in flight joins it instead of issuing a second request. An
//! invalidation marks matching entries stale, keeps their data for display,
//! and detaches any in-flight fetch so that its late result is not recorded.
//!
//! The entry map sits behind a `std::sync::Mutex` that is only held for
//! bookkeeping and never across an `.await`.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tokio::sync::broadcast;
use tracing::debug;

use crate::domain::{Endpoint, Error, QueryKey};

const EVENT_CAPACITY: usize = 64;

type Erased = Arc<dyn Any + Send + Sync>;
type SharedFetch = Shared<BoxFuture<'static, Result<Erased, Error>>>;

/// Change notifications emitted by the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheEvent {
    /// A fetch for the key completed and its outcome was recorded.
    Updated(QueryKey),
    /// Every entry under the endpoint was marked stale.
    Invalidated(Endpoint),
    /// The cache was emptied.
    Cleared,
}

/// Point-in-time view of one entry.
#[derive(Debug)]
pub struct CacheSnapshot<T> {
    /// Last successfully fetched value, kept while stale.
    pub data: Option<Arc<T>>,
    /// Failure of the most recent fetch, cleared by the next success.
    pub error: Option<Error>,
    /// Whether a fetch is in flight.
    pub pending: bool,
    /// Whether the entry was invalidated since its last successful fetch.
    pub stale: bool,
}

impl<T> Default for CacheSnapshot<T> {
    fn default() -> Self {
        Self {
            data: None,
            error: None,
            pending: false,
            stale: false,
        }
    }
}

#[derive(Default)]
struct Entry {
    data: Option<Erased>,
    error: Option<Error>,
    stale: bool,
    generation: u64,
    in_flight: Option<SharedFetch>,
}

impl Entry {
    fn fresh_data(&self) -> Option<Erased> {
        if self.stale {
            return None;
        }
        self.data.clone()
    }
}

struct Inner {
    entries: Mutex<HashMap<QueryKey, Entry>>,
    events: broadcast::Sender<CacheEvent>,
}

/// Cloneable handle to the shared query cache.
#[derive(Clone)]
pub struct QueryCache {
    inner: Arc<Inner>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("entries", &self.entries().len())
            .finish()
    }
}

fn downcast<T: Send + Sync + 'static>(key: &QueryKey, value: Erased) -> Result<Arc<T>, Error> {
    value.downcast::<T>().map_err(|_| {
        Error::internal(format!(
            "cache entry {key:?} holds a different type than requested"
        ))
    })
}

impl QueryCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(HashMap::new()),
                events,
            }),
        }
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<QueryKey, Entry>> {
        self.inner
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, event: CacheEvent) {
        // Nobody listening is fine.
        let _ = self.inner.events.send(event);
    }

    /// Return the cached value for `key`, fetching it when absent or stale.
    ///
    /// Concurrent calls for the same key share one invocation of a fetcher;
    /// later callers' fetchers are dropped unused.
    ///
    /// # Errors
    ///
    /// Returns the fetch failure, or [`ErrorCode::Internal`] when the entry
    /// was populated with a different type.
    ///
    /// [`ErrorCode::Internal`]: crate::domain::ErrorCode::Internal
    pub async fn fetch<T, F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Arc<T>, Error>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = Result<T, Error>> + Send + 'static,
    {
        let (fetch, generation) = {
            let mut entries = self.entries();
            let entry = entries.entry(key.clone()).or_default();
            if let Some(data) = entry.fresh_data() {
                drop(entries);
                debug!(?key, "cache hit");
                return downcast(&key, data);
            }
            match &entry.in_flight {
                Some(fetch) => {
                    debug!(?key, "joining in-flight fetch");
                    (fetch.clone(), entry.generation)
                }
                None => {
                    debug!(?key, stale = entry.stale, "starting fetch");
                    let fetch = fetcher()
                        .map(|result| result.map(|value| Arc::new(value) as Erased))
                        .boxed()
                        .shared();
                    entry.generation = entry.generation.wrapping_add(1);
                    entry.in_flight = Some(fetch.clone());
                    (fetch, entry.generation)
                }
            }
        };

        let outcome = fetch.await;
        self.record(&key, generation, &outcome);
        downcast(&key, outcome?)
    }

    fn record(&self, key: &QueryKey, generation: u64, outcome: &Result<Erased, Error>) {
        let recorded = {
            let mut entries = self.entries();
            match entries.get_mut(key) {
                Some(entry) if entry.generation == generation && entry.in_flight.is_some() => {
                    entry.in_flight = None;
                    match outcome {
                        Ok(value) => {
                            entry.data = Some(Arc::clone(value));
                            entry.error = None;
                            entry.stale = false;
                        }
                        Err(error) => entry.error = Some(error.clone()),
                    }
                    true
                }
                _ => false,
            }
        };
        if recorded {
            debug!(?key, ok = outcome.is_ok(), "fetch recorded");
            self.emit(CacheEvent::Updated(key.clone()));
        }
    }

    /// Read an entry without fetching.
    pub fn snapshot<T: Send + Sync + 'static>(&self, key: &QueryKey) -> CacheSnapshot<T> {
        let entries = self.entries();
        let Some(entry) = entries.get(key) else {
            return CacheSnapshot::default();
        };
        CacheSnapshot {
            data: entry
                .data
                .clone()
                .and_then(|value| value.downcast::<T>().ok()),
            error: entry.error.clone(),
            pending: entry.in_flight.is_some(),
            stale: entry.stale,
        }
    }

    /// Mark every entry under `endpoint` stale and detach in-flight fetches.
    ///
    /// Returns the number of entries affected.
    pub fn invalidate(&self, endpoint: Endpoint) -> usize {
        let affected = {
            let mut entries = self.entries();
            let mut affected = 0;
            for entry in entries
                .iter_mut()
                .filter(|(key, _)| key.matches(endpoint))
                .map(|(_, entry)| entry)
            {
                entry.stale = true;
                entry.in_flight = None;
                entry.generation = entry.generation.wrapping_add(1);
                affected += 1;
            }
            affected
        };
        debug!(%endpoint, affected, "invalidated");
        self.emit(CacheEvent::Invalidated(endpoint));
        affected
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries().clear();
        debug!("cache cleared");
        self.emit(CacheEvent::Cleared);
    }

    /// Subscribe to cache events.
    pub fn subscribe(&self) -> broadcast::Receiver<CacheEvent> {
        self.inner.events.subscribe()
    }
}
