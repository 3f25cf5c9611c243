//! Query options, cache keys, and read outcomes.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{Endpoint, Error, RecordId};

/// Sort direction understood by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire value of the direction.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Options of a list read.
///
/// Options are forwarded as query parameters verbatim; only fields that are
/// set are sent. Two option sets compare equal when every field matches, so
/// they address the same cache entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryOptions {
    /// Page size.
    pub limit: Option<u64>,
    /// 1-based page number.
    pub page: Option<u64>,
    /// Column to order by.
    pub order_by: Option<String>,
    /// Direction of `order_by`.
    pub sorted_by: Option<SortOrder>,
    /// Name filter.
    pub name: Option<String>,
    /// How multiple search filters combine (`and`/`or`).
    pub search_join: Option<String>,
    /// Additional parameters forwarded untouched.
    pub extra: BTreeMap<String, String>,
}

impl QueryOptions {
    /// Options for one page at the given size.
    pub fn page(page: u64, limit: u64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Attach a name filter.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach an ordering.
    #[must_use]
    pub fn ordered_by(mut self, column: impl Into<String>, order: SortOrder) -> Self {
        self.order_by = Some(column.into());
        self.sorted_by = Some(order);
        self
    }

    /// Attach an arbitrary parameter.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Fill `search_join` when the caller did not choose one.
    #[must_use]
    pub fn with_default_search_join(mut self, join: &str) -> Self {
        if self.search_join.is_none() {
            self.search_join = Some(join.to_owned());
        }
        self
    }

    /// Query string pairs in a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value {
                params.push((key.to_owned(), value));
            }
        };
        push("limit", self.limit.map(|v| v.to_string()));
        push("page", self.page.map(|v| v.to_string()));
        push("orderBy", self.order_by.clone());
        push("sortedBy", self.sorted_by.map(|v| v.as_str().to_owned()));
        push("name", self.name.clone());
        push("searchJoin", self.search_join.clone());
        params.extend(
            self.extra
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        params
    }
}

/// What a cache entry under an endpoint holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryScope {
    /// A plain list read.
    List(QueryOptions),
    /// A paginated list read.
    Page(QueryOptions),
    /// A single record.
    Detail(RecordId),
    /// The endpoint's only resource (`me`, `profile`, `health`).
    Current,
}

/// Address of one cached read: `[endpoint, scope]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    endpoint: Endpoint,
    scope: QueryScope,
}

impl QueryKey {
    /// Key of a plain list read.
    pub fn list(endpoint: Endpoint, options: QueryOptions) -> Self {
        Self {
            endpoint,
            scope: QueryScope::List(options),
        }
    }

    /// Key of a paginated list read.
    pub fn page(endpoint: Endpoint, options: QueryOptions) -> Self {
        Self {
            endpoint,
            scope: QueryScope::Page(options),
        }
    }

    /// Key of a single-record read.
    pub fn detail(endpoint: Endpoint, id: RecordId) -> Self {
        Self {
            endpoint,
            scope: QueryScope::Detail(id),
        }
    }

    /// Key of a singleton read.
    pub fn current(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            scope: QueryScope::Current,
        }
    }

    /// Endpoint prefix of the key.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    /// Scope within the endpoint.
    pub fn scope(&self) -> &QueryScope {
        &self.scope
    }

    /// Whether the key falls under the invalidation prefix `endpoint`.
    pub fn matches(&self, endpoint: Endpoint) -> bool {
        self.endpoint == endpoint
    }
}

/// Outcome of a single-record read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    /// The server returned the record.
    Found(T),
    /// Nothing to show yet, or the server answered with an empty envelope.
    Empty,
    /// The read failed.
    Failed(Error),
}

impl<T> Fetched<T> {
    /// Convert a client result.
    pub fn from_result(result: Result<Option<T>, Error>) -> Self {
        match result {
            Ok(Some(record)) => Self::Found(record),
            Ok(None) => Self::Empty,
            Err(error) => Self::Failed(error),
        }
    }

    /// The record, if found.
    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(record) => Some(record),
            Self::Empty | Self::Failed(_) => None,
        }
    }

    /// The failure, if the read failed.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Self::Failed(error) => Some(error),
            Self::Found(_) | Self::Empty => None,
        }
    }
}

/// Partial update addressed to one record.
///
/// The id goes into the request path; only `fields` form the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordPatch<P> {
    /// Record to update.
    #[serde(skip)]
    pub id: RecordId,
    /// Fields to change.
    #[serde(flatten)]
    pub fields: P,
}

impl<P> RecordPatch<P> {
    /// Address `fields` to record `id`.
    pub fn new(id: impl Into<RecordId>, fields: P) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}
