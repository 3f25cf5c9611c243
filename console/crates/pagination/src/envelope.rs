//! Server page envelope and its consistency checks.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::PageRequest;

/// Violations of the page envelope invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginatorError {
    /// The page carries more rows than its limit allows.
    #[error("page holds {rows} rows but its limit is {limit}")]
    RowsExceedLimit {
        /// Number of rows on the page.
        rows: u64,
        /// Declared page size.
        limit: u64,
    },
    /// `total_pages` disagrees with `ceil(total_rows / limit)`.
    #[error("page declares {actual} total pages but {expected} were expected")]
    TotalPagesMismatch {
        /// Page count derived from `total_rows` and `limit`.
        expected: u64,
        /// Page count declared by the envelope.
        actual: u64,
    },
    /// A zero page size cannot describe a non-empty record set.
    #[error("page limit is zero but {total_rows} rows exist")]
    ZeroLimit {
        /// Total rows declared by the envelope.
        total_rows: u64,
    },
}

/// One page of a larger record set, as emitted by the API server.
///
/// ## Invariants
/// - `rows.len() <= limit`.
/// - `total_pages == ceil(total_rows / limit)`.
///
/// Decoding does not enforce the invariants; call [`Paginator::validate`]
/// once the envelope has been read off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de>"
))]
pub struct Paginator<T> {
    /// Page size requested from the server.
    pub limit: u64,
    /// 1-based page number.
    pub page: u64,
    /// Sort expression echoed by the server, empty when unsorted.
    #[serde(default)]
    pub sort: String,
    /// Number of rows across every page.
    pub total_rows: u64,
    /// Number of pages at the current `limit`.
    pub total_pages: u64,
    /// Rows on this page. A `null` payload decodes as an empty page.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub rows: Vec<T>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Number of pages needed to hold `total_rows` at `limit` rows per page.
///
/// Returns zero when `limit` is zero.
#[must_use]
pub const fn expected_total_pages(total_rows: u64, limit: u64) -> u64 {
    if limit == 0 {
        0
    } else {
        total_rows.div_ceil(limit)
    }
}

fn row_count<T>(rows: &[T]) -> u64 {
    u64::try_from(rows.len()).unwrap_or(u64::MAX)
}

impl<T> Paginator<T> {
    /// Build a consistent envelope around one page of rows.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::RowsExceedLimit`] when `rows` is larger than
    /// the requested page size.
    pub fn from_rows(
        rows: Vec<T>,
        request: PageRequest,
        total_rows: u64,
    ) -> Result<Self, PaginatorError> {
        let page = Self {
            limit: request.limit(),
            page: request.page(),
            sort: String::new(),
            total_rows,
            total_pages: expected_total_pages(total_rows, request.limit()),
            rows,
        };
        page.validate()?;
        Ok(page)
    }

    /// Check the envelope invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), PaginatorError> {
        let rows = row_count(&self.rows);
        if self.limit == 0 && self.total_rows > 0 {
            return Err(PaginatorError::ZeroLimit {
                total_rows: self.total_rows,
            });
        }
        if rows > self.limit {
            return Err(PaginatorError::RowsExceedLimit {
                rows,
                limit: self.limit,
            });
        }
        let expected = expected_total_pages(self.total_rows, self.limit);
        if expected != self.total_pages {
            return Err(PaginatorError::TotalPagesMismatch {
                expected,
                actual: self.total_pages,
            });
        }
        Ok(())
    }

    /// Whether the page carries no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Map the rows while keeping the envelope fields.
    #[must_use]
    pub fn map_rows<U>(self, f: impl FnMut(T) -> U) -> Paginator<U> {
        Paginator {
            limit: self.limit,
            page: self.page,
            sort: self.sort,
            total_rows: self.total_rows,
            total_pages: self.total_pages,
            rows: self.rows.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Envelope decoding and invariant coverage.

    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(0, 10, 0)]
    #[case(1, 10, 1)]
    #[case(10, 10, 1)]
    #[case(11, 10, 2)]
    #[case(7, 0, 0)]
    fn total_pages_round_up(#[case] total_rows: u64, #[case] limit: u64, #[case] expected: u64) {
        assert_eq!(expected_total_pages(total_rows, limit), expected);
    }

    #[rstest]
    fn decodes_server_envelope() {
        let payload = json!({
            "limit": 2,
            "page": 1,
            "sort": "",
            "total_rows": 3,
            "total_pages": 2,
            "rows": [{"id": 1}, {"id": 2}]
        });

        let page: Paginator<serde_json::Value> =
            serde_json::from_value(payload).expect("envelope decodes");

        assert_eq!(page.rows.len(), 2);
        assert!(page.validate().is_ok());
    }

    #[rstest]
    fn null_rows_decode_as_empty_page() {
        let payload = json!({
            "limit": 10,
            "page": 1,
            "total_rows": 0,
            "total_pages": 0,
            "rows": null
        });

        let page: Paginator<u32> = serde_json::from_value(payload).expect("envelope decodes");

        assert!(page.is_empty());
        assert_eq!(page.sort, "");
    }

    #[rstest]
    fn rejects_pages_larger_than_limit() {
        let page = Paginator {
            limit: 1,
            page: 1,
            sort: String::new(),
            total_rows: 2,
            total_pages: 2,
            rows: vec![1, 2],
        };

        assert_eq!(
            page.validate(),
            Err(PaginatorError::RowsExceedLimit { rows: 2, limit: 1 })
        );
    }

    #[rstest]
    fn rejects_inconsistent_page_counts() {
        let page = Paginator {
            limit: 10,
            page: 1,
            sort: String::new(),
            total_rows: 25,
            total_pages: 2,
            rows: vec![0_u8; 10],
        };

        assert_eq!(
            page.validate(),
            Err(PaginatorError::TotalPagesMismatch {
                expected: 3,
                actual: 2
            })
        );
    }

    #[rstest]
    fn rejects_zero_limit_with_rows_on_server() {
        let page: Paginator<u8> = Paginator {
            limit: 0,
            page: 1,
            sort: String::new(),
            total_rows: 4,
            total_pages: 0,
            rows: Vec::new(),
        };

        assert_eq!(
            page.validate(),
            Err(PaginatorError::ZeroLimit { total_rows: 4 })
        );
    }

    #[rstest]
    fn from_rows_refuses_oversized_pages() {
        let request = PageRequest::new(Some(1), Some(2));
        let result = Paginator::from_rows(vec![1, 2, 3], request, 3);
        assert!(matches!(
            result,
            Err(PaginatorError::RowsExceedLimit { rows: 3, limit: 2 })
        ));
    }

    #[rstest]
    fn map_rows_keeps_envelope() {
        let request = PageRequest::new(Some(1), Some(5));
        let page = Paginator::from_rows(vec![1, 2], request, 2).expect("consistent page");

        let mapped = page.map_rows(|value| value * 10);

        assert_eq!(mapped.rows, vec![10, 20]);
        assert_eq!(mapped.total_pages, 1);
        assert_eq!(mapped.limit, 5);
    }
}
