//! Flattened paginator summary shown next to paginated tables.

use serde::Serialize;

use crate::Paginator;

/// Summary of a page's position within the full record set.
///
/// `from` and `to` are 1-based row positions and both zero for an empty
/// page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatorInfo {
    /// Current 1-based page number.
    pub current_page: u64,
    /// Rows per page.
    pub per_page: u64,
    /// Rows across every page.
    pub total: u64,
    /// Last page number, zero when the record set is empty.
    pub last_page: u64,
    /// Position of the first row on this page.
    pub from: u64,
    /// Position of the last row on this page.
    pub to: u64,
    /// Whether a following page exists.
    pub has_more_pages: bool,
}

impl<T> From<&Paginator<T>> for PaginatorInfo {
    fn from(page: &Paginator<T>) -> Self {
        let rows = u64::try_from(page.rows.len()).unwrap_or(u64::MAX);
        let (from, to) = if rows == 0 {
            (0, 0)
        } else {
            let first = page
                .page
                .saturating_sub(1)
                .saturating_mul(page.limit)
                .saturating_add(1);
            (first, first.saturating_add(rows - 1))
        };
        Self {
            current_page: page.page,
            per_page: page.limit,
            total: page.total_rows,
            last_page: page.total_pages,
            from,
            to,
            has_more_pages: page.page < page.total_pages,
        }
    }
}
