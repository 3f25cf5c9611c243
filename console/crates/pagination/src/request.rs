//! Page number and page size normalisation.

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller does not ask for one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size the server honours.
pub const MAX_LIMIT: u64 = 100;

/// Normalised page position.
///
/// Mirrors the server's parsing rules: missing or non-positive values fall
/// back to the defaults and the page size is clamped to [`MAX_LIMIT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from raw, possibly absent, inputs.
    #[must_use]
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        let page = positive(page).unwrap_or(DEFAULT_PAGE);
        let limit = positive(limit).unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        Self { page, limit }
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Rows per page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

fn positive(value: Option<i64>) -> Option<u64> {
    value
        .filter(|raw| *raw > 0)
        .and_then(|raw| u64::try_from(raw).ok())
}
