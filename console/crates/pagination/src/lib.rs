//! Page envelope primitives shared by the asset console's paginated reads.
//!
//! The API server answers paginated list requests with a flat envelope
//! (`limit`, `page`, `sort`, `total_rows`, `total_pages`, `rows`). This crate
//! owns that wire shape, the arithmetic that keeps it consistent, and the
//! flattened [`PaginatorInfo`] view the console shows next to a table.
//!
//! ```
//! use pagination::{PageRequest, Paginator, PaginatorInfo};
//!
//! let request = PageRequest::new(Some(2), Some(2));
//! let page = Paginator::from_rows(vec!["c", "d"], request, 5).expect("consistent page");
//! assert_eq!(page.total_pages, 3);
//!
//! let info = PaginatorInfo::from(&page);
//! assert_eq!((info.from, info.to), (3, 4));
//! assert!(info.has_more_pages);
//! ```

mod envelope;
mod info;
mod request;

pub use envelope::{Paginator, PaginatorError, expected_total_pages};
pub use info::PaginatorInfo;
pub use request::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, PageRequest};
