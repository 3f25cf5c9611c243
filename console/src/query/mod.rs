//! Cached reads and side-effecting writes over the resource clients.

pub mod cache;
pub mod mutation;
pub mod read;

pub use cache::{CacheEvent, CacheSnapshot, QueryCache};
pub use mutation::{Mutation, MutationAction, MutationEffects, SuccessHook};
pub use read::{
    DetailQuery, DetailState, Fetcher, ListQuery, ListState, PagedQuery, PagedState,
};
