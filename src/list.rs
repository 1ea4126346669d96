//! Incremental list fetching
//!
//! Cursor pagination with debounced search and sort-state management. The
//! transport stays outside: callers plug in a [`PageFetcher`].

pub mod controller;
pub mod debounce;
pub mod fetch;
pub mod page;
pub mod resource;

pub use controller::{IncrementalListController, ListOptions, ListSnapshot, LoadOutcome};
pub use debounce::{Debouncer, DEFAULT_DEBOUNCE};
pub use fetch::{fetch_fn, FnFetcher, PageFetcher, PageFuture};
pub use page::{Page, PageParams, RequestKey, SortOrder};
pub use resource::{ResourceList, ResourceListOptions, ResourceSource};
