//! listkit: list state and access helpers for application front-ends
//!
//! The core is [`list::IncrementalListController`], which accumulates cursor
//! pages behind a debounced search and a sort key and drops responses that
//! arrive for an outdated key, plus [`roles::RoleEvaluator`] for role checks.
//! Around them sit the pieces a front-end needs to use them: an HTTP page
//! fetcher, an auth session, a navigation guard, form validation, auto-saving
//! fields and display formatting.

pub mod admin;
pub mod auth;
pub mod autosave;
pub mod cli;
pub mod config;
pub mod error;
pub mod error_state;
pub mod format;
pub mod guard;
pub mod http;
pub mod list;
pub mod logging;
pub mod roles;
pub mod validation;

pub use error::{FetchError, ListkitError, ValidationError};
pub use list::{IncrementalListController, ListOptions, Page, PageFetcher, PageParams, SortOrder};
pub use roles::RoleEvaluator;
