//! Page-fetch capability.
//!
//! The host application owns transport. The controller only sees this trait.

use crate::error::FetchError;
use crate::list::page::{Page, PageParams};
use async_trait::async_trait;
use futures::future::BoxFuture;

/// Fetches one page for the given parameters.
#[async_trait]
pub trait PageFetcher<T>: Send + Sync {
    async fn fetch_page(&self, params: PageParams) -> Result<Page<T>, FetchError>;
}

/// Boxed future returned by closure-backed fetchers.
pub type PageFuture<T> = BoxFuture<'static, Result<Page<T>, FetchError>>;

/// Adapter turning a closure into a [`PageFetcher`].
pub struct FnFetcher<F> {
    f: F,
}

/// Wrap a closure returning a boxed future as a fetcher.
pub fn fetch_fn<T, F>(f: F) -> FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(PageParams) -> PageFuture<T> + Send + Sync,
{
    FnFetcher { f }
}

#[async_trait]
impl<T, F> PageFetcher<T> for FnFetcher<F>
where
    T: Send + 'static,
    F: Fn(PageParams) -> PageFuture<T> + Send + Sync,
{
    async fn fetch_page(&self, params: PageParams) -> Result<Page<T>, FetchError> {
        (self.f)(params).await
    }
}

#[cfg(test)]
pub use scripted::ScriptedFetcher;
