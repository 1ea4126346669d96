//! Test doubles shared by the integration and property test binaries

#![allow(dead_code)]

use async_trait::async_trait;
use listkit::error::FetchError;
use listkit::list::{Page, PageFetcher, PageParams};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

/// Fetcher that replays a fixed script and records every request.
///
/// A scripted response may carry a delay, so a request can be held in flight
/// while the request key changes underneath it.
pub struct ScriptedFetcher<T> {
    script: Mutex<VecDeque<(Result<Page<T>, FetchError>, Duration)>>,
    calls: Mutex<Vec<PageParams>>,
}

impl<T> ScriptedFetcher<T> {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn push_page(&self, page: Page<T>) -> &Self {
        self.push(Ok(page), Duration::ZERO)
    }

    pub fn push_error(&self, error: FetchError) -> &Self {
        self.push(Err(error), Duration::ZERO)
    }

    pub fn push(&self, response: Result<Page<T>, FetchError>, delay: Duration) -> &Self {
        self.script.lock().unwrap().push_back((response, delay));
        self
    }

    pub fn calls(&self) -> Vec<PageParams> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl<T: Send + 'static> PageFetcher<T> for ScriptedFetcher<T> {
    async fn fetch_page(&self, params: PageParams) -> Result<Page<T>, FetchError> {
        self.calls.lock().unwrap().push(params);
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some((response, delay)) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                response
            }
            None => Err(FetchError::new("No scripted response")),
        }
    }
}
