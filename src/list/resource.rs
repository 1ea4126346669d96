//! Non-paginated resource list with optional debounced search.

use crate::error::{FetchError, DEFAULT_LOAD_ERROR};
use crate::error_state::ErrorState;
use crate::list::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Backend for a whole-collection list.
#[async_trait]
pub trait ResourceSource<T: Send + 'static>: Send + Sync {
    /// Fetch the full collection.
    async fn list(&self) -> Result<Vec<T>, FetchError>;

    /// Server-side search. `None` means the source has no search endpoint
    /// and the plain list is used instead.
    async fn search(&self, _query: &str) -> Option<Result<Vec<T>, FetchError>> {
        None
    }
}

#[derive(Debug, Clone)]
pub struct ResourceListOptions {
    /// Base query key, e.g. `["controls"]`
    pub query_key: Vec<String>,
    /// Route prefix for item detail pages
    pub navigate_path: String,
    pub searchable: bool,
    pub debounce: Duration,
}

impl Default for ResourceListOptions {
    fn default() -> Self {
        Self {
            query_key: Vec::new(),
            navigate_path: String::new(),
            searchable: false,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

struct ResourceState<T> {
    search_raw: String,
    search_debounced: String,
    generation: u64,
    items: Option<Vec<T>>,
    loading: Option<u64>,
    error: ErrorState,
}

struct Shared<T: Send + 'static> {
    source: Arc<dyn ResourceSource<T>>,
    id_of: Arc<dyn Fn(&T) -> String + Send + Sync>,
    options: ResourceListOptions,
    state: Mutex<ResourceState<T>>,
    debouncer: Debouncer,
    keys: watch::Sender<Vec<String>>,
}

impl<T: Send + 'static> Shared<T> {
    fn query_key(&self, debounced: &str) -> Vec<String> {
        let mut key = self.options.query_key.clone();
        if self.options.searchable && !debounced.is_empty() {
            key.push(debounced.to_string());
        }
        key
    }

    fn commit_search(&self, query: String) {
        let key = {
            let mut state = self.state.lock();
            if state.search_debounced == query {
                return;
            }
            state.search_debounced = query;
            state.generation = state.generation.wrapping_add(1);
            state.loading = None;
            self.query_key(&state.search_debounced)
        };
        debug!(key = ?key, "Resource query key changed");
        self.keys.send_replace(key);
    }
}

/// Whole-collection list view: search box, loading flag, error state and
/// item navigation paths.
pub struct ResourceList<T: Send + 'static> {
    shared: Arc<Shared<T>>,
}

impl<T: Send + 'static> Clone for ResourceList<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> ResourceList<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new<S, I>(source: S, id_of: I, options: ResourceListOptions) -> Self
    where
        S: ResourceSource<T> + 'static,
        I: Fn(&T) -> String + Send + Sync + 'static,
    {
        let (keys, _) = watch::channel(options.query_key.clone());
        Self {
            shared: Arc::new(Shared {
                source: Arc::new(source),
                id_of: Arc::new(id_of),
                debouncer: Debouncer::new(options.debounce),
                options,
                state: Mutex::new(ResourceState {
                    search_raw: String::new(),
                    search_debounced: String::new(),
                    generation: 0,
                    items: None,
                    loading: None,
                    error: ErrorState::default(),
                }),
                keys,
            }),
        }
    }

    pub fn search_query(&self) -> String {
        self.shared.state.lock().search_raw.clone()
    }

    pub fn debounced_query(&self) -> String {
        self.shared.state.lock().search_debounced.clone()
    }

    /// Update the search box. Ignored when the list is not searchable.
    pub fn set_search(&self, text: Option<&str>) {
        if !self.shared.options.searchable {
            return;
        }
        let text = text.unwrap_or_default().to_string();
        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        let committed = text.clone();
        self.shared.debouncer.schedule(move || {
            if let Some(shared) = weak.upgrade() {
                shared.commit_search(committed);
            }
        });
        self.shared.state.lock().search_raw = text;
    }

    /// Current query key: the base key, plus the debounced search when set.
    pub fn query_key(&self) -> Vec<String> {
        let state = self.shared.state.lock();
        self.shared.query_key(&state.search_debounced)
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.shared.keys.subscribe()
    }

    /// Load the collection for the current query key.
    ///
    /// Returns `Ok(false)` when the response was for a key that has since
    /// changed and was dropped.
    pub async fn refresh(&self) -> Result<bool, FetchError> {
        let (generation, query) = {
            let mut state = self.shared.state.lock();
            state.loading = Some(state.generation);
            (state.generation, state.search_debounced.clone())
        };

        let result = if self.shared.options.searchable && !query.is_empty() {
            match self.shared.source.search(&query).await {
                Some(result) => result,
                None => self.shared.source.list().await,
            }
        } else {
            self.shared.source.list().await
        };

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            debug!(generation, "Dropping resource list for a stale query");
            return Ok(false);
        }
        state.loading = None;
        match result {
            Ok(items) => {
                state.items = Some(items);
                state.error.clear();
                Ok(true)
            }
            Err(err) => {
                let err = err.or_fallback(DEFAULT_LOAD_ERROR);
                warn!(error = %err, "Resource list fetch failed");
                state.error.set(&err);
                Err(err)
            }
        }
    }

    /// Loaded items; `None` until the first successful load.
    pub fn items(&self) -> Option<Vec<T>> {
        self.shared.state.lock().items.clone()
    }

    pub fn is_loading(&self) -> bool {
        let state = self.shared.state.lock();
        state.loading == Some(state.generation)
    }

    pub fn error_state(&self) -> ErrorState {
        self.shared.state.lock().error.clone()
    }

    /// Detail route for an item: `<navigate_path>/<id>`.
    pub fn item_path(&self, item: &T) -> String {
        format!(
            "{}/{}",
            self.shared.options.navigate_path.trim_end_matches('/'),
            (self.shared.id_of)(item)
        )
    }
}
