//! Incremental List Controller
//!
//! Owns the cursor chain for one list view together with its sort, order and
//! search state. Search input is debounced before it reaches the request key;
//! sort and order changes apply at once. Every key change empties the chain
//! and bumps a generation counter, and fetches tagged with an older
//! generation are dropped when they settle.

use crate::config::ListDefaults;
use crate::error::{FetchError, DEFAULT_LOAD_ERROR};
use crate::error_state::ErrorState;
use crate::list::debounce::{Debouncer, DEFAULT_DEBOUNCE};
use crate::list::fetch::PageFetcher;
use crate::list::page::{Page, RequestKey, SortOrder};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type IdOf<T> = dyn Fn(&T) -> String + Send + Sync;

/// Initial list parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListOptions {
    /// Items per page
    pub limit: u32,
    /// Initial sort field
    pub sort_by: String,
    /// Initial sort order
    pub order: SortOrder,
    /// Initial search text
    pub search: String,
    /// Quiet period before search input reaches the request key
    pub debounce: Duration,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: 20,
            sort_by: "name".to_string(),
            order: SortOrder::Asc,
            search: String::new(),
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

impl From<&ListDefaults> for ListOptions {
    fn from(defaults: &ListDefaults) -> Self {
        Self {
            limit: defaults.limit,
            sort_by: defaults.sort_by.clone(),
            order: defaults.order,
            search: String::new(),
            debounce: Duration::from_millis(defaults.debounce_ms),
        }
    }
}

/// What a load call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The page was stored; carries the number of items it held.
    Loaded(usize),
    /// Nothing was requested: no further page, or a request is already in flight.
    Skipped,
    /// The response arrived for a request key that is no longer current.
    Discarded,
}

/// Point-in-time view of everything a list UI renders.
#[derive(Debug, Clone)]
pub struct ListSnapshot<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub is_loading: bool,
    pub is_fetching_next_page: bool,
    pub search_query: String,
    pub debounced_search: String,
    pub sort_by: String,
    pub order: SortOrder,
    pub error: ErrorState,
}

struct ListState<T> {
    limit: u32,
    search_raw: String,
    key: RequestKey,
    generation: u64,
    pages: Vec<Page<T>>,
    loading_first: Option<u64>,
    in_flight_next: bool,
    error: ErrorState,
}

impl<T> ListState<T> {
    /// Swap in a new key. Returns false when the key did not change.
    fn apply_key(&mut self, key: RequestKey) -> bool {
        if self.key == key {
            return false;
        }
        self.key = key;
        self.invalidate_chain();
        self.error.clear();
        true
    }

    fn invalidate_chain(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pages.clear();
        self.loading_first = None;
        self.in_flight_next = false;
    }

    fn continuation(&self) -> Option<&str> {
        self.pages.last().and_then(Page::continuation)
    }
}

struct Shared<T> {
    fetcher: Arc<dyn PageFetcher<T>>,
    id_of: Arc<IdOf<T>>,
    state: Mutex<ListState<T>>,
    debouncer: Debouncer,
    keys: watch::Sender<RequestKey>,
}

impl<T> Shared<T> {
    fn update_key<F>(&self, change: F)
    where
        F: FnOnce(&RequestKey) -> RequestKey,
    {
        let changed = {
            let mut state = self.state.lock();
            let next = change(&state.key);
            state.apply_key(next.clone()).then_some(next)
        };
        if let Some(key) = changed {
            debug!(
                search = %key.search,
                sort_by = %key.sort_by,
                order = %key.order,
                "Request key changed, cursor chain reset"
            );
            self.keys.send_replace(key);
        }
    }
}

/// Cursor-paginated list with debounced search and server-side sorting.
///
/// Cloning yields another handle onto the same list.
pub struct IncrementalListController<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for IncrementalListController<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> IncrementalListController<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Build a controller. No request is issued here; call
    /// [`load_first_page`](Self::load_first_page) or
    /// [`spawn_auto_refresh`](Self::spawn_auto_refresh) to start fetching.
    pub fn configure<F, I>(fetcher: F, id_of: I, options: ListOptions) -> Self
    where
        F: PageFetcher<T> + 'static,
        I: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::with_fetcher(Arc::new(fetcher), Arc::new(id_of), options)
    }

    /// Build a controller around an already shared fetcher.
    pub fn with_fetcher(
        fetcher: Arc<dyn PageFetcher<T>>,
        id_of: Arc<IdOf<T>>,
        options: ListOptions,
    ) -> Self {
        let key = RequestKey {
            search: options.search.clone(),
            sort_by: options.sort_by,
            order: options.order,
        };
        let (keys, _) = watch::channel(key.clone());
        let state = ListState {
            limit: options.limit,
            search_raw: options.search,
            key,
            generation: 0,
            pages: Vec::new(),
            loading_first: None,
            in_flight_next: false,
            error: ErrorState::default(),
        };

        Self {
            shared: Arc::new(Shared {
                fetcher,
                id_of,
                state: Mutex::new(state),
                debouncer: Debouncer::new(options.debounce),
                keys,
            }),
        }
    }

    /// Search text as typed, before debounce.
    pub fn search_query(&self) -> String {
        self.shared.state.lock().search_raw.clone()
    }

    /// Search text that has settled into the request key.
    pub fn debounced_search(&self) -> String {
        self.shared.state.lock().key.search.clone()
    }

    pub fn sort_by(&self) -> String {
        self.shared.state.lock().key.sort_by.clone()
    }

    pub fn order(&self) -> SortOrder {
        self.shared.state.lock().key.order
    }

    pub fn limit(&self) -> u32 {
        self.shared.state.lock().limit
    }

    pub fn request_key(&self) -> RequestKey {
        self.shared.state.lock().key.clone()
    }

    /// Receiver that observes every request key change.
    pub fn subscribe(&self) -> watch::Receiver<RequestKey> {
        self.shared.keys.subscribe()
    }

    /// Record new search input. The request key follows once the debounce
    /// period passes without further input. `None` clears the search.
    pub fn set_search(&self, text: Option<&str>) {
        let text = text.unwrap_or_default().to_string();
        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        let committed = text.clone();
        // Schedule first so an older timer cannot commit after the raw value moves on.
        self.shared.debouncer.schedule(move || {
            if let Some(shared) = weak.upgrade() {
                shared.update_key(|key| RequestKey {
                    search: committed,
                    ..key.clone()
                });
            }
        });
        self.shared.state.lock().search_raw = text;
    }

    pub fn set_sort(&self, field: impl Into<String>) {
        let field = field.into();
        self.shared.update_key(|key| RequestKey {
            sort_by: field,
            ..key.clone()
        });
    }

    pub fn set_order(&self, order: SortOrder) {
        self.shared.update_key(|key| RequestKey {
            order,
            ..key.clone()
        });
    }

    /// Fetch the first page for the current key, replacing the chain.
    ///
    /// A second call while the first page is still loading is skipped.
    pub async fn load_first_page(&self) -> Result<LoadOutcome, FetchError> {
        let (generation, params) = {
            let mut state = self.shared.state.lock();
            if state.loading_first == Some(state.generation) {
                return Ok(LoadOutcome::Skipped);
            }
            state.loading_first = Some(state.generation);
            (state.generation, state.key.params(state.limit, None))
        };

        debug!(sort_by = %params.sort_by, order = %params.order, "Fetching first page");
        let result = self.shared.fetcher.fetch_page(params).await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            debug!(generation, "Dropping first page for a stale request key");
            return Ok(LoadOutcome::Discarded);
        }
        state.loading_first = None;
        match result {
            Ok(page) => {
                let count = page.items.len();
                // A fresh first page restarts the chain; pending next pages are now stale.
                state.invalidate_chain();
                state.pages.push(page);
                state.error.clear();
                Ok(LoadOutcome::Loaded(count))
            }
            Err(err) => {
                let err = err.or_fallback(DEFAULT_LOAD_ERROR);
                warn!(error = %err, "First page fetch failed");
                state.error.set(&err);
                Err(err)
            }
        }
    }

    /// Fetch the page after the last one in the chain.
    ///
    /// No request is issued when the last page reports no more items, when
    /// nothing has loaded yet, or while another next-page request is in flight.
    pub async fn load_more(&self) -> Result<LoadOutcome, FetchError> {
        let (generation, params) = {
            let mut state = self.shared.state.lock();
            if state.in_flight_next {
                return Ok(LoadOutcome::Skipped);
            }
            let Some(cursor) = state.continuation().map(str::to_owned) else {
                return Ok(LoadOutcome::Skipped);
            };
            state.in_flight_next = true;
            (state.generation, state.key.params(state.limit, Some(cursor)))
        };

        debug!(after_id = ?params.after_id, "Fetching next page");
        let result = self.shared.fetcher.fetch_page(params).await;

        let mut state = self.shared.state.lock();
        if state.generation != generation {
            debug!(generation, "Dropping next page for a stale request key");
            return Ok(LoadOutcome::Discarded);
        }
        state.in_flight_next = false;
        match result {
            Ok(page) => {
                let count = page.items.len();
                if let Some(last) = page.items.last() {
                    let last_id = (self.shared.id_of)(last);
                    debug!(%last_id, count, "Appended page");
                }
                state.pages.push(page);
                state.error.clear();
                Ok(LoadOutcome::Loaded(count))
            }
            Err(err) => {
                let err = err.or_fallback(DEFAULT_LOAD_ERROR);
                warn!(error = %err, "Next page fetch failed");
                state.error.set(&err);
                Err(err)
            }
        }
    }

    /// All loaded items, page by page in arrival order.
    pub fn items(&self) -> Vec<T> {
        let state = self.shared.state.lock();
        state
            .pages
            .iter()
            .flat_map(|page| page.items.iter().cloned())
            .collect()
    }

    /// Ids of all loaded items, in the same order as [`items`](Self::items).
    pub fn item_ids(&self) -> Vec<String> {
        let state = self.shared.state.lock();
        state
            .pages
            .iter()
            .flat_map(|page| page.items.iter())
            .map(|item| (self.shared.id_of)(item))
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.shared.state.lock().pages.len()
    }

    /// Whether the last loaded page points at a further one.
    pub fn has_more(&self) -> bool {
        self.shared.state.lock().continuation().is_some()
    }

    /// True while the first page for the current key is loading.
    pub fn is_loading(&self) -> bool {
        let state = self.shared.state.lock();
        state.loading_first == Some(state.generation)
    }

    pub fn is_fetching_next_page(&self) -> bool {
        self.shared.state.lock().in_flight_next
    }

    pub fn error_state(&self) -> ErrorState {
        self.shared.state.lock().error.clone()
    }

    pub fn clear_error(&self) {
        self.shared.state.lock().error.clear();
    }

    /// Whether search input is still waiting out its debounce period.
    pub fn search_pending(&self) -> bool {
        self.shared.debouncer.is_pending()
    }

    pub fn snapshot(&self) -> ListSnapshot<T> {
        let state = self.shared.state.lock();
        ListSnapshot {
            items: state
                .pages
                .iter()
                .flat_map(|page| page.items.iter().cloned())
                .collect(),
            has_more: state.continuation().is_some(),
            is_loading: state.loading_first == Some(state.generation),
            is_fetching_next_page: state.in_flight_next,
            search_query: state.search_raw.clone(),
            debounced_search: state.key.search.clone(),
            sort_by: state.key.sort_by.clone(),
            order: state.key.order,
            error: state.error.clone(),
        }
    }

    /// Fetch the first page now and again after every request key change.
    ///
    /// The task ends once every controller handle is dropped, or when the
    /// returned handle is aborted.
    pub fn spawn_auto_refresh(&self) -> JoinHandle<()> {
        let weak = Arc::downgrade(&self.shared);
        let mut keys = self.subscribe();
        tokio::spawn(async move {
            loop {
                let _ = keys.borrow_and_update();
                let Some(shared) = weak.upgrade() else {
                    break;
                };
                let controller = IncrementalListController { shared };
                if let Err(err) = controller.load_first_page().await {
                    debug!(error = %err, "Auto refresh fetch failed");
                }
                drop(controller);
                if keys.changed().await.is_err() {
                    break;
                }
            }
        })
    }
}
