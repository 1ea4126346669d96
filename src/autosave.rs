//! Auto-save form field
//!
//! A field that persists its value when focus leaves it, if the value changed.
//! Shows a saving flag during the call, a transient "saved" flag afterwards,
//! and the failure message when the save is rejected.

use crate::error::{FetchError, DEFAULT_SAVE_ERROR};
use crate::list::Debouncer;
use async_trait::async_trait;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// How long the "saved" indicator stays up.
pub const SAVED_INDICATOR: Duration = Duration::from_secs(2);

/// Persists one field value.
#[async_trait]
pub trait Saver<V>: Send + Sync {
    async fn save(&self, value: V) -> Result<(), FetchError>;
}

pub struct FnSaver<F> {
    f: F,
}

/// Wrap a closure returning a boxed future as a saver.
pub fn save_fn<V, F>(f: F) -> FnSaver<F>
where
    V: Send + 'static,
    F: Fn(V) -> BoxFuture<'static, Result<(), FetchError>> + Send + Sync,
{
    FnSaver { f }
}

#[async_trait]
impl<V, F> Saver<V> for FnSaver<F>
where
    V: Send + 'static,
    F: Fn(V) -> BoxFuture<'static, Result<(), FetchError>> + Send + Sync,
{
    async fn save(&self, value: V) -> Result<(), FetchError> {
        (self.f)(value).await
    }
}

#[derive(Debug, Clone)]
struct FieldState<V> {
    current: V,
    model: V,
    saving: bool,
    saved: bool,
    error: Option<String>,
}

pub struct AutoSaveField<V> {
    label: String,
    state: Arc<Mutex<FieldState<V>>>,
    saver: Arc<dyn Saver<V>>,
    saved_timer: Debouncer,
}

impl<V> AutoSaveField<V>
where
    V: Clone + PartialEq + Send + 'static,
{
    pub fn new<S>(label: impl Into<String>, model_value: V, saver: S) -> Self
    where
        S: Saver<V> + 'static,
    {
        Self {
            label: label.into(),
            state: Arc::new(Mutex::new(FieldState {
                current: model_value.clone(),
                model: model_value,
                saving: false,
                saved: false,
                error: None,
            })),
            saver: Arc::new(saver),
            saved_timer: Debouncer::new(SAVED_INDICATOR),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current_value(&self) -> V {
        self.state.lock().current.clone()
    }

    pub fn model_value(&self) -> V {
        self.state.lock().model.clone()
    }

    pub fn is_saving(&self) -> bool {
        self.state.lock().saving
    }

    pub fn is_saved(&self) -> bool {
        self.state.lock().saved
    }

    pub fn error(&self) -> Option<String> {
        self.state.lock().error.clone()
    }

    /// The bound value changed from outside; resync the input.
    pub fn set_model_value(&self, value: V) {
        let mut state = self.state.lock();
        state.current = value.clone();
        state.model = value;
    }

    /// User typed or picked a value. Clears any error and the saved flag.
    pub fn handle_input(&self, value: V) {
        self.saved_timer.cancel();
        let mut state = self.state.lock();
        state.current = value;
        state.error = None;
        state.saved = false;
    }

    /// Focus left the field. Saves when the value differs from the model.
    ///
    /// Returns `Ok(true)` when a save happened and `Ok(false)` when there
    /// was nothing to save. The error is also kept for display.
    pub async fn handle_blur(&self) -> Result<bool, FetchError> {
        let value = {
            let mut state = self.state.lock();
            if state.current == state.model || state.saving {
                return Ok(false);
            }
            state.saving = true;
            state.error = None;
            state.current.clone()
        };

        debug!(field = %self.label, "Saving field");
        let result = self.saver.save(value.clone()).await;

        let mut state = self.state.lock();
        state.saving = false;
        match result {
            Ok(()) => {
                state.model = value;
                state.saved = true;
                drop(state);
                let shared = Arc::clone(&self.state);
                self.saved_timer.schedule(move || shared.lock().saved = false);
                Ok(true)
            }
            Err(err) => {
                let err = err.or_fallback(DEFAULT_SAVE_ERROR);
                warn!(field = %self.label, error = %err, "Field save failed");
                state.error = Some(err.message.clone());
                Err(err)
            }
        }
    }
}
