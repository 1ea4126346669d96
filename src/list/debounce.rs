//! Cancel-and-reschedule debounce timer.
//!
//! At most one commit is pending at a time. Scheduling a new commit stops
//! the previous timer, and a generation counter guards the window where an
//! old timer has already woken up but not yet committed.

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::trace;

/// Default quiet period for search input.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// A running quiet-period timer.
enum Timer {
    Task(JoinHandle<()>),
    /// Used when no tokio runtime is available. A thread cannot be aborted,
    /// so a stopped one wakes up, sees a newer generation and exits.
    Thread(thread::JoinHandle<()>),
}

impl Timer {
    fn stop(self) {
        if let Timer::Task(handle) = self {
            handle.abort();
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            Timer::Task(handle) => handle.is_finished(),
            Timer::Thread(handle) => handle.is_finished(),
        }
    }
}

#[derive(Default)]
struct Slot {
    generation: u64,
    timer: Option<Timer>,
}

impl Slot {
    /// Commit if no newer schedule or cancel happened since `generation`.
    fn fire<F: FnOnce()>(slot: &Mutex<Slot>, generation: u64, commit: F) {
        let mut guard = slot.lock();
        if guard.generation == generation {
            guard.timer = None;
            commit();
        }
        drop(guard);
    }
}

pub struct Debouncer {
    delay: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Run `commit` once `delay` has passed with no further calls.
    ///
    /// Inside a tokio runtime the timer is a task. Outside one it is a
    /// sleeping thread.
    pub fn schedule<F>(&self, commit: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let mut slot = self.slot.lock();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(previous) = slot.timer.take() {
            previous.stop();
        }

        let generation = slot.generation;
        let delay = self.delay;
        let shared = Arc::clone(&self.slot);
        let timer = match Handle::try_current() {
            Ok(runtime) => Timer::Task(runtime.spawn(async move {
                sleep(delay).await;
                Slot::fire(&shared, generation, commit);
            })),
            Err(_) => {
                trace!("no runtime, debouncing on a timer thread");
                Timer::Thread(thread::spawn(move || {
                    thread::sleep(delay);
                    Slot::fire(&shared, generation, commit);
                }))
            }
        };
        slot.timer = Some(timer);
    }

    /// Drop the pending commit, if any.
    pub fn cancel(&self) {
        let mut slot = self.slot.lock();
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(timer) = slot.timer.take() {
            timer.stop();
        }
    }

    /// Whether a commit is still waiting for its quiet period.
    pub fn is_pending(&self) -> bool {
        self.slot
            .lock()
            .timer
            .as_ref()
            .map(|timer| !timer.is_finished())
            .unwrap_or(false)
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        // Held only by a timer that is committing right now, which may be
        // what released the last owner of this debouncer.
        let Some(mut slot) = self.slot.try_lock() else {
            return;
        };
        slot.generation = slot.generation.wrapping_add(1);
        if let Some(timer) = slot.timer.take() {
            timer.stop();
        }
    }
}
