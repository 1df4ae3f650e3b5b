//! Cancellable holder for one in-flight query.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use super::LoadState;
use crate::api::ApiError;

/// Runs at most one query at a time and publishes its state.
///
/// Issuing a new query aborts the previous task. Each issue bumps a
/// generation counter, and a completion is only published if its generation
/// is still current, so a late response can never overwrite newer state.
/// Dropping the slot aborts whatever is still in flight.
pub struct QuerySlot<T> {
    state: Arc<watch::Sender<LoadState<T>>>,
    /// Last loaded or failed state seen before the current issue.
    last_settled: Option<LoadState<T>>,
    generation: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
    name: &'static str,
}

impl<T> QuerySlot<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Create an idle slot. Its state is `Loading` until the first query
    /// settles.
    pub fn new(name: &'static str) -> Self {
        let (state, _) = watch::channel(LoadState::Loading);
        Self {
            state: Arc::new(state),
            last_settled: None,
            generation: Arc::new(AtomicU64::new(0)),
            handle: None,
            name,
        }
    }

    /// Cancel whatever is running and start `query`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn issue<F>(&mut self, query: F)
    where
        F: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        if let Some(previous) = self.handle.take() {
            if !previous.is_finished() {
                debug!(slot = self.name, "cancelling superseded query");
            }
            previous.abort();
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let previous = self.state.send_replace(LoadState::Loading);
        if previous.is_settled() {
            self.last_settled = Some(previous);
        }

        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);
        let name = self.name;
        self.handle = Some(tokio::spawn(async move {
            let result = query.await;
            let published = state.send_if_modified(|slot| {
                // Checked under the channel lock, so a newer issue either
                // already bumped the generation or will overwrite us.
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *slot = LoadState::from_result(result);
                true
            });
            if !published {
                debug!(slot = name, generation, "discarded stale response");
            }
        }));
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> LoadState<T> {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Receiver that observes every published state.
    pub fn subscribe(&self) -> watch::Receiver<LoadState<T>> {
        self.state.subscribe()
    }

    /// Wait until the current query is loaded or failed.
    pub async fn settled(&self) -> LoadState<T> {
        let mut rx = self.subscribe();
        let settled = match rx.wait_for(LoadState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }

    /// Stop the running query.
    ///
    /// A query that already settled keeps its result. Otherwise the slot
    /// goes back to the last settled state, or to `Failed(Cancelled)` if
    /// nothing has settled yet, so [`QuerySlot::settled`] always returns.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation.fetch_add(1, Ordering::SeqCst);

        let restored = self
            .last_settled
            .clone()
            .unwrap_or_else(|| LoadState::Failed(Arc::new(ApiError::Cancelled)));
        let reverted = self.state.send_if_modified(|slot| {
            if !slot.is_loading() {
                return false;
            }
            *slot = restored;
            true
        });
        if reverted {
            debug!(slot = self.name, "cancelled query, restored previous state");
        }
    }
}

impl<T> Drop for QuerySlot<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
