//! Screen lifecycle shared by the list and dashboard controllers.
//!
//! A screen moves `Idle → Loading → {Loaded, Failed}` exactly once. The fetch runs as a Tokio
//! task tied to the screen: tearing the screen down aborts the task, and a result that still
//! arrives afterwards is dropped instead of being written into state nobody displays.
//!
//! All screen state sits behind one `std::sync::Mutex` that is only ever held for short,
//! synchronous sections and never across an `.await`.

use crate::FetchErrorKind;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;

/// Why a screen is showing fallback data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl FetchFailure {
    pub(crate) fn from_error(err: &crate::AdminError) -> Self {
        Self {
            // Fetches only produce fetch errors; anything else is treated as unreachable.
            kind: err
                .fetch_kind()
                .unwrap_or(FetchErrorKind::NetworkUnavailable),
            message: err.to_string(),
        }
    }
}

/// Load state of a screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// The fetch failed and the screen holds fallback data.
    Failed(FetchFailure),
}

impl Phase {
    pub fn is_settled(&self) -> bool {
        matches!(self, Phase::Loaded | Phase::Failed(_))
    }
}

pub(crate) struct Slot<S> {
    pub(crate) live: bool,
    pub(crate) phase: Phase,
    pub(crate) banner: Option<String>,
    pub(crate) state: S,
}

pub(crate) struct Lifecycle<S> {
    shared: Arc<Mutex<Slot<S>>>,
    task: Option<JoinHandle<()>>,
}

fn lock<S>(shared: &Mutex<Slot<S>>) -> MutexGuard<'_, Slot<S>> {
    // A panic while holding the lock cannot leave the slot half-written in a way that matters
    // for rendering, so keep going with whatever is there.
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: Send + 'static> Lifecycle<S> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Slot {
                live: true,
                phase: Phase::Idle,
                banner: None,
                state,
            })),
            task: None,
        }
    }

    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut Slot<S>) -> R) -> R {
        f(&mut lock(&self.shared))
    }

    /// Move to `Loading` and spawn `fetch`; its output is handed to `apply` while the screen
    /// is still live.
    ///
    /// Returns `false` without doing anything if the screen has already been mounted or torn
    /// down. Must be called from within a Tokio runtime.
    pub(crate) fn start<T, Fut, Apply>(&mut self, label: &'static str, fetch: Fut, apply: Apply) -> bool
    where
        T: Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
        Apply: FnOnce(&mut Slot<S>, T) + Send + 'static,
    {
        {
            let mut slot = lock(&self.shared);
            if !slot.live || slot.phase != Phase::Idle {
                tracing::debug!("{} screen already mounted; not fetching again", label);
                return false;
            }
            slot.phase = Phase::Loading;
        }
        tracing::debug!("{} screen loading", label);

        let shared = Arc::clone(&self.shared);
        self.task = Some(tokio::spawn(async move {
            let output = fetch.await;

            let mut slot = lock(&shared);
            if !slot.live {
                tracing::warn!("{} screen was torn down; discarding late response", label);
                return;
            }
            apply(&mut slot, output);
            tracing::debug!("{} screen settled: {:?}", label, slot.phase);
        }));

        true
    }

    /// Wait for the in-flight fetch, if any, to finish and be applied.
    pub(crate) async fn settled(&mut self) {
        if let Some(task) = self.task.take() {
            if let Err(err) = task.await {
                if err.is_panic() {
                    tracing::error!("screen fetch task panicked: {}", err);
                }
            }
        }
    }

    /// Mark the screen dead and abort any in-flight fetch.
    pub(crate) fn teardown(&mut self) {
        lock(&self.shared).live = false;
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        lock(&self.shared).live
    }
}

impl<S> Drop for Lifecycle<S> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Notify;

    fn fill(slot: &mut Slot<Vec<u32>>, items: Vec<u32>) {
        slot.state = items;
        slot.phase = Phase::Loaded;
    }

    /// Lifecycle whose fetch yields `[1, 2, 3]` once `release` is notified.
    fn gated(release: &Arc<Notify>) -> Lifecycle<Vec<u32>> {
        let mut lifecycle = Lifecycle::new(Vec::new());
        let gate = Arc::clone(release);
        assert!(lifecycle.start(
            "numbers",
            async move {
                gate.notified().await;
                vec![1, 2, 3]
            },
            fill,
        ));
        lifecycle
    }

    #[tokio::test]
    async fn live_result_is_applied() {
        let release = Arc::new(Notify::new());
        let mut lifecycle = gated(&release);

        release.notify_one();
        lifecycle.settled().await;

        lifecycle.with(|slot| {
            assert_eq!(slot.phase, Phase::Loaded);
            assert_eq!(slot.state, [1, 2, 3]);
        });
    }

    #[tokio::test]
    async fn result_completing_after_screen_died_is_dropped() {
        let release = Arc::new(Notify::new());
        let mut lifecycle = gated(&release);

        // The screen dies while the fetch is still running, but the task is left to finish.
        lifecycle.with(|slot| slot.live = false);
        release.notify_one();
        lifecycle.settled().await;

        lifecycle.with(|slot| {
            assert_eq!(slot.phase, Phase::Loading);
            assert!(slot.state.is_empty());
        });
    }

    #[tokio::test]
    async fn torn_down_screen_cannot_start_again() {
        let mut lifecycle: Lifecycle<Vec<u32>> = Lifecycle::new(Vec::new());
        lifecycle.teardown();

        assert!(!lifecycle.start("numbers", async { vec![1] }, fill));
        assert_eq!(lifecycle.with(|slot| slot.phase.clone()), Phase::Idle);
    }
}
