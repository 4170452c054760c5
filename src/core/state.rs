use std::sync::Arc;

use chrono::{
    DateTime,
    Local,
};
use tokio::sync::watch;

use super::{
    models::DisplayRecord,
    ZukanError,
};

/// Snapshot of one catalog view. Never mutated in place: every transition
/// publishes a fresh value.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub record: Option<Arc<DisplayRecord>>,
    pub busy: bool,
    /// Token of the most recently started cycle.
    pub generation: u64,
    /// Token of the cycle that produced `record`.
    pub record_generation: u64,
    pub updated_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    Failed,
    /// A newer cycle started after this one; the result was dropped.
    Stale,
}

/// Holds the current [`ViewState`] and notifies subscribers on every change.
pub struct ViewStore {
    sender: watch::Sender<Arc<ViewState>>,
}

impl ViewStore {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Arc::new(ViewState::default()));
        Self { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<ViewState>> {
        self.sender.subscribe()
    }

    pub fn snapshot(&self) -> Arc<ViewState> {
        self.sender.borrow().clone()
    }

    /// Marks a new cycle as started and returns its generation token.
    pub fn begin(&self) -> u64 {
        let current = self.snapshot();
        let generation = current.generation + 1;

        self.publish(ViewState { busy: true, generation, ..(*current).clone() });
        generation
    }

    /// Applies the outcome of cycle `generation`. Results from superseded
    /// cycles are ignored so a slow response can never replace a newer one.
    /// On failure the previous record stays in place.
    pub fn settle(
        &self,
        generation: u64,
        result: Result<DisplayRecord, ZukanError>,
    ) -> Settlement {
        let current = self.snapshot();

        if generation != current.generation {
            tracing::debug!(generation, current = current.generation, "dropping stale result");
            return Settlement::Stale;
        }

        match result {
            Ok(record) => {
                self.publish(ViewState {
                    record: Some(Arc::new(record)),
                    busy: false,
                    generation,
                    record_generation: generation,
                    updated_at: Some(Local::now()),
                });
                Settlement::Applied
            }
            Err(e) => {
                tracing::warn!(
                    generation,
                    error = %e,
                    "fetch cycle failed, keeping previous record"
                );
                self.publish(ViewState { busy: false, ..(*current).clone() });
                Settlement::Failed
            }
        }
    }

    fn publish(&self, state: ViewState) {
        self.sender.send_replace(Arc::new(state));
    }
}

impl Default for ViewStore {
    fn default() -> Self {
        Self::new()
    }
}
