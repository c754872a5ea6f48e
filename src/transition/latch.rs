use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::fold::direction::Phase;

/// Where the show/hide cycle currently stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionState {
    /// Nothing revealed; a show request may start.
    #[default]
    Idle,
    /// A run is animating; every request is refused.
    Updating,
    /// Revealed; a hide request may start.
    Shown,
}

impl TransitionState {
    /// State a run of `phase` must start from.
    pub fn required_for(phase: Phase) -> Self {
        match phase {
            Phase::Show => Self::Idle,
            Phase::Hide => Self::Shown,
        }
    }

    /// Entry transition for `phase`, or `None` when the request must be ignored.
    pub fn begin(self, phase: Phase) -> Option<Self> {
        (self == Self::required_for(phase)).then_some(Self::Updating)
    }

    /// Exit transition once a run of `phase` completes.
    pub fn settle(self, phase: Phase) -> Option<Self> {
        match (self, phase) {
            (Self::Updating, Phase::Show) => Some(Self::Shown),
            (Self::Updating, Phase::Hide) => Some(Self::Idle),
            _ => None,
        }
    }
}

/// Shared guard that keeps transitions from overlapping.
///
/// Controllers holding clones of one latch never run concurrently. [`TransitionLatch::global`]
/// is the process-wide instance; [`TransitionLatch::new`] makes an independent one.
#[derive(Clone, Debug, Default)]
pub struct TransitionLatch(Arc<Mutex<TransitionState>>);

impl TransitionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The single latch shared by every controller in the process that asks for it.
    pub fn global() -> Self {
        static GLOBAL: OnceLock<TransitionLatch> = OnceLock::new();
        GLOBAL.get_or_init(Self::new).clone()
    }

    pub fn state(&self) -> TransitionState {
        *self.0.lock()
    }

    pub fn is_shared_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Atomically moves into `Updating` if `phase` may start; returns whether it did.
    pub fn try_begin(&self, phase: Phase) -> bool {
        let mut state = self.0.lock();
        match state.begin(phase) {
            Some(next) => {
                tracing::debug!(from = ?*state, to = ?next, ?phase, "transition latch engaged");
                *state = next;
                true
            }
            None => false,
        }
    }

    pub(crate) fn settle(&self, phase: Phase) {
        let mut state = self.0.lock();
        match state.settle(phase) {
            Some(next) => {
                tracing::debug!(to = ?next, ?phase, "transition latch settled");
                *state = next;
            }
            None => tracing::warn!(state = ?*state, ?phase, "settle outside of a running transition"),
        }
    }

    /// Undoes a [`try_begin`](Self::try_begin) whose run failed to start.
    pub(crate) fn abort(&self, phase: Phase) {
        let mut state = self.0.lock();
        if *state == TransitionState::Updating {
            *state = TransitionState::required_for(phase);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/latch.rs"]
mod tests;
