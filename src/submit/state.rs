//! Single-flight request state.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use crate::config::SUBMIT_RUNNING_LABEL;
use crate::page::PageControls;

/// Lifecycle of the one analysis request a submitter may have outstanding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestState {
    /// No request outstanding
    #[default]
    Idle,
    /// Request sent, no response yet
    InFlight,
    /// Response received, outcome being dispatched
    Completing,
}

#[derive(Debug, Default)]
pub(super) struct Shared {
    pub(super) request: RequestState,
    pub(super) controls: PageControls,
}

/// Submitter state behind a mutex. Lock holders never await.
#[derive(Debug, Default)]
pub(super) struct SharedState(Mutex<Shared>);

impl SharedState {
    pub(super) fn lock(&self) -> MutexGuard<'_, Shared> {
        // A panic while holding the lock leaves plain data behind; keep using it
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves `Idle` to `InFlight` and puts the controls in their busy state.
    ///
    /// Returns `None` without touching anything when a request is already
    /// outstanding.
    pub(super) fn begin(&self) -> Option<InFlightGuard<'_>> {
        let mut shared = self.lock();
        if shared.request != RequestState::Idle {
            return None;
        }
        shared.request = RequestState::InFlight;
        let original_label = std::mem::replace(
            &mut shared.controls.submit.label,
            SUBMIT_RUNNING_LABEL.to_string(),
        );
        shared.controls.submit.disabled = true;
        shared.controls.loading = true;
        shared.controls.results_visible = false;
        Some(InFlightGuard {
            state: self,
            original_label,
        })
    }
}

/// Holds the in-flight slot; dropping it restores the controls and returns
/// the state to `Idle`, whatever the outcome and even on unwind or
/// cancellation of the submitting future.
pub(super) struct InFlightGuard<'a> {
    state: &'a SharedState,
    original_label: String,
}

impl InFlightGuard<'_> {
    pub(super) fn completing(&self) {
        self.state.lock().request = RequestState::Completing;
    }

    pub(super) fn show_results(&self) {
        self.state.lock().controls.results_visible = true;
    }

    pub(super) fn raise_error(&self, message: &str) {
        self.state.lock().controls.raise_error(message, Instant::now());
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut shared = self.state.lock();
        shared.controls.loading = false;
        shared.controls.submit.disabled = false;
        shared.controls.submit.label = std::mem::take(&mut self.original_label);
        shared.request = RequestState::Idle;
    }
}
