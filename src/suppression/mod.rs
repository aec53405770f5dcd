//! Mouse suppression state and position polling
//!
//! While the capture service is suppressing pointer movement the app keeps a
//! live view of where the pointer is, sampling `get_mouse_position` at
//! ~60 Hz. The poller's lifecycle is independent of input tracking and is
//! torn down synchronously on stop.

pub mod emergency;

use crate::service::{CaptureService, MousePosition};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Sampling period of the position poller (~60 Hz)
pub const POLL_PERIOD: Duration = Duration::from_millis(16);

/// Shared suppression mode state
///
/// `active` is flipped by user toggles and forced off by the emergency stop
/// channel; the position fields are written only by the poller and the
/// suppression toggle path.
pub struct SuppressionState {
    active: AtomicBool,
    last_known_position: Mutex<MousePosition>,
    origin_position: Mutex<Option<MousePosition>>,
}

impl SuppressionState {
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            last_known_position: Mutex::new(MousePosition::default()),
            origin_position: Mutex::new(None),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Set the flag, returning its previous value
    pub fn set_active(&self, active: bool) -> bool {
        self.active.swap(active, Ordering::SeqCst)
    }

    pub fn last_known_position(&self) -> MousePosition {
        *self.last_known_position.lock()
    }

    pub fn set_position(&self, position: MousePosition) {
        *self.last_known_position.lock() = position;
    }

    /// Record where the pointer was when suppression engaged
    pub fn mark_origin(&self, position: MousePosition) {
        *self.origin_position.lock() = Some(position);
    }

    pub fn origin_position(&self) -> Option<MousePosition> {
        *self.origin_position.lock()
    }
}

impl Default for SuppressionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-interval sampler of the pointer position
pub struct PositionPoller<S: CaptureService> {
    service: Arc<S>,
    state: Arc<SuppressionState>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl<S: CaptureService> PositionPoller<S> {
    pub fn new(service: Arc<S>, state: Arc<SuppressionState>) -> Self {
        Self {
            service,
            state,
            task: Mutex::new(None),
        }
    }

    /// Begin sampling. Idempotent while a sampling task is already running.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            return;
        }

        let service = Arc::clone(&self.service);
        let state = Arc::clone(&self.state);
        *task = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(POLL_PERIOD);
            // A sample still pending when the next tick fires skips that
            // tick; queries never queue up behind a slow service.
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                match service.get_mouse_position().await {
                    Ok(position) => state.set_position(position),
                    // Keep the previous position and keep polling.
                    Err(error) => warn!(%error, "mouse position query failed"),
                }
            }
        }));
        debug!("position poller started");
    }

    /// Cancel sampling immediately, discarding any in-flight sample
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            debug!("position poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.lock().as_ref().is_some_and(|t| !t.is_finished())
    }
}

impl<S: CaptureService> Drop for PositionPoller<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
