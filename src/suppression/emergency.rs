//! Emergency stop channel
//!
//! The capture service can raise `emergency_stop_triggered` out of band
//! (e.g. from a global panic hotkey). The channel is subscribed once for the
//! lifetime of the application, independent of the tracking lifecycle, and
//! forces suppression off on every signal.

use crate::service::{CaptureResult, CaptureService};
use crate::suppression::{PositionPoller, SuppressionState};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Process-lifetime listener for the service's emergency stop signal
pub struct EmergencyStopChannel {
    task: JoinHandle<()>,
}

impl EmergencyStopChannel {
    /// Attach to the signal and spawn the listener.
    ///
    /// Failure to attach is a startup error: without the channel there is no
    /// escape hatch, so construction of the app core must not proceed.
    pub fn subscribe<S: CaptureService>(
        service: &S,
        state: Arc<SuppressionState>,
        poller: Arc<PositionPoller<S>>,
    ) -> CaptureResult<Self> {
        let mut signals = service.emergency_stop_signals()?;

        let task = tokio::spawn(async move {
            while signals.recv().await.is_some() {
                let was_active = state.set_active(false);
                poller.stop();
                warn!(
                    was_active,
                    cause = "emergency_stop_triggered",
                    "suppression forced off"
                );
            }
            debug!("emergency stop channel closed");
        });

        Ok(Self { task })
    }
}

impl Drop for EmergencyStopChannel {
    fn drop(&mut self) {
        self.task.abort();
    }
}
