//! Application core coordinator
//!
//! `AssistCoordinator` is the single construction point for all shared state
//! (event log, preferences, suppression state) and wires the tracker, the
//! position poller, and the emergency stop channel to one injected capture
//! service. The UI layer calls one method per user intent and reads state
//! through snapshots; it never mutates anything directly.

use crate::input_log::{InputEvent, InputLog, Preferences};
use crate::service::{CaptureResult, CaptureService, MousePosition};
use crate::suppression::emergency::EmergencyStopChannel;
use crate::suppression::{PositionPoller, SuppressionState};
use crate::tracker::{InputTracker, TrackerError};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{info, warn};

pub struct AssistCoordinator<S: CaptureService> {
    service: Arc<S>,
    log: Arc<InputLog>,
    prefs: Arc<Mutex<Preferences>>,
    tracker: InputTracker<S>,
    suppression: Arc<SuppressionState>,
    poller: Arc<PositionPoller<S>>,
    // Held for its lifetime; dropping it detaches the listener.
    _emergency: EmergencyStopChannel,
}

impl<S: CaptureService> AssistCoordinator<S> {
    /// Build the core around a capture service.
    ///
    /// Subscribes the emergency stop channel immediately; if that fails the
    /// whole construction fails, since the escape hatch must exist for the
    /// entire process lifetime.
    pub fn new(service: Arc<S>) -> CaptureResult<Self> {
        let log = Arc::new(InputLog::new());
        let prefs = Arc::new(Mutex::new(Preferences::default()));
        let suppression = Arc::new(SuppressionState::new());
        let poller = Arc::new(PositionPoller::new(
            Arc::clone(&service),
            Arc::clone(&suppression),
        ));
        let emergency = EmergencyStopChannel::subscribe(
            service.as_ref(),
            Arc::clone(&suppression),
            Arc::clone(&poller),
        )?;
        let tracker = InputTracker::new(
            Arc::clone(&service),
            Arc::clone(&log),
            Arc::clone(&prefs),
        );

        Ok(Self {
            service,
            log,
            prefs,
            tracker,
            suppression,
            poller,
            _emergency: emergency,
        })
    }

    /// Start or stop input tracking
    pub async fn set_tracking(&self, active: bool) -> Result<(), TrackerError> {
        self.tracker.reconcile(active).await
    }

    pub fn is_tracking(&self) -> bool {
        self.tracker.is_active()
    }

    /// Flip mouse logging. Clears the log: history captured under the old
    /// filter would be a misleading mix under the new one.
    pub async fn set_mouse_logging(&self, enabled: bool) {
        self.prefs.lock().mouse_logging = enabled;
        self.log.clear();
        info!(enabled, "mouse logging toggled");
        if let Err(error) = self.service.set_mouse_logging(enabled).await {
            warn!(%error, "set_mouse_logging failed; local preference still applies");
        }
    }

    /// Flip keyboard logging. Clears the log, same as the mouse toggle.
    pub async fn set_keyboard_logging(&self, enabled: bool) {
        self.prefs.lock().keyboard_logging = enabled;
        self.log.clear();
        info!(enabled, "keyboard logging toggled");
        if let Err(error) = self.service.set_keyboard_logging(enabled).await {
            warn!(%error, "set_keyboard_logging failed; local preference still applies");
        }
    }

    /// Enable or disable pointer suppression and the position poller with it
    pub async fn set_suppression(&self, enabled: bool) -> CaptureResult<()> {
        self.service.toggle_mouse_suppression(enabled).await?;

        if enabled {
            match self.service.get_mouse_position().await {
                Ok(position) => {
                    self.suppression.set_position(position);
                    self.suppression.mark_origin(position);
                }
                Err(error) => {
                    warn!(%error, "could not record suppression origin position");
                }
            }
            self.suppression.set_active(true);
            self.poller.start();
            info!("mouse suppression enabled");
        } else {
            self.suppression.set_active(false);
            self.poller.stop();
            info!("mouse suppression disabled");
        }
        Ok(())
    }

    /// User-initiated emergency stop: suppression is forced off locally even
    /// if the service call fails.
    pub async fn emergency_stop(&self) {
        let was_active = self.suppression.set_active(false);
        self.poller.stop();
        if let Err(error) = self.service.emergency_stop().await {
            warn!(%error, "emergency_stop service call failed");
        }
        warn!(was_active, cause = "user", "emergency stop requested");
    }

    pub fn is_suppressing(&self) -> bool {
        self.suppression.is_active()
    }

    pub fn last_known_position(&self) -> MousePosition {
        self.suppression.last_known_position()
    }

    pub fn suppression_origin(&self) -> Option<MousePosition> {
        self.suppression.origin_position()
    }

    /// Current history, newest-first
    pub fn log_snapshot(&self) -> Vec<InputEvent> {
        self.log.snapshot()
    }

    pub fn preferences(&self) -> Preferences {
        *self.prefs.lock()
    }
}
