//! Input subscription lifecycle
//!
//! `InputTracker` owns the single logical subscription to the capture
//! service. Rapid user toggling means start and stop calls can race each
//! other mid-flight; an epoch counter invalidates every continuation that
//! belongs to a superseded toggle, so a slow start can never resurrect a
//! subscription a later stop already cancelled.

use crate::input_log::{accepts, InputEvent, InputLog, Preferences};
use crate::service::{CaptureError, CaptureService, RawInputEvent};
use parking_lot::Mutex as ParkingMutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Errors surfaced by `reconcile`
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Failed to start input tracking: {0}")]
    Start(#[source] CaptureError),

    #[error("Failed to attach input event listener: {0}")]
    Attach(#[source] CaptureError),
}

struct LiveSubscription {
    epoch: u64,
    pump: JoinHandle<()>,
}

/// Owner of the at-most-one live subscription to the capture service
pub struct InputTracker<S: CaptureService> {
    service: Arc<S>,
    log: Arc<InputLog>,
    prefs: Arc<ParkingMutex<Preferences>>,
    /// Monotonic token; continuations compare against it and bail when stale.
    epoch: Arc<AtomicU64>,
    live: ParkingMutex<Option<LiveSubscription>>,
    /// Serializes start/stop sequences against the service.
    transition: Mutex<()>,
}

impl<S: CaptureService> InputTracker<S> {
    pub fn new(service: Arc<S>, log: Arc<InputLog>, prefs: Arc<ParkingMutex<Preferences>>) -> Self {
        Self {
            service,
            log,
            prefs,
            epoch: Arc::new(AtomicU64::new(0)),
            live: ParkingMutex::new(None),
            transition: Mutex::new(()),
        }
    }

    /// Drive the subscription toward the desired state.
    ///
    /// Safe to call repeatedly and concurrently with itself; overlapping
    /// calls collapse onto the newest one and superseded calls return
    /// without side effects. Calling with `false` when nothing is active is
    /// a no-op.
    pub async fn reconcile(&self, desired_active: bool) -> Result<(), TrackerError> {
        // Claim the next epoch before queueing on the transition lock, so a
        // transition already in flight observes itself superseded at its
        // next epoch check.
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = self.transition.lock().await;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            // A newer reconcile queued up behind us; it settles the final state.
            return Ok(());
        }

        let prior = self.live.lock().take();
        if let Some(live) = prior {
            live.pump.abort();
            debug!(stale_epoch = live.epoch, "superseding live subscription");
            // Stop is best-effort: the service tolerates stop-while-stopped,
            // and a stop failure must not block the next start.
            if let Err(error) = self.service.stop_input_tracking().await {
                warn!(%error, "stop_input_tracking failed");
            }
            if !desired_active {
                info!("input tracking stopped");
            }
        }

        if !desired_active {
            return Ok(());
        }

        self.service
            .start_input_tracking()
            .await
            .map_err(TrackerError::Start)?;

        if self.epoch.load(Ordering::SeqCst) != epoch {
            // Superseded while the start was in flight. Tear the fresh
            // subscription down instead of attaching a listener to it.
            if let Err(error) = self.service.stop_input_tracking().await {
                warn!(%error, "stop of superseded subscription failed");
            }
            return Ok(());
        }

        let events = match self.service.input_events() {
            Ok(rx) => rx,
            Err(error) => {
                // Never leave a half-open subscription behind.
                if let Err(stop_error) = self.service.stop_input_tracking().await {
                    warn!(%stop_error, "rollback stop failed");
                }
                return Err(TrackerError::Attach(error));
            }
        };

        let pump = self.spawn_pump(epoch, events);
        *self.live.lock() = Some(LiveSubscription { epoch, pump });
        info!(epoch, "input tracking started");
        Ok(())
    }

    /// Whether a subscription is currently live
    pub fn is_active(&self) -> bool {
        self.live.lock().is_some()
    }

    fn spawn_pump(&self, epoch: u64, mut events: mpsc::Receiver<RawInputEvent>) -> JoinHandle<()> {
        let current_epoch = Arc::clone(&self.epoch);
        let log = Arc::clone(&self.log);
        let prefs = Arc::clone(&self.prefs);

        tokio::spawn(async move {
            while let Some(raw) = events.recv().await {
                if current_epoch.load(Ordering::SeqCst) != epoch {
                    // Subscription was superseded; discard and exit.
                    break;
                }
                let Some(event) = InputEvent::classify(raw) else {
                    debug!("dropping event with unrecognized type");
                    continue;
                };
                let snapshot = *prefs.lock();
                if accepts(event.category, &snapshot) {
                    log.append(event);
                }
            }
            debug!(epoch, "event pump exited");
        })
    }
}

impl<S: CaptureService> Drop for InputTracker<S> {
    fn drop(&mut self) {
        if let Some(live) = self.live.lock().take() {
            live.pump.abort();
        }
    }
}
