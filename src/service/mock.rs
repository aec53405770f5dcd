//! Scripted capture service for tests
//!
//! Lets tests delay or fail individual service calls, inject events and
//! emergency signals, and observe how many calls the core issued.

use super::{CaptureError, CaptureResult, CaptureService, MousePosition, RawInputEvent};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Default)]
pub(crate) struct MockCapture {
    pub starts: AtomicUsize,
    pub stops: AtomicUsize,
    pub attaches: AtomicUsize,
    pub emergency_calls: AtomicUsize,

    pub fail_start: AtomicBool,
    pub fail_attach: AtomicBool,
    pub start_delay: Mutex<Option<Duration>>,

    pub position: Mutex<MousePosition>,
    pub fail_position: AtomicBool,
    pub position_delay: Mutex<Option<Duration>>,
    pub position_queries: AtomicUsize,
    in_flight_queries: AtomicUsize,
    pub max_in_flight_queries: AtomicUsize,

    pub mouse_logging: Mutex<Option<bool>>,
    pub keyboard_logging: Mutex<Option<bool>>,
    pub suppression: Mutex<Option<bool>>,

    event_tx: Mutex<Option<mpsc::Sender<RawInputEvent>>>,
    emergency_tx: Mutex<Option<mpsc::Sender<()>>>,
}

impl MockCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an event into the most recently attached listener, if any.
    /// Returns whether a listener was there to receive it.
    pub async fn emit_event(&self, event_type: &str, details: &str) -> bool {
        let tx = self.event_tx.lock().clone();
        match tx {
            Some(tx) => tx
                .send(RawInputEvent {
                    event_type: event_type.to_string(),
                    details: details.to_string(),
                })
                .await
                .is_ok(),
            None => false,
        }
    }

    /// Fire the emergency-stop signal.
    pub async fn emit_emergency_stop(&self) -> bool {
        let tx = self.emergency_tx.lock().clone();
        match tx {
            Some(tx) => tx.send(()).await.is_ok(),
            None => false,
        }
    }
}

#[async_trait]
impl CaptureService for MockCapture {
    async fn start_input_tracking(&self) -> CaptureResult<()> {
        let delay = *self.start_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.starts.fetch_add(1, Ordering::SeqCst);
        if self.fail_start.load(Ordering::SeqCst) {
            return Err(CaptureError::Backend("start failed".to_string()));
        }
        Ok(())
    }

    async fn stop_input_tracking(&self) -> CaptureResult<()> {
        self.stops.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn set_mouse_logging(&self, enabled: bool) -> CaptureResult<()> {
        *self.mouse_logging.lock() = Some(enabled);
        Ok(())
    }

    async fn set_keyboard_logging(&self, enabled: bool) -> CaptureResult<()> {
        *self.keyboard_logging.lock() = Some(enabled);
        Ok(())
    }

    async fn toggle_mouse_suppression(&self, enabled: bool) -> CaptureResult<()> {
        *self.suppression.lock() = Some(enabled);
        Ok(())
    }

    async fn emergency_stop(&self) -> CaptureResult<()> {
        self.emergency_calls.fetch_add(1, Ordering::SeqCst);
        *self.suppression.lock() = Some(false);
        Ok(())
    }

    async fn get_mouse_position(&self) -> CaptureResult<MousePosition> {
        let in_flight = self.in_flight_queries.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_queries
            .fetch_max(in_flight, Ordering::SeqCst);
        self.position_queries.fetch_add(1, Ordering::SeqCst);

        let delay = *self.position_delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight_queries.fetch_sub(1, Ordering::SeqCst);
        if self.fail_position.load(Ordering::SeqCst) {
            return Err(CaptureError::Backend("position query failed".to_string()));
        }
        Ok(*self.position.lock())
    }

    fn input_events(&self) -> CaptureResult<mpsc::Receiver<RawInputEvent>> {
        if self.fail_attach.load(Ordering::SeqCst) {
            return Err(CaptureError::Unavailable("event stream down".to_string()));
        }
        self.attaches.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::channel(64);
        *self.event_tx.lock() = Some(tx);
        Ok(rx)
    }

    fn emergency_stop_signals(&self) -> CaptureResult<mpsc::Receiver<()>> {
        let (tx, rx) = mpsc::channel(8);
        *self.emergency_tx.lock() = Some(tx);
        Ok(rx)
    }
}
