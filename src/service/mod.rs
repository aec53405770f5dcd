//! Capture service interface
//!
//! Defines the seam to the external input capture/suppression engine. The
//! engine itself is opaque: it observes raw pointer and keyboard activity,
//! can be told to suppress pointer movement, and pushes events and an
//! out-of-band emergency-stop signal back to us.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

#[cfg(test)]
pub(crate) mod mock;

/// Errors surfaced by the capture service
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Capture service unavailable: {0}")]
    Unavailable(String),

    #[error("Capture backend error: {0}")]
    Backend(String),
}

/// Result type for capture service operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// A pointer position reported by the capture service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MousePosition {
    pub x: i32,
    pub y: i32,
}

/// Wire payload of the service's `input_event` stream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInputEvent {
    pub event_type: String,
    pub details: String,
}

impl RawInputEvent {
    /// Decode a payload from its JSON transport form
    pub fn from_json(payload: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(payload)
    }
}

/// Interface to the external input capture engine
///
/// Attaching to a stream means obtaining its receiver; dropping the receiver
/// detaches. `stop_input_tracking` must tolerate being called when tracking
/// is not running.
#[async_trait]
pub trait CaptureService: Send + Sync + 'static {
    /// Begin capturing input events
    async fn start_input_tracking(&self) -> CaptureResult<()>;

    /// Stop capturing input events
    async fn stop_input_tracking(&self) -> CaptureResult<()>;

    /// Tell the engine whether mouse events should be emitted
    async fn set_mouse_logging(&self, enabled: bool) -> CaptureResult<()>;

    /// Tell the engine whether keyboard events should be emitted
    async fn set_keyboard_logging(&self, enabled: bool) -> CaptureResult<()>;

    /// Enable or disable pointer movement suppression
    async fn toggle_mouse_suppression(&self, enabled: bool) -> CaptureResult<()>;

    /// Command the engine to drop all suppression immediately
    async fn emergency_stop(&self) -> CaptureResult<()>;

    /// Query the current pointer position
    async fn get_mouse_position(&self) -> CaptureResult<MousePosition>;

    /// Attach to the `input_event` stream
    fn input_events(&self) -> CaptureResult<mpsc::Receiver<RawInputEvent>>;

    /// Attach to the `emergency_stop_triggered` signal
    fn emergency_stop_signals(&self) -> CaptureResult<mpsc::Receiver<()>>;
}
