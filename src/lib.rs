//! Tremor Assist core
//!
//! Backend-agnostic core of the Tremor Assist desktop app: bridges an
//! external input capture/suppression engine into a bounded, filterable
//! in-process event log, and drives the engine's capture and suppression
//! modes from user intents. The UI shell injects a `CaptureService`
//! implementation and talks to a single `AssistCoordinator`.

pub mod coordinator;
pub mod input_log;
pub mod service;
pub mod suppression;
pub mod tracker;

pub use coordinator::AssistCoordinator;
pub use input_log::{EventCategory, InputEvent, InputLog, Preferences, LOG_CAPACITY};
pub use service::{CaptureError, CaptureResult, CaptureService, MousePosition, RawInputEvent};
pub use suppression::{PositionPoller, SuppressionState, POLL_PERIOD};
pub use tracker::{InputTracker, TrackerError};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for a host application
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tremor_assist_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
