//! Input event log
//!
//! Classification, preference filtering, and bounded storage for input
//! events received from the capture service.

pub mod filter;
pub mod store;
pub mod types;

pub use filter::accepts;
pub use store::{InputLog, LOG_CAPACITY};
pub use types::{EventCategory, InputEvent, Preferences};
