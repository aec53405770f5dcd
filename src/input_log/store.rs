//! Bounded, newest-first event history

use crate::input_log::types::InputEvent;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Maximum number of entries retained
pub const LOG_CAPACITY: usize = 1000;

/// Fixed-capacity input event history
///
/// Entries are kept newest-first in arrival order. Once full, every append
/// evicts exactly the oldest entry. Single writer (the event pump), any
/// number of snapshot readers.
pub struct InputLog {
    entries: Mutex<VecDeque<InputEvent>>,
}

impl InputLog {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(VecDeque::with_capacity(LOG_CAPACITY)),
        }
    }

    /// Insert an accepted event at the head, evicting the oldest if full
    pub fn append(&self, event: InputEvent) {
        let mut entries = self.entries.lock();
        if entries.len() == LOG_CAPACITY {
            entries.pop_back();
        }
        entries.push_front(event);
    }

    /// Drop all entries
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Owned copy of the current history, newest-first
    pub fn snapshot(&self) -> Vec<InputEvent> {
        self.entries.lock().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Default for InputLog {
    fn default() -> Self {
        Self::new()
    }
}
