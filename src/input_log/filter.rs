//! Preference filter for input events

use crate::input_log::types::{EventCategory, Preferences};

/// Decide whether an event of the given category should be logged.
///
/// Pure with respect to its inputs; callers pass the preference snapshot
/// current at the moment the event arrived.
pub fn accepts(category: EventCategory, prefs: &Preferences) -> bool {
    if category.is_keyboard() {
        prefs.keyboard_logging
    } else if category.is_mouse() {
        prefs.mouse_logging
    } else {
        false
    }
}
