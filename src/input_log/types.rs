use crate::service::RawInputEvent;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of input event reported by the capture service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    MouseMove,
    MousePress,
    MouseRelease,
    KeyboardPress,
    KeyboardRelease,
}

impl EventCategory {
    /// Parse a wire `event_type` name. Unknown names yield `None`.
    pub fn from_wire(name: &str) -> Option<Self> {
        match name {
            "mouse_move" => Some(Self::MouseMove),
            "mouse_press" => Some(Self::MousePress),
            "mouse_release" => Some(Self::MouseRelease),
            "keyboard_press" => Some(Self::KeyboardPress),
            "keyboard_release" => Some(Self::KeyboardRelease),
            _ => None,
        }
    }

    pub fn is_mouse(self) -> bool {
        matches!(self, Self::MouseMove | Self::MousePress | Self::MouseRelease)
    }

    pub fn is_keyboard(self) -> bool {
        matches!(self, Self::KeyboardPress | Self::KeyboardRelease)
    }
}

/// One accepted input event, immutable once created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEvent {
    pub timestamp: DateTime<Utc>,
    pub category: EventCategory,
    pub details: String,
}

impl InputEvent {
    /// Classify a wire payload, timestamping it on arrival.
    ///
    /// Payloads with an unrecognized `event_type` are dropped rather than
    /// guessed at.
    pub fn classify(raw: RawInputEvent) -> Option<Self> {
        let category = EventCategory::from_wire(&raw.event_type)?;
        Some(Self {
            timestamp: Utc::now(),
            category,
            details: raw.details,
        })
    }
}

/// Which event families the user wants logged
///
/// Mutated only by explicit user toggles; every flip is a discrete
/// transition and resets the log (see `store`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub mouse_logging: bool,
    pub keyboard_logging: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            mouse_logging: true,
            keyboard_logging: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for (name, category) in [
            ("mouse_move", EventCategory::MouseMove),
            ("mouse_press", EventCategory::MousePress),
            ("mouse_release", EventCategory::MouseRelease),
            ("keyboard_press", EventCategory::KeyboardPress),
            ("keyboard_release", EventCategory::KeyboardRelease),
        ] {
            assert_eq!(EventCategory::from_wire(name), Some(category));
        }
    }

    #[test]
    fn test_unknown_category_fails_closed() {
        assert_eq!(EventCategory::from_wire("touch_tap"), None);
        assert_eq!(EventCategory::from_wire(""), None);

        let raw = RawInputEvent {
            event_type: "touch_tap".to_string(),
            details: String::new(),
        };
        assert!(InputEvent::classify(raw).is_none());
    }

    #[test]
    fn test_classify_keeps_details() {
        let raw = RawInputEvent {
            event_type: "keyboard_press".to_string(),
            details: "key: KeyA".to_string(),
        };
        let event = InputEvent::classify(raw).unwrap();
        assert_eq!(event.category, EventCategory::KeyboardPress);
        assert_eq!(event.details, "key: KeyA");
    }
}
