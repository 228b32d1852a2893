//! Message types for the polygon editor.
//!
//! Every user action the editor accepts is represented as a message in the
//! Elm architecture style. Messages are serializable so sessions can be
//! scripted and replayed.

use serde::{Deserialize, Serialize};

use crate::coords::SurfaceOrigin;
use crate::dispatch::PointerEvent;
use crate::keybindings::KeyCode;
use crate::model::{ImageRef, ToolMode};

/// Messages that can be sent to update editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Message {
    // Toolbar
    /// Tool mode button pressed
    SelectMode { mode: ToolMode },
    /// Undo button pressed
    UndoLast,
    /// Clear button pressed; `confirm` is the user's answer to the confirmation prompt
    Clear {
        #[serde(default)]
        confirm: bool,
    },

    // Surface
    /// Pointer event on the interactive surface, with the surface origin at that moment
    Pointer {
        event: PointerEvent,
        #[serde(default)]
        origin: Option<SurfaceOrigin>,
    },
    /// Key pressed while the editor has focus
    Key { key: KeyCode },

    // Image loader
    /// A newly selected image finished loading
    ImageLoaded { image: ImageRef },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::PointerKind;

    #[test]
    fn test_parse_script_messages() {
        let json = r#"[
            {"type": "select_mode", "mode": "move"},
            {"type": "undo_last"},
            {"type": "clear", "confirm": true},
            {"type": "pointer", "event": {"kind": "down", "x": 1, "y": 2, "target": 0, "shift": true}},
            {"type": "key", "key": "backspace"},
            {"type": "image_loaded", "image": {"handle": "a.png", "natural_width": 4, "natural_height": 3}}
        ]"#;
        let messages: Vec<Message> = serde_json::from_str(json).unwrap();
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0], Message::SelectMode { mode: ToolMode::Move });
        assert_eq!(messages[2], Message::Clear { confirm: true });

        let Message::Pointer { event, origin } = &messages[3] else {
            panic!("Expected pointer message");
        };
        assert_eq!(event.kind, PointerKind::Down);
        assert_eq!(event.target, Some(0));
        assert!(event.shift);
        assert_eq!(*origin, None);

        assert_eq!(messages[4], Message::Key { key: KeyCode::Backspace });
    }

    #[test]
    fn test_clear_defaults_to_declined() {
        let message: Message = serde_json::from_str(r#"{"type": "clear"}"#).unwrap();
        assert_eq!(message, Message::Clear { confirm: false });
    }
}
