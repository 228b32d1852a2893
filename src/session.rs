//! Headless session replay.
//!
//! A session script seeds the polygon and lists the messages a user produced.
//! Replaying it against a fresh editor yields the same vertex list the
//! interactive session ended with.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;
use crate::editor::PolygonEditor;
use crate::handlers::update;
use crate::keybindings::KeyBindings;
use crate::message::Message;
use crate::model::{ImageError, Vertex};

/// A recorded editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionScript {
    /// Vertices present before the first message, as `[x, y]` pairs.
    #[serde(default)]
    pub vertices: Vec<[f64; 2]>,
    /// Messages in the order they were produced.
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Outcome counts of a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Messages that changed the editor state.
    pub applied: usize,
    /// Messages that were valid but had no effect in the state they arrived in.
    pub ignored: usize,
}

/// Errors that can occur while preparing a replay.
#[derive(Error, Debug)]
pub enum SessionError {
    /// I/O error reading the script
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Script is not valid JSON or has an unexpected shape
    #[error("Invalid session script: {0}")]
    Parse(#[from] serde_json::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image could not be probed
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

impl SessionScript {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, SessionError> {
        let json = std::fs::read_to_string(path)?;
        let script = Self::from_json(&json)?;
        log::info!(
            "Loaded session {:?}: {} seed vertices, {} messages",
            path,
            script.vertices.len(),
            script.messages.len()
        );
        Ok(script)
    }

    /// Seed the editor and apply every message in order.
    pub fn replay(&self, editor: &mut PolygonEditor, bindings: &KeyBindings) -> ReplayReport {
        if !self.vertices.is_empty() {
            editor.replace_vertices(
                self.vertices
                    .iter()
                    .map(|&[x, y]| Vertex::new(x, y))
                    .collect(),
            );
        }

        let mut report = ReplayReport::default();
        for message in &self.messages {
            if update(editor, bindings, message.clone()) {
                report.applied += 1;
            } else {
                report.ignored += 1;
            }
        }
        log::debug!(
            "Replay finished: {} applied, {} ignored",
            report.applied,
            report.ignored
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export;

    #[test]
    fn test_replay_draw_then_split() {
        let script = SessionScript::from_json(
            r#"{
                "messages": [
                    {"type": "pointer", "event": {"kind": "click", "x": 110, "y": 110}, "origin": {"x": 100, "y": 100}},
                    {"type": "pointer", "event": {"kind": "click", "x": 120, "y": 110}, "origin": {"x": 100, "y": 100}},
                    {"type": "pointer", "event": {"kind": "click", "x": 120, "y": 120}, "origin": {"x": 100, "y": 100}},
                    {"type": "select_mode", "mode": "split"},
                    {"type": "pointer", "event": {"kind": "click", "x": 0, "y": 0, "target": 2}}
                ]
            }"#,
        )
        .unwrap();

        let mut editor = PolygonEditor::new();
        let report = script.replay(&mut editor, &KeyBindings::default());

        assert_eq!(report, ReplayReport { applied: 5, ignored: 0 });
        assert_eq!(
            export::to_json(editor.vertices()),
            "[[10,10],[20,10],[20,20],[15,15]]"
        );
    }

    #[test]
    fn test_replay_seeds_vertices_and_counts_ignored() {
        let script = SessionScript::from_json(
            r#"{
                "vertices": [[0, 0], [5, 5], [9, 9]],
                "messages": [
                    {"type": "pointer", "event": {"kind": "click", "x": 1, "y": 1, "target": 0}},
                    {"type": "select_mode", "mode": "delete"},
                    {"type": "pointer", "event": {"kind": "click", "x": 1, "y": 1, "target": 0}},
                    {"type": "clear"}
                ]
            }"#,
        )
        .unwrap();

        let mut editor = PolygonEditor::new();
        let report = script.replay(&mut editor, &KeyBindings::default());

        // The first click adds a vertex in Draw mode, the declined clear is ignored
        assert_eq!(report, ReplayReport { applied: 3, ignored: 1 });
        assert_eq!(export::to_json(editor.vertices()), "[[5,5],[9,9],[1,1]]");
    }

    #[test]
    fn test_invalid_script() {
        let result = SessionScript::from_json(r#"{"messages": [{"type": "teleport"}]}"#);
        assert!(matches!(result, Err(SessionError::Parse(_))));
    }
}
