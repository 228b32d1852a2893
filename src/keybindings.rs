//! Customizable keybindings for the polygon editor.
//!
//! Maps key presses to tool mode selection and undo. Shift is reserved as the
//! snap modifier and travels on pointer events instead.

use serde::{Deserialize, Serialize};

use crate::model::ToolMode;

/// A keyboard key, as reported by the host (browser `KeyboardEvent.key` or a native shell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyCode {
    /// A printable character key, stored lowercase.
    Char(char),
    Backspace,
    Delete,
    Escape,
    Enter,
}

impl KeyCode {
    /// Create a character key. Letters are normalized to lowercase.
    pub fn char(c: char) -> Self {
        KeyCode::Char(c.to_ascii_lowercase())
    }

    /// This key with any letter lowercased.
    pub fn normalized(self) -> Self {
        match self {
            KeyCode::Char(c) => KeyCode::char(c),
            other => other,
        }
    }

    /// Parse a host key name such as `"d"`, `"D"` or `"Backspace"`.
    pub fn from_key_name(name: &str) -> Option<KeyCode> {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(KeyCode::char(c));
        }
        match name {
            "Backspace" => Some(KeyCode::Backspace),
            "Delete" => Some(KeyCode::Delete),
            "Escape" => Some(KeyCode::Escape),
            "Enter" => Some(KeyCode::Enter),
            _ => None,
        }
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyCode::Char(' ') => f.write_str("Space"),
            KeyCode::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            KeyCode::Backspace => f.write_str("Backspace"),
            KeyCode::Delete => f.write_str("Delete"),
            KeyCode::Escape => f.write_str("Escape"),
            KeyCode::Enter => f.write_str("Enter"),
        }
    }
}

/// What a bound key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    SelectMode(ToolMode),
    UndoLast,
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    /// Hotkey for Draw mode
    pub tool_draw: KeyCode,
    /// Hotkey for Move mode
    pub tool_move: KeyCode,
    /// Hotkey for Split mode
    pub tool_split: KeyCode,
    /// Hotkey for Delete mode
    pub tool_delete: KeyCode,
    /// Hotkey for removing the last vertex
    pub undo: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            tool_draw: KeyCode::Char('d'),
            tool_move: KeyCode::Char('m'),
            tool_split: KeyCode::Char('s'),
            tool_delete: KeyCode::Char('x'),
            undo: KeyCode::Backspace,
        }
    }
}

impl KeyBindings {
    /// Create new keybindings with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the action bound to a key press, if any.
    pub fn action_for_key(&self, key: KeyCode) -> Option<KeyAction> {
        if key == self.undo {
            return Some(KeyAction::UndoLast);
        }
        ToolMode::all()
            .iter()
            .copied()
            .find(|&mode| self.key_for_tool(mode) == key)
            .map(KeyAction::SelectMode)
    }

    /// Get the hotkey for a specific mode.
    pub fn key_for_tool(&self, mode: ToolMode) -> KeyCode {
        match mode {
            ToolMode::Draw => self.tool_draw,
            ToolMode::Move => self.tool_move,
            ToolMode::Split => self.tool_split,
            ToolMode::Delete => self.tool_delete,
        }
    }

    /// Set the hotkey for a mode.
    pub fn set_tool_key(&mut self, mode: ToolMode, key: KeyCode) {
        let key = key.normalized();
        match mode {
            ToolMode::Draw => self.tool_draw = key,
            ToolMode::Move => self.tool_move = key,
            ToolMode::Split => self.tool_split = key,
            ToolMode::Delete => self.tool_delete = key,
        }
    }

    /// Rebind a mode, refusing keys that another binding already uses.
    pub fn rebind_tool(&mut self, mode: ToolMode, key: KeyCode) -> Result<(), String> {
        let key = key.normalized();
        if let Some(other) = self.key_conflict(key, Some(mode)) {
            return Err(format!("{} is already bound to {}", key, other));
        }
        self.set_tool_key(mode, key);
        Ok(())
    }

    /// Lowercase character bindings so they match keys from [`KeyCode::from_key_name`].
    pub fn normalize(&mut self) {
        for key in [
            &mut self.tool_draw,
            &mut self.tool_move,
            &mut self.tool_split,
            &mut self.tool_delete,
            &mut self.undo,
        ] {
            *key = key.normalized();
        }
    }

    /// Describe every mode key that is shadowed by another binding.
    ///
    /// Undo is checked before the mode keys, so a mode sharing its key with
    /// undo can never be selected from the keyboard.
    pub fn conflicts(&self) -> Vec<String> {
        ToolMode::all()
            .iter()
            .filter_map(|&mode| {
                let key = self.key_for_tool(mode);
                self.key_conflict(key, Some(mode)).map(|other| {
                    format!("{} key {} is also bound to {}", mode.name(), key, other)
                })
            })
            .collect()
    }

    /// Check if a key is already used by another binding.
    /// Returns a description of what it's used for, if anything.
    pub fn key_conflict(&self, key: KeyCode, exclude_tool: Option<ToolMode>) -> Option<String> {
        for &mode in ToolMode::all() {
            if exclude_tool != Some(mode) && self.key_for_tool(mode) == key {
                return Some(format!("{} tool", mode.name()));
            }
        }
        if key == self.undo {
            return Some("Undo".to_string());
        }
        None
    }
}
