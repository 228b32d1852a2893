//! Tool modes for the polygon editor.

use serde::{Deserialize, Serialize};

/// The exclusive interaction mode governing what a pointer action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolMode {
    /// Click to append a vertex; hovering previews the next edge.
    #[default]
    Draw,
    /// Drag an existing vertex to a new position.
    Move,
    /// Click an edge to insert its midpoint as a new vertex.
    Split,
    /// Click a vertex to remove it.
    Delete,
}

impl ToolMode {
    /// Get the display name for this mode.
    pub fn name(&self) -> &'static str {
        match self {
            ToolMode::Draw => "Draw",
            ToolMode::Move => "Move",
            ToolMode::Split => "Split",
            ToolMode::Delete => "Delete",
        }
    }

    /// Get all modes in toolbar order.
    pub fn all() -> &'static [ToolMode] {
        &[
            ToolMode::Draw,
            ToolMode::Move,
            ToolMode::Split,
            ToolMode::Delete,
        ]
    }

    /// Whether this mode only makes sense with at least one existing vertex.
    pub fn requires_vertices(&self) -> bool {
        !matches!(self, ToolMode::Draw)
    }

    /// Whether this mode can be selected for a polygon with `vertex_count` vertices.
    ///
    /// Renderers use this to show unavailable modes as disabled.
    pub fn is_available(&self, vertex_count: usize) -> bool {
        !self.requires_vertices() || vertex_count > 0
    }

    /// Parse a mode from its (case-insensitive) name.
    pub fn from_name(name: &str) -> Option<ToolMode> {
        Self::all()
            .iter()
            .copied()
            .find(|mode| mode.name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for ToolMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
