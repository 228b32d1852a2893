//! Polygon editor state machine.
//!
//! [`PolygonEditor`] owns every piece of mutable editing state: the ordered
//! vertex list, the active [`ToolMode`], the vertex being dragged, the hover
//! preview point and the loaded image. All operations are total. Calls that
//! don't fit the current state (wrong mode, index out of range) are logged
//! and ignored, and report `false`.

mod observer;


pub use observer::{Change, SubscriptionId};

use observer::Listeners;

use crate::config::EditorPreferences;
use crate::coords::{CoordinateResolver, SurfaceOrigin};
use crate::model::{ImageRef, MIN_POLYGON_VERTICES, ToolMode, Vertex};

/// Read-only view of the editor state for the surface renderer.
#[derive(Debug, Clone, Copy)]
pub struct EditorView<'a> {
    pub vertices: &'a [Vertex],
    pub mode: ToolMode,
    pub moving_index: Option<usize>,
    pub prospective: Option<Vertex>,
    pub image: Option<&'a ImageRef>,
}

impl EditorView<'_> {
    /// The edge previewed while drawing: last vertex to the hover point.
    pub fn preview_edge(&self) -> Option<(Vertex, Vertex)> {
        match (self.vertices.last(), self.prospective) {
            (Some(last), Some(next)) => Some((*last, next)),
            _ => None,
        }
    }

    /// Whether the vertices enclose an area.
    pub fn is_closed_shape(&self) -> bool {
        self.vertices.len() >= MIN_POLYGON_VERTICES
    }
}

/// The editing session for a single polygon over a single image.
#[derive(Debug)]
pub struct PolygonEditor {
    vertices: Vec<Vertex>,
    mode: ToolMode,
    /// Index of the vertex being dragged. Always `< vertices.len()` when set.
    moving_index: Option<usize>,
    /// Hover preview point. Only set in Draw mode.
    prospective: Option<Vertex>,
    image: Option<ImageRef>,
    resolver: CoordinateResolver,
    confirm_clear: bool,
    dirty: bool,
    listeners: Listeners,
}

impl Default for PolygonEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl PolygonEditor {
    pub fn new() -> Self {
        Self::with_preferences(&EditorPreferences::default())
    }

    /// Create an editor using the snap and confirmation settings from `preferences`.
    pub fn with_preferences(preferences: &EditorPreferences) -> Self {
        Self {
            vertices: Vec::new(),
            mode: ToolMode::default(),
            moving_index: None,
            prospective: None,
            image: None,
            resolver: CoordinateResolver::new(preferences.snap_unit),
            confirm_clear: preferences.confirm_clear,
            // Start dirty so the first frame gets drawn
            dirty: true,
            listeners: Listeners::default(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn moving_index(&self) -> Option<usize> {
        self.moving_index
    }

    pub fn prospective(&self) -> Option<Vertex> {
        self.prospective
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn resolver(&self) -> &CoordinateResolver {
        &self.resolver
    }

    /// Whether clearing a non-empty polygon asks for confirmation first.
    pub fn confirm_clear(&self) -> bool {
        self.confirm_clear
    }

    /// Snapshot of everything the renderer needs for one redraw.
    pub fn view(&self) -> EditorView<'_> {
        EditorView {
            vertices: &self.vertices,
            mode: self.mode,
            moving_index: self.moving_index,
            prospective: self.prospective,
            image: self.image.as_ref(),
        }
    }

    /// Resolve a raw pointer position with this editor's snap grid.
    pub fn resolve(
        &self,
        pointer_x: f64,
        pointer_y: f64,
        origin: Option<SurfaceOrigin>,
        snap_active: bool,
    ) -> Vertex {
        self.resolver.resolve(pointer_x, pointer_y, origin, snap_active)
    }

    // ========================================================================
    // Change Tracking
    // ========================================================================

    /// Register a listener called after every applied change.
    pub fn subscribe(&mut self, listener: impl FnMut(Change) + 'static) -> SubscriptionId {
        self.listeners.subscribe(Box::new(listener))
    }

    /// Remove a listener. Returns false if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Check if the state has changed since the last `clear_dirty()`.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after redrawing.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    fn changed(&mut self, change: Change) {
        self.dirty = true;
        self.listeners.notify(change);
    }

    // ========================================================================
    // Tool Mode
    // ========================================================================

    /// Switch the active tool mode.
    ///
    /// Move, Split and Delete can't be selected while the polygon is empty.
    /// Leaving Move ends any drag, leaving Draw drops the hover preview.
    /// Returns false if the mode is unavailable.
    pub fn select_mode(&mut self, mode: ToolMode) -> bool {
        if !mode.is_available(self.vertices.len()) {
            log::debug!("Mode {} unavailable on empty polygon", mode);
            return false;
        }
        if mode == self.mode {
            return true;
        }

        let previous = self.mode;
        if previous == ToolMode::Move {
            self.moving_index = None;
        }
        if previous == ToolMode::Draw {
            self.prospective = None;
        }
        self.mode = mode;
        log::debug!("🔧 Mode: {} -> {}", previous, mode);
        self.changed(Change::Mode);
        true
    }

    fn require_mode(&self, required: ToolMode, operation: &str) -> bool {
        if self.mode == required {
            true
        } else {
            log::debug!(
                "Ignoring {} in {} mode (needs {})",
                operation,
                self.mode,
                required
            );
            false
        }
    }

    fn require_index(&self, index: usize, operation: &str) -> bool {
        if index < self.vertices.len() {
            true
        } else {
            log::warn!(
                "Ignoring {} at index {}: polygon has {} vertices",
                operation,
                index,
                self.vertices.len()
            );
            false
        }
    }

    // ========================================================================
    // Vertex Mutations
    // ========================================================================

    /// Append a vertex to the end of the polygon. Draw mode only.
    pub fn add_vertex(&mut self, point: Vertex) -> bool {
        if !self.require_mode(ToolMode::Draw, "add_vertex") {
            return false;
        }
        self.vertices.push(point);
        log::debug!(
            "➕ Vertex {} at ({}, {})",
            self.vertices.len() - 1,
            point.x,
            point.y
        );
        self.changed(Change::Vertices);
        true
    }

    /// Remove the most recently appended vertex. Available in every mode.
    pub fn undo_last(&mut self) -> bool {
        let Some(removed) = self.vertices.pop() else {
            return false;
        };
        log::debug!("⏪ Removed last vertex ({}, {})", removed.x, removed.y);
        self.drop_stale_drag();
        self.changed(Change::Vertices);
        true
    }

    /// Remove every vertex. Returns false if the polygon was already empty.
    pub fn clear_all(&mut self) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        log::debug!("🗑️ Cleared {} vertices", self.vertices.len());
        self.vertices.clear();
        self.moving_index = None;
        self.changed(Change::Cleared);
        true
    }

    /// Clear the polygon, asking `confirm` first when it has vertices and
    /// confirmation is enabled. `confirm` receives the vertex count.
    pub fn request_clear(&mut self, confirm: impl FnOnce(usize) -> bool) -> bool {
        if self.vertices.is_empty() {
            return false;
        }
        if self.confirm_clear && !confirm(self.vertices.len()) {
            log::debug!("Clear declined");
            return false;
        }
        self.clear_all()
    }

    /// Start dragging the vertex at `index`. Move mode only.
    pub fn begin_move(&mut self, index: usize) -> bool {
        if !self.require_mode(ToolMode::Move, "begin_move")
            || !self.require_index(index, "begin_move")
        {
            return false;
        }
        self.moving_index = Some(index);
        log::debug!("Drag started on vertex {}", index);
        self.changed(Change::Drag);
        true
    }

    /// Move the dragged vertex to `point`. Does nothing without an active drag.
    pub fn update_move(&mut self, point: Vertex) -> bool {
        let Some(index) = self.moving_index else {
            return false;
        };
        let Some(vertex) = self.vertices.get_mut(index) else {
            self.moving_index = None;
            return false;
        };
        if *vertex == point {
            return false;
        }
        *vertex = point;
        self.changed(Change::Vertices);
        true
    }

    /// End the current drag, if any. Returns whether a drag was active.
    pub fn end_move(&mut self) -> bool {
        let Some(index) = self.moving_index.take() else {
            return false;
        };
        log::debug!("Drag ended on vertex {}", index);
        self.changed(Change::Drag);
        true
    }

    /// Insert the midpoint of edge `index -> index + 1` after `index`.
    ///
    /// The edge after the last vertex wraps around to the first one. On a
    /// single-vertex polygon this inserts a duplicate point. Split mode only.
    pub fn split_after(&mut self, index: usize) -> bool {
        if !self.require_mode(ToolMode::Split, "split_after")
            || !self.require_index(index, "split_after")
        {
            return false;
        }
        let next = (index + 1) % self.vertices.len();
        let midpoint = self.vertices[index].midpoint(&self.vertices[next]);
        self.vertices.insert(index + 1, midpoint);
        log::debug!(
            "✂️ Split edge {} -> {} at ({}, {})",
            index,
            next,
            midpoint.x,
            midpoint.y
        );
        self.changed(Change::Vertices);
        true
    }

    /// Remove the vertex at `index`. Delete mode only.
    pub fn delete_at(&mut self, index: usize) -> bool {
        if !self.require_mode(ToolMode::Delete, "delete_at")
            || !self.require_index(index, "delete_at")
        {
            return false;
        }
        let removed = self.vertices.remove(index);
        log::debug!("➖ Deleted vertex {} ({}, {})", index, removed.x, removed.y);
        self.changed(Change::Vertices);
        true
    }

    // ========================================================================
    // Hover Preview
    // ========================================================================

    /// Set the hover preview point. Draw mode only.
    pub fn set_prospective(&mut self, point: Vertex) -> bool {
        if self.mode != ToolMode::Draw {
            return false;
        }
        if self.prospective == Some(point) {
            return false;
        }
        self.prospective = Some(point);
        self.changed(Change::Hover);
        true
    }

    /// Drop the hover preview point.
    pub fn clear_prospective(&mut self) -> bool {
        if self.prospective.take().is_none() {
            return false;
        }
        self.changed(Change::Hover);
        true
    }

    // ========================================================================
    // Image
    // ========================================================================

    /// Replace the loaded image. The polygon is kept as is.
    pub fn load_image(&mut self, image: ImageRef) {
        log::info!(
            "Loaded image {} ({}x{})",
            image.handle.as_str(),
            image.natural_width,
            image.natural_height
        );
        self.image = Some(image);
        self.changed(Change::Image);
    }

    /// Seed the polygon with existing vertices, replacing any current ones.
    pub fn replace_vertices(&mut self, vertices: Vec<Vertex>) {
        self.vertices = vertices;
        self.moving_index = None;
        self.changed(Change::Vertices);
    }

    fn drop_stale_drag(&mut self) {
        if self.moving_index.is_some_and(|i| i >= self.vertices.len()) {
            self.moving_index = None;
        }
    }
}
