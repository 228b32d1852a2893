//! Pointer event routing.
//!
//! Each tool mode allows exactly one mutation per pointer event kind. The
//! routing is kept in a single table ([`route`]) so that the set of things a
//! pointer can do in each mode is visible in one place.
//!
//! | Mode   | down        | move             | up       | click       | leave              |
//! |--------|-------------|------------------|----------|-------------|--------------------|
//! | Draw   |             | set prospective  |          | add vertex  | clear prospective  |
//! | Move   | begin move  | update move      | end move |             | end move           |
//! | Split  |             |                  |          | split after |                    |
//! | Delete |             |                  |          | delete at   |                    |

use serde::{Deserialize, Serialize};

use crate::coords::SurfaceOrigin;
use crate::editor::PolygonEditor;
use crate::model::{ToolMode, Vertex};

/// Kind of pointer event reported by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Click,
    Leave,
}

impl PointerKind {
    pub fn from_name(name: &str) -> Option<PointerKind> {
        match name.to_ascii_lowercase().as_str() {
            "down" => Some(PointerKind::Down),
            "move" => Some(PointerKind::Move),
            "up" => Some(PointerKind::Up),
            "click" => Some(PointerKind::Click),
            "leave" => Some(PointerKind::Leave),
            _ => None,
        }
    }
}

/// A pointer event from the interactive surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Pointer position in the renderer's space (not yet surface-local).
    pub x: f64,
    pub y: f64,
    /// Vertex (or edge start, for Split) under the pointer, as hit-tested by the renderer.
    #[serde(default)]
    pub target: Option<usize>,
    /// Snap modifier held.
    #[serde(default)]
    pub shift: bool,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            target: None,
            shift: false,
        }
    }

    pub fn on_vertex(mut self, index: usize) -> Self {
        self.target = Some(index);
        self
    }

    pub fn with_shift(mut self, shift: bool) -> Self {
        self.shift = shift;
        self
    }
}

/// The mutation a pointer event kind maps to in a given mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AddVertex,
    SetProspective,
    ClearProspective,
    BeginMove,
    UpdateMove,
    EndMove,
    SplitAfter,
    DeleteAt,
}

/// The routing table: which mutation (if any) `kind` triggers in `mode`.
pub fn route(mode: ToolMode, kind: PointerKind) -> Option<Route> {
    use PointerKind as K;
    use ToolMode as M;

    match (mode, kind) {
        (M::Draw, K::Click) => Some(Route::AddVertex),
        (M::Draw, K::Move) => Some(Route::SetProspective),
        (M::Draw, K::Leave) => Some(Route::ClearProspective),

        (M::Move, K::Down) => Some(Route::BeginMove),
        (M::Move, K::Move) => Some(Route::UpdateMove),
        (M::Move, K::Up | K::Leave) => Some(Route::EndMove),

        (M::Split, K::Click) => Some(Route::SplitAfter),

        (M::Delete, K::Click) => Some(Route::DeleteAt),

        _ => None,
    }
}

/// A fully bound editor mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EditAction {
    AddVertex(Vertex),
    SetProspective(Vertex),
    ClearProspective,
    BeginMove(usize),
    UpdateMove(Vertex),
    EndMove,
    SplitAfter(usize),
    DeleteAt(usize),
}

impl Route {
    /// Attach the resolved point and target. Returns None when a target is
    /// required but the pointer wasn't over a vertex.
    pub fn bind(self, point: Vertex, target: Option<usize>) -> Option<EditAction> {
        let action = match self {
            Route::AddVertex => EditAction::AddVertex(point),
            Route::SetProspective => EditAction::SetProspective(point),
            Route::ClearProspective => EditAction::ClearProspective,
            Route::BeginMove => EditAction::BeginMove(target?),
            Route::UpdateMove => EditAction::UpdateMove(point),
            Route::EndMove => EditAction::EndMove,
            Route::SplitAfter => EditAction::SplitAfter(target?),
            Route::DeleteAt => EditAction::DeleteAt(target?),
        };
        Some(action)
    }
}

impl EditAction {
    /// Apply this action. Returns whether the editor state changed.
    pub fn apply(self, editor: &mut PolygonEditor) -> bool {
        match self {
            EditAction::AddVertex(p) => editor.add_vertex(p),
            EditAction::SetProspective(p) => editor.set_prospective(p),
            EditAction::ClearProspective => editor.clear_prospective(),
            EditAction::BeginMove(i) => editor.begin_move(i),
            EditAction::UpdateMove(p) => editor.update_move(p),
            EditAction::EndMove => editor.end_move(),
            EditAction::SplitAfter(i) => editor.split_after(i),
            EditAction::DeleteAt(i) => editor.delete_at(i),
        }
    }
}

/// Translate a pointer event into the action it triggers in the editor's current mode.
pub fn action_for(
    editor: &PolygonEditor,
    event: &PointerEvent,
    origin: Option<SurfaceOrigin>,
) -> Option<EditAction> {
    let route = route(editor.mode(), event.kind)?;
    let point = editor.resolve(event.x, event.y, origin, event.shift);
    route.bind(point, event.target)
}

/// Route a pointer event to the editor. Returns whether the state changed.
pub fn dispatch_pointer(
    editor: &mut PolygonEditor,
    event: &PointerEvent,
    origin: Option<SurfaceOrigin>,
) -> bool {
    match action_for(editor, event, origin) {
        Some(action) => action.apply(editor),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with(vertices: &[(f64, f64)]) -> PolygonEditor {
        let mut editor = PolygonEditor::new();
        for &(x, y) in vertices {
            editor.add_vertex(Vertex::new(x, y));
        }
        editor
    }

    #[test]
    fn test_every_mode_kind_pair_has_at_most_one_route() {
        let kinds = [
            PointerKind::Down,
            PointerKind::Move,
            PointerKind::Up,
            PointerKind::Click,
            PointerKind::Leave,
        ];
        // Each mode exposes its own mutations and nothing else
        for &mode in ToolMode::all() {
            for kind in kinds {
                let Some(r) = route(mode, kind) else { continue };
                let owner = match r {
                    Route::AddVertex | Route::SetProspective | Route::ClearProspective => {
                        ToolMode::Draw
                    }
                    Route::BeginMove | Route::UpdateMove | Route::EndMove => ToolMode::Move,
                    Route::SplitAfter => ToolMode::Split,
                    Route::DeleteAt => ToolMode::Delete,
                };
                assert_eq!(owner, mode, "{:?} routed in {}", r, mode);
            }
        }
    }

    #[test]
    fn test_click_in_draw_adds_resolved_vertex() {
        let mut editor = PolygonEditor::new();
        let origin = Some(SurfaceOrigin::new(100.0, 50.0));
        let event = PointerEvent::new(PointerKind::Click, 112.4, 71.6);

        assert!(dispatch_pointer(&mut editor, &event, origin));
        assert_eq!(editor.vertices(), &[Vertex::new(12.0, 22.0)]);
    }

    #[test]
    fn test_shift_snaps_to_grid() {
        let mut editor = PolygonEditor::new();
        let event = PointerEvent::new(PointerKind::Click, 23.0, 37.0).with_shift(true);
        dispatch_pointer(&mut editor, &event, Some(SurfaceOrigin::new(3.0, 7.0)));
        assert_eq!(editor.vertices(), &[Vertex::new(20.0, 30.0)]);
    }

    #[test]
    fn test_hover_and_leave_in_draw() {
        let mut editor = PolygonEditor::new();
        dispatch_pointer(&mut editor, &PointerEvent::new(PointerKind::Move, 5.0, 6.0), None);
        assert_eq!(editor.prospective(), Some(Vertex::new(5.0, 6.0)));

        dispatch_pointer(&mut editor, &PointerEvent::new(PointerKind::Leave, 0.0, 0.0), None);
        assert_eq!(editor.prospective(), None);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_drag_sequence_in_move_mode() {
        let mut editor = editor_with(&[(0.0, 0.0), (5.0, 5.0), (9.0, 9.0)]);
        editor.select_mode(ToolMode::Move);

        let down = PointerEvent::new(PointerKind::Down, 5.0, 5.0).on_vertex(1);
        assert!(dispatch_pointer(&mut editor, &down, None));
        assert_eq!(editor.moving_index(), Some(1));

        let drag = PointerEvent::new(PointerKind::Move, 40.0, 41.0);
        assert!(dispatch_pointer(&mut editor, &drag, None));

        // Release outside any vertex still ends the drag
        let up = PointerEvent::new(PointerKind::Up, 300.0, 300.0);
        assert!(dispatch_pointer(&mut editor, &up, None));
        assert_eq!(editor.moving_index(), None);
        assert_eq!(editor.vertices()[1], Vertex::new(40.0, 41.0));

        // Moving without a drag changes nothing
        let hover = PointerEvent::new(PointerKind::Move, 1.0, 1.0);
        assert!(!dispatch_pointer(&mut editor, &hover, None));
    }

    #[test]
    fn test_leave_ends_drag_in_move_mode() {
        let mut editor = editor_with(&[(0.0, 0.0), (5.0, 5.0), (9.0, 9.0)]);
        editor.select_mode(ToolMode::Move);

        let down = PointerEvent::new(PointerKind::Down, 0.0, 0.0).on_vertex(0);
        assert!(dispatch_pointer(&mut editor, &down, None));
        let drag = PointerEvent::new(PointerKind::Move, 22.0, 23.0);
        assert!(dispatch_pointer(&mut editor, &drag, None));

        let leave = PointerEvent::new(PointerKind::Leave, 500.0, 500.0);
        assert!(dispatch_pointer(&mut editor, &leave, None));
        assert_eq!(editor.moving_index(), None);
        assert_eq!(editor.vertices()[0], Vertex::new(22.0, 23.0));

        // Coming back over the surface doesn't resume the drag
        let back = PointerEvent::new(PointerKind::Move, 1.0, 1.0);
        assert!(!dispatch_pointer(&mut editor, &back, None));
        assert_eq!(editor.vertices()[0], Vertex::new(22.0, 23.0));
    }

    #[test]
    fn test_down_off_vertex_does_not_start_drag() {
        let mut editor = editor_with(&[(0.0, 0.0)]);
        editor.select_mode(ToolMode::Move);
        let down = PointerEvent::new(PointerKind::Down, 50.0, 50.0);
        assert!(!dispatch_pointer(&mut editor, &down, None));
        assert_eq!(editor.moving_index(), None);
    }

    #[test]
    fn test_click_in_split_and_delete() {
        let mut editor = editor_with(&[(0.0, 0.0), (10.0, 0.0)]);

        editor.select_mode(ToolMode::Split);
        let click = PointerEvent::new(PointerKind::Click, 5.0, 0.0).on_vertex(0);
        assert!(dispatch_pointer(&mut editor, &click, None));
        assert_eq!(editor.len(), 3);
        assert_eq!(editor.vertices()[1], Vertex::new(5.0, 0.0));

        editor.select_mode(ToolMode::Delete);
        let click = PointerEvent::new(PointerKind::Click, 0.0, 0.0).on_vertex(0);
        assert!(dispatch_pointer(&mut editor, &click, None));
        assert_eq!(editor.vertices(), &[Vertex::new(5.0, 0.0), Vertex::new(10.0, 0.0)]);
    }

    #[test]
    fn test_click_in_move_mode_is_ignored() {
        let mut editor = editor_with(&[(1.0, 1.0)]);
        editor.select_mode(ToolMode::Move);
        let click = PointerEvent::new(PointerKind::Click, 20.0, 20.0);
        assert!(action_for(&editor, &click, None).is_none());
        assert!(!dispatch_pointer(&mut editor, &click, None));
        assert_eq!(editor.len(), 1);
    }

    #[test]
    fn test_pointer_event_json() {
        let event: PointerEvent =
            serde_json::from_str(r#"{"kind":"click","x":3.0,"y":4.0,"target":2}"#).unwrap();
        assert_eq!(event.kind, PointerKind::Click);
        assert_eq!(event.target, Some(2));
        assert!(!event.shift);
    }
}
