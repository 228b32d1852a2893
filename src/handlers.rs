//! Message handlers for the polygon editor.
//!
//! Each handler processes a specific category of messages, keeping
//! [`update`] a flat router.

use crate::coords::SurfaceOrigin;
use crate::dispatch::{PointerEvent, dispatch_pointer};
use crate::editor::PolygonEditor;
use crate::keybindings::{KeyAction, KeyBindings, KeyCode};
use crate::message::Message;
use crate::model::{ImageRef, ToolMode};

/// Apply a message to the editor. Returns whether the editor state changed.
pub fn update(editor: &mut PolygonEditor, bindings: &KeyBindings, msg: Message) -> bool {
    match msg {
        Message::SelectMode { mode } => handle_select_mode(editor, mode),
        Message::UndoLast => editor.undo_last(),
        Message::Clear { confirm } => handle_clear(editor, confirm),
        Message::Pointer { event, origin } => handle_pointer(editor, &event, origin),
        Message::Key { key } => handle_key(editor, bindings, key),
        Message::ImageLoaded { image } => handle_image_loaded(editor, image),
    }
}

/// Handle a toolbar mode selection.
pub fn handle_select_mode(editor: &mut PolygonEditor, mode: ToolMode) -> bool {
    let before = editor.mode();
    editor.select_mode(mode) && editor.mode() != before
}

/// Handle the clear button, with the user's answer to the confirmation prompt.
pub fn handle_clear(editor: &mut PolygonEditor, confirm: bool) -> bool {
    editor.request_clear(|count| {
        log::debug!(
            "Clear {} vertices? {}",
            count,
            if confirm { "yes" } else { "no" }
        );
        confirm
    })
}

/// Handle a pointer event from the surface renderer.
pub fn handle_pointer(
    editor: &mut PolygonEditor,
    event: &PointerEvent,
    origin: Option<SurfaceOrigin>,
) -> bool {
    log::trace!(
        "Pointer {:?} at ({:.1}, {:.1}) target={:?} shift={}",
        event.kind,
        event.x,
        event.y,
        event.target,
        event.shift
    );
    dispatch_pointer(editor, event, origin)
}

/// Handle a key press using the configured bindings.
pub fn handle_key(editor: &mut PolygonEditor, bindings: &KeyBindings, key: KeyCode) -> bool {
    match bindings.action_for_key(key) {
        Some(KeyAction::SelectMode(mode)) => handle_select_mode(editor, mode),
        Some(KeyAction::UndoLast) => editor.undo_last(),
        None => {
            log::trace!("Unbound key {}", key);
            false
        }
    }
}

/// Handle a finished image load.
pub fn handle_image_loaded(editor: &mut PolygonEditor, image: ImageRef) -> bool {
    editor.load_image(image);
    true
}
