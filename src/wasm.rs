//! Browser bindings: a [`WasmEditor`] driven by DOM events from the host page.

use wasm_bindgen::prelude::*;

use crate::config::EditorConfig;
use crate::dispatch::{PointerEvent, PointerKind};
use crate::editor::PolygonEditor;
use crate::export;
use crate::handlers;
use crate::keybindings::KeyCode;
use crate::model::{ImageHandle, ImageRef, ToolMode};
use crate::SurfaceOrigin;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"polyedit WASM ready".into());
}

/// Polygon editor handle for browser renderers.
///
/// The host forwards DOM events here and re-reads the getters after every
/// change notification.
#[wasm_bindgen]
pub struct WasmEditor {
    editor: PolygonEditor,
    config: EditorConfig,
}

impl Default for WasmEditor {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl WasmEditor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmEditor {
        let config = EditorConfig::load_from_local_storage().unwrap_or_default();
        let editor = PolygonEditor::with_preferences(&config.preferences);
        WasmEditor { editor, config }
    }

    /// Select a tool mode by name ("draw", "move", "split", "delete").
    pub fn select_mode(&mut self, mode: &str) -> bool {
        match ToolMode::from_name(mode) {
            Some(mode) => handlers::handle_select_mode(&mut self.editor, mode),
            None => {
                log::warn!("Unknown tool mode '{}'", mode);
                false
            }
        }
    }

    /// Forward a pointer event. `origin_x`/`origin_y` come from the surface's
    /// bounding rectangle at the time of the event.
    #[expect(clippy::too_many_arguments)]
    pub fn pointer(
        &mut self,
        kind: &str,
        x: f64,
        y: f64,
        origin_x: f64,
        origin_y: f64,
        target: Option<u32>,
        shift: bool,
    ) -> bool {
        let Some(kind) = PointerKind::from_name(kind) else {
            log::warn!("Unknown pointer event kind '{}'", kind);
            return false;
        };
        let event = PointerEvent {
            kind,
            x,
            y,
            target: target.map(|t| t as usize),
            shift,
        };
        handlers::handle_pointer(
            &mut self.editor,
            &event,
            Some(SurfaceOrigin::new(origin_x, origin_y)),
        )
    }

    /// Forward a key press using `KeyboardEvent.key` naming.
    pub fn key(&mut self, key: &str) -> bool {
        match KeyCode::from_key_name(key) {
            Some(key) => handlers::handle_key(&mut self.editor, &self.config.keybindings, key),
            None => false,
        }
    }

    /// Bind a mode to a new key (`KeyboardEvent.key` naming). Fails if the
    /// key is unknown or already bound. Call `save_config` to persist it.
    pub fn rebind_mode(&mut self, mode: &str, key: &str) -> Result<(), JsValue> {
        let mode = ToolMode::from_name(mode)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown tool mode '{}'", mode)))?;
        let key = KeyCode::from_key_name(key)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown key '{}'", key)))?;
        self.config
            .keybindings
            .rebind_tool(mode, key)
            .map_err(|e| JsValue::from_str(&e))?;
        log::info!("⌨️ {} mode bound to {}", mode, key);
        Ok(())
    }

    pub fn undo_last(&mut self) -> bool {
        self.editor.undo_last()
    }

    /// Clear the polygon; `confirmed` is the answer from the host's confirm prompt.
    pub fn request_clear(&mut self, confirmed: bool) -> bool {
        handlers::handle_clear(&mut self.editor, confirmed)
    }

    /// Whether `request_clear` needs the host to ask the user first.
    pub fn needs_clear_confirmation(&self) -> bool {
        self.editor.confirm_clear() && !self.editor.is_empty()
    }

    pub fn load_image(&mut self, handle: String, natural_width: u32, natural_height: u32) {
        let image = ImageRef::new(ImageHandle::new(handle), natural_width, natural_height);
        handlers::handle_image_loaded(&mut self.editor, image);
    }

    /// Probe encoded image bytes for their natural size and load them.
    pub fn load_image_bytes(&mut self, handle: String, bytes: &[u8]) -> Result<(), JsValue> {
        let image = ImageRef::from_bytes(ImageHandle::new(handle), bytes)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        handlers::handle_image_loaded(&mut self.editor, image);
        Ok(())
    }

    pub fn export_json(&self) -> String {
        export::to_json(self.editor.vertices())
    }

    pub fn svg_points(&self) -> String {
        export::to_svg_points(self.editor.vertices())
    }

    pub fn mode(&self) -> String {
        self.editor.mode().name().to_lowercase()
    }

    /// Whether a mode button should be enabled.
    pub fn is_mode_available(&self, mode: &str) -> bool {
        ToolMode::from_name(mode).is_some_and(|m| m.is_available(self.editor.len()))
    }

    pub fn vertex_count(&self) -> usize {
        self.editor.len()
    }

    pub fn moving_index(&self) -> Option<u32> {
        self.editor.moving_index().map(|i| i as u32)
    }

    /// Hover preview point as `[x, y]`, if any.
    pub fn prospective(&self) -> Option<Vec<f64>> {
        self.editor.prospective().map(|p| vec![p.x, p.y])
    }

    /// Register a callback receiving the name of each change ("vertices", "mode", ...).
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u64 {
        self.editor.subscribe(move |change| {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(change.name())) {
                log::warn!("Change listener threw: {:?}", e);
            }
        })
    }

    pub fn unsubscribe(&mut self, id: u64) -> bool {
        self.editor.unsubscribe(id)
    }

    pub fn save_config(&self) -> Result<(), JsValue> {
        self.config
            .save_to_local_storage()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
