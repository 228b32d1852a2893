//! polyedit - Polygon Annotation Editor
//!
//! The interaction core of an image polygon-annotation editor: tool modes,
//! pointer-driven vertex edits, coordinate snapping and coordinate export.
//! Image decoding and drawing are left to the host, which feeds pointer
//! events in and reads [`EditorView`] back out on every redraw.

pub mod config;
pub mod constants;
pub mod coords;
pub mod dispatch;
pub mod editor;
pub mod export;
pub mod handlers;
pub mod keybindings;
pub mod message;
pub mod model;
pub mod session;

pub use config::EditorConfig;
pub use coords::{CoordinateResolver, SurfaceOrigin};
pub use dispatch::{PointerEvent, PointerKind};
pub use editor::{Change, EditorView, PolygonEditor, SubscriptionId};
pub use message::Message;
pub use model::{ImageHandle, ImageRef, ToolMode, Vertex};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
