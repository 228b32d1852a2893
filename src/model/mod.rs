//! Data models for the polygon editor.

mod image_ref;
mod tool;
mod vertex;

pub use image_ref::{ImageError, ImageHandle, ImageRef};
pub use tool::ToolMode;
pub use vertex::{MIN_POLYGON_VERTICES, Vertex};
