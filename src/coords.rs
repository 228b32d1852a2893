//! Pointer-to-surface coordinate resolution.
//!
//! Converts a raw pointer position plus the origin of the interactive surface
//! into snapped, surface-local coordinates. Kept free of any display
//! environment so it can be tested directly; the renderer supplies the
//! surface origin with every event.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SNAP_UNIT, FINE_SNAP_UNIT};
use crate::model::Vertex;

/// Top-left corner of the interactive surface, in the same space as pointer positions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SurfaceOrigin {
    pub x: f64,
    pub y: f64,
}

impl SurfaceOrigin {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Resolves pointer positions onto the editing grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateResolver {
    /// Grid size used while the snap modifier is held.
    pub snap_unit: f64,
}

impl Default for CoordinateResolver {
    fn default() -> Self {
        Self {
            snap_unit: DEFAULT_SNAP_UNIT,
        }
    }
}

impl CoordinateResolver {
    /// Create a resolver with a custom snap grid. Non-positive or non-finite
    /// units fall back to the default grid.
    pub fn new(snap_unit: f64) -> Self {
        if snap_unit.is_finite() && snap_unit > 0.0 {
            Self { snap_unit }
        } else {
            log::warn!(
                "Invalid snap unit {}, using {}",
                snap_unit,
                DEFAULT_SNAP_UNIT
            );
            Self::default()
        }
    }

    /// The grid size in effect for the given modifier state.
    pub fn unit(&self, snap_active: bool) -> f64 {
        if snap_active {
            self.snap_unit
        } else {
            FINE_SNAP_UNIT
        }
    }

    /// Convert a pointer position into snapped surface-local coordinates.
    ///
    /// # Arguments
    /// * `pointer_x`, `pointer_y` - Pointer position in the renderer's space
    /// * `origin` - Surface origin in the same space, `None` is treated as (0, 0)
    /// * `snap_active` - Whether the snap modifier (Shift) is held
    pub fn resolve(
        &self,
        pointer_x: f64,
        pointer_y: f64,
        origin: Option<SurfaceOrigin>,
        snap_active: bool,
    ) -> Vertex {
        let origin = origin.unwrap_or_default();
        let unit = self.unit(snap_active);
        Vertex::new(
            snap(pointer_x - origin.x, unit),
            snap(pointer_y - origin.y, unit),
        )
    }
}

/// Resolve with the default snap grid.
pub fn resolve(
    pointer_x: f64,
    pointer_y: f64,
    origin: Option<SurfaceOrigin>,
    snap_active: bool,
) -> Vertex {
    CoordinateResolver::default().resolve(pointer_x, pointer_y, origin, snap_active)
}

/// Round `value` to the nearest multiple of `unit`. Ties round toward
/// positive infinity so that results don't flip around zero.
fn snap(value: f64, unit: f64) -> f64 {
    let snapped = (value / unit + 0.5).floor() * unit;
    // Normalize -0.0 so exported coordinates never print a sign on zero
    if snapped == 0.0 { 0.0 } else { snapped }
}
