//! Polygon vertex geometry.

use serde::{Deserialize, Serialize};

/// Minimum number of vertices for the polygon to form a closed shape.
///
/// Fewer vertices is still a legal editor state, it just doesn't enclose an area.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// A polygon vertex in surface-local pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Arithmetic midpoint between this vertex and another.
    pub fn midpoint(&self, other: &Vertex) -> Vertex {
        Vertex::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl From<(f64, f64)> for Vertex {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Vertex> for (f64, f64) {
    fn from(v: Vertex) -> Self {
        (v.x, v.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midpoint() {
        let m = Vertex::new(20.0, 20.0).midpoint(&Vertex::new(10.0, 10.0));
        assert_eq!(m, Vertex::new(15.0, 15.0));

        // Midpoints are not rounded back onto the pixel grid
        let m = Vertex::new(0.0, 0.0).midpoint(&Vertex::new(5.0, 1.0));
        assert_eq!(m, Vertex::new(2.5, 0.5));
    }

    #[test]
    fn test_midpoint_with_itself() {
        let v = Vertex::new(7.0, -3.0);
        assert_eq!(v.midpoint(&v), v);
    }
}
