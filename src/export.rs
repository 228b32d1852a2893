//! Vertex list export for display and hand-off.
//!
//! Produces the `[[x1,y1],[x2,y2],...]` coordinate list shown next to the
//! editor. Integral coordinates are written without a fractional part so a
//! polygon drawn on whole pixels reads `[[10,10],[20,10]]`; split midpoints
//! keep their fraction.

use serde_json::Value;

use crate::model::Vertex;

/// Largest magnitude at which an f64 still represents every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn coordinate(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER {
        Value::from(value as i64)
    } else {
        Value::from(value)
    }
}

/// Build the JSON array for a vertex list.
pub fn to_value(vertices: &[Vertex]) -> Value {
    Value::Array(
        vertices
            .iter()
            .map(|v| Value::Array(vec![coordinate(v.x), coordinate(v.y)]))
            .collect(),
    )
}

/// Compact export, e.g. `[[10,10],[20,10],[20,20]]`.
pub fn to_json(vertices: &[Vertex]) -> String {
    to_value(vertices).to_string()
}

/// Indented export for human display.
pub fn to_json_pretty(vertices: &[Vertex]) -> String {
    format!("{:#}", to_value(vertices))
}

/// Space-separated `x,y` pairs, as used by an SVG `points` attribute.
pub fn to_svg_points(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(|v| format!("{},{}", v.x, v.y))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Read a vertex list in the export format.
pub fn parse_vertices(json: &str) -> Result<Vec<Vertex>, serde_json::Error> {
    let pairs: Vec<[f64; 2]> = serde_json::from_str(json)?;
    Ok(pairs.into_iter().map(|[x, y]| Vertex::new(x, y)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vertex> {
        vec![
            Vertex::new(10.0, 10.0),
            Vertex::new(20.0, 10.0),
            Vertex::new(20.0, 20.0),
        ]
    }

    #[test]
    fn test_compact_json_uses_integers() {
        assert_eq!(to_json(&square()), "[[10,10],[20,10],[20,20]]");
    }

    #[test]
    fn test_fractional_coordinates_are_kept() {
        let vertices = vec![Vertex::new(2.5, 0.0), Vertex::new(-3.0, 7.25)];
        assert_eq!(to_json(&vertices), "[[2.5,0],[-3,7.25]]");
    }

    #[test]
    fn test_empty_export() {
        assert_eq!(to_json(&[]), "[]");
        assert_eq!(to_svg_points(&[]), "");
    }

    #[test]
    fn test_pretty_json_parses_back() {
        let pretty = to_json_pretty(&square());
        assert!(pretty.contains('\n'));
        assert_eq!(parse_vertices(&pretty).unwrap(), square());
    }

    #[test]
    fn test_svg_points() {
        let mut vertices = square();
        vertices.push(Vertex::new(15.5, 15.0));
        assert_eq!(to_svg_points(&vertices), "10,10 20,10 20,20 15.5,15");
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        assert!(parse_vertices("[[1,2,3]]").is_err());
        assert!(parse_vertices("{\"x\": 1}").is_err());
    }
}
