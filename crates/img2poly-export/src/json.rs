//! Structured JSON output.
//!
//! Serializes the whole [`ProcessResult`] (mode, dimensions, resolved
//! background and polygon) for machine consumers. Points are
//! `{"x":..,"y":..}` objects in traversal order.

use img2poly_pipeline::ProcessResult;

/// Serialize a pipeline result as pretty-printed JSON.
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn to_json(result: &ProcessResult) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(result)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use img2poly_pipeline::{Color, Dimensions, Point, Polygon, PolygonMode};

    use super::*;

    fn result(points: Vec<Point>) -> ProcessResult {
        ProcessResult {
            mode: PolygonMode::ConvexHull,
            dimensions: Dimensions {
                width: 4,
                height: 3,
            },
            background: Color::gray(255),
            polygon: Polygon::new(points),
        }
    }

    #[test]
    fn fields_are_present() {
        let json = to_json(&result(vec![Point::new(1, 2)])).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mode"], "convexHull");
        assert_eq!(value["dimensions"]["width"], 4);
        assert_eq!(value["dimensions"]["height"], 3);
        assert_eq!(value["background"], "FFFFFF");
        assert_eq!(value["polygon"][0]["x"], 1);
        assert_eq!(value["polygon"][0]["y"], 2);
    }

    #[test]
    fn empty_polygon_is_empty_array() {
        let json = to_json(&result(Vec::new())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["polygon"], serde_json::json!([]));
    }

    #[test]
    fn round_trips_through_process_result() {
        let original = result(vec![Point::new(0, 0), Point::new(3, 2)]);
        let back: ProcessResult = serde_json::from_str(&to_json(&original).unwrap()).unwrap();
        assert_eq!(back, original);
    }
}
