//! SVG preview of a traced polygon.
//!
//! Uses the [`svg`] crate for document construction, XML escaping and
//! path data formatting. The polygon becomes one closed `<path>`
//! (`M`, `L`..., `z`) in pixel coordinates, so the `viewBox` matches the
//! source image grid and the implicit closing edge is drawn.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Rectangle, Title};
use svg::node::{Text, Value};

use img2poly_pipeline::{Dimensions, Polygon};

/// Metadata to embed in the SVG document.
///
/// When present, a `<title>` and/or `<desc>` element is emitted right
/// after the opening `<svg>` tag. Text is XML-escaped by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title, typically the source image file stem.
    pub title: Option<&'a str>,

    /// Document description, typically the pipeline config.
    pub description: Option<&'a str>,
}

/// Build the `d` attribute for a closed loop through the polygon.
///
/// Returns an empty string for polygons with fewer than 2 points.
///
/// # Examples
///
/// ```
/// use img2poly_pipeline::{Point, Polygon};
/// use img2poly_export::svg::build_path_data;
///
/// let polygon = Polygon::new(vec![Point::new(1, 1), Point::new(3, 1), Point::new(3, 4)]);
/// let d = build_path_data(&polygon);
/// assert!(d.starts_with("M1,1 L3,1 L3,4"));
/// ```
#[must_use]
pub fn build_path_data(polygon: &Polygon) -> String {
    let points = polygon.points();
    if points.len() < 2 {
        return String::new();
    }

    let xy = |p: &img2poly_pipeline::Point| (f64::from(p.x), f64::from(p.y));

    let mut data = Data::new().move_to(xy(&points[0]));
    for p in &points[1..] {
        data = data.line_to(xy(p));
    }
    String::from(Value::from(data.close()))
}

/// Serialize a polygon into an SVG document string.
///
/// The `viewBox` is `0 0 width height` from [`Dimensions`]. A polygon
/// with 2 or more points becomes a closed `<path>`; a single point is
/// drawn as a 1×1 `<rect>` on its pixel; an empty polygon produces a
/// document with no shapes.
#[must_use]
pub fn to_svg(polygon: &Polygon, dimensions: Dimensions, metadata: &SvgMetadata<'_>) -> String {
    let w = dimensions.width;
    let h = dimensions.height;
    let mut doc = Document::new()
        .set("width", w)
        .set("height", h)
        .set("viewBox", (0, 0, w, h));

    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    let d = build_path_data(polygon);
    if !d.is_empty() {
        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    } else if let (1, Some(p)) = (polygon.len(), polygon.first()) {
        let rect = Rectangle::new()
            .set("x", p.x)
            .set("y", p.y)
            .set("width", 1)
            .set("height", 1)
            .set("fill", "black");
        doc = doc.add(rect);
    }

    // The svg crate omits the XML declaration, so we prepend it.
    format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
}
