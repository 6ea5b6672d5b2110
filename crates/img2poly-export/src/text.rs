//! Plain-text presenters.
//!
//! - [`render_pixels`] draws the matrix as `|`-delimited rows, a space
//!   for background and `X` for everything else, so the classification
//!   can be checked by eye.
//! - [`render_polygon`] lists the polygon one `{"x":.., "y":..}` record
//!   per line. The first record is bare and every later one starts with
//!   a comma, so the lines concatenate into a valid JSON array.
//! - [`render_report`] combines both into the full output of a run.

use std::fmt::Write;

use img2poly_pipeline::{Color, PixelMatrix, Polygon};

/// Draw the matrix, preceded by an `image dimensions: W, H` line.
#[must_use]
pub fn render_pixels(matrix: &PixelMatrix, background: &Color) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "image dimensions: {}, {}",
        matrix.width(),
        matrix.height()
    );
    for row in matrix.rows() {
        out.push('|');
        out.extend(row.iter().map(|c| if c == background { ' ' } else { 'X' }));
        out.push('|');
        out.push('\n');
    }
    out
}

/// List the polygon in traversal order.
///
/// An empty polygon renders as `[]`.
///
/// # Examples
///
/// ```
/// use img2poly_pipeline::{Point, Polygon};
/// use img2poly_export::render_polygon;
///
/// let polygon = Polygon::new(vec![Point::new(1, 2), Point::new(3, 4)]);
/// assert_eq!(
///     render_polygon(&polygon),
///     "[\n{\"x\":1, \"y\":2}\n,{\"x\":3, \"y\":4}\n]\n",
/// );
/// ```
#[must_use]
pub fn render_polygon(polygon: &Polygon) -> String {
    let mut out = String::new();
    if polygon.is_empty() {
        let _ = writeln!(out, "[]");
        return out;
    }

    let _ = writeln!(out, "[");
    for (i, p) in polygon.points().iter().enumerate() {
        let sep = if i == 0 { "" } else { "," };
        let _ = writeln!(out, "{sep}{{\"x\":{}, \"y\":{}}}", p.x, p.y);
    }
    let _ = writeln!(out, "]");
    out
}

/// The full text output of a run: pixel drawing, then a `Polygon JSON`
/// heading set off by blank lines, then the polygon listing.
#[must_use]
pub fn render_report(matrix: &PixelMatrix, background: &Color, polygon: &Polygon) -> String {
    let mut out = render_pixels(matrix, background);
    let _ = writeln!(out);
    let _ = writeln!(out, "Polygon JSON");
    let _ = writeln!(out);
    out.push_str(&render_polygon(polygon));
    out
}
