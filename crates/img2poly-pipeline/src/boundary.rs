//! Boundary extraction: find the foreground pixels that outline the shape.
//!
//! A foreground pixel (any color other than the background) belongs to
//! the boundary when it sits on the outermost ring of the image, or when
//! at least one of its 8 Moore neighbors is background. Interior pixels
//! fully surrounded by foreground are dropped.
//!
//! This is the first stage of the core, between building the pixel
//! matrix and ordering the loop.

use crate::matrix::PixelMatrix;
use crate::types::{Color, Point};

/// Row/column offsets of the Moore neighborhood.
const MOORE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Collect the boundary pixels of the foreground.
///
/// Pixels are visited in row-major order (top to bottom, left to right)
/// and the result keeps that order, though nothing downstream relies on
/// it. Every coordinate appears at most once. An all-background matrix
/// yields an empty vector.
#[must_use = "returns the unordered boundary points"]
pub fn extract_boundary(matrix: &PixelMatrix, background: &Color) -> Vec<Point> {
    let mut boundary = Vec::new();

    for (row, samples) in (0..matrix.height()).zip(matrix.rows()) {
        for (column, color) in (0..matrix.width()).zip(samples) {
            if color == background {
                continue;
            }
            // Border check first: only interior pixels reach the
            // neighbor scan.
            if matrix.is_border(row, column)
                || has_background_neighbor(matrix, background, row, column)
            {
                boundary.push(Point::new(column, row));
            }
        }
    }

    boundary
}

/// Whether any Moore neighbor of (`row`, `column`) has the background color.
fn has_background_neighbor(
    matrix: &PixelMatrix,
    background: &Color,
    row: u32,
    column: u32,
) -> bool {
    MOORE_OFFSETS.iter().any(|&(dr, dc)| {
        match (row.checked_add_signed(dr), column.checked_add_signed(dc)) {
            (Some(r), Some(c)) => matrix.get(r, c) == Some(background),
            _ => false,
        }
    })
}
