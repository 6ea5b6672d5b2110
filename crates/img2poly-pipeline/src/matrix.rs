//! The pixel matrix: a read-only, row-major grid of color samples.
//!
//! Built once per run (from a pixel dump or a decoded image) and only
//! read afterward. Construction guarantees exactly `height` rows of
//! exactly `width` samples, with both dimensions non-zero, so the
//! corner pixel used as the default background always exists.

use crate::types::{Color, Dimensions, PipelineError};

/// A `width × height` grid of colors, row-major, 0-indexed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    dimensions: Dimensions,
    pixels: Vec<Color>,
}

impl PixelMatrix {
    /// Build a matrix from row-major samples.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidMatrix`] if either dimension is zero
    /// or `pixels.len() != width * height`.
    pub fn new(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::InvalidMatrix(format!(
                "dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = (width as usize).checked_mul(height as usize);
        if expected != Some(pixels.len()) {
            return Err(PipelineError::InvalidMatrix(format!(
                "{width}x{height} image needs {} samples, got {}",
                u64::from(width) * u64::from(height),
                pixels.len(),
            )));
        }
        Ok(Self {
            dimensions: Dimensions { width, height },
            pixels,
        })
    }

    /// Build a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::InvalidMatrix`] if there are no rows, the
    /// first row is empty, or the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self, PipelineError> {
        let height = u32::try_from(rows.len())
            .map_err(|_| PipelineError::InvalidMatrix("too many rows".to_owned()))?;
        let width = rows.first().map_or(0, Vec::len);
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(PipelineError::InvalidMatrix(format!(
                "row {i} has {} samples, expected {width}",
                row.len()
            )));
        }
        let width = u32::try_from(width)
            .map_err(|_| PipelineError::InvalidMatrix("rows too wide".to_owned()))?;
        Self::new(width, height, rows.into_iter().flatten().collect())
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.dimensions.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.dimensions.height
    }

    /// Width and height.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The color at (`row`, `column`), or `None` when out of range.
    #[must_use]
    pub fn get(&self, row: u32, column: u32) -> Option<&Color> {
        if row >= self.height() || column >= self.width() {
            return None;
        }
        self.pixels
            .get(row as usize * self.width() as usize + column as usize)
    }

    /// The color at row 0, column 0.
    #[must_use]
    pub fn corner(&self) -> &Color {
        // Non-empty by construction.
        &self.pixels[0]
    }

    /// Whether (`row`, `column`) lies on the outermost ring of the image.
    #[must_use]
    pub const fn is_border(&self, row: u32, column: u32) -> bool {
        row == 0 || column == 0 || row == self.height() - 1 || column == self.width() - 1
    }

    /// Iterate over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.pixels.chunks_exact(self.width() as usize)
    }
}
