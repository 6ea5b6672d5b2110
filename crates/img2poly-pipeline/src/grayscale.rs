//! In-memory image decoding into a monochrome [`PixelMatrix`].
//!
//! Accepts raw image bytes (PNG, JPEG, BMP, WebP) and produces the same
//! matrix an ImageMagick `-separate -average` conversion would dump:
//! every pixel becomes the mean of its red, green and blue channels,
//! stored as a gray [`Color`].
//!
//! Useful when no external conversion tool is available.

use crate::matrix::PixelMatrix;
use crate::types::{Color, PipelineError};

/// Decode raw image bytes and average the color channels.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_to_matrix(bytes: &[u8]) -> Result<PixelMatrix, PipelineError> {
    if bytes.is_empty() {
        return Err(PipelineError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?.to_rgb8();
    let pixels = img
        .pixels()
        .map(|p| Color::gray(average_channels(p.0)))
        .collect();
    PixelMatrix::new(img.width(), img.height(), pixels)
}

/// Mean of three channels, rounded down.
fn average_channels([r, g, b]: [u8; 3]) -> u8 {
    let sum = u16::from(r) + u16::from(g) + u16::from(b);
    u8::try_from(sum / 3).unwrap_or(u8::MAX)
}
