//! img2poly-pipeline: Pure outline pipeline (sans-IO).
//!
//! Converts a monochrome pixel matrix into an ordered polygon outline
//! through:
//! background resolution -> boundary extraction -> loop ordering.
//!
//! The matrix can come from an ImageMagick pixel dump ([`dump`]) or from
//! decoding image bytes in memory ([`grayscale`]). This crate has **no
//! I/O dependencies**: running the conversion tool and reading files
//! lives in the `img2poly` binary.

pub mod boundary;
pub mod dump;
pub mod grayscale;
pub mod matrix;
pub mod order;
pub mod types;

pub use matrix::PixelMatrix;
pub use types::{
    Background, Color, Dimensions, PipelineConfig, PipelineError, Point, Polygon, PolygonMode,
    ProcessResult,
};

/// Run the outline pipeline on a pixel matrix.
///
/// # Pipeline steps
///
/// 1. Resolve the background color (pixel (0,0) unless configured)
/// 2. Boundary extraction
/// 3. Greedy nearest-neighbor ordering, `ordering_passes` times
///
/// [`PolygonMode::ConvexHull`] is recorded in the result but traced the
/// same way as [`PolygonMode::Normal`].
///
/// An image without foreground produces an empty polygon, not an error.
#[must_use = "returns the traced polygon"]
pub fn process(matrix: &PixelMatrix, config: &PipelineConfig) -> ProcessResult {
    // 1. Background.
    let background = config.background.resolve(matrix);

    // 2. Boundary extraction.
    let boundary = boundary::extract_boundary(matrix, &background);
    tracing::debug!(
        width = matrix.width(),
        height = matrix.height(),
        %background,
        boundary = boundary.len(),
        "extracted boundary",
    );

    // 3. Loop ordering.
    let polygon = Polygon::new(order::order_loop_passes(boundary, config.ordering_passes));
    tracing::debug!(
        points = polygon.len(),
        passes = config.ordering_passes,
        perimeter = polygon.perimeter(),
        "ordered loop",
    );

    ProcessResult {
        mode: config.mode,
        dimensions: matrix.dimensions(),
        background,
        polygon,
    }
}

/// Parse an ImageMagick pixel dump and run the pipeline on it.
///
/// # Errors
///
/// Returns any [`dump::parse_dump`] error.
pub fn process_dump(text: &str, config: &PipelineConfig) -> Result<ProcessResult, PipelineError> {
    let matrix = dump::parse_dump(text)?;
    Ok(process(&matrix, config))
}

/// Decode image bytes in memory and run the pipeline on them.
///
/// # Errors
///
/// Returns [`PipelineError::EmptyInput`] if `image_bytes` is empty.
/// Returns [`PipelineError::ImageDecode`] if the image format is unrecognized.
pub fn process_image(
    image_bytes: &[u8],
    config: &PipelineConfig,
) -> Result<ProcessResult, PipelineError> {
    let matrix = grayscale::decode_to_matrix(image_bytes)?;
    Ok(process(&matrix, config))
}
