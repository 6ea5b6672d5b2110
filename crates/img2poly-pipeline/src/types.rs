//! Shared types for the img2poly pipeline.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::matrix::PixelMatrix;

/// A pixel position in image coordinates.
///
/// `x` is the column and `y` is the row, both 0-indexed from the
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    /// Column (pixels from left edge).
    pub x: u32,
    /// Row (pixels from top edge).
    pub y: u32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Exact in integer arithmetic, so comparing squared distances picks
    /// the same minimum (and the same ties) as comparing real distances.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> u64 {
        let dx = u64::from(self.x.abs_diff(other.x));
        let dy = u64::from(self.y.abs_diff(other.y));
        // Each square fits in u64; their sum may not.
        (dx * dx).saturating_add(dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn distance(self, other: Self) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// An opaque, comparable color sample.
///
/// Stored as the upper-case hex digits that follow `#` in a pixel dump,
/// e.g. `FFFFFF`. Two colors are the same exactly when their digits are.
///
/// Deserialization goes through [`FromStr`], so `"#ffffff"` in JSON
/// yields the same color as `FFFFFF` in a dump.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    /// The color of a gray level, in the same form ImageMagick prints for
    /// an 8-bit grayscale pixel (`#RRGGBB` with equal channels).
    #[must_use]
    pub fn gray(level: u8) -> Self {
        Self(format!("{level:02X}{level:02X}{level:02X}"))
    }

    /// The hex digits of this color, without a leading `#`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for Color {
    type Err = PipelineError;

    /// Parse hex digits, with or without a leading `#`. Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PipelineError::InvalidColor(s.to_owned()));
        }
        Ok(Self(digits.to_ascii_uppercase()))
    }
}

impl TryFrom<String> for Color {
    type Error = PipelineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// An ordered closed loop of boundary points.
///
/// The loop is closed implicitly: the last point is *not* a repeat of the
/// first, and renderers draw the closing edge themselves. An empty
/// polygon means the image had no foreground.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon(Vec<Point>);

impl Polygon {
    /// Create a polygon from points already in traversal order.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the polygon has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the polygon.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns the first point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&Point> {
        self.0.first()
    }

    /// Returns the last point, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Point> {
        self.0.last()
    }

    /// Returns a slice of all points in traversal order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the polygon and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }

    /// Total length of the closed loop, including the implicit edge from
    /// the last point back to the first.
    #[must_use]
    pub fn perimeter(&self) -> f64 {
        let open: f64 = self.0.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.first(), self.last()) {
            (Some(first), Some(last)) => open + last.distance(*first),
            _ => 0.0,
        }
    }
}

/// Which kind of polygon the caller asked for.
///
/// [`ConvexHull`](Self::ConvexHull) is accepted and carried through to
/// the result, but is reserved: it currently produces the same boundary
/// trace as [`Normal`](Self::Normal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolygonMode {
    /// Ordered boundary trace.
    #[default]
    Normal,
    /// Reserved name; traced the same way as [`Normal`](Self::Normal).
    ConvexHull,
}

impl PolygonMode {
    /// The name used on the command line and in JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::ConvexHull => "convexHull",
        }
    }
}

/// How to decide which color is background.
///
/// The rule is resolved once per run; every pixel is then classified
/// against that single color.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Background {
    /// Sample the pixel at row 0, column 0.
    #[default]
    Corner,
    /// Use a fixed color.
    Explicit(Color),
}

impl Background {
    /// Resolve the rule against a matrix.
    #[must_use]
    pub fn resolve(&self, matrix: &PixelMatrix) -> Color {
        match self {
            Self::Corner => matrix.corner().clone(),
            Self::Explicit(color) => color.clone(),
        }
    }
}

/// Configuration for the polygon pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Requested polygon kind.
    pub mode: PolygonMode,

    /// Background color rule.
    pub background: Background,

    /// How many greedy nearest-neighbor ordering passes to run over the
    /// boundary points. A single pass can leave a visible crossing where
    /// a skipped point gets picked up late; a second pass over the
    /// already-chained output reduces that in practice.
    pub ordering_passes: usize,
}

impl PipelineConfig {
    /// Default polygon mode.
    pub const DEFAULT_MODE: PolygonMode = PolygonMode::Normal;

    /// Default number of ordering passes.
    pub const DEFAULT_ORDERING_PASSES: usize = 2;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: Self::DEFAULT_MODE,
            background: Background::default(),
            ordering_passes: Self::DEFAULT_ORDERING_PASSES,
        }
    }
}

/// Result of running the pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
    /// The polygon kind that was requested.
    pub mode: PolygonMode,

    /// Dimensions of the source image in pixels.
    pub dimensions: Dimensions,

    /// The resolved background color.
    pub background: Color,

    /// The ordered boundary loop. Empty when the image has no
    /// foreground pixels.
    pub polygon: Polygon,
}

/// Errors that can occur while building a pixel matrix or running the
/// pipeline.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input image bytes were empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// Failed to decode the input image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The pixel dump's dimension header is missing or unreadable.
    #[error("malformed pixel dump header: {0}")]
    MalformedHeader(String),

    /// A pixel line in the dump could not be parsed.
    #[error("malformed pixel on line {line}: {reason}")]
    MalformedPixel {
        /// 1-based line number in the dump.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },

    /// A pixel line names a coordinate outside the declared dimensions.
    #[error("pixel ({column},{row}) on line {line} is outside the {width}x{height} image")]
    PixelOutOfBounds {
        /// 1-based line number in the dump.
        line: usize,
        /// Column of the offending pixel.
        column: u32,
        /// Row of the offending pixel.
        row: u32,
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },

    /// The dump never assigned a color to this pixel.
    #[error("pixel dump has no value for pixel ({column},{row})")]
    MissingPixel {
        /// Row of the missing pixel.
        row: u32,
        /// Column of the missing pixel.
        column: u32,
    },

    /// Matrix dimensions and sample count disagree, or a dimension is zero.
    #[error("invalid pixel matrix: {0}")]
    InvalidMatrix(String),

    /// A color string is not a hex color.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Point tests ---

    #[test]
    fn point_distance_squared() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_squared(b), 25);
        assert_eq!(b.distance_squared(a), 25);
    }

    #[test]
    fn point_distance_squared_saturates_at_extremes() {
        let a = Point::new(0, 0);
        let b = Point::new(u32::MAX, u32::MAX);
        assert_eq!(a.distance_squared(b), u64::MAX);
        assert_eq!(
            a.distance_squared(Point::new(u32::MAX, 0)),
            u64::from(u32::MAX) * u64::from(u32::MAX)
        );
    }

    #[test]
    fn point_distance() {
        let a = Point::new(1, 1);
        let b = Point::new(4, 5);
        assert!((a.distance(b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn point_serializes_as_xy_record() {
        let json = serde_json::to_string(&Point::new(2, 7)).unwrap();
        assert_eq!(json, r#"{"x":2,"y":7}"#);
    }

    // --- Color tests ---

    #[test]
    fn color_parse_normalizes_case_and_hash() {
        let a: Color = "#ffffff".parse().unwrap();
        let b: Color = "FFFFFF".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "FFFFFF");
        assert_eq!(a.to_string(), "#FFFFFF");
    }

    #[test]
    fn color_parse_rejects_non_hex() {
        assert!(matches!(
            "gray(255)".parse::<Color>(),
            Err(PipelineError::InvalidColor(_))
        ));
        assert!(matches!(
            "#".parse::<Color>(),
            Err(PipelineError::InvalidColor(_))
        ));
    }

    #[test]
    fn color_json_is_normalized_like_parse() {
        let color: Color = serde_json::from_str(r##""#00ff7f""##).unwrap();
        assert_eq!(color.as_str(), "00FF7F");
        assert_eq!(serde_json::to_string(&color).unwrap(), r#""00FF7F""#);
    }

    #[test]
    fn color_json_rejects_non_hex() {
        assert!(serde_json::from_str::<Color>(r#""gray(0)""#).is_err());
    }

    #[test]
    fn gray_matches_dump_form() {
        assert_eq!(Color::gray(0).as_str(), "000000");
        assert_eq!(Color::gray(255).as_str(), "FFFFFF");
        assert_eq!(Color::gray(0x1A).as_str(), "1A1A1A");
    }

    // --- Polygon tests ---

    #[test]
    fn perimeter_includes_closing_edge() {
        let square = Polygon::new(vec![
            Point::new(0, 0),
            Point::new(2, 0),
            Point::new(2, 2),
            Point::new(0, 2),
        ]);
        assert!((square.perimeter() - 8.0).abs() < 1e-12);
    }

    #[test]
    fn perimeter_of_empty_and_single_is_zero() {
        assert!(Polygon::default().perimeter().abs() < f64::EPSILON);
        let single = Polygon::new(vec![Point::new(3, 3)]);
        assert!(single.perimeter().abs() < f64::EPSILON);
    }

    // --- Config tests ---

    #[test]
    fn default_config_runs_two_passes_on_corner_background() {
        let config = PipelineConfig::default();
        assert_eq!(config.ordering_passes, 2);
        assert_eq!(config.background, Background::Corner);
        assert_eq!(config.mode, PolygonMode::Normal);
    }

    #[test]
    fn config_json_uses_mode_names() {
        let config = PipelineConfig {
            mode: PolygonMode::ConvexHull,
            background: Background::Explicit(Color::gray(0)),
            ordering_passes: 1,
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""mode":"convexHull""#), "got {json}");
        let back: PipelineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_config_json_fills_defaults() {
        let config: PipelineConfig = serde_json::from_str(r#"{"ordering_passes":1}"#).unwrap();
        assert_eq!(config.ordering_passes, 1);
        assert_eq!(config.mode, PolygonMode::Normal);
        assert_eq!(config.background, Background::Corner);
    }

    #[test]
    fn explicit_background_json_matches_dump_colors() {
        let config: PipelineConfig =
            serde_json::from_str(r##"{"background":{"explicit":"#000000"}}"##).unwrap();
        assert_eq!(config.background, Background::Explicit(Color::gray(0)));
    }

    #[test]
    fn mode_names() {
        assert_eq!(PolygonMode::Normal.as_str(), "normal");
        assert_eq!(PolygonMode::ConvexHull.as_str(), "convexHull");
    }
}
