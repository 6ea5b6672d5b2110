//! Pixel dump parsing: build a [`PixelMatrix`] from an ImageMagick
//! `txt:` enumeration.
//!
//! The format looks like:
//!
//! ```text
//! # ImageMagick pixel enumeration: 3,2,255,gray
//! 0,0: (255)  #FFFFFF  gray(255)
//! 1,0: (0)  #000000  gray(0)
//! ...
//! ```
//!
//! - Line 1 declares the dimensions after `": "` as `<width>,<height>`
//!   (anything after the second comma is ignored).
//! - Later lines starting with `#` are comments; blank lines are skipped.
//! - Each data line is `<column>,<row>: ...` with the color being the
//!   token after the first `#`, up to the next whitespace.
//!
//! Parsing fails fast: a bad header, a bad data line, a coordinate
//! outside the declared size, or a pixel that never gets a value is an
//! error rather than a partially filled matrix.

use crate::matrix::PixelMatrix;
use crate::types::{Color, PipelineError};

/// Upper bound on the pixel count a dump header may declare.
pub const MAX_DUMP_PIXELS: usize = 1 << 28;

/// Parse a pixel dump into a matrix.
///
/// Memory use follows the dump's data lines, not the declared size: a
/// header claiming a huge image with too few lines fails with
/// [`PipelineError::MissingPixel`] before any per-pixel storage exists.
///
/// # Errors
///
/// - [`PipelineError::MalformedHeader`] if the first line is missing,
///   has no `": "`, or its dimensions are not positive integers.
/// - [`PipelineError::MalformedPixel`] if a data line lacks a
///   `<column>,<row>:` prefix or a `#<hex>` color.
/// - [`PipelineError::PixelOutOfBounds`] if a data line names a pixel
///   outside the declared dimensions.
/// - [`PipelineError::MissingPixel`] if some pixel is never assigned.
pub fn parse_dump(text: &str) -> Result<PixelMatrix, PipelineError> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| PipelineError::MalformedHeader("dump is empty".to_owned()))?;
    let (width, height) = parse_header(header)?;

    let mut entries: Vec<(usize, Color)> = Vec::new();

    // Line numbers are 1-based and the header was line 1.
    for (line_no, line) in (2..).zip(lines) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (column, row, color) = parse_pixel(line).map_err(|reason| {
            PipelineError::MalformedPixel {
                line: line_no,
                reason,
            }
        })?;
        if column >= width || row >= height {
            return Err(PipelineError::PixelOutOfBounds {
                line: line_no,
                column,
                row,
                width,
                height,
            });
        }
        entries.push((row as usize * width as usize + column as usize, color));
    }

    // Stable, so equal indices stay in line order and the last one wins.
    entries.sort_by_key(|&(index, _)| index);
    let mut pixels: Vec<Color> = Vec::with_capacity(entries.len());
    let mut next = 0;
    for (index, color) in entries {
        if index + 1 == next {
            if let Some(last) = pixels.last_mut() {
                *last = color;
            }
            continue;
        }
        if index != next {
            return Err(missing_pixel(next, width));
        }
        pixels.push(color);
        next += 1;
    }
    if next < width as usize * height as usize {
        return Err(missing_pixel(next, width));
    }

    PixelMatrix::new(width, height, pixels)
}

fn missing_pixel(index: usize, width: u32) -> PipelineError {
    let (row, column) = (index / width as usize, index % width as usize);
    PipelineError::MissingPixel {
        row: u32::try_from(row).unwrap_or(u32::MAX),
        column: u32::try_from(column).unwrap_or(u32::MAX),
    }
}

/// Parse `<prefix>: <width>,<height>[,...]`.
fn parse_header(header: &str) -> Result<(u32, u32), PipelineError> {
    let malformed = |reason: &str| PipelineError::MalformedHeader(format!("{reason}: {header:?}"));

    let (_, dims) = header
        .split_once(": ")
        .ok_or_else(|| malformed("missing \": \" separator"))?;
    let mut parts = dims.split(',').map(str::trim);
    let width: u32 = parts
        .next()
        .and_then(|w| w.parse().ok())
        .ok_or_else(|| malformed("unreadable width"))?;
    let height: u32 = parts
        .next()
        .and_then(|h| h.parse().ok())
        .ok_or_else(|| malformed("unreadable height"))?;

    if width == 0 || height == 0 {
        return Err(malformed("zero dimension"));
    }
    match (width as usize).checked_mul(height as usize) {
        Some(n) if n <= MAX_DUMP_PIXELS => Ok((width, height)),
        _ => Err(malformed("image too large")),
    }
}

/// Parse one data line into `(column, row, color)`.
fn parse_pixel(line: &str) -> Result<(u32, u32, Color), String> {
    let (coords, rest) = line
        .split_once(':')
        .ok_or_else(|| "missing ':' after coordinates".to_owned())?;
    let (column, row) = coords
        .split_once(',')
        .ok_or_else(|| format!("coordinates {coords:?} are not <column>,<row>"))?;
    let column: u32 = column
        .trim()
        .parse()
        .map_err(|e| format!("bad column {column:?}: {e}"))?;
    let row: u32 = row
        .trim()
        .parse()
        .map_err(|e| format!("bad row {row:?}: {e}"))?;

    let (_, after_hash) = rest
        .split_once('#')
        .ok_or_else(|| "missing '#' color".to_owned())?;
    let token = after_hash.split_whitespace().next().unwrap_or_default();
    let color = token.parse::<Color>().map_err(|e| e.to_string())?;

    Ok((column, row, color))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const HEADER: &str = "# ImageMagick pixel enumeration: 2,2,255,gray";

    fn dump(body: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for line in body {
            text.push('\n');
            text.push_str(line);
        }
        text
    }

    #[test]
    fn parses_imagemagick_gray_dump() {
        let text = dump(&[
            "0,0: (255)  #FFFFFF  gray(255)",
            "1,0: (0)  #000000  gray(0)",
            "0,1: (0)  #000000  gray(0)",
            "1,1: (255)  #FFFFFF  gray(255)",
        ]);
        let m = parse_dump(&text).unwrap();
        assert_eq!(m.width(), 2);
        assert_eq!(m.height(), 2);
        assert_eq!(m.get(0, 0), Some(&Color::gray(255)));
        assert_eq!(m.get(0, 1), Some(&Color::gray(0)));
        assert_eq!(m.get(1, 0), Some(&Color::gray(0)));
        assert_eq!(m.get(1, 1), Some(&Color::gray(255)));
    }

    #[test]
    fn column_comes_before_row() {
        // 3 wide, 1 tall: only column can reach 2.
        let text = "# enumeration: 3,1\n0,0: #000000\n1,0: #111111\n2,0: #222222";
        let m = parse_dump(text).unwrap();
        assert_eq!(m.get(0, 2).unwrap().as_str(), "222222");
    }

    #[test]
    fn skips_comments_blank_lines_and_crlf() {
        let text = "# enumeration: 1,2\r\n\r\n# a comment\r\n0,0: (0)  #000000\r\n   \r\n0,1: (1)  #010101\r\n";
        let m = parse_dump(text).unwrap();
        assert_eq!(m.get(1, 0).unwrap().as_str(), "010101");
    }

    #[test]
    fn sixteen_bit_and_alpha_colors_are_opaque_tokens() {
        let text = "# enumeration: 2,1,65535,srgba\n0,0: (65535,65535,65535,65535)  #FFFFFFFFFFFFFFFF  white\n1,0: (0,0,0,65535)  #000000000000FFFF  black";
        let m = parse_dump(text).unwrap();
        assert_ne!(m.get(0, 0), m.get(0, 1));
        assert_eq!(m.get(0, 1).unwrap().as_str(), "000000000000FFFF");
    }

    #[test]
    fn later_line_overwrites_earlier() {
        let text = "# enumeration: 1,1\n0,0: #000000\n0,0: #ABCDEF";
        let m = parse_dump(text).unwrap();
        assert_eq!(m.corner().as_str(), "ABCDEF");
    }

    #[test]
    fn empty_dump_is_malformed_header() {
        assert!(matches!(
            parse_dump(""),
            Err(PipelineError::MalformedHeader(_))
        ));
    }

    #[test]
    fn header_without_separator_is_malformed() {
        assert!(matches!(
            parse_dump("# ImageMagick pixel enumeration 2,2"),
            Err(PipelineError::MalformedHeader(_))
        ));
    }

    #[test]
    fn header_with_bad_or_zero_dimensions_is_malformed() {
        for header in ["# x: two,2", "# x: 2", "# x: 0,4", "# x: 4,0", "# x: 70000,70000"] {
            assert!(
                matches!(parse_dump(header), Err(PipelineError::MalformedHeader(_))),
                "expected MalformedHeader for {header:?}",
            );
        }
    }

    #[test]
    fn pixel_without_color_is_malformed() {
        let text = dump(&["0,0: (255)  gray(255)"]);
        let err = parse_dump(&text).unwrap_err();
        assert!(
            matches!(err, PipelineError::MalformedPixel { line: 2, .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn pixel_with_bad_coordinates_is_malformed() {
        for line in ["a,0: #000000", "0;0: #000000", "0,0 #000000", "0,-1: #000000"] {
            let text = dump(&[line]);
            assert!(
                matches!(
                    parse_dump(&text),
                    Err(PipelineError::MalformedPixel { .. })
                ),
                "expected MalformedPixel for {line:?}",
            );
        }
    }

    #[test]
    fn pixel_outside_dimensions_is_rejected() {
        let text = dump(&["2,0: #000000"]);
        assert!(matches!(
            parse_dump(&text),
            Err(PipelineError::PixelOutOfBounds {
                line: 2,
                column: 2,
                row: 0,
                ..
            })
        ));
    }

    #[test]
    fn missing_pixel_is_reported() {
        let text = dump(&["0,0: #000000", "1,0: #000000", "0,1: #000000"]);
        assert!(matches!(
            parse_dump(&text),
            Err(PipelineError::MissingPixel { row: 1, column: 1 })
        ));
    }

    #[test]
    fn huge_header_without_data_fails_fast() {
        let err = parse_dump("# x: 16384,16384").unwrap_err();
        assert!(
            matches!(err, PipelineError::MissingPixel { row: 0, column: 0 }),
            "got {err:?}"
        );
    }

    #[test]
    fn repeated_lines_do_not_cover_missing_pixels() {
        let text = dump(&["0,0: #000000", "0,0: #FFFFFF", "1,0: #000000", "1,1: #000000"]);
        assert!(matches!(
            parse_dump(&text),
            Err(PipelineError::MissingPixel { row: 1, column: 0 })
        ));
    }

    #[test]
    fn out_of_order_lines_fill_row_major() {
        let text = dump(&[
            "1,1: #444444",
            "0,1: #333333",
            "1,0: #222222",
            "0,0: #111111",
        ]);
        let m = parse_dump(&text).unwrap();
        assert_eq!(m.get(0, 0).unwrap().as_str(), "111111");
        assert_eq!(m.get(0, 1).unwrap().as_str(), "222222");
        assert_eq!(m.get(1, 0).unwrap().as_str(), "333333");
        assert_eq!(m.get(1, 1).unwrap().as_str(), "444444");
    }
}
