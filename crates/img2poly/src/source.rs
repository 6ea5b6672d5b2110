//! Where the pixel matrix comes from.
//!
//! The core only understands the ImageMagick pixel dump format (or
//! in-memory image bytes); this module owns how that input is obtained:
//!
//! - [`MatrixSource::Magick`] runs ImageMagick to average the image down
//!   to monochrome and enumerate its pixels, then parses the dump.
//! - [`MatrixSource::Decode`] decodes the image in-process.
//! - [`MatrixSource::Dump`] reads an already produced pixel dump.

use std::ffi::OsStr;
use std::path::Path;
use std::process::Command;

use clap::ValueEnum;
use img2poly_pipeline::PixelMatrix;
use img2poly_pipeline::dump::parse_dump;
use img2poly_pipeline::grayscale::decode_to_matrix;

use crate::error::{AppError, ConvertError};

/// ImageMagick arguments that collapse the image to one averaged
/// channel, placed between the input path and the output target.
pub const MONOCHROME_ARGS: [&str; 5] = ["-set", "colorspace", "monochrome", "-separate", "-average"];

/// Output target asking ImageMagick for a pixel enumeration on stdout.
pub const DUMP_OUTPUT: &str = "txt:-";

/// How to obtain the pixel matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum MatrixSource {
    /// Run ImageMagick and parse its pixel dump.
    #[default]
    Magick,
    /// Decode the image in-process (PNG, JPEG, BMP, WebP).
    Decode,
    /// The input file is already a pixel dump.
    Dump,
}

/// Load the pixel matrix for `image` using `source`.
///
/// # Errors
///
/// Returns [`AppError::Read`] if the file cannot be read,
/// [`AppError::Convert`] if ImageMagick fails, and
/// [`AppError::Pipeline`] if the dump or image is malformed.
pub fn load_matrix(
    source: MatrixSource,
    image: &Path,
    magick_bin: &OsStr,
) -> Result<PixelMatrix, AppError> {
    let matrix = match source {
        MatrixSource::Magick => parse_dump(&magick_dump(magick_bin, image)?)?,
        MatrixSource::Decode => {
            let bytes = std::fs::read(image).map_err(|source| AppError::Read {
                path: image.to_path_buf(),
                source,
            })?;
            decode_to_matrix(&bytes)?
        }
        MatrixSource::Dump => {
            let text = std::fs::read_to_string(image).map_err(|source| AppError::Read {
                path: image.to_path_buf(),
                source,
            })?;
            parse_dump(&text)?
        }
    };
    tracing::debug!(
        ?source,
        width = matrix.width(),
        height = matrix.height(),
        "loaded pixel matrix",
    );
    Ok(matrix)
}

/// Run ImageMagick on `image` and capture its pixel dump.
///
/// Blocks until the tool exits. No intermediate files are written.
///
/// # Errors
///
/// Returns [`ConvertError::Spawn`] if the program cannot be started,
/// [`ConvertError::Failed`] on a non-zero exit, and
/// [`ConvertError::NonUtf8`] if stdout is not UTF-8.
pub fn magick_dump(magick_bin: &OsStr, image: &Path) -> Result<String, ConvertError> {
    let program = magick_bin.to_string_lossy().into_owned();
    tracing::debug!(%program, image = %image.display(), "running image conversion");

    let output = Command::new(magick_bin)
        .arg(image)
        .args(MONOCHROME_ARGS)
        .arg(DUMP_OUTPUT)
        .output()
        .map_err(|source| ConvertError::Spawn {
            program: program.clone(),
            source,
        })?;

    if !output.status.success() {
        return Err(ConvertError::Failed {
            program,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    String::from_utf8(output.stdout).map_err(|_| ConvertError::NonUtf8 { program })
}
