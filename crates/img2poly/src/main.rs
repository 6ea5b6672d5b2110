//! img2poly: convert a monochrome image into an ordered polygon outline.
//!
//! Obtains a pixel matrix for the image (by default through ImageMagick),
//! extracts the boundary of the foreground, chains it into a closed loop
//! and prints the result.
//!
//! # Usage
//!
//! ```text
//! img2poly [OPTIONS] <IMAGE> <MODE>
//! ```
//!
//! `MODE` is `normal` or `convexHull`. Anything else, or the wrong number
//! of positional arguments, prints the short usage text and exits with
//! status 2.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod error;
mod source;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use img2poly_pipeline::{Background, Color, PipelineConfig, PolygonMode};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::AppError;
use crate::source::MatrixSource;

/// Short usage text printed on argument errors.
const USAGE: &str = "usage: img2poly [file] [polygonType]\n   polygonType: normal, convexHull";

/// Exit status for argument errors.
const USAGE_EXIT: u8 = 2;

/// Convert a monochrome image into an ordered polygon outline.
///
/// The background color is taken from the top-left pixel unless
/// `--background` is given. Logging goes to stderr and is controlled by
/// `RUST_LOG`.
#[derive(Parser)]
#[command(name = "img2poly", version)]
struct Cli {
    /// Path to the input image (or pixel dump with `--source dump`).
    image_path: PathBuf,

    /// Polygon type.
    #[arg(value_enum)]
    mode: Mode,

    /// How to obtain the pixel matrix.
    #[arg(long, value_enum, default_value_t = MatrixSource::Magick)]
    source: MatrixSource,

    /// ImageMagick executable used by `--source magick`.
    #[arg(long, default_value = "convert")]
    magick_bin: OsString,

    /// Background color as hex digits (e.g. `FFFFFF`). Defaults to the
    /// color of the top-left pixel.
    #[arg(long)]
    background: Option<Color>,

    /// Number of greedy nearest-neighbor ordering passes.
    #[arg(long, default_value_t = PipelineConfig::DEFAULT_ORDERING_PASSES)]
    ordering_passes: usize,

    /// Output format on stdout.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Also write an SVG preview of the polygon to this file.
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Full pipeline config as a JSON string.
    ///
    /// When provided, `--background` and `--ordering-passes` are
    /// ignored. The positional mode still applies.
    #[arg(long)]
    config_json: Option<String>,
}

/// Polygon type selection.
#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// Ordered boundary trace.
    Normal,
    /// Reserved; currently the same trace as `normal`.
    #[value(name = "convexHull")]
    ConvexHull,
}

impl From<Mode> for PolygonMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Self::Normal,
            Mode::ConvexHull => Self::ConvexHull,
        }
    }
}

/// Stdout format selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Pixel drawing followed by the polygon listing.
    Text,
    /// Structured JSON of the whole result.
    Json,
}

/// Build a [`PipelineConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and the
/// individual parameter flags are ignored. The positional mode is
/// applied either way.
fn config_from_cli(cli: &Cli) -> Result<PipelineConfig, AppError> {
    let mut config = if let Some(ref json) = cli.config_json {
        serde_json::from_str(json).map_err(AppError::ConfigJson)?
    } else {
        PipelineConfig {
            background: cli
                .background
                .clone()
                .map_or(Background::Corner, Background::Explicit),
            ordering_passes: cli.ordering_passes,
            ..PipelineConfig::default()
        }
    };
    config.mode = cli.mode.into();
    Ok(config)
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprint!("{e}");
            println!("{USAGE}");
            return ExitCode::from(USAGE_EXIT);
        }
    };

    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load, trace and print one image.
fn run(cli: &Cli) -> Result<(), AppError> {
    let config = config_from_cli(cli)?;
    tracing::debug!(?config, "pipeline config");

    let matrix = source::load_matrix(cli.source, &cli.image_path, &cli.magick_bin)?;
    let result = img2poly_pipeline::process(&matrix, &config);

    if result.polygon.is_empty() {
        tracing::warn!(
            background = %result.background,
            "no foreground pixels found, polygon is empty",
        );
    }
    tracing::info!(
        image = %cli.image_path.display(),
        mode = result.mode.as_str(),
        points = result.polygon.len(),
        "traced polygon",
    );

    match cli.format {
        Format::Text => print!(
            "{}",
            img2poly_export::render_report(&matrix, &result.background, &result.polygon)
        ),
        Format::Json => println!("{}", img2poly_export::to_json(&result)?),
    }

    if let Some(ref svg_path) = cli.svg {
        let title = cli
            .image_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("img2poly");
        let desc = format!(
            "mode={} ordering_passes={}",
            result.mode.as_str(),
            config.ordering_passes
        );
        let metadata = img2poly_export::SvgMetadata {
            title: Some(title),
            description: Some(&desc),
        };
        let svg = img2poly_export::to_svg(&result.polygon, result.dimensions, &metadata);
        std::fs::write(svg_path, &svg).map_err(|source| AppError::WriteSvg {
            path: svg_path.clone(),
            source,
        })?;
        tracing::info!(path = %svg_path.display(), bytes = svg.len(), "SVG written");
    }

    Ok(())
}
