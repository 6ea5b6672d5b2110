//! Errors surfaced by the command-line tool.
//!
//! Every variant is fatal: `main` prints it and exits with a failure
//! status. Nothing here is retried.

use std::path::PathBuf;
use std::process::ExitStatus;

use img2poly_pipeline::PipelineError;

/// Failure of the external image conversion step.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// The conversion tool could not be started (usually not installed).
    #[error("could not run {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying OS error.
        source: std::io::Error,
    },

    /// The conversion tool ran but reported failure.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        /// Program that was invoked.
        program: String,
        /// Its exit status.
        status: ExitStatus,
        /// Its trimmed standard error.
        stderr: String,
    },

    /// The pixel dump on standard output was not UTF-8.
    #[error("{program} produced a pixel dump that is not valid UTF-8")]
    NonUtf8 {
        /// Program that was invoked.
        program: String,
    },
}

/// Any error that ends a run.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// `--config-json` could not be parsed.
    #[error("error parsing --config-json: {0}")]
    ConfigJson(#[source] serde_json::Error),

    /// The input file could not be read.
    #[error("error reading {}: {source}", .path.display())]
    Read {
        /// File that was read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The external conversion failed.
    #[error(transparent)]
    Convert(#[from] ConvertError),

    /// Building the pixel matrix failed.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The result could not be serialized.
    #[error("error serializing result: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The SVG preview could not be written.
    #[error("error writing SVG to {}: {source}", .path.display())]
    WriteSvg {
        /// Destination file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
