use std::path::PathBuf;

use thiserror::Error;

/// Failures of a single barcode run.
///
/// Every variant is local to one input video; callers processing several
/// videos report the error and continue with the next one.
#[derive(Debug, Error)]
pub enum BarcodeError {
    #[error("failed to open {path}: {reason}")]
    SourceUnavailable { path: PathBuf, reason: String },

    #[error("no frames could be sampled from the video")]
    EmptySample,

    #[error("invalid output image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("blur height must be at least 1, got {0}")]
    InvalidBlurHeight(usize),

    #[error("processing was cancelled")]
    Cancelled,

    #[error("invalid image data: {0}")]
    InvalidImage(String),
}
