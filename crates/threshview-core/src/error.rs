use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThreshViewError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {path}: {source}")]
    Load {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Processing error: {0}")]
    Processing(String),

    /// Not a failure: a computation observed its cancellation signal and
    /// stopped early. Callers drop this silently.
    #[error("Computation cancelled")]
    Cancelled,

    /// Not a failure: an export found no buffers to serialize. No output
    /// is written and callers may ignore the signal.
    #[error("Export skipped: required buffer is empty")]
    ExportSkipped,
}

pub type Result<T> = std::result::Result<T, ThreshViewError>;
