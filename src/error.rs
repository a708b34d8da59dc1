use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the card generation pipeline.
///
/// Sampling and text fitting never fail; everything here comes from
/// loading inputs or persisting outputs.
#[derive(Debug, Error)]
pub enum CardError {
    #[error("corpus {} is unavailable: {source}", path.display())]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid card count '{0}': expected a positive integer")]
    InvalidCount(String),

    #[error("failed to write {name} after {written} successful artifact(s): {source}")]
    WriteFailure {
        name: String,
        written: usize,
        #[source]
        source: io::Error,
    },

    #[error("invalid grid geometry: {0}")]
    InvalidGeometry(String),

    #[error("failed to load font {}: {reason}", path.display())]
    Font { path: PathBuf, reason: String },

    #[error("failed to load image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("invalid profile {}: {reason}", path.display())]
    Profile { path: PathBuf, reason: String },

    #[error("failed to encode output: {0}")]
    Encode(String),
}

impl CardError {
    /// Number of artifacts that made it to the sink before the failure.
    pub fn written(&self) -> usize {
        match self {
            CardError::WriteFailure { written, .. } => *written,
            _ => 0,
        }
    }
}
