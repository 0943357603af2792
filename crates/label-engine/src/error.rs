//! Error types for label rendering.

use std::path::PathBuf;

/// Errors that can occur while laying out, rendering or saving labels.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Provided text will not be readable: it has {chars} chars")]
    TextTooLarge { chars: usize },

    #[error("The extension of the file '{}' should be '.png'", .0.display())]
    InvalidOutputPath(PathBuf),

    #[error("Invalid label input: {0}")]
    InputFormat(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Label record {index} failed: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<LabelError>,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LabelError {
    /// Innermost error, looking through batch record wrappers.
    pub fn root(&self) -> &LabelError {
        match self {
            LabelError::Record { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for label operations.
pub type Result<T> = std::result::Result<T, LabelError>;
