//! Error types for the render crate.

use gerdan_core::LayoutError;
use thiserror::Error;

/// Errors that can occur while producing a document or preview.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A layout rule was violated, or the document state machine rejected
    /// a call.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Writing to the underlying output failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A draw command could not be serialized.
    #[error("failed to serialize draw command: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Encoding a raster preview failed.
    #[error("failed to encode preview: {0}")]
    Image(#[from] image::ImageError),

    /// Invalid canvas dimensions (zero or non-finite width or height).
    #[error("invalid canvas dimensions: {width}x{height}")]
    InvalidDimensions { width: f32, height: f32 },

    /// A document sink refused a command.
    #[error("document sink error: {0}")]
    Sink(String),
}

impl RenderError {
    /// The layout error behind this failure, if any.
    pub fn as_layout(&self) -> Option<&LayoutError> {
        match self {
            Self::Layout(err) => Some(err),
            _ => None,
        }
    }
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
