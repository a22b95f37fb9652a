//! Rendering error types.

use amrscope_core::AmrError;
use thiserror::Error;

/// Errors that can occur while handing a scene to a backend.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Scene construction or encoding failed.
    #[error(transparent)]
    Core(#[from] AmrError),

    /// The backend reported a fatal status. Not recoverable.
    #[error("fatal backend error: {message}")]
    Fatal {
        /// Backend object the status originated from, if known.
        origin: Option<String>,
        /// Backend message.
        message: String,
    },

    /// The backend failed to produce a frame.
    #[error("backend failed: {0}")]
    BackendFailed(String),

    /// Frame buffer dimensions do not match its pixel data.
    #[error("invalid image data: {width}x{height} frame with {pixels} pixels")]
    InvalidImageData { width: u32, height: u32, pixels: usize },
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
