//! Error types for the document generator

use thiserror::Error;

/// Result type alias for generator operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while rendering or exporting documents
#[derive(Error, Debug)]
pub enum Error {
    /// A field name from outside the program did not match any field of the record
    #[error("Unknown field `{field}` for {record} record")]
    UnknownField { record: &'static str, field: String },

    /// The requested region is not part of the current display
    #[error("Render target not found: {0}")]
    MissingRenderTarget(String),

    /// Failed to paint or encode a region
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// The photo payload could not be read or decoded
    #[error("Invalid photo: {0}")]
    PhotoError(String),

    /// Failed to lay out or write the output document
    #[error("Document composition failed: {0}")]
    ComposeError(String),

    /// An export for the same form is still running
    #[error("Export already in progress for {0}")]
    ExportInFlight(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::RenderError(err.to_string())
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        Error::ComposeError(err.to_string())
    }
}
