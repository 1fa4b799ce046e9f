use thiserror::Error;

use super::types::Cell;

/// Errors that can occur while laying out, rendering or exporting a risk matrix
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Configuration error (wrong label count, invalid layout options, bad property file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Risk or material coordinate outside the 6x6 grid
    #[error("Validation error: {0}")]
    Validation(String),

    /// More risks in one cell than the sub-grid holds (reject policy only)
    #[error("Cell {cell} holds {count} risks, sub-grid capacity is {capacity}")]
    Overflow {
        cell: Cell,
        count: usize,
        capacity: usize,
    },

    /// Writing the image or deck failed
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Malformed input document
    #[error("Input error: {0}")]
    Input(#[from] serde_json::Error),
}

/// Failures while writing artifacts to disk
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PNG encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Deck archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
}

impl From<std::io::Error> for MatrixError {
    fn from(err: std::io::Error) -> Self {
        MatrixError::Export(ExportError::Io(err))
    }
}

impl From<image::ImageError> for MatrixError {
    fn from(err: image::ImageError) -> Self {
        MatrixError::Export(ExportError::Image(err))
    }
}

impl From<zip::result::ZipError> for MatrixError {
    fn from(err: zip::result::ZipError) -> Self {
        MatrixError::Export(ExportError::Archive(err))
    }
}

/// Type alias for Results using MatrixError
pub type Result<T> = std::result::Result<T, MatrixError>;
