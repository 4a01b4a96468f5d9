//! Error types for the pixel raster library.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when constructing or importing buffers.
///
/// Drawing itself never fails: out-of-bounds pixels and degenerate shapes are
/// silently ignored.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unrecognized pixel format name.
    #[error("Invalid pixel format: {0}")]
    InvalidFormat(String),

    /// Unrecognized numeric pixel format code.
    #[error("Invalid pixel format code: {0}")]
    InvalidFormatCode(u8),

    /// Color string could not be parsed.
    #[error("Invalid color: {0}")]
    InvalidColor(String),

    /// Raw pixel data does not match the buffer size.
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}
