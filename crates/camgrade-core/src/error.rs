//! Core error types.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when building core values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Pixel buffer length does not match the declared dimensions.
    #[error("buffer length mismatch for {width}x{height}: expected {expected} bytes, got {actual}")]
    BufferLength {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
        /// Required byte count
        expected: usize,
        /// Provided byte count
        actual: usize,
    },

    /// Invalid size (zero or overflowing).
    #[error("invalid size: {0}")]
    InvalidSize(String),
}
