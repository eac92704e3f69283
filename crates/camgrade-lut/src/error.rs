//! LUT error types.

use thiserror::Error;

use camgrade_color::ColorError;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors from baking or exporting a LUT.
#[derive(Debug, Error)]
pub enum LutError {
    /// Lattice resolution below 2.
    #[error("invalid LUT size {size}: must be at least 2")]
    InvalidSize {
        /// Requested size.
        size: usize,
    },

    /// The transform provider rejected the grade chain.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// I/O error writing a LUT file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
