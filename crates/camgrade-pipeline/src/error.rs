//! Pipeline error types.

use thiserror::Error;

use camgrade_color::ColorError;
use camgrade_core::{CoreError, Size};
use camgrade_lut::LutError;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Errors from constructing or running a [`FramePipeline`](crate::FramePipeline).
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Incoming frame does not match the configured input size.
    #[error("frame is {actual}, pipeline expects {expected}")]
    Dimensions {
        /// Configured input size.
        expected: Size,
        /// Size of the frame passed in.
        actual: Size,
    },

    /// Invalid pipeline configuration.
    #[error("invalid pipeline config: {0}")]
    InvalidConfig(String),

    /// LUT bake failed.
    #[error("LUT error: {0}")]
    Lut(#[from] LutError),

    /// Transform provider failed.
    #[error("color error: {0}")]
    Color(#[from] ColorError),

    /// Frame construction failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// I/O error reading a config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl PipelineError {
    /// True for errors caused by an unresolvable space, display or view.
    pub fn is_config_error(&self) -> bool {
        let color = match self {
            Self::Color(e) | Self::Lut(LutError::Color(e)) => e,
            _ => return false,
        };
        matches!(
            color,
            ColorError::ColorSpaceNotFound { .. }
                | ColorError::DisplayNotFound { .. }
                | ColorError::ViewNotFound { .. }
        )
    }
}
