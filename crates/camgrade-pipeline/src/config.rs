//! Pipeline configuration.
//!
//! Everything here is fixed for the lifetime of a
//! [`FramePipeline`](crate::FramePipeline). Only the grade parameters change
//! per frame.
//!
//! ```yaml
//! input_size: {width: 1920, height: 1080}
//! working_size: {width: 960, height: 540}
//! lut_size: 32
//! gain_scale: 4.5
//! blue_axis: linear        # or floor
//! mode: atlas              # or direct
//! mirror: true
//! spaces:
//!   input: sRGB Encoded Rec.709 (sRGB)
//!   working: ACEScg
//!   display: {display: sRGB - Display, view: Un-tone-mapped}
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use camgrade_core::{ColorSpaces, ColorTransformParams, DEFAULT_GAIN_SCALE, Size};
use camgrade_lut::{BlueAxis, DEFAULT_LUT_SIZE};

use crate::{PipelineError, PipelineResult};

/// How the grade is evaluated per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeMode {
    /// Bake a LUT atlas, sample it per pixel.
    #[default]
    Atlas,
    /// Run the compiled transform on every pixel.
    Direct,
}

/// Fixed settings of a frame pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Capture resolution of incoming frames.
    pub input_size: Size,
    /// Resolution the grade runs at.
    pub working_size: Size,
    /// Delivered resolution, the input size when unset.
    pub output_size: Option<Size>,
    /// LUT lattice points per axis.
    pub lut_size: usize,
    /// Multiplier applied to the gain control.
    pub gain_scale: f32,
    /// Blue interpolation in the atlas sampler.
    pub blue_axis: BlueAxis,
    /// Grade strategy.
    pub mode: GradeMode,
    /// Flip the working image horizontally (selfie view).
    pub mirror: bool,
    /// Input, working and display spaces.
    pub spaces: ColorSpaces,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_size: Size::new(1920, 1080),
            working_size: Size::new(960, 540),
            output_size: None,
            lut_size: DEFAULT_LUT_SIZE,
            gain_scale: DEFAULT_GAIN_SCALE,
            blue_axis: BlueAxis::default(),
            mode: GradeMode::default(),
            mirror: false,
            spaces: ColorSpaces::default(),
        }
    }
}

impl PipelineConfig {
    /// Config for the given input and working sizes, defaults elsewhere.
    pub fn new(input_size: Size, working_size: Size) -> Self {
        Self {
            input_size,
            working_size,
            ..Self::default()
        }
    }

    /// Sets the output size.
    pub fn with_output_size(mut self, size: Size) -> Self {
        self.output_size = Some(size);
        self
    }

    /// Sets the LUT size.
    pub fn with_lut_size(mut self, size: usize) -> Self {
        self.lut_size = size;
        self
    }

    /// Sets the gain scale.
    pub fn with_gain_scale(mut self, scale: f32) -> Self {
        self.gain_scale = scale;
        self
    }

    /// Sets the blue-axis interpolation.
    pub fn with_blue_axis(mut self, axis: BlueAxis) -> Self {
        self.blue_axis = axis;
        self
    }

    /// Sets the grade strategy.
    pub fn with_mode(mut self, mode: GradeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables the horizontal flip.
    pub fn with_mirror(mut self, mirror: bool) -> Self {
        self.mirror = mirror;
        self
    }

    /// Sets the color spaces.
    pub fn with_spaces(mut self, spaces: ColorSpaces) -> Self {
        self.spaces = spaces;
        self
    }

    /// Delivered resolution.
    #[inline]
    pub fn output_size(&self) -> Size {
        self.output_size.unwrap_or(self.input_size)
    }

    /// Rejects zero sizes, tiny LUTs and a gain scale that is not finite or
    /// too small for [`ColorTransformParams::identity`] to stay in range.
    pub fn validate(&self) -> PipelineResult<()> {
        for (label, size) in [
            ("input_size", self.input_size),
            ("working_size", self.working_size),
            ("output_size", self.output_size()),
        ] {
            if size.is_empty() {
                return Err(PipelineError::InvalidConfig(format!("{label} {size} has a zero dimension")));
            }
        }
        if self.lut_size < 2 {
            return Err(PipelineError::InvalidConfig(format!(
                "lut_size {} must be at least 2",
                self.lut_size
            )));
        }
        // below this no in-range gain reaches an applied gain of 1
        let min_scale = 1.0 / ColorTransformParams::GAIN_RANGE.1;
        if !self.gain_scale.is_finite() || self.gain_scale < min_scale {
            return Err(PipelineError::InvalidConfig(format!(
                "gain_scale {} must be finite and at least {min_scale}",
                self.gain_scale
            )));
        }
        Ok(())
    }

    /// Parses and validates YAML.
    pub fn from_yaml_str(yaml: &str) -> PipelineResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
