//! # camgrade-pipeline
//!
//! Allocation-free frame loop for live grading.
//!
//! A [`FramePipeline`] owns every buffer it needs, sized once from a
//! [`PipelineConfig`]. Each call to [`FramePipeline::process`] runs:
//!
//! ```text
//! BgrFrame (input size, u8 BGR)
//!     │  area downsample + BGR→RGB + 1/255      (convert)
//!     ▼
//! [f32; 3] working buffer (working size)
//!     │  GradeStrategy: atlas bake/sample or direct transform   (grade)
//!     ▼
//! [f32; 3] graded
//!     │  clamp, round to nearest, RGB→BGR      (quantize)
//!     ▼
//! u8 BGR (working size)
//!     │  bilinear upsample, when sizes differ   (resize)
//!     ▼
//! BgrFrame (output size)
//! ```
//!
//! White balance, gain and the CDL grade are part of the baked chain, so a
//! steady parameter set costs one table lookup per pixel.
//!
//! # Example
//!
//! ```rust
//! use camgrade_color::Config;
//! use camgrade_core::{BgrFrame, ColorTransformParams, Size};
//! use camgrade_pipeline::{FramePipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new(Size::new(32, 16), Size::new(16, 8)).with_lut_size(9);
//! let mut pipeline = FramePipeline::new(config, Config::builtin()).unwrap();
//!
//! let params = ColorTransformParams::from_trackbar(150, 100, 100);
//! let frame = BgrFrame::filled(32, 16, [90, 120, 150]);
//! assert!(pipeline.process(&frame, &params).unwrap().is_some());
//! assert!(pipeline.process(&BgrFrame::default(), &params).unwrap().is_none());
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - rayon over rows and pixel chunks
//!
//! # Dependencies
//!
//! - [`camgrade_core`], [`camgrade_color`], [`camgrade_lut`]
//!
//! # Used By
//!
//! - `camgrade-cli`

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod buffers;
mod config;
mod convert;
mod error;
mod pipeline;
mod resample;
mod stats;
mod strategy;

pub use buffers::FrameBuffers;
pub use config::{GradeMode, PipelineConfig};
pub use convert::{INV_255, quantize, quantize_bgr, rgb_to_bgr};
pub use error::{PipelineError, PipelineResult};
pub use pipeline::FramePipeline;
pub use resample::Resampler;
pub use stats::{FrameStats, FrameTimings, StatsReport};
pub use strategy::{AtlasGrade, DirectGrade, GradeStrategy, build_strategy};
