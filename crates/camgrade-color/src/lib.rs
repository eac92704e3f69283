//! # camgrade-color
//!
//! The transform provider: named color spaces, displays/views, transform
//! descriptions and their compiled processors.
//!
//! Everything downstream consumes this crate through two traits:
//!
//! - [`TransformProvider`] - compiles a [`GroupTransform`] into a processor
//! - [`RgbTransform`] - applies it to `[f32; 3]` pixels in place
//!
//! [`Config`] implements the provider, either from [`Config::builtin`] or a
//! YAML file.
//!
//! # Architecture
//!
//! ```text
//! GroupTransform ──► Config::processor ──► Processor (Vec<ProcessorOp>)
//!      │                  │                      │
//!      │           resolves names          Decode / Matrix /
//!      │           (spaces, displays)      Cdl / Encode
//!      ▼
//! ColorSpaceTransform ─ CdlTransform ─ MatrixTransform ─ DisplayViewTransform
//! ```
//!
//! Space conversion goes decode, RGB to XYZ, Bradford adaptation when the
//! white points differ, XYZ to RGB, encode. Data spaces never convert.
//!
//! # Usage
//!
//! ```rust
//! use camgrade_color::{
//!     ColorSpaceTransform, Config, DisplayViewTransform, GroupTransform, RgbTransform,
//!     TransformProvider,
//! };
//!
//! let config = Config::builtin();
//! let group = GroupTransform::new()
//!     .with(ColorSpaceTransform::new("sRGB Encoded Rec.709 (sRGB)", "ACEScg"))
//!     .with(DisplayViewTransform::new("ACEScg", "sRGB - Display", "Un-tone-mapped"));
//!
//! let processor = config.processor(&group).unwrap();
//! let mut pixels = [[0.5_f32, 0.5, 0.5]];
//! processor.apply_rgb(&mut pixels);
//! assert!((pixels[0][0] - 0.5).abs() < 1e-3);
//! ```
//!
//! # Dependencies
//!
//! - [`camgrade_core`] - shared value types
//! - `glam` - vector math under [`Mat3`]
//! - `serde` / `serde_yaml` - config files
//!
//! # Used By
//!
//! - `camgrade-lut` - bakes the grade chain
//! - `camgrade-pipeline` - direct per-pixel grading

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builtin;
mod colorspace;
mod config;
mod display;
mod error;
mod mat3;
pub mod primaries;
mod processor;
mod transfer;
mod transform;

pub use colorspace::{ColorSpace, ColorSpaceBuilder};
pub use config::Config;
pub use display::{Display, View};
pub use error::{ColorError, ColorResult};
pub use mat3::Mat3;
pub use primaries::Primaries;
pub use processor::{Processor, ProcessorOp, RgbTransform, TransformProvider};
pub use transfer::TransferFn;
pub use transform::{
    CdlStyle, CdlTransform, ColorSpaceTransform, DisplayViewTransform, GroupTransform,
    MatrixTransform, Transform,
};
