//! # camgrade-core
//!
//! Shared value types for the live camera grading pipeline.
//!
//! This crate holds the plain data that flows between the other crates:
//!
//! - [`ColorTransformParams`] - user grade snapshot (temperature, tint, gain, CDL)
//! - [`WhiteBalanceMultipliers`] - per-channel multipliers derived from temperature/tint
//! - [`ColorSpaces`] / [`DisplayTarget`] - the input/working/display triplet
//! - [`BgrFrame`] / [`Size`] - 8-bit BGR frames as delivered by a capture device
//!
//! # Architecture
//!
//! ```text
//!                 camgrade-cli
//!                      |
//!              camgrade-pipeline
//!                      |
//!                camgrade-lut
//!                      |
//!               camgrade-color
//!                      |
//!                camgrade-core
//! ```
//!
//! # Usage
//!
//! ```rust
//! use camgrade_core::{ColorTransformParams, WhiteBalanceMultipliers};
//!
//! let params = ColorTransformParams::default().with_temperature(0.4);
//! let wb = WhiteBalanceMultipliers::from_params(&params);
//! assert!(wb.r > wb.b);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod frame;
mod params;
mod spaces;
mod white_balance;

pub use error::{CoreError, CoreResult};
pub use frame::{BgrFrame, Size};
pub use params::{ColorTransformParams, DEFAULT_GAIN_SCALE};
pub use spaces::{ColorSpaces, DisplayTarget};
pub use white_balance::{WB_SLIDER_STRENGTH, WhiteBalanceMultipliers};
