//! # camgrade-lut
//!
//! 3D LUT baking and sampling for the live grading loop.
//!
//! The grade (white balance, gain, CDL and the color space conversions
//! around them) is evaluated once on an `N x N x N` lattice by a
//! [`TransformProvider`](camgrade_color::TransformProvider) and stored as a
//! flattened [`LutAtlas`]. Per-pixel work is then a table lookup.
//!
//! # Architecture
//!
//! ```text
//! ColorTransformParams ─┐
//! ColorSpaces ──────────┼─► LutBaker ──(miss)──► grade_chain ──► provider.processor
//!                       │      │                                      │
//!                       │      └─(hit)──────┐                         ▼
//!                       │                   ▼                 LutAtlas::rebuild
//!                       │               &LutAtlas ◄───────────────────┘
//!                       │                   │
//! float RGB pixels ─────┴─────────► sample_in_place ──► graded pixels
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - sample with rayon
//!
//! # Dependencies
//!
//! - [`camgrade_core`] - parameter and space snapshots
//! - [`camgrade_color`] - transform provider
//!
//! # Used By
//!
//! - `camgrade-pipeline`
//! - `camgrade-cli` (cube export)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod atlas;
mod baker;
mod chain;
mod error;
mod sampler;

pub use atlas::LutAtlas;
pub use baker::{DEFAULT_LUT_SIZE, LutBaker};
pub use chain::grade_chain;
pub use error::{LutError, LutResult};
pub use sampler::{BlueAxis, sample, sample_in_place};
