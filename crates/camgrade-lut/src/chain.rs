//! Grade chain construction.
//!
//! The chain is fixed:
//!
//! ```text
//! input ──CS──► working ──CDL──► ──diag(wb * gain * scale)──► ──display──► out
//! ```

use camgrade_color::{CdlTransform, ColorSpaceTransform, GroupTransform, MatrixTransform, Transform};
use camgrade_core::{ColorSpaces, ColorTransformParams, WhiteBalanceMultipliers};

/// Builds the transform group for one parameter snapshot.
///
/// `gain_scale` multiplies the user gain before it enters the
/// white-balance matrix.
///
/// ```
/// use camgrade_core::{ColorSpaces, ColorTransformParams};
/// use camgrade_lut::grade_chain;
///
/// let group = grade_chain(&ColorTransformParams::default(), &ColorSpaces::default(), 4.5);
/// assert_eq!(group.len(), 4);
/// ```
pub fn grade_chain(params: &ColorTransformParams, spaces: &ColorSpaces, gain_scale: f32) -> GroupTransform {
    let wb = WhiteBalanceMultipliers::from_params(params);
    GroupTransform::new()
        .with(ColorSpaceTransform::new(spaces.input.as_str(), spaces.working.as_str()))
        .with(CdlTransform::uniform(params.slope, params.offset, params.power))
        .with(MatrixTransform::diagonal(wb.scaled(params.gain * gain_scale)))
        .with(Transform::to_display(&spaces.working, &spaces.display))
}
