//! White-balance multipliers from temperature and tint.
//!
//! Temperature pushes red up and blue down (warm) or the reverse (cool),
//! tint pushes green. The triple is then divided by its mean so overall
//! exposure is preserved:
//!
//! ```text
//! r = 1 + temperature * s
//! g = 1 + tint * s
//! b = 1 - temperature * s
//! (r, g, b) /= (r + g + b) / 3
//! ```

use crate::ColorTransformParams;

/// Slider strength `s` used by [`WhiteBalanceMultipliers::from_temp_tint`].
pub const WB_SLIDER_STRENGTH: f32 = 0.5;

/// Per-channel white-balance multipliers, mean normalized to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WhiteBalanceMultipliers {
    /// Red multiplier.
    pub r: f32,
    /// Green multiplier.
    pub g: f32,
    /// Blue multiplier.
    pub b: f32,
}

impl Default for WhiteBalanceMultipliers {
    fn default() -> Self {
        Self::NEUTRAL
    }
}

impl WhiteBalanceMultipliers {
    /// No color shift.
    pub const NEUTRAL: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Computes multipliers from temperature and tint.
    ///
    /// Both inputs are clamped to [-1, 1], which keeps every channel
    /// strictly positive.
    ///
    /// # Example
    ///
    /// ```rust
    /// use camgrade_core::WhiteBalanceMultipliers;
    ///
    /// let wb = WhiteBalanceMultipliers::from_temp_tint(1.0, 0.0);
    /// assert!((wb.mean() - 1.0).abs() < 1e-6);
    /// assert!(wb.r > 1.0 && wb.b < 1.0);
    /// ```
    pub fn from_temp_tint(temperature: f32, tint: f32) -> Self {
        let t = sanitize(temperature);
        let n = sanitize(tint);
        let r = 1.0 + t * WB_SLIDER_STRENGTH;
        let g = 1.0 + n * WB_SLIDER_STRENGTH;
        let b = 1.0 - t * WB_SLIDER_STRENGTH;
        let avg = (r + g + b) / 3.0;
        Self { r: r / avg, g: g / avg, b: b / avg }
    }

    /// Multipliers for a parameter snapshot.
    #[inline]
    pub fn from_params(params: &ColorTransformParams) -> Self {
        Self::from_temp_tint(params.temperature, params.tint)
    }

    /// Returns `[r, g, b]`.
    #[inline]
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the multipliers scaled by a uniform gain.
    #[inline]
    pub fn scaled(self, gain: f32) -> [f32; 3] {
        [self.r * gain, self.g * gain, self.b * gain]
    }

    /// Arithmetic mean of the three channels.
    #[inline]
    pub fn mean(&self) -> f32 {
        (self.r + self.g + self.b) / 3.0
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_is_one_over_grid() {
        for ti in -10..=10 {
            for ni in -10..=10 {
                let wb = WhiteBalanceMultipliers::from_temp_tint(ti as f32 / 10.0, ni as f32 / 10.0);
                assert_relative_eq!(wb.mean(), 1.0, epsilon = 1e-6);
                assert!(wb.r > 0.0 && wb.g > 0.0 && wb.b > 0.0);
            }
        }
    }

    #[test]
    fn neutral_at_zero() {
        let wb = WhiteBalanceMultipliers::from_temp_tint(0.0, 0.0);
        assert_eq!(wb, WhiteBalanceMultipliers::NEUTRAL);
    }

    #[test]
    fn warm_shift() {
        let wb = WhiteBalanceMultipliers::from_temp_tint(1.0, 0.0);
        assert_relative_eq!(wb.r, 1.5, epsilon = 1e-6);
        assert_relative_eq!(wb.g, 1.0, epsilon = 1e-6);
        assert_relative_eq!(wb.b, 0.5, epsilon = 1e-6);
    }

    #[test]
    fn tint_moves_green_only_relative() {
        let wb = WhiteBalanceMultipliers::from_temp_tint(0.0, 1.0);
        assert!(wb.g > 1.0);
        assert_relative_eq!(wb.r, wb.b, epsilon = 1e-6);
    }

    #[test]
    fn out_of_range_is_clamped() {
        let a = WhiteBalanceMultipliers::from_temp_tint(5.0, -5.0);
        let b = WhiteBalanceMultipliers::from_temp_tint(1.0, -1.0);
        assert_eq!(a, b);
        let nan = WhiteBalanceMultipliers::from_temp_tint(f32::NAN, 0.0);
        assert_eq!(nan, WhiteBalanceMultipliers::NEUTRAL);
    }
}
