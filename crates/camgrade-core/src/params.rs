//! Grade parameter snapshot.
//!
//! A [`ColorTransformParams`] value is produced every time a user control
//! changes. It is `Copy` and compared by value, which is what the LUT baker
//! keys its cache on.

use serde::{Deserialize, Serialize};

/// Reference scale applied to the gain control before it enters the
/// white-balance/gain matrix (`gain_applied = gain * scale`).
pub const DEFAULT_GAIN_SCALE: f32 = 4.5;

/// User grade controls.
///
/// | Field | Range | Identity |
/// |-------|-------|----------|
/// | `temperature` | [-1, 1] | 0 |
/// | `tint` | [-1, 1] | 0 |
/// | `gain` | [0, 4] | 1 / gain scale |
/// | `slope` | [0, 3] | 1 |
/// | `power` | [0, 3] | 1 |
/// | `offset` | [-1, 1] | 0 |
///
/// # Example
///
/// ```rust
/// use camgrade_core::ColorTransformParams;
///
/// let p = ColorTransformParams::default()
///     .with_temperature(0.25)
///     .with_gain(1.5);
/// assert_eq!(p.tint, 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorTransformParams {
    /// Warm (+) / cool (-) shift.
    pub temperature: f32,
    /// Green (+) / magenta (-) shift.
    pub tint: f32,
    /// Exposure gain, before the gain scale.
    pub gain: f32,
    /// CDL slope, all channels.
    pub slope: f32,
    /// CDL power, all channels.
    pub power: f32,
    /// CDL offset, all channels.
    pub offset: f32,
}

impl Default for ColorTransformParams {
    fn default() -> Self {
        Self {
            temperature: 0.0,
            tint: 0.0,
            gain: 1.0,
            slope: 1.0,
            power: 1.0,
            offset: 0.0,
        }
    }
}

impl ColorTransformParams {
    /// Valid temperature range.
    pub const TEMPERATURE_RANGE: (f32, f32) = (-1.0, 1.0);
    /// Valid tint range.
    pub const TINT_RANGE: (f32, f32) = (-1.0, 1.0);
    /// Valid gain range.
    pub const GAIN_RANGE: (f32, f32) = (0.0, 4.0);
    /// Valid slope range.
    pub const SLOPE_RANGE: (f32, f32) = (0.0, 3.0);
    /// Valid power range.
    pub const POWER_RANGE: (f32, f32) = (0.0, 3.0);
    /// Valid offset range.
    pub const OFFSET_RANGE: (f32, f32) = (-1.0, 1.0);

    /// Parameters that leave the image unchanged for a given gain scale.
    ///
    /// The returned gain is `1 / gain_scale`. It only stays inside
    /// [`GAIN_RANGE`](Self::GAIN_RANGE) for `gain_scale >= 1 / GAIN_RANGE.1`
    /// (0.25); below that [`clamped`](Self::clamped) caps it and the result
    /// is darker than the input.
    pub fn identity(gain_scale: f32) -> Self {
        Self {
            gain: if gain_scale != 0.0 { 1.0 / gain_scale } else { 1.0 },
            ..Self::default()
        }
    }

    /// Converts trackbar positions of the preview window into parameters.
    ///
    /// Temperature and tint sliders run 0..=200 centered on 100, the gain
    /// slider runs 0..=400 in hundredths.
    ///
    /// ```rust
    /// use camgrade_core::ColorTransformParams;
    ///
    /// let p = ColorTransformParams::from_trackbar(150, 100, 200);
    /// assert_eq!(p.temperature, 0.5);
    /// assert_eq!(p.tint, 0.0);
    /// assert_eq!(p.gain, 2.0);
    /// ```
    pub fn from_trackbar(temperature: i32, tint: i32, gain: i32) -> Self {
        Self {
            temperature: (temperature - 100) as f32 / 100.0,
            tint: (tint - 100) as f32 / 100.0,
            gain: gain as f32 / 100.0,
            ..Self::default()
        }
        .clamped()
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the tint.
    pub fn with_tint(mut self, tint: f32) -> Self {
        self.tint = tint;
        self
    }

    /// Sets the gain.
    pub fn with_gain(mut self, gain: f32) -> Self {
        self.gain = gain;
        self
    }

    /// Sets slope, power and offset at once.
    pub fn with_cdl(mut self, slope: f32, power: f32, offset: f32) -> Self {
        self.slope = slope;
        self.power = power;
        self.offset = offset;
        self
    }

    /// Returns a copy with every field forced into its UI range.
    ///
    /// Non-finite values fall back to the identity value of that field so
    /// the result always compares equal to itself.
    pub fn clamped(&self) -> Self {
        let d = Self::default();
        Self {
            temperature: clamp_finite(self.temperature, Self::TEMPERATURE_RANGE, d.temperature),
            tint: clamp_finite(self.tint, Self::TINT_RANGE, d.tint),
            gain: clamp_finite(self.gain, Self::GAIN_RANGE, d.gain),
            slope: clamp_finite(self.slope, Self::SLOPE_RANGE, d.slope),
            power: clamp_finite(self.power, Self::POWER_RANGE, d.power),
            offset: clamp_finite(self.offset, Self::OFFSET_RANGE, d.offset),
        }
    }

    /// True when the CDL stage is a no-op.
    #[inline]
    pub fn is_cdl_identity(&self) -> bool {
        self.slope == 1.0 && self.power == 1.0 && self.offset == 0.0
    }
}

#[inline]
fn clamp_finite(v: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(lo, hi) } else { fallback }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_neutral() {
        let p = ColorTransformParams::default();
        assert!(p.is_cdl_identity());
        assert_eq!(p.temperature, 0.0);
        assert_eq!(p.gain, 1.0);
    }

    #[test]
    fn identity_cancels_gain_scale() {
        let p = ColorTransformParams::identity(DEFAULT_GAIN_SCALE);
        assert!((p.gain * DEFAULT_GAIN_SCALE - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clamped_limits_ranges() {
        let p = ColorTransformParams {
            temperature: 3.0,
            tint: -7.0,
            gain: 9.0,
            slope: -1.0,
            power: 10.0,
            offset: 2.0,
        }
        .clamped();
        assert_eq!(p.temperature, 1.0);
        assert_eq!(p.tint, -1.0);
        assert_eq!(p.gain, 4.0);
        assert_eq!(p.slope, 0.0);
        assert_eq!(p.power, 3.0);
        assert_eq!(p.offset, 1.0);
    }

    #[test]
    fn clamped_replaces_nan() {
        let p = ColorTransformParams::default().with_gain(f32::NAN).clamped();
        assert_eq!(p.gain, 1.0);
        assert_eq!(p, p);
    }

    #[test]
    fn trackbar_mapping() {
        let p = ColorTransformParams::from_trackbar(0, 200, 400);
        assert_eq!(p.temperature, -1.0);
        assert_eq!(p.tint, 1.0);
        assert_eq!(p.gain, 4.0);
    }

    #[test]
    fn yaml_partial_uses_defaults() {
        let p: ColorTransformParams = serde_yaml::from_str("temperature: 0.5").unwrap();
        assert_eq!(p.temperature, 0.5);
        assert_eq!(p.slope, 1.0);
    }
}
