//! Transfer functions (encoding curves) for color spaces.
//!
//! Every curve is odd-extended: negative values are mirrored through the
//! origin so out-of-gamut results of a matrix stay finite.
//!
//! In YAML a transfer is a single string: `linear`, `srgb`, `bt1886` or
//! `gamma <exponent>` (e.g. `gamma 2.2`).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ColorError;

/// Transfer encoding of a color space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TransferFn {
    /// Scene-linear, no encoding.
    #[default]
    Linear,
    /// IEC 61966-2-1 piecewise sRGB curve.
    Srgb,
    /// Pure power law with the given exponent.
    Gamma(f32),
    /// ITU-R BT.1886 reference display (pure 2.4 power, zero black level).
    Bt1886,
}

impl TransferFn {
    /// Encoded value to linear light.
    ///
    /// ```rust
    /// use camgrade_color::TransferFn;
    ///
    /// let lin = TransferFn::Srgb.decode(0.5);
    /// assert!((lin - 0.214).abs() < 0.01);
    /// ```
    #[inline]
    pub fn decode(self, v: f32) -> f32 {
        match self {
            Self::Linear => v,
            Self::Srgb => mirrored(v, srgb_eotf),
            Self::Gamma(g) => mirrored(v, |x| x.powf(g)),
            Self::Bt1886 => mirrored(v, |x| x.powf(2.4)),
        }
    }

    /// Linear light to encoded value.
    #[inline]
    pub fn encode(self, v: f32) -> f32 {
        match self {
            Self::Linear => v,
            Self::Srgb => mirrored(v, srgb_oetf),
            Self::Gamma(g) => mirrored(v, |x| x.powf(1.0 / g)),
            Self::Bt1886 => mirrored(v, |x| x.powf(1.0 / 2.4)),
        }
    }

    /// True for [`TransferFn::Linear`] and `Gamma(1.0)`.
    pub fn is_linear(self) -> bool {
        matches!(self, Self::Linear) || self == Self::Gamma(1.0)
    }
}

#[inline]
fn mirrored(v: f32, f: impl Fn(f32) -> f32) -> f32 {
    if v < 0.0 { -f(-v) } else { f(v) }
}

#[inline]
fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[inline]
fn srgb_oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

impl fmt::Display for TransferFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => f.write_str("linear"),
            Self::Srgb => f.write_str("srgb"),
            Self::Gamma(g) => write!(f, "gamma {g}"),
            Self::Bt1886 => f.write_str("bt1886"),
        }
    }
}

impl From<TransferFn> for String {
    fn from(t: TransferFn) -> Self {
        t.to_string()
    }
}

impl TryFrom<String> for TransferFn {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl std::str::FromStr for TransferFn {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        match lower.as_str() {
            "linear" | "lin" => return Ok(Self::Linear),
            "srgb" => return Ok(Self::Srgb),
            "bt1886" | "bt.1886" | "rec1886" => return Ok(Self::Bt1886),
            _ => {}
        }
        let exp = lower
            .strip_prefix("gamma")
            .map(str::trim)
            .and_then(|e| e.parse::<f32>().ok())
            .filter(|g| g.is_finite() && *g > 0.0)
            .ok_or_else(|| ColorError::InvalidTransform {
                reason: format!("unknown transfer function '{s}'"),
            })?;
        Ok(Self::Gamma(exp))
    }
}
