//! Atlas sampling.
//!
//! Each float RGB pixel in [0, 1] is looked up in the atlas: red and green
//! are interpolated bilinearly inside a blue tile, blue either picks the
//! tile below it ([`BlueAxis::Floor`]) or blends the two nearest tiles
//! ([`BlueAxis::Linear`], exact trilinear).
//!
//! Inputs are sanitized first: values are clamped to [0, 1] and NaN maps to
//! 0. The bilinear footprint is kept inside the tile, so `1.0` on red or
//! green never reads a neighbouring tile.

use serde::{Deserialize, Serialize};

use crate::LutAtlas;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Pixels per parallel work item.
#[cfg(feature = "parallel")]
const CHUNK: usize = 4096;

/// Interpolation along the blue axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlueAxis {
    /// Blue is floored to a tile, only red/green interpolate.
    Floor,
    /// Blue blends the two nearest tiles.
    #[default]
    Linear,
}

#[inline]
fn sanitize(v: f32) -> f32 {
    // NaN fails both comparisons and ends up at 0
    v.max(0.0).min(1.0)
}

#[inline]
fn lerp3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[inline]
fn bilinear(data: &[[f32; 3]], n: usize, tile: usize, r0: usize, g0: usize, fr: f32, fg: f32) -> [f32; 3] {
    let row0 = (tile * n + g0) * n;
    let row1 = row0 + n;
    let top = lerp3(data[row0 + r0], data[row0 + r0 + 1], fr);
    let bottom = lerp3(data[row1 + r0], data[row1 + r0 + 1], fr);
    lerp3(top, bottom, fg)
}

/// Samples one pixel.
///
/// ```
/// use camgrade_lut::{BlueAxis, LutAtlas, sample};
///
/// let atlas = LutAtlas::identity(8).unwrap();
/// let out = sample(&atlas, [0.3, 0.6, 0.9], BlueAxis::Linear);
/// assert!((out[2] - 0.9).abs() < 1e-5);
/// ```
#[inline]
pub fn sample(atlas: &LutAtlas, rgb: [f32; 3], axis: BlueAxis) -> [f32; 3] {
    let n = atlas.size();
    let max = (n - 1) as f32;
    let data = atlas.data();

    let r = sanitize(rgb[0]) * max;
    let g = sanitize(rgb[1]) * max;
    let b = sanitize(rgb[2]) * max;

    let r0 = (r as usize).min(n - 2);
    let g0 = (g as usize).min(n - 2);
    let fr = r - r0 as f32;
    let fg = g - g0 as f32;

    match axis {
        BlueAxis::Floor => bilinear(data, n, b as usize, r0, g0, fr, fg),
        BlueAxis::Linear => {
            let b0 = (b as usize).min(n - 2);
            let fb = b - b0 as f32;
            let lo = bilinear(data, n, b0, r0, g0, fr, fg);
            let hi = bilinear(data, n, b0 + 1, r0, g0, fr, fg);
            lerp3(lo, hi, fb)
        }
    }
}

/// Replaces every pixel with its sampled value.
pub fn sample_in_place(atlas: &LutAtlas, pixels: &mut [[f32; 3]], axis: BlueAxis) {
    #[cfg(feature = "parallel")]
    {
        pixels.par_chunks_mut(CHUNK).for_each(|chunk| sample_slice(atlas, chunk, axis));
    }
    #[cfg(not(feature = "parallel"))]
    {
        sample_slice(atlas, pixels, axis);
    }
}

#[inline]
fn sample_slice(atlas: &LutAtlas, pixels: &mut [[f32; 3]], axis: BlueAxis) {
    for px in pixels.iter_mut() {
        *px = sample(atlas, *px, axis);
    }
}
