//! Precomputed resampling between frame sizes.
//!
//! All source indices and weights are computed once when a [`Resampler`]
//! is built. Running it only reads those tables, so the per-frame path
//! does not allocate.
//!
//! # Filters
//!
//! - [`Resampler::area`] - box average over each destination footprint
//!   (downscaling; falls back to bilinear when enlarging)
//! - [`Resampler::bilinear`] - two-tap linear interpolation per axis

use camgrade_core::Size;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::convert::{INV_255, bgr_to_rgb_row};

/// Per-axis tap tables.
#[derive(Debug, Clone, PartialEq)]
struct AxisTaps {
    /// `(start, len)` into `index`/`weight` for every destination position.
    spans: Vec<(usize, usize)>,
    index: Vec<usize>,
    weight: Vec<f32>,
}

impl AxisTaps {
    fn with_capacity(dst: usize, taps: usize) -> Self {
        Self {
            spans: Vec::with_capacity(dst),
            index: Vec::with_capacity(dst * taps),
            weight: Vec::with_capacity(dst * taps),
        }
    }

    fn push(&mut self, taps: &[(usize, f32)]) {
        let total: f32 = taps.iter().map(|t| t.1).sum();
        let start = self.index.len();
        for &(i, w) in taps {
            self.index.push(i);
            self.weight.push(if total > 0.0 { w / total } else { w });
        }
        self.spans.push((start, taps.len()));
    }

    fn bilinear(src: usize, dst: usize) -> Self {
        let mut taps = Self::with_capacity(dst, 2);
        let scale = src as f32 / dst as f32;
        let last = src.saturating_sub(1);
        for i in 0..dst {
            let center = ((i as f32 + 0.5) * scale - 0.5).clamp(0.0, last as f32);
            let i0 = center as usize;
            let i1 = (i0 + 1).min(last);
            let f = center - i0 as f32;
            if i0 == i1 || f <= 0.0 {
                taps.push(&[(i0, 1.0)]);
            } else {
                taps.push(&[(i0, 1.0 - f), (i1, f)]);
            }
        }
        taps
    }

    fn area(src: usize, dst: usize) -> Self {
        if dst >= src {
            return Self::bilinear(src, dst);
        }
        let scale = src as f32 / dst as f32;
        let mut taps = Self::with_capacity(dst, scale.ceil() as usize + 1);
        let mut scratch = Vec::with_capacity(scale.ceil() as usize + 1);
        for i in 0..dst {
            let x0 = i as f32 * scale;
            let x1 = (x0 + scale).min(src as f32);
            scratch.clear();
            let mut sx = x0.floor() as usize;
            while (sx as f32) < x1 && sx < src {
                let cover = x1.min(sx as f32 + 1.0) - x0.max(sx as f32);
                if cover > 1e-6 {
                    scratch.push((sx, cover));
                }
                sx += 1;
            }
            taps.push(&scratch);
        }
        taps
    }

    #[inline]
    fn taps(&self, i: usize) -> impl Iterator<Item = (usize, f32)> + '_ {
        let (start, len) = self.spans[i];
        self.index[start..start + len]
            .iter()
            .copied()
            .zip(self.weight[start..start + len].iter().copied())
    }

    fn is_identity(&self) -> bool {
        self.spans.iter().enumerate().all(|(i, &(start, len))| {
            len == 1 && self.index[start] == i && self.weight[start] == 1.0
        })
    }
}

/// Resampler from one fixed size to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Resampler {
    src: Size,
    dst: Size,
    x: AxisTaps,
    y: AxisTaps,
}

impl Resampler {
    /// Area-average resampler.
    pub fn area(src: Size, dst: Size) -> Self {
        Self {
            src,
            dst,
            x: AxisTaps::area(src.width, dst.width),
            y: AxisTaps::area(src.height, dst.height),
        }
    }

    /// Bilinear resampler.
    pub fn bilinear(src: Size, dst: Size) -> Self {
        Self {
            src,
            dst,
            x: AxisTaps::bilinear(src.width, dst.width),
            y: AxisTaps::bilinear(src.height, dst.height),
        }
    }

    /// Source size.
    #[inline]
    pub fn src_size(&self) -> Size {
        self.src
    }

    /// Destination size.
    #[inline]
    pub fn dst_size(&self) -> Size {
        self.dst
    }

    /// True when the resampler copies pixels one to one.
    pub fn is_identity(&self) -> bool {
        self.src == self.dst && self.x.is_identity() && self.y.is_identity()
    }

    /// Resamples 8-bit BGR into float RGB scaled to [0, 1].
    ///
    /// With `mirror` each destination row is flipped horizontally.
    pub fn bgr_to_rgb(&self, src: &[u8], dst: &mut [[f32; 3]], mirror: bool) {
        debug_assert_eq!(src.len(), self.src.pixel_count() * 3);
        debug_assert_eq!(dst.len(), self.dst.pixel_count());
        let sw = self.src.width;
        let dw = self.dst.width;

        if self.is_identity() {
            #[cfg(feature = "parallel")]
            dst.par_chunks_mut(dw)
                .zip(src.par_chunks(sw * 3))
                .for_each(|(out, row)| bgr_to_rgb_row(row, out, mirror));
            #[cfg(not(feature = "parallel"))]
            dst.chunks_mut(dw)
                .zip(src.chunks(sw * 3))
                .for_each(|(out, row)| bgr_to_rgb_row(row, out, mirror));
            return;
        }

        let kernel = |(dy, row): (usize, &mut [[f32; 3]])| {
            for dx in 0..dw {
                let mut acc = [0.0f32; 3];
                for (sy, wy) in self.y.taps(dy) {
                    let base = sy * sw;
                    for (sx, wx) in self.x.taps(dx) {
                        let i = (base + sx) * 3;
                        let w = wy * wx;
                        acc[0] += src[i + 2] as f32 * w;
                        acc[1] += src[i + 1] as f32 * w;
                        acc[2] += src[i] as f32 * w;
                    }
                }
                let out = if mirror { dw - 1 - dx } else { dx };
                row[out] = [acc[0] * INV_255, acc[1] * INV_255, acc[2] * INV_255];
            }
        };

        #[cfg(feature = "parallel")]
        dst.par_chunks_mut(dw).enumerate().for_each(kernel);
        #[cfg(not(feature = "parallel"))]
        dst.chunks_mut(dw).enumerate().for_each(kernel);
    }

    /// Resamples 8-bit BGR into 8-bit BGR, rounding to nearest.
    pub fn bgr(&self, src: &[u8], dst: &mut [u8]) {
        debug_assert_eq!(src.len(), self.src.pixel_count() * 3);
        debug_assert_eq!(dst.len(), self.dst.pixel_count() * 3);
        if self.is_identity() {
            dst.copy_from_slice(src);
            return;
        }
        let sw = self.src.width;
        let dw = self.dst.width;

        let kernel = |(dy, row): (usize, &mut [u8])| {
            for dx in 0..dw {
                let mut acc = [0.0f32; 3];
                for (sy, wy) in self.y.taps(dy) {
                    let base = sy * sw;
                    for (sx, wx) in self.x.taps(dx) {
                        let i = (base + sx) * 3;
                        let w = wy * wx;
                        acc[0] += src[i] as f32 * w;
                        acc[1] += src[i + 1] as f32 * w;
                        acc[2] += src[i + 2] as f32 * w;
                    }
                }
                let o = dx * 3;
                for c in 0..3 {
                    row[o + c] = (acc[c] + 0.5).min(255.0) as u8;
                }
            }
        };

        #[cfg(feature = "parallel")]
        dst.par_chunks_mut(dw * 3).enumerate().for_each(kernel);
        #[cfg(not(feature = "parallel"))]
        dst.chunks_mut(dw * 3).enumerate().for_each(kernel);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums_to_one(t: &AxisTaps) -> bool {
        (0..t.spans.len()).all(|i| (t.taps(i).map(|(_, w)| w).sum::<f32>() - 1.0).abs() < 1e-5)
    }

    #[test]
    fn area_halving_averages_pairs() {
        let t = AxisTaps::area(4, 2);
        assert_eq!(t.taps(0).collect::<Vec<_>>(), vec![(0, 0.5), (1, 0.5)]);
        assert_eq!(t.taps(1).collect::<Vec<_>>(), vec![(2, 0.5), (3, 0.5)]);
    }

    #[test]
    fn area_fractional_footprint() {
        let t = AxisTaps::area(3, 2);
        assert!(sums_to_one(&t));
        let taps: Vec<_> = t.taps(0).collect();
        assert_eq!(taps.len(), 2);
        assert!((taps[0].1 - 2.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn bilinear_weights() {
        let t = AxisTaps::bilinear(2, 4);
        assert!(sums_to_one(&t));
        // first and last destination positions clamp to the edges
        assert_eq!(t.taps(0).collect::<Vec<_>>(), vec![(0, 1.0)]);
        assert_eq!(t.taps(3).collect::<Vec<_>>(), vec![(1, 1.0)]);
    }

    #[test]
    fn same_size_is_identity() {
        let s = Size::new(7, 3);
        assert!(Resampler::area(s, s).is_identity());
        assert!(Resampler::bilinear(s, s).is_identity());
        assert!(!Resampler::area(s, Size::new(6, 3)).is_identity());
    }

    #[test]
    fn area_to_float_rgb() {
        // 2x1 -> 1x1: average of two BGR pixels
        let r = Resampler::area(Size::new(2, 1), Size::new(1, 1));
        let mut out = [[0.0; 3]];
        r.bgr_to_rgb(&[0, 0, 255, 0, 0, 155], &mut out, false);
        assert!((out[0][0] - 205.0 / 255.0).abs() < 1e-6);
        assert_eq!(out[0][2], 0.0);
    }

    #[test]
    fn mirror_flips_rows() {
        let s = Size::new(3, 1);
        let r = Resampler::area(s, s);
        let mut out = [[0.0; 3]; 3];
        r.bgr_to_rgb(&[0, 0, 10, 0, 0, 20, 0, 0, 30], &mut out, true);
        assert_eq!(out[0][0], 30.0 * INV_255);
        assert_eq!(out[2][0], 10.0 * INV_255);

        let half = Resampler::area(Size::new(4, 1), Size::new(2, 1));
        let mut out = [[0.0; 3]; 2];
        half.bgr_to_rgb(&[0, 0, 10, 0, 0, 10, 0, 0, 50, 0, 0, 50], &mut out, true);
        assert!((out[0][0] - 50.0 * INV_255).abs() < 1e-6);
    }

    #[test]
    fn bilinear_upsample_constant() {
        let r = Resampler::bilinear(Size::new(2, 2), Size::new(5, 3));
        let src = [7u8, 8, 9].repeat(4);
        let mut dst = vec![0u8; 5 * 3 * 3];
        r.bgr(&src, &mut dst);
        assert!(dst.chunks(3).all(|p| p == [7, 8, 9]));
    }

    #[test]
    fn bilinear_upsample_ramp_midpoint() {
        let r = Resampler::bilinear(Size::new(2, 1), Size::new(4, 1));
        let src = [0u8, 0, 0, 200, 200, 200];
        let mut dst = vec![0u8; 12];
        r.bgr(&src, &mut dst);
        // centers map to -0.25, 0.25, 0.75, 1.25
        assert_eq!(dst[0], 0);
        assert_eq!(dst[3], 50);
        assert_eq!(dst[6], 150);
        assert_eq!(dst[9], 200);
    }
}
