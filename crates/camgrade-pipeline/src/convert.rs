//! Float/8-bit conversion and quantization.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// `1 / 255`.
pub const INV_255: f32 = 1.0 / 255.0;

/// Clamps to [0, 1] and rounds to the nearest 8-bit level.
///
/// NaN maps to 0.
///
/// ```
/// use camgrade_pipeline::quantize;
///
/// assert_eq!(quantize(0.5), 128);
/// assert_eq!(quantize(0.25), 64);
/// assert_eq!(quantize(0.75), 191);
/// assert_eq!(quantize(2.0), 255);
/// assert_eq!(quantize(f32::NAN), 0);
/// ```
#[inline]
pub fn quantize(v: f32) -> u8 {
    (v.max(0.0).min(1.0) * 255.0 + 0.5) as u8
}

/// Quantizes one RGB pixel into BGR byte order.
#[inline]
pub fn quantize_bgr(rgb: [f32; 3]) -> [u8; 3] {
    [quantize(rgb[2]), quantize(rgb[1]), quantize(rgb[0])]
}

/// Writes float RGB pixels as 8-bit BGR.
pub fn rgb_to_bgr(src: &[[f32; 3]], dst: &mut [u8]) {
    debug_assert_eq!(src.len() * 3, dst.len());

    #[cfg(feature = "parallel")]
    dst.par_chunks_exact_mut(3).zip(src.par_iter()).for_each(|(out, rgb)| {
        out.copy_from_slice(&quantize_bgr(*rgb));
    });

    #[cfg(not(feature = "parallel"))]
    for (out, rgb) in dst.chunks_exact_mut(3).zip(src) {
        out.copy_from_slice(&quantize_bgr(*rgb));
    }
}

/// Reads 8-bit BGR as float RGB in [0, 1], optionally flipping each row.
pub fn bgr_to_rgb_row(src: &[u8], dst: &mut [[f32; 3]], mirror: bool) {
    debug_assert_eq!(src.len(), dst.len() * 3);
    let w = dst.len();
    for (x, px) in src.chunks_exact(3).enumerate() {
        let out = if mirror { w - 1 - x } else { x };
        dst[out] = [
            px[2] as f32 * INV_255,
            px[1] as f32 * INV_255,
            px[0] as f32 * INV_255,
        ];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_not_truncates() {
        // 0.5 * 255 = 127.5 -> 128, truncation would give 127
        assert_eq!(quantize(0.5), 128);
        assert_eq!(quantize(0.0), 0);
        assert_eq!(quantize(1.0), 255);
        assert_eq!(quantize(-0.1), 0);
        assert_eq!(quantize(1.0 / 255.0 * 0.49), 0);
        assert_eq!(quantize(1.0 / 255.0 * 0.51), 1);
    }

    #[test]
    fn quantize_swaps_to_bgr() {
        assert_eq!(quantize_bgr([0.5, 0.25, 0.75]), [191, 64, 128]);
    }

    #[test]
    fn byte_roundtrip_is_exact() {
        for v in 0..=255u8 {
            assert_eq!(quantize(v as f32 * INV_255), v);
        }
    }

    #[test]
    fn row_conversion() {
        let src = [10u8, 20, 30, 40, 50, 60];
        let mut dst = [[0.0f32; 3]; 2];
        bgr_to_rgb_row(&src, &mut dst, false);
        assert_eq!(dst[0], [30.0 * INV_255, 20.0 * INV_255, 10.0 * INV_255]);
        bgr_to_rgb_row(&src, &mut dst, true);
        assert_eq!(dst[0], [60.0 * INV_255, 50.0 * INV_255, 40.0 * INV_255]);
    }

    #[test]
    fn slice_conversion() {
        let src = vec![[0.5, 0.25, 0.75]; 5];
        let mut dst = vec![0u8; 15];
        rgb_to_bgr(&src, &mut dst);
        assert_eq!(&dst[12..], &[191, 64, 128]);
    }
}
