//! Compiled transform processors.
//!
//! A [`Processor`] is a flat list of [`ProcessorOp`]s produced by resolving a
//! [`GroupTransform`] against a config. Adjacent matrices are folded and
//! identity ops dropped, so a chain between identical spaces compiles to
//! nothing.
//!
//! The two traits here are the seam the rest of the workspace consumes:
//! callers only ever see `dyn RgbTransform` produced by some
//! [`TransformProvider`].

use std::sync::Arc;

use crate::transform::{CdlStyle, GroupTransform};
use crate::{ColorResult, Mat3, TransferFn};

/// Something that maps linear-memory RGB triples in place.
pub trait RgbTransform: Send + Sync {
    /// Applies the transform to every pixel.
    fn apply_rgb(&self, pixels: &mut [[f32; 3]]);

    /// True when applying is a no-op.
    fn is_identity(&self) -> bool {
        false
    }
}

/// Resolves a transform chain into an executable [`RgbTransform`].
pub trait TransformProvider {
    /// Compiles `group`. Unknown names yield a configuration error.
    fn processor(&self, group: &GroupTransform) -> ColorResult<Box<dyn RgbTransform>>;
}

impl<T: TransformProvider + ?Sized> TransformProvider for &T {
    fn processor(&self, group: &GroupTransform) -> ColorResult<Box<dyn RgbTransform>> {
        (**self).processor(group)
    }
}

impl<T: TransformProvider + ?Sized> TransformProvider for Arc<T> {
    fn processor(&self, group: &GroupTransform) -> ColorResult<Box<dyn RgbTransform>> {
        (**self).processor(group)
    }
}

impl<T: TransformProvider + ?Sized> TransformProvider for Box<T> {
    fn processor(&self, group: &GroupTransform) -> ColorResult<Box<dyn RgbTransform>> {
        (**self).processor(group)
    }
}

/// Single compiled operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessorOp {
    /// 3x3 matrix.
    Matrix(Mat3),
    /// Per-channel slope/offset/power.
    Cdl {
        /// Slope [R, G, B].
        slope: [f32; 3],
        /// Offset [R, G, B].
        offset: [f32; 3],
        /// Power [R, G, B].
        power: [f32; 3],
        /// Clamp style.
        style: CdlStyle,
    },
    /// Encoded to linear.
    Decode(TransferFn),
    /// Linear to encoded.
    Encode(TransferFn),
}

impl ProcessorOp {
    /// True if the op leaves values unchanged.
    pub fn is_identity(&self) -> bool {
        match self {
            Self::Matrix(m) => m.is_identity(1e-6),
            // AscCdl with neutral values still clamps negatives, keep it
            Self::Cdl { slope, offset, power, style } => {
                *style == CdlStyle::NoClamp
                    && *slope == [1.0; 3]
                    && *offset == [0.0; 3]
                    && *power == [1.0; 3]
            }
            Self::Decode(t) | Self::Encode(t) => t.is_linear(),
        }
    }

    #[inline]
    fn apply(&self, pixel: &mut [f32; 3]) {
        match self {
            Self::Matrix(m) => *pixel = m.apply(*pixel),
            Self::Cdl { slope, offset, power, style } => match style {
                CdlStyle::AscCdl => {
                    for i in 0..3 {
                        pixel[i] = (pixel[i] * slope[i] + offset[i]).max(0.0).powf(power[i]);
                    }
                }
                CdlStyle::NoClamp => {
                    for i in 0..3 {
                        let v = pixel[i] * slope[i] + offset[i];
                        pixel[i] = v.signum() * v.abs().powf(power[i]);
                    }
                }
            },
            Self::Decode(t) => {
                for c in pixel.iter_mut() {
                    *c = t.decode(*c);
                }
            }
            Self::Encode(t) => {
                for c in pixel.iter_mut() {
                    *c = t.encode(*c);
                }
            }
        }
    }
}

/// Compiled transform chain.
///
/// # Example
///
/// ```
/// use camgrade_color::{Mat3, Processor, ProcessorOp, RgbTransform};
///
/// let p = Processor::from_ops(vec![
///     ProcessorOp::Matrix(Mat3::diagonal(2.0, 1.0, 1.0)),
///     ProcessorOp::Matrix(Mat3::diagonal(0.5, 1.0, 3.0)),
/// ]);
/// assert_eq!(p.num_ops(), 1);
///
/// let mut px = [[1.0, 1.0, 1.0]];
/// p.apply_rgb(&mut px);
/// assert_eq!(px[0], [1.0, 1.0, 3.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Processor {
    ops: Vec<ProcessorOp>,
}

impl Processor {
    /// Builds a processor and optimizes the op list.
    pub fn from_ops(ops: Vec<ProcessorOp>) -> Self {
        let mut p = Self { ops };
        p.optimize();
        p
    }

    /// Compiled operations.
    #[inline]
    pub fn ops(&self) -> &[ProcessorOp] {
        &self.ops
    }

    /// Number of operations.
    #[inline]
    pub fn num_ops(&self) -> usize {
        self.ops.len()
    }

    /// Applies the chain to a single pixel.
    #[inline]
    pub fn apply_one(&self, pixel: &mut [f32; 3]) {
        for op in &self.ops {
            op.apply(pixel);
        }
    }

    fn optimize(&mut self) {
        let mut out: Vec<ProcessorOp> = Vec::with_capacity(self.ops.len());
        for op in self.ops.drain(..) {
            match (out.last_mut(), &op) {
                (Some(ProcessorOp::Matrix(prev)), ProcessorOp::Matrix(next)) => {
                    *prev = *next * *prev;
                }
                // decode(t) then encode(t) cancels out
                (Some(ProcessorOp::Decode(a)), ProcessorOp::Encode(b)) if a == b => {
                    out.pop();
                }
                _ => out.push(op),
            }
            if out.last().is_some_and(ProcessorOp::is_identity) {
                out.pop();
            }
        }
        self.ops = out;
    }
}

impl RgbTransform for Processor {
    fn apply_rgb(&self, pixels: &mut [[f32; 3]]) {
        if self.ops.is_empty() {
            return;
        }
        for pixel in pixels.iter_mut() {
            self.apply_one(pixel);
        }
    }

    fn is_identity(&self) -> bool {
        self.ops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrices_fold_in_order() {
        let a = Mat3::from_rows([[1.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let b = Mat3::diagonal(2.0, 1.0, 1.0);
        let p = Processor::from_ops(vec![ProcessorOp::Matrix(a), ProcessorOp::Matrix(b)]);
        assert_eq!(p.num_ops(), 1);
        let mut px = [[1.0, 2.0, 3.0]];
        p.apply_rgb(&mut px);
        // a first: (3, 2, 3), then b: (6, 2, 3)
        assert_eq!(px[0], [6.0, 2.0, 3.0]);
    }

    #[test]
    fn inverse_matrices_fold_to_near_identity() {
        let m = Mat3::from_rows([[0.6, 0.3, 0.1], [0.1, 0.8, 0.1], [0.0, 0.1, 0.9]]);
        let inv = m.inverse().unwrap();
        let p = Processor::from_ops(vec![ProcessorOp::Matrix(m), ProcessorOp::Matrix(inv)]);
        assert!(p.num_ops() <= 1);
        let mut px = [[0.2, 0.4, 0.8]];
        p.apply_rgb(&mut px);
        assert!((px[0][0] - 0.2).abs() < 1e-5);
        assert!((px[0][2] - 0.8).abs() < 1e-5);
    }

    #[test]
    fn decode_encode_cancels() {
        let p = Processor::from_ops(vec![
            ProcessorOp::Decode(TransferFn::Srgb),
            ProcessorOp::Encode(TransferFn::Srgb),
        ]);
        assert!(RgbTransform::is_identity(&p));
    }

    #[test]
    fn asc_cdl_clamps_before_power() {
        let p = Processor::from_ops(vec![ProcessorOp::Cdl {
            slope: [1.0; 3],
            offset: [-0.5; 3],
            power: [2.0; 3],
            style: CdlStyle::AscCdl,
        }]);
        let mut px = [[0.25, 1.0, 0.75]];
        p.apply_rgb(&mut px);
        assert_eq!(px[0][0], 0.0);
        assert!((px[0][1] - 0.25).abs() < 1e-6);
        assert!((px[0][2] - 0.0625).abs() < 1e-6);
    }

    #[test]
    fn no_clamp_mirrors() {
        let p = Processor::from_ops(vec![ProcessorOp::Cdl {
            slope: [1.0; 3],
            offset: [-0.5; 3],
            power: [2.0; 3],
            style: CdlStyle::NoClamp,
        }]);
        let mut px = [[0.25, 0.5, 0.5]];
        p.apply_rgb(&mut px);
        assert!((px[0][0] + 0.0625).abs() < 1e-6);
    }

    #[test]
    fn neutral_asc_cdl_is_kept() {
        let p = Processor::from_ops(vec![ProcessorOp::Cdl {
            slope: [1.0; 3],
            offset: [0.0; 3],
            power: [1.0; 3],
            style: CdlStyle::AscCdl,
        }]);
        assert_eq!(p.num_ops(), 1);
        let mut px = [[-0.5, 0.5, 2.0]];
        p.apply_rgb(&mut px);
        assert_eq!(px[0], [0.0, 0.5, 2.0]);
    }
}
