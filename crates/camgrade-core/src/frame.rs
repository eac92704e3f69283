//! 8-bit BGR frames.
//!
//! Capture devices deliver interleaved `B, G, R` bytes, row-major with no
//! padding. [`BgrFrame`] is that layout and nothing more.

use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult};

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
}

impl Size {
    /// Creates a size.
    #[inline]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    /// Number of pixels.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// True when either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Interleaved 8-bit BGR image.
///
/// # Example
///
/// ```rust
/// use camgrade_core::BgrFrame;
///
/// let mut frame = BgrFrame::filled(4, 2, [10, 20, 30]);
/// frame.set_pixel(3, 1, [1, 2, 3]);
/// assert_eq!(frame.pixel(0, 0), [10, 20, 30]);
/// assert_eq!(frame.pixel(3, 1), [1, 2, 3]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BgrFrame {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl BgrFrame {
    /// Bytes per pixel.
    pub const CHANNELS: usize = 3;

    /// Black frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * Self::CHANNELS],
        }
    }

    /// Frame filled with one BGR value.
    pub fn filled(width: usize, height: usize, bgr: [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * Self::CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&bgr);
        }
        Self { width, height, data }
    }

    /// Wraps existing BGR bytes.
    pub fn from_vec(width: usize, height: usize, data: Vec<u8>) -> CoreResult<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(Self::CHANNELS))
            .ok_or_else(|| CoreError::InvalidSize(format!("{width}x{height} overflows")))?;
        if data.len() != expected {
            return Err(CoreError::BufferLength {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Builds a frame from a per-pixel function returning BGR.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> [u8; 3]) -> Self {
        let mut data = Vec::with_capacity(width * height * Self::CHANNELS);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y));
            }
        }
        Self { width, height, data }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// True for a zero-area frame or missing pixel data.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size().is_empty() || self.data.is_empty()
    }

    /// Raw BGR bytes.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw BGR bytes.
    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the frame, returning its bytes.
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// BGR value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the frame.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * Self::CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Writes the BGR value at `(x, y)`.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, bgr: [u8; 3]) {
        let i = (y * self.width + x) * Self::CHANNELS;
        self.data[i..i + 3].copy_from_slice(&bgr);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vec_checks_length() {
        assert!(BgrFrame::from_vec(2, 2, vec![0; 12]).is_ok());
        let err = BgrFrame::from_vec(2, 2, vec![0; 11]).unwrap_err();
        assert!(matches!(err, CoreError::BufferLength { expected: 12, actual: 11, .. }));
    }

    #[test]
    fn empty_frames() {
        assert!(BgrFrame::default().is_empty());
        assert!(BgrFrame::new(0, 10).is_empty());
        assert!(!BgrFrame::new(1, 1).is_empty());
    }

    #[test]
    fn from_fn_layout() {
        let f = BgrFrame::from_fn(3, 2, |x, y| [x as u8, y as u8, 7]);
        assert_eq!(f.pixel(2, 1), [2, 1, 7]);
        assert_eq!(f.as_bytes().len(), 18);
    }
}
