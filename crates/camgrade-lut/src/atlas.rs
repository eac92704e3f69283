//! Flattened 3D LUT ("atlas").
//!
//! A cube of `N` lattice points per axis stored as a 2D texture `N` texels
//! wide and `N²` texels high. Blue selects an `N x N` tile, green the row in
//! the tile, red the column:
//!
//! ```text
//!        x = r (0..N)
//!     ┌───────────┐
//!     │  tile b=0 │  y = 0 .. N-1        (g = y)
//!     ├───────────┤
//!     │  tile b=1 │  y = N .. 2N-1       (g = y - N)
//!     ├───────────┤
//!     │    ...    │
//!     └───────────┘  y = b*N + g
//! ```
//!
//! Read row-major this is the same order as a `.cube` file (red fastest,
//! blue slowest), so export is a straight dump.

use std::io::Write;
use std::path::Path;

use camgrade_color::RgbTransform;

use crate::{LutError, LutResult};

/// Baked color cube in atlas layout.
#[derive(Debug, Clone, PartialEq)]
pub struct LutAtlas {
    size: usize,
    data: Vec<[f32; 3]>,
    generation: u64,
}

impl LutAtlas {
    /// Identity cube of `size` points per axis.
    pub fn identity(size: usize) -> LutResult<Self> {
        if size < 2 {
            return Err(LutError::InvalidSize { size });
        }
        let mut atlas = Self {
            size,
            data: vec![[0.0; 3]; size * size * size],
            generation: 0,
        };
        atlas.fill_grid();
        Ok(atlas)
    }

    /// Lattice points per axis (`N`).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Texture width, equal to `N`.
    #[inline]
    pub fn width(&self) -> usize {
        self.size
    }

    /// Texture height, equal to `N²`.
    #[inline]
    pub fn height(&self) -> usize {
        self.size * self.size
    }

    /// Texel at atlas coordinate `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width()` or `y >= height()`.
    #[inline]
    pub fn texel(&self, x: usize, y: usize) -> [f32; 3] {
        assert!(
            x < self.width() && y < self.height(),
            "texel ({x}, {y}) outside {}x{} atlas",
            self.width(),
            self.height()
        );
        self.data[y * self.size + x]
    }

    /// Lattice value at integer indices.
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= size()`.
    #[inline]
    pub fn cube(&self, r: usize, g: usize, b: usize) -> [f32; 3] {
        let n = self.size;
        assert!(r < n && g < n && b < n, "lattice ({r}, {g}, {b}) outside size {n}");
        self.data[(b * n + g) * n + r]
    }

    /// All texels, row-major.
    #[inline]
    pub fn data(&self) -> &[[f32; 3]] {
        &self.data
    }

    /// Number of times the contents were rebuilt.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Lattice coordinate of index `i` on one axis.
    #[inline]
    pub fn grid_value(&self, i: usize) -> f32 {
        i as f32 / (self.size - 1) as f32
    }

    fn fill_grid(&mut self) {
        let n = self.size;
        let inv = 1.0 / (n - 1) as f32;
        for (i, texel) in self.data.iter_mut().enumerate() {
            let r = i % n;
            let g = (i / n) % n;
            let b = i / (n * n);
            *texel = [r as f32 * inv, g as f32 * inv, b as f32 * inv];
        }
    }

    /// Rewrites the contents in place from `transform` applied to the grid.
    pub(crate) fn rebuild(&mut self, transform: &dyn RgbTransform) {
        self.fill_grid();
        transform.apply_rgb(&mut self.data);
        self.generation += 1;
    }

    /// Writes the cube as an Adobe/Resolve `.cube` file.
    pub fn write_cube(&self, path: impl AsRef<Path>) -> LutResult<()> {
        let file = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(file);
        self.write_cube_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// Writes `.cube` text to any writer.
    pub fn write_cube_to(&self, w: &mut impl Write) -> LutResult<()> {
        writeln!(w, "# Created by camgrade")?;
        writeln!(w, "TITLE \"camgrade grade\"")?;
        writeln!(w, "LUT_3D_SIZE {}", self.size)?;
        writeln!(w, "DOMAIN_MIN 0.0 0.0 0.0")?;
        writeln!(w, "DOMAIN_MAX 1.0 1.0 1.0")?;
        writeln!(w)?;
        for [r, g, b] in &self.data {
            writeln!(w, "{r:.6} {g:.6} {b:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camgrade_color::{Mat3, Processor, ProcessorOp};

    #[test]
    fn dimensions() {
        let a = LutAtlas::identity(4).unwrap();
        assert_eq!(a.width(), 4);
        assert_eq!(a.height(), 16);
        assert_eq!(a.data().len(), 64);
        assert_eq!(a.generation(), 0);
    }

    #[test]
    fn too_small() {
        assert!(matches!(LutAtlas::identity(1), Err(LutError::InvalidSize { size: 1 })));
        assert!(LutAtlas::identity(0).is_err());
    }

    #[test]
    fn texel_layout() {
        let a = LutAtlas::identity(3).unwrap();
        // r = x, b*N + g = y
        assert_eq!(a.texel(2, 0), [1.0, 0.0, 0.0]);
        assert_eq!(a.texel(0, 1), [0.0, 0.5, 0.0]);
        assert_eq!(a.texel(0, 3), [0.0, 0.0, 0.5]);
        assert_eq!(a.texel(1, 7), [0.5, 0.5, 1.0]);
        assert_eq!(a.cube(1, 1, 2), a.texel(1, 2 * 3 + 1));
    }

    #[test]
    #[should_panic(expected = "outside 3x9 atlas")]
    fn texel_past_row_end_panics() {
        // (3, 0) would otherwise alias (0, 1)
        LutAtlas::identity(3).unwrap().texel(3, 0);
    }

    #[test]
    #[should_panic(expected = "outside size 3")]
    fn cube_index_out_of_range_panics() {
        LutAtlas::identity(3).unwrap().cube(3, 0, 0);
    }

    #[test]
    fn rebuild_keeps_storage() {
        let mut a = LutAtlas::identity(5).unwrap();
        let ptr = a.data().as_ptr();
        let p = Processor::from_ops(vec![ProcessorOp::Matrix(Mat3::diagonal(0.5, 0.5, 0.5))]);
        a.rebuild(&p);
        assert_eq!(a.data().as_ptr(), ptr);
        assert_eq!(a.generation(), 1);
        assert_eq!(a.cube(4, 4, 4), [0.5, 0.5, 0.5]);

        // second rebuild starts from the grid again, not the previous result
        a.rebuild(&p);
        assert_eq!(a.cube(4, 4, 4), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn cube_text() {
        let a = LutAtlas::identity(2).unwrap();
        let mut out = Vec::new();
        a.write_cube_to(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("LUT_3D_SIZE 2"));
        let rows: Vec<&str> = text.lines().filter(|l| l.starts_with(['0', '1'])).collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows[1], "1.000000 0.000000 0.000000");
        assert_eq!(rows[2], "0.000000 1.000000 0.000000");
        assert_eq!(rows[4], "0.000000 0.000000 1.000000");
    }

    #[test]
    fn cube_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grade.cube");
        LutAtlas::identity(3).unwrap().write_cube(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().filter(|l| l.starts_with(|c: char| c.is_ascii_digit())).count(), 27);
    }
}
