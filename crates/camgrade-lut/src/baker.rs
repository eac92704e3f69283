//! Lazy, memoized atlas baking.
//!
//! The baker keeps one atlas and the `(params, spaces, gain scale)` value
//! it was baked from. Asking again with an equal snapshot returns the same
//! atlas without touching the provider. A different snapshot compiles a new
//! grade chain first and only then rewrites the atlas storage in place, so a
//! configuration error leaves the previous atlas valid.

use camgrade_color::TransformProvider;
use camgrade_core::{ColorSpaces, ColorTransformParams, DEFAULT_GAIN_SCALE};
use tracing::{debug, trace};

use crate::{LutAtlas, LutResult, grade_chain};

/// Reference lattice resolution.
pub const DEFAULT_LUT_SIZE: usize = 32;

#[derive(Debug, Clone, PartialEq)]
struct BakeKey {
    params: ColorTransformParams,
    spaces: ColorSpaces,
    gain_scale: f32,
}

/// Bakes grade chains into a [`LutAtlas`], rebuilding only on change.
///
/// # Example
///
/// ```
/// use camgrade_color::Config;
/// use camgrade_core::{ColorSpaces, ColorTransformParams};
/// use camgrade_lut::LutBaker;
///
/// let mut baker = LutBaker::new(Config::builtin(), 17).unwrap();
/// let params = ColorTransformParams::default();
/// let spaces = ColorSpaces::default();
///
/// let first = baker.bake(&params, &spaces).unwrap().generation();
/// let second = baker.bake(&params, &spaces).unwrap().generation();
/// assert_eq!(first, second);
/// assert_eq!(baker.rebuild_count(), 1);
/// ```
#[derive(Debug)]
pub struct LutBaker<P> {
    provider: P,
    gain_scale: f32,
    atlas: LutAtlas,
    key: Option<BakeKey>,
    rebuilds: u64,
}

impl<P: TransformProvider> LutBaker<P> {
    /// Creates a baker with `size` lattice points per axis.
    pub fn new(provider: P, size: usize) -> LutResult<Self> {
        Ok(Self {
            provider,
            gain_scale: DEFAULT_GAIN_SCALE,
            atlas: LutAtlas::identity(size)?,
            key: None,
            rebuilds: 0,
        })
    }

    /// Sets the gain scale.
    pub fn with_gain_scale(mut self, gain_scale: f32) -> Self {
        self.set_gain_scale(gain_scale);
        self
    }

    /// Changes the gain scale. The next bake rebuilds.
    pub fn set_gain_scale(&mut self, gain_scale: f32) {
        self.gain_scale = gain_scale;
    }

    /// Current gain scale.
    #[inline]
    pub fn gain_scale(&self) -> f32 {
        self.gain_scale
    }

    /// Lattice points per axis.
    #[inline]
    pub fn size(&self) -> usize {
        self.atlas.size()
    }

    /// The transform provider.
    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Last baked atlas (identity before the first bake).
    #[inline]
    pub fn atlas(&self) -> &LutAtlas {
        &self.atlas
    }

    /// Number of rebuilds since construction.
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// True when `bake` would return the cached atlas.
    pub fn is_current(&self, params: &ColorTransformParams, spaces: &ColorSpaces) -> bool {
        let params = params.clamped();
        self.key.as_ref().is_some_and(|k| {
            k.params == params && k.gain_scale == self.gain_scale && k.spaces == *spaces
        })
    }

    /// Forgets the cached key so the next bake rebuilds.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Returns the atlas for a snapshot, baking it if it changed.
    ///
    /// Parameters are clamped to their ranges before comparison and use.
    pub fn bake(&mut self, params: &ColorTransformParams, spaces: &ColorSpaces) -> LutResult<&LutAtlas> {
        if self.is_current(params, spaces) {
            trace!(generation = self.atlas.generation(), "LUT cache hit");
            return Ok(&self.atlas);
        }

        let params = params.clamped();
        let group = grade_chain(&params, spaces, self.gain_scale);
        let transform = self.provider.processor(&group)?;
        self.atlas.rebuild(transform.as_ref());
        self.rebuilds += 1;

        match &mut self.key {
            Some(key) => {
                key.params = params;
                key.gain_scale = self.gain_scale;
                key.spaces.clone_from(spaces);
            }
            None => {
                self.key = Some(BakeKey {
                    params,
                    spaces: spaces.clone(),
                    gain_scale: self.gain_scale,
                })
            }
        }

        debug!(
            size = self.atlas.size(),
            generation = self.atlas.generation(),
            temperature = params.temperature,
            tint = params.tint,
            gain = params.gain,
            spaces = %spaces,
            "rebuilt LUT atlas"
        );
        Ok(&self.atlas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LutError;
    use camgrade_color::{ColorError, Config};

    fn baker() -> LutBaker<Config> {
        LutBaker::new(Config::builtin(), 9).unwrap()
    }

    #[test]
    fn rejects_small_size() {
        assert!(matches!(
            LutBaker::new(Config::builtin(), 1),
            Err(LutError::InvalidSize { size: 1 })
        ));
    }

    #[test]
    fn memoizes_equal_snapshots() {
        let mut b = baker();
        let p = ColorTransformParams::default().with_temperature(0.3);
        let s = ColorSpaces::default();
        let g1 = b.bake(&p, &s).unwrap().generation();
        let ptr = b.atlas().data().as_ptr();
        let g2 = b.bake(&p, &s).unwrap().generation();
        assert_eq!(g1, g2);
        assert_eq!(b.rebuild_count(), 1);
        assert_eq!(b.atlas().data().as_ptr(), ptr);
    }

    #[test]
    fn any_change_rebuilds() {
        let mut b = baker();
        let s = ColorSpaces::default();
        b.bake(&ColorTransformParams::default(), &s).unwrap();
        b.bake(&ColorTransformParams::default().with_tint(0.1), &s).unwrap();
        assert_eq!(b.rebuild_count(), 2);
        b.bake(&ColorTransformParams::default().with_tint(0.1), &ColorSpaces::uniform("Raw"))
            .unwrap();
        assert_eq!(b.rebuild_count(), 3);
        b.set_gain_scale(1.0);
        b.bake(&ColorTransformParams::default().with_tint(0.1), &ColorSpaces::uniform("Raw"))
            .unwrap();
        assert_eq!(b.rebuild_count(), 4);
    }

    #[test]
    fn clamped_params_share_cache() {
        let mut b = baker();
        let s = ColorSpaces::default();
        b.bake(&ColorTransformParams::default().with_temperature(5.0), &s).unwrap();
        b.bake(&ColorTransformParams::default().with_temperature(1.0), &s).unwrap();
        assert_eq!(b.rebuild_count(), 1);
    }

    #[test]
    fn bad_space_keeps_previous_atlas() {
        let mut b = baker();
        let p = ColorTransformParams::default();
        let good = ColorSpaces::default();
        let before = b.bake(&p, &good).unwrap().clone();

        let mut bad = good.clone();
        bad.working = "Not A Space".into();
        let err = b.bake(&p, &bad).unwrap_err();
        assert!(matches!(err, LutError::Color(ColorError::ColorSpaceNotFound { .. })));
        assert_eq!(b.atlas(), &before);
        assert_eq!(b.rebuild_count(), 1);
        assert!(b.is_current(&p, &good));
    }

    #[test]
    fn identity_grade_is_identity_cube() {
        let mut b = baker();
        let p = ColorTransformParams::identity(b.gain_scale());
        let atlas = b.bake(&p, &ColorSpaces::uniform("ACEScg")).unwrap();
        for (i, texel) in atlas.data().iter().enumerate() {
            let n = atlas.size();
            let expect = [
                atlas.grid_value(i % n),
                atlas.grid_value((i / n) % n),
                atlas.grid_value(i / (n * n)),
            ];
            for c in 0..3 {
                assert!((texel[c] - expect[c]).abs() < 1e-5, "texel {i}: {texel:?} vs {expect:?}");
            }
        }
    }
}
