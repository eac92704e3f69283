//! Grade strategies.
//!
//! Both strategies evaluate the same grade chain and rebuild only when the
//! `(params, spaces)` snapshot changes:
//!
//! - [`AtlasGrade`] bakes a LUT atlas and samples it per pixel
//! - [`DirectGrade`] runs the compiled transform on every pixel
//!
//! The pipeline holds one as `Box<dyn GradeStrategy>`, picked by
//! [`GradeMode`].

use camgrade_color::{RgbTransform, TransformProvider};
use camgrade_core::{ColorSpaces, ColorTransformParams};
use camgrade_lut::{BlueAxis, LutBaker, grade_chain, sample_in_place};
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{GradeMode, PipelineConfig, PipelineResult};

/// Grades a float RGB working buffer in place.
pub trait GradeStrategy: Send {
    /// Applies the grade for `params` and `spaces` to `pixels`.
    ///
    /// On error the buffer contents are unspecified but it stays usable.
    fn grade(
        &mut self,
        pixels: &mut [[f32; 3]],
        params: &ColorTransformParams,
        spaces: &ColorSpaces,
    ) -> PipelineResult<()>;

    /// Which mode this strategy implements.
    fn mode(&self) -> GradeMode;

    /// Number of times the transform was rebuilt.
    fn rebuild_count(&self) -> u64;
}

/// Baked atlas and 2D sampling.
#[derive(Debug)]
pub struct AtlasGrade<P> {
    baker: LutBaker<P>,
    blue_axis: BlueAxis,
}

impl<P: TransformProvider> AtlasGrade<P> {
    /// Creates the strategy with its own baker.
    pub fn new(provider: P, lut_size: usize, gain_scale: f32, blue_axis: BlueAxis) -> PipelineResult<Self> {
        Ok(Self {
            baker: LutBaker::new(provider, lut_size)?.with_gain_scale(gain_scale),
            blue_axis,
        })
    }

    /// The underlying baker.
    pub fn baker(&self) -> &LutBaker<P> {
        &self.baker
    }
}

impl<P: TransformProvider + Send> GradeStrategy for AtlasGrade<P> {
    fn grade(
        &mut self,
        pixels: &mut [[f32; 3]],
        params: &ColorTransformParams,
        spaces: &ColorSpaces,
    ) -> PipelineResult<()> {
        let atlas = self.baker.bake(params, spaces)?;
        sample_in_place(atlas, pixels, self.blue_axis);
        Ok(())
    }

    fn mode(&self) -> GradeMode {
        GradeMode::Atlas
    }

    fn rebuild_count(&self) -> u64 {
        self.baker.rebuild_count()
    }
}

struct Compiled {
    params: ColorTransformParams,
    spaces: ColorSpaces,
    transform: Box<dyn RgbTransform>,
}

/// Compiled transform applied to every pixel.
pub struct DirectGrade<P> {
    provider: P,
    gain_scale: f32,
    current: Option<Compiled>,
    rebuilds: u64,
}

impl<P> std::fmt::Debug for DirectGrade<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectGrade")
            .field("gain_scale", &self.gain_scale)
            .field("rebuilds", &self.rebuilds)
            .field("compiled", &self.current.is_some())
            .finish_non_exhaustive()
    }
}

impl<P: TransformProvider> DirectGrade<P> {
    /// Creates the strategy.
    pub fn new(provider: P, gain_scale: f32) -> Self {
        Self {
            provider,
            gain_scale,
            current: None,
            rebuilds: 0,
        }
    }

    fn ensure(&mut self, params: &ColorTransformParams, spaces: &ColorSpaces) -> PipelineResult<&dyn RgbTransform> {
        let params = params.clamped();
        let compiled = match self.current.take() {
            Some(c) if c.params == params && c.spaces == *spaces => c,
            previous => {
                let group = grade_chain(&params, spaces, self.gain_scale);
                let transform = match self.provider.processor(&group) {
                    Ok(t) => t,
                    Err(e) => {
                        self.current = previous;
                        return Err(e.into());
                    }
                };
                self.rebuilds += 1;
                debug!(rebuilds = self.rebuilds, spaces = %spaces, "recompiled direct transform");
                Compiled {
                    params,
                    spaces: spaces.clone(),
                    transform,
                }
            }
        };
        Ok(self.current.insert(compiled).transform.as_ref())
    }
}

#[inline]
fn clamp_unit(px: &mut [f32; 3]) {
    for c in px.iter_mut() {
        *c = c.max(0.0).min(1.0);
    }
}

impl<P: TransformProvider + Send> GradeStrategy for DirectGrade<P> {
    fn grade(
        &mut self,
        pixels: &mut [[f32; 3]],
        params: &ColorTransformParams,
        spaces: &ColorSpaces,
    ) -> PipelineResult<()> {
        let transform = self.ensure(params, spaces)?;

        #[cfg(feature = "parallel")]
        pixels.par_chunks_mut(4096).for_each(|chunk| {
            chunk.iter_mut().for_each(clamp_unit);
            transform.apply_rgb(chunk);
        });

        #[cfg(not(feature = "parallel"))]
        {
            pixels.iter_mut().for_each(clamp_unit);
            transform.apply_rgb(pixels);
        }
        Ok(())
    }

    fn mode(&self) -> GradeMode {
        GradeMode::Direct
    }

    fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

/// Builds the strategy selected by `config.mode`.
pub fn build_strategy<P>(config: &PipelineConfig, provider: P) -> PipelineResult<Box<dyn GradeStrategy>>
where
    P: TransformProvider + Send + 'static,
{
    Ok(match config.mode {
        GradeMode::Atlas => Box::new(AtlasGrade::new(
            provider,
            config.lut_size,
            config.gain_scale,
            config.blue_axis,
        )?),
        GradeMode::Direct => Box::new(DirectGrade::new(provider, config.gain_scale)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use camgrade_color::Config;

    fn ramp() -> Vec<[f32; 3]> {
        (0..64)
            .map(|i| {
                let t = i as f32 / 63.0;
                [t, (t * 3.0).fract(), 1.0 - t]
            })
            .collect()
    }

    #[test]
    fn direct_memoizes() {
        let mut d = DirectGrade::new(Config::builtin(), 4.5);
        let p = ColorTransformParams::default();
        let s = ColorSpaces::default();
        let mut px = ramp();
        d.grade(&mut px, &p, &s).unwrap();
        d.grade(&mut px, &p, &s).unwrap();
        assert_eq!(d.rebuild_count(), 1);
        d.grade(&mut px, &p.with_tint(0.2), &s).unwrap();
        assert_eq!(d.rebuild_count(), 2);
    }

    #[test]
    fn atlas_tracks_direct() {
        let config = Config::builtin();
        let p = ColorTransformParams::identity(4.5).with_temperature(0.4).with_cdl(1.1, 0.9, 0.02);
        let s = ColorSpaces::default();

        let mut atlas = AtlasGrade::new(&config, 33, 4.5, BlueAxis::Linear).unwrap();
        let mut direct = DirectGrade::new(&config, 4.5);
        let mut a = ramp();
        let mut b = ramp();
        atlas.grade(&mut a, &p, &s).unwrap();
        direct.grade(&mut b, &p, &s).unwrap();
        for (x, y) in a.iter().zip(&b) {
            for c in 0..3 {
                assert!((x[c] - y[c]).abs() < 0.03, "{x:?} vs {y:?}");
            }
        }
    }

    #[test]
    fn direct_clamps_inputs() {
        let mut d = DirectGrade::new(Config::builtin(), 1.0);
        let mut px = vec![[f32::NAN, 2.0, -1.0]];
        d.grade(&mut px, &ColorTransformParams::default(), &ColorSpaces::uniform("Raw"))
            .unwrap();
        assert_eq!(px[0], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn direct_debug_shows_state() {
        let mut d = DirectGrade::new(Config::builtin(), 4.5);
        let mut px = ramp();
        d.grade(&mut px, &ColorTransformParams::default(), &ColorSpaces::default())
            .unwrap();
        let text = format!("{d:?}");
        assert!(text.starts_with("DirectGrade"), "{text}");
        assert!(text.contains("gain_scale: 4.5"), "{text}");
        assert!(text.contains("rebuilds: 1"), "{text}");
    }

    #[test]
    fn factory_respects_mode() {
        let c = PipelineConfig::default().with_mode(GradeMode::Direct);
        assert_eq!(build_strategy(&c, Config::builtin()).unwrap().mode(), GradeMode::Direct);
        let c = PipelineConfig::default();
        assert_eq!(build_strategy(&c, Config::builtin()).unwrap().mode(), GradeMode::Atlas);
    }

    #[test]
    fn errors_leave_strategy_usable() {
        let mut d = DirectGrade::new(Config::builtin(), 4.5);
        let mut px = ramp();
        let bad = ColorSpaces::uniform("Nowhere");
        assert!(d.grade(&mut px, &ColorTransformParams::default(), &bad).is_err());
        d.grade(&mut px, &ColorTransformParams::default(), &ColorSpaces::default())
            .unwrap();
        assert_eq!(d.rebuild_count(), 1);
    }
}
