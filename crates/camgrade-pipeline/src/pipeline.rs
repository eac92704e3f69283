//! The per-frame grading loop.

use camgrade_color::TransformProvider;
use camgrade_core::{BgrFrame, ColorTransformParams};
use tracing::{debug, info, trace};

use crate::convert::rgb_to_bgr;
use crate::resample::Resampler;
use crate::stats::{FrameStats, FrameTimings, Stopwatch};
use crate::strategy::{GradeStrategy, build_strategy};
use crate::{FrameBuffers, GradeMode, PipelineConfig, PipelineError, PipelineResult};

/// Grades camera frames into display frames.
///
/// All buffers and resample tables are allocated in the constructor.
/// [`process`](Self::process) writes into them and returns a reference to
/// the output buffer, which is the same storage on every call.
///
/// Not meant for concurrent use: callers serialize `process` calls.
///
/// # Example
///
/// ```
/// use camgrade_color::Config;
/// use camgrade_core::{BgrFrame, ColorSpaces, ColorTransformParams, Size};
/// use camgrade_pipeline::{FramePipeline, PipelineConfig};
///
/// let config = PipelineConfig::new(Size::new(64, 48), Size::new(32, 24))
///     .with_lut_size(17)
///     .with_spaces(ColorSpaces::uniform("ACEScg"));
/// let mut pipeline = FramePipeline::new(config, Config::builtin()).unwrap();
///
/// let frame = BgrFrame::filled(64, 48, [128, 128, 128]);
/// let params = ColorTransformParams::identity(pipeline.config().gain_scale);
/// let out = pipeline.process(&frame, &params).unwrap().unwrap();
/// assert_eq!(out.width(), 64);
/// assert!((out.pixel(10, 10)[1] as i32 - 128).abs() <= 1);
/// ```
pub struct FramePipeline {
    config: PipelineConfig,
    strategy: Box<dyn GradeStrategy>,
    downsample: Resampler,
    upsample: Resampler,
    buffers: FrameBuffers,
    stats: FrameStats,
}

impl std::fmt::Debug for FramePipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePipeline")
            .field("config", &self.config)
            .field("mode", &self.strategy.mode())
            .field("rebuilds", &self.strategy.rebuild_count())
            .finish_non_exhaustive()
    }
}

impl FramePipeline {
    /// Builds a pipeline using the strategy selected by `config.mode`.
    pub fn new<P>(config: PipelineConfig, provider: P) -> PipelineResult<Self>
    where
        P: TransformProvider + Send + 'static,
    {
        config.validate()?;
        let strategy = build_strategy(&config, provider)?;
        Self::with_strategy(config, strategy)
    }

    /// Builds a pipeline around a caller-supplied strategy.
    pub fn with_strategy(config: PipelineConfig, strategy: Box<dyn GradeStrategy>) -> PipelineResult<Self> {
        config.validate()?;
        let output_size = config.output_size();
        let downsample = Resampler::area(config.input_size, config.working_size);
        let upsample = Resampler::bilinear(config.working_size, output_size);
        let buffers = FrameBuffers::new(config.working_size, output_size);

        info!(
            input = %config.input_size,
            working = %config.working_size,
            output = %output_size,
            mode = ?strategy.mode(),
            lut_size = config.lut_size,
            blue_axis = ?config.blue_axis,
            spaces = %config.spaces,
            "frame pipeline ready"
        );

        Ok(Self {
            config,
            strategy,
            downsample,
            upsample,
            buffers,
            stats: FrameStats::default(),
        })
    }

    /// Pipeline configuration.
    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Active grade mode.
    #[inline]
    pub fn mode(&self) -> GradeMode {
        self.strategy.mode()
    }

    /// Number of grade rebuilds so far.
    #[inline]
    pub fn rebuild_count(&self) -> u64 {
        self.strategy.rebuild_count()
    }

    /// Timing statistics.
    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Pipeline buffers.
    #[inline]
    pub fn buffers(&self) -> &FrameBuffers {
        &self.buffers
    }

    /// Last delivered frame.
    #[inline]
    pub fn output(&self) -> &BgrFrame {
        self.buffers.output()
    }

    /// Grades one frame.
    ///
    /// Returns `Ok(None)` for an empty frame: nothing to show, try the next
    /// one. A frame whose size differs from `input_size` is a
    /// [`PipelineError::Dimensions`]; an unresolvable color space surfaces
    /// as a configuration error from the first grade. In every case the
    /// pipeline stays usable.
    pub fn process(
        &mut self,
        frame: &BgrFrame,
        params: &ColorTransformParams,
    ) -> PipelineResult<Option<&BgrFrame>> {
        if frame.is_empty() {
            debug!("empty frame, skipping");
            return Ok(None);
        }
        if frame.size() != self.config.input_size
            || frame.as_bytes().len() != self.config.input_size.pixel_count() * BgrFrame::CHANNELS
        {
            return Err(PipelineError::Dimensions {
                expected: self.config.input_size,
                actual: frame.size(),
            });
        }

        let mut timings = FrameTimings::default();
        let mut watch = Stopwatch::start();
        let needs_resize = self.buffers.needs_resize();
        let (rgb, working, output) = self.buffers.parts_mut();

        self.downsample.bgr_to_rgb(frame.as_bytes(), rgb, self.config.mirror);
        timings.convert = watch.lap();

        self.strategy.grade(rgb, params, &self.config.spaces)?;
        timings.grade = watch.lap();

        if needs_resize {
            rgb_to_bgr(rgb, working.as_bytes_mut());
            timings.quantize = watch.lap();
            self.upsample.bgr(working.as_bytes(), output.as_bytes_mut());
            timings.resize = watch.lap();
        } else {
            rgb_to_bgr(rgb, output.as_bytes_mut());
            timings.quantize = watch.lap();
        }

        trace!(total_us = timings.total().as_micros() as u64, "frame graded");
        self.stats.record(timings);
        Ok(Some(self.buffers.output()))
    }
}
