//! Grade a still image through the frame pipeline.
//!
//! The image is treated as a single camera frame: its size becomes the
//! pipeline input size, the working size defaults to it as well.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::info;

use camgrade_core::Size;
use camgrade_pipeline::{FramePipeline, PipelineConfig};

use super::{AxisArg, ModeArg, ParamArgs, SpaceArgs, load_frame, parse_size, save_frame};

/// Arguments for the `grade` command.
#[derive(Args, Debug)]
pub struct GradeArgs {
    /// Input image (PNG or JPEG)
    pub input: PathBuf,

    /// Output image
    #[arg(short, long)]
    pub output: PathBuf,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub spaces: SpaceArgs,

    /// Pipeline config YAML; its input size is replaced by the image size
    #[arg(long)]
    pub pipeline: Option<PathBuf>,

    /// Resolution the grade runs at, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size)]
    pub working: Option<Size>,

    /// Output resolution, WIDTHxHEIGHT (input size by default)
    #[arg(long = "output-size", value_parser = parse_size)]
    pub output_size: Option<Size>,

    /// LUT lattice points per axis
    #[arg(long = "lut-size")]
    pub lut_size: Option<usize>,

    /// Gain multiplier
    #[arg(long = "gain-scale")]
    pub gain_scale: Option<f32>,

    /// Grade strategy
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Blue interpolation in the atlas
    #[arg(long = "blue-axis", value_enum)]
    pub blue_axis: Option<AxisArg>,

    /// Flip horizontally
    #[arg(long)]
    pub mirror: bool,
}

impl GradeArgs {
    /// Pipeline config for a frame of `input` size.
    pub fn pipeline_config(&self, input: Size) -> Result<PipelineConfig> {
        let mut config = match &self.pipeline {
            Some(path) => PipelineConfig::from_file(path)
                .with_context(|| format!("Failed to load pipeline config: {}", path.display()))?,
            None => PipelineConfig::new(input, input),
        };
        config.input_size = input;
        if let Some(working) = self.working {
            config.working_size = working;
        }
        if let Some(size) = self.output_size {
            config.output_size = Some(size);
        }
        if let Some(n) = self.lut_size {
            config.lut_size = n;
        }
        if let Some(scale) = self.gain_scale {
            config.gain_scale = scale;
        }
        if let Some(mode) = self.mode {
            config.mode = mode.into();
        }
        if let Some(axis) = self.blue_axis {
            config.blue_axis = axis.into();
        }
        config.mirror |= self.mirror;
        config.spaces = self.spaces.apply(config.spaces);
        Ok(config)
    }
}

/// Run the grade command.
pub fn run(args: GradeArgs) -> Result<()> {
    let frame = load_frame(&args.input)?;
    let config = args.pipeline_config(frame.size())?;
    let params = args.params.params();
    let color = args.spaces.load_config()?;

    info!(
        input = %args.input.display(),
        size = %frame.size(),
        spaces = %config.spaces,
        "grading"
    );

    let mut pipeline = FramePipeline::new(config, color)?;
    let Some(out) = pipeline.process(&frame, &params)? else {
        bail!("Input image is empty: {}", args.input.display());
    };
    save_frame(&args.output, out)?;
    let size = out.size();

    info!(
        output = %args.output.display(),
        size = %size,
        time = ?pipeline.stats().last().total(),
        "done"
    );
    Ok(())
}
