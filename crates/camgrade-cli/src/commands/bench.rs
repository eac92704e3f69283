//! Time the per-frame loop on synthetic frames.

use std::time::Instant;

use anyhow::Result;
use clap::Args;
use tracing::info;

use camgrade_core::{BgrFrame, Size};
use camgrade_pipeline::{FramePipeline, PipelineConfig};

use super::{AxisArg, ModeArg, ParamArgs, SpaceArgs, parse_size};

/// Arguments for the `bench` command.
#[derive(Args, Debug)]
pub struct BenchArgs {
    /// Capture resolution, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, default_value = "1920x1080")]
    pub input: Size,

    /// Working resolution, WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, default_value = "960x540")]
    pub working: Size,

    /// Number of frames
    #[arg(short = 'n', long, default_value_t = 300)]
    pub frames: u32,

    /// Change the gain every N frames to force rebakes (0 = never)
    #[arg(long, default_value_t = 0)]
    pub vary: u32,

    /// LUT lattice points per axis
    #[arg(long = "lut-size", default_value_t = camgrade_lut::DEFAULT_LUT_SIZE)]
    pub lut_size: usize,

    /// Grade strategy
    #[arg(long, value_enum, default_value = "atlas")]
    pub mode: ModeArg,

    /// Blue interpolation in the atlas
    #[arg(long = "blue-axis", value_enum, default_value = "linear")]
    pub blue_axis: AxisArg,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub spaces: SpaceArgs,
}

/// Moving gradient so consecutive frames differ.
fn synthetic_frame(size: Size, t: u32) -> BgrFrame {
    let shift = (t * 3) as usize;
    BgrFrame::from_fn(size.width, size.height, |x, y| {
        [
            ((x + shift) % 256) as u8,
            ((y + shift / 2) % 256) as u8,
            ((x / 2 + y / 2) % 256) as u8,
        ]
    })
}

/// Run the bench command.
pub fn run(args: BenchArgs) -> Result<()> {
    let config = PipelineConfig::new(args.input, args.working)
        .with_lut_size(args.lut_size)
        .with_mode(args.mode.into())
        .with_blue_axis(args.blue_axis.into())
        .with_spaces(args.spaces.apply(Default::default()));
    let mut pipeline = FramePipeline::new(config, args.spaces.load_config()?)?;

    // a handful of distinct frames, cycled
    let frames: Vec<BgrFrame> = (0..8).map(|t| synthetic_frame(args.input, t)).collect();
    let mut params = args.params.params();
    let base_gain = params.gain;

    let start = Instant::now();
    for i in 0..args.frames {
        if args.vary > 0 && i % args.vary == 0 {
            let step = (i / args.vary) % 10;
            params.gain = base_gain * (0.8 + step as f32 * 0.04);
        }
        pipeline.process(&frames[i as usize % frames.len()], &params)?;
    }
    let elapsed = start.elapsed();

    let n = args.frames.max(1) as f64;
    let secs = elapsed.as_secs_f64().max(f64::EPSILON);
    info!(
        frames = args.frames,
        mode = ?pipeline.mode(),
        rebuilds = pipeline.rebuild_count(),
        "bench finished"
    );
    println!(
        "{} frames in {:.2}s: {:.1} fps, {:.3} ms/frame, {} rebuilds",
        args.frames,
        elapsed.as_secs_f64(),
        n / secs,
        secs * 1000.0 / n,
        pipeline.rebuild_count()
    );
    Ok(())
}
