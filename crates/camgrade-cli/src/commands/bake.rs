//! Bake the grade chain and export it as a `.cube` file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use camgrade_core::{ColorSpaces, DEFAULT_GAIN_SCALE};
use camgrade_lut::{DEFAULT_LUT_SIZE, LutBaker};

use super::{ParamArgs, SpaceArgs};

/// Arguments for the `bake` command.
#[derive(Args, Debug)]
pub struct BakeArgs {
    /// Output .cube file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Lattice points per axis
    #[arg(short, long, default_value_t = DEFAULT_LUT_SIZE)]
    pub size: usize,

    /// Gain multiplier
    #[arg(long = "gain-scale", default_value_t = DEFAULT_GAIN_SCALE)]
    pub gain_scale: f32,

    #[command(flatten)]
    pub params: ParamArgs,

    #[command(flatten)]
    pub spaces: SpaceArgs,
}

/// Run the bake command.
pub fn run(args: BakeArgs) -> Result<()> {
    let config = args.spaces.load_config()?;
    let spaces = args.spaces.apply(ColorSpaces::default());
    let params = args.params.params();

    let mut baker = LutBaker::new(config, args.size)?.with_gain_scale(args.gain_scale);
    let atlas = baker
        .bake(&params, &spaces)
        .with_context(|| format!("Failed to bake {spaces}"))?;
    atlas
        .write_cube(&args.output)
        .with_context(|| format!("Failed to write: {}", args.output.display()))?;

    info!(
        output = %args.output.display(),
        size = args.size,
        spaces = %spaces,
        "baked LUT"
    );
    Ok(())
}
