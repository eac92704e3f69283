//! camgrade - LUT color grading for camera frames
//!
//! Runs still images through the same per-frame pipeline a live preview uses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

mod commands;
mod logger;

#[derive(Parser)]
#[command(name = "camgrade")]
#[command(author, version, about = "LUT-based color grading for camera frames")]
#[command(long_about = "
Grades BGR camera frames through a baked 3D LUT.

Examples:
  camgrade grade frame.png -o graded.png --temperature 0.3 --gain 1.2
  camgrade grade frame.jpg -o out.png --trackbar 130,95,120 --working 960x540
  camgrade grade frame.png -o out.png --pipeline pipeline.yaml --mode direct
  camgrade bake -o look.cube --size 33 --temperature -0.2
  camgrade bench --input 1920x1080 --working 960x540 --frames 300
  camgrade spaces --config studio.yaml
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a still image as one camera frame
    #[command(visible_alias = "g")]
    Grade(commands::grade::GradeArgs),

    /// Bake the grade and export it as a .cube file
    Bake(commands::bake::BakeArgs),

    /// Time the per-frame loop on synthetic frames
    Bench(commands::bench::BenchArgs),

    /// List color spaces, displays and views
    #[command(visible_alias = "ls")]
    Spaces(commands::spaces::SpacesArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Grade(args) => commands::grade::run(args),
        Commands::Bake(args) => commands::bake::run(args),
        Commands::Bench(args) => commands::bench::run(args),
        Commands::Spaces(args) => commands::spaces::run(args),
    }
}
