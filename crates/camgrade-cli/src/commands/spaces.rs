//! List what a color config offers.

use anyhow::Result;
use clap::Args;

use super::SpaceArgs;

/// Arguments for the `spaces` command.
#[derive(Args, Debug)]
pub struct SpacesArgs {
    #[command(flatten)]
    pub spaces: SpaceArgs,

    /// Also print aliases and descriptions
    #[arg(short, long)]
    pub long: bool,
}

/// Run the spaces command.
pub fn run(args: SpacesArgs) -> Result<()> {
    let config = args.spaces.load_config()?;

    println!("Config: {}", config.name());
    println!();
    println!("Color spaces:");
    for cs in config.colorspaces() {
        let kind = if cs.is_data() { "data" } else { "color" };
        println!("  {} [{}, {}]", cs.name(), kind, cs.transfer());
        if args.long {
            if !cs.aliases().is_empty() {
                println!("      aliases: {}", cs.aliases().join(", "));
            }
            if !cs.description().is_empty() {
                println!("      {}", cs.description());
            }
        }
    }

    println!();
    println!("Displays:");
    for display in config.displays() {
        println!("  {}", display.name());
        for view in display.views() {
            println!("    {} -> {}", view.name(), view.colorspace());
        }
    }
    Ok(())
}
