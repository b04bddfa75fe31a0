use anyhow::Result;
use clap::Parser;

use gridcross::cli::{Cli, Commands};
#[cfg(feature = "download")]
use gridcross::commands::download;
use gridcross::commands::overlap;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Overlap(args) => overlap::run(&cli, args),
        #[cfg(feature = "download")]
        Commands::Download(args) => download::run(&cli, args),
    }
}
