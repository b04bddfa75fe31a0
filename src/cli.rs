use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Grid correspondence CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "gridcross", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the coarse-to-fine overlap correspondence table
    Overlap(OverlapArgs),

    /// Fetch grid definitions and the tile allow-list
    #[cfg(feature = "download")]
    Download(DownloadArgs),
}

#[derive(Args, Debug)]
pub struct OverlapArgs {
    /// Params file (JSON)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output file override (must be a file path; "-" is rejected)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Coverage threshold override, in percent
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Overwrite if the file exists
    #[arg(long)]
    pub force: bool,

    /// Echo each report line to stdout
    #[arg(long)]
    pub echo: bool,
}

#[cfg(feature = "download")]
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Params file (JSON) naming the source URLs
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output location (directory).
    #[arg(value_hint = ValueHint::DirPath)]
    pub out: PathBuf,

    /// Overwrite already-downloaded files
    #[arg(long)]
    pub force: bool,
}
