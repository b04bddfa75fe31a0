use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

fn default_threshold() -> f64 {
    0.1
}

/// Run parameters as one explicit value object: the adapters and the engine
/// invocation take what they need from here, nothing reads ambient state.
#[derive(Debug, Clone, Deserialize)]
pub struct Params {
    /// Coarse grid sources, one shapefile per orbit direction.
    pub ascending_shapefile: PathBuf,
    pub descending_shapefile: PathBuf,

    /// Fine grid definition (GeoJSON FeatureCollection).
    pub fine_grid_geojson: PathBuf,

    /// Optional newline-delimited tile allow-list.
    #[serde(default)]
    pub tile_allow_list: Option<PathBuf>,

    /// Correspondence table destination.
    pub overlap_outfile: PathBuf,

    /// Coverage percent a pair must strictly exceed to be reported.
    #[serde(default = "default_threshold")]
    pub threshold_percent: f64,

    /// Inclusive row range to drop from the coarse grid (night-side rows).
    #[serde(default)]
    pub exclude_rows: Option<(u32, u32)>,

    // Remote sources for the download command.
    #[serde(default)]
    pub ascending_shapefile_url: Option<String>,
    #[serde(default)]
    pub descending_shapefile_url: Option<String>,
    #[serde(default)]
    pub fine_grid_url: Option<String>,
    #[serde(default)]
    pub tile_allow_list_url: Option<String>,
}

impl Params {
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read params file: {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse params file: {}", path.display()))
    }
}
