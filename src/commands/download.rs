use anyhow::{bail, Result};

use crate::cli::{Cli, DownloadArgs};
use crate::common::{ensure_dir_exists, extract_zip};
use crate::config::Params;
use crate::download::{download_big_file, url_file_name};

pub fn run(cli: &Cli, args: &DownloadArgs) -> Result<()> {
    let params = Params::from_file(&args.config)?;
    ensure_dir_exists(&args.out)?;

    let sources = [
        ("ascending shapefile", &params.ascending_shapefile_url),
        ("descending shapefile", &params.descending_shapefile_url),
        ("fine grid", &params.fine_grid_url),
        ("tile allow-list", &params.tile_allow_list_url),
    ];

    let mut fetched = 0usize;
    for (label, url) in sources {
        let Some(url) = url else { continue };
        let dest = args.out.join(url_file_name(url)?);

        if cli.verbose > 0 {
            eprintln!("[download] {label}: {url} -> {}", dest.display());
        }
        download_big_file(url, &dest, args.force)?;

        // Shapefile archives unpack next to themselves, named after the stem.
        if dest.extension().is_some_and(|ext| ext == "zip") {
            let unpack_dir = dest.with_extension("");
            if cli.verbose > 0 {
                eprintln!("[extract] {} -> {}", dest.display(), unpack_dir.display());
            }
            extract_zip(&dest, &unpack_dir, true)?;
        }
        fetched += 1;
    }

    if fetched == 0 {
        bail!("No source URLs configured in {}", args.config.display());
    }
    println!("Fetched {fetched} sources into {}", args.out.display());
    Ok(())
}
