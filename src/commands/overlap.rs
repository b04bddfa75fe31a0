use anyhow::Result;

use crate::cli::{Cli, OverlapArgs};
use crate::config::Params;
use crate::geometry::compute_overlaps;
use crate::grid::{load_allow_list, load_coarse_grid, load_fine_grid, RingFilter};
use crate::io::{assert_not_stdout, PendingWrite};
use crate::report::{format_record, write_report};
use crate::types::GridKind;

pub fn run(cli: &Cli, args: &OverlapArgs) -> Result<()> {
    let params = Params::from_file(&args.config)?;
    let threshold = args.threshold.unwrap_or(params.threshold_percent);
    let exclude_rows = params.exclude_rows.map(|(lo, hi)| lo..=hi);

    let allow = params.tile_allow_list.as_deref().map(load_allow_list).transpose()?;

    let mut coarse = load_coarse_grid(
        &params.ascending_shapefile,
        GridKind::CoarseAscending,
        &RingFilter::arctic_ascending(),
        exclude_rows.clone(),
        cli.verbose,
    )?;
    coarse.extend(load_coarse_grid(
        &params.descending_shapefile,
        GridKind::CoarseDescending,
        &RingFilter::KeepAll,
        exclude_rows,
        cli.verbose,
    )?);
    // Both orbit directions feed one list; re-sort so the report order stays
    // deterministic across sources.
    coarse.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    let fine = load_fine_grid(&params.fine_grid_geojson, allow.as_ref(), cli.verbose)?;

    if cli.verbose > 0 {
        eprintln!(
            "[overlap] {} coarse x {} fine records, threshold {threshold}%",
            coarse.len(), fine.len()
        );
    }
    let overlaps = compute_overlaps(&coarse, &fine, threshold)?;

    if args.echo {
        for record in &overlaps {
            println!("{}", format_record(record));
        }
    }

    let out_path = args.output.clone().unwrap_or_else(|| params.overlap_outfile.clone());
    assert_not_stdout(&out_path)?;
    let mut sink = PendingWrite::open(&out_path, args.force)?;
    write_report(&mut sink, &overlaps)?;
    sink.finalize()?;

    println!("Wrote {} overlaps to {}", overlaps.len(), out_path.display());
    Ok(())
}
