use std::io::Write;

use anyhow::Result;

use crate::types::OverlapRecord;

/// First line of the correspondence table, fixed for compatibility with
/// downstream consumers.
pub const REPORT_HEADER: &str = "PathRow S2TileID S2ULX S2ULY PercentOfS2";

/// One report line: coverage with exactly one fractional digit, everything
/// else echoed as the adapter supplied it.
pub fn format_record(record: &OverlapRecord) -> String {
    format!(
        "{} {} {} {} {:.1}",
        record.coarse_id, record.fine_id, record.anchor_x, record.anchor_y, record.coverage
    )
}

/// Write the table in engine order. No sorting and no filtering happen here.
pub fn write_report<W: Write>(mut out: W, records: &[OverlapRecord]) -> Result<()> {
    writeln!(out, "{REPORT_HEADER}")?;
    for record in records {
        writeln!(out, "{}", format_record(record))?;
    }
    Ok(())
}
