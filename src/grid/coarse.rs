use std::ops::RangeInclusive;
use std::path::Path;

use anyhow::{bail, Context, Result};
use geo::{coord, Area, BooleanOps, LineString, Polygon, Rect};
use shapefile::dbase::{FieldValue, Record};

use crate::common::shape_outer_rings;
use crate::types::{pathrow_id, row_of, GeometryRecord, GridKind};

/// Policy deciding which rings of a coarse record participate in overlap.
/// Kept out of the engine: it is a property of the grid source, not of the
/// overlap computation.
pub enum RingFilter {
    /// Every ring is kept.
    KeepAll,
    /// A ring is kept only if its intersection with the reference rectangle
    /// has positive area. A record whose rings are all dropped is omitted.
    ReferenceBox(Rect<f64>),
}

impl RingFilter {
    /// High-latitude band where sunlit ascending-orbit acquisitions exist.
    pub fn arctic_ascending() -> Self {
        RingFilter::ReferenceBox(Rect::new(
            coord! { x: -179.9, y: 65.0 },
            coord! { x: 179.9, y: 89.9 },
        ))
    }

    fn keeps(&self, ring: &LineString<f64>) -> bool {
        match self {
            RingFilter::KeepAll => true,
            RingFilter::ReferenceBox(rect) => {
                let clip = rect.to_polygon();
                Polygon::new(ring.clone(), vec![]).intersection(&clip).unsigned_area() > 0.0
            }
        }
    }
}

/// Identifier from the dBase attributes: the concatenated `PR` field as text
/// or number, falling back to separate `PATH`/`ROW` fields.
fn record_identifier(record: &Record) -> Result<String> {
    match record.get("PR") {
        Some(FieldValue::Character(Some(s))) => return Ok(s.trim().to_string()),
        Some(FieldValue::Numeric(Some(n))) => return Ok(format!("{:06}", *n as i64)),
        _ => {}
    }
    match (record.get("PATH"), record.get("ROW")) {
        (Some(FieldValue::Numeric(Some(path))), Some(FieldValue::Numeric(Some(row)))) => {
            Ok(pathrow_id(*path as u32, *row as u32))
        }
        _ => bail!("missing or invalid PR attribute"),
    }
}

/// Load one coarse path/row grid from a shapefile. Records are sorted by
/// identifier so the downstream scan order is deterministic.
pub fn load_coarse_grid(
    path: &Path,
    kind: GridKind,
    filter: &RingFilter,
    exclude_rows: Option<RangeInclusive<u32>>,
    verbose: u8,
) -> Result<Vec<GeometryRecord>> {
    let mut reader = shapefile::Reader::from_path(path)
        .with_context(|| format!("Failed to open shapefile: {}", path.display()))?;

    let mut records = Vec::with_capacity(reader.shape_count()?);
    let mut excluded = 0usize;
    let mut filtered = 0usize;

    for result in reader.iter_shapes_and_records() {
        let (shape, attrs) = result.context("Error reading shape+record")?;
        let identifier = record_identifier(&attrs)
            .with_context(|| format!("in {}", path.display()))?;

        if let (Some(range), Some(row)) = (&exclude_rows, row_of(&identifier)) {
            if range.contains(&row) {
                excluded += 1;
                continue;
            }
        }

        let rings: Vec<LineString<f64>> = shape_outer_rings(&shape)
            .with_context(|| format!("record {identifier}"))?
            .into_iter()
            .filter(|ring| filter.keeps(ring))
            .collect();
        if rings.is_empty() {
            filtered += 1;
            continue;
        }

        records.push(GeometryRecord::coarse(identifier, kind, rings));
    }

    records.sort_by(|a, b| a.identifier.cmp(&b.identifier));

    if verbose > 0 {
        eprintln!(
            "[coarse] {}: {} records ({excluded} excluded by row, {filtered} dropped by ring filter)",
            path.display(), records.len()
        );
    }

    Ok(records)
}
