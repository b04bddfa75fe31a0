use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use geo::{Coord, LineString};
use serde_json::Value;

use crate::types::{Anchor, GeometryRecord};

/// Read a tile allow-list: one identifier per line, blank lines ignored.
pub fn load_allow_list(path: &Path) -> Result<HashSet<String>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read allow-list: {}", path.display()))?;
    Ok(parse_allow_list(&text))
}

fn parse_allow_list(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Load the fine grid from a GeoJSON FeatureCollection, keeping only tiles
/// named in `allow` when given. Records are sorted by identifier so the
/// downstream scan order is deterministic.
pub fn load_fine_grid(
    path: &Path,
    allow: Option<&HashSet<String>>,
    verbose: u8,
) -> Result<Vec<GeometryRecord>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read fine grid: {}", path.display()))?;
    let records = parse_fine_grid(&bytes, allow)
        .with_context(|| format!("in {}", path.display()))?;

    if verbose > 0 {
        eprintln!("[fine] {}: {} records", path.display(), records.len());
    }

    Ok(records)
}

fn parse_fine_grid(bytes: &[u8], allow: Option<&HashSet<String>>) -> Result<Vec<GeometryRecord>> {
    let value: Value = serde_json::from_slice(bytes).context("Failed to parse GeoJSON")?;
    let Some(features) = value["features"].as_array() else {
        bail!("not a FeatureCollection: missing features array");
    };

    let mut records = Vec::new();
    for feature in features {
        let props = &feature["properties"];
        let Some(identifier) = props["identifier"].as_str() else {
            bail!("feature without a string identifier property");
        };
        if let Some(allow) = allow {
            if !allow.contains(identifier) {
                continue;
            }
        }

        // Anchor is reporting metadata; a feature without one is still usable.
        let anchor = match (text_value(&props["ulx"]), text_value(&props["uly"])) {
            (Some(x), Some(y)) => Some(Anchor::new(x, y)),
            _ => None,
        };

        let rings = feature_rings(&feature["geometry"])
            .with_context(|| format!("feature {identifier}"))?;

        records.push(GeometryRecord::fine(identifier, rings, anchor));
    }

    records.sort_by(|a, b| a.identifier.cmp(&b.identifier));
    Ok(records)
}

/// Anchor properties arrive as strings or numbers; either way the report
/// must echo the literal text.
fn text_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Outer rings of a GeoJSON Polygon or MultiPolygon geometry. A third
/// ordinate, when present, is dropped.
fn feature_rings(geometry: &Value) -> Result<Vec<LineString<f64>>> {
    let coordinates = &geometry["coordinates"];
    let mut rings = Vec::new();

    match geometry["type"].as_str() {
        Some("MultiPolygon") => {
            for polygon in coordinates.as_array().map(Vec::as_slice).unwrap_or(&[]) {
                if let Some(ring) = outer_ring(polygon)? {
                    rings.push(ring);
                }
            }
        }
        Some("Polygon") => {
            if let Some(ring) = outer_ring(coordinates)? {
                rings.push(ring);
            }
        }
        other => bail!("unsupported geometry type: {other:?}"),
    }

    if rings.is_empty() {
        bail!("geometry with no outer ring");
    }
    Ok(rings)
}

/// First (outer) ring of one polygon coordinate array, force-closed.
fn outer_ring(polygon: &Value) -> Result<Option<LineString<f64>>> {
    let Some(positions) = polygon.as_array()
        .and_then(|rings| rings.first())
        .and_then(Value::as_array)
    else {
        return Ok(None);
    };

    let mut coords = Vec::with_capacity(positions.len() + 1);
    for position in positions {
        let position = position.as_array()
            .ok_or_else(|| anyhow!("coordinate is not an array"))?;
        let x = position.first().and_then(Value::as_f64);
        let y = position.get(1).and_then(Value::as_f64);
        let (Some(x), Some(y)) = (x, y) else {
            bail!("coordinate without numeric x/y");
        };
        coords.push(Coord { x, y });
    }

    if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
        coords.push(coords[0]);
    }
    if coords.len() < 4 {
        bail!("ring with fewer than 3 distinct vertices");
    }
    Ok(Some(LineString(coords)))
}
