use geo::{Area, BooleanOps, BoundingRect, LineString, Polygon, Rect};
use rstar::{RTree, RTreeObject, AABB};
use thiserror::Error;

use crate::types::{GeometryRecord, GridKind, OverlapRecord};

/// Engine failure distinguishable from ordinary I/O errors: a zero-area ring
/// would corrupt the coverage statistic for every tile compared against it,
/// so the run aborts before any record is emitted.
#[derive(Debug, Error)]
pub enum OverlapError {
    #[error("degenerate {kind} geometry: record {identifier:?} ring {ring} has zero area")]
    DegenerateRing {
        kind: GridKind,
        identifier: String,
        ring: usize,
    },
}

/// One flattened fine-grid ring with its precomputed denominator area.
struct FineRing {
    record: usize,
    polygon: Polygon<f64>,
    area: f64,
}

/// Bounding box of one fine ring in the candidate R-tree. `slot` is the
/// ring's position in flattening order, so sorting slots restores the
/// sequential scan order.
struct RingBox {
    slot: usize,
    bbox: Rect<f64>,
}

impl RTreeObject for RingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.bbox.min().into(), self.bbox.max().into())
    }
}

fn ring_polygon(ring: &LineString<f64>) -> Polygon<f64> {
    Polygon::new(ring.clone(), vec![])
}

/// Validate every ring of `records`, returning each as a polygon with its
/// unsigned area. Zero area is a fatal grid-definition error.
fn validated_rings(records: &[GeometryRecord]) -> Result<Vec<Vec<(Polygon<f64>, f64)>>, OverlapError> {
    records.iter()
        .map(|rec| {
            rec.rings.iter().enumerate()
                .map(|(ri, ring)| {
                    let polygon = ring_polygon(ring);
                    let area = polygon.unsigned_area();
                    if area <= 0.0 {
                        return Err(OverlapError::DegenerateRing {
                            kind: rec.kind,
                            identifier: rec.identifier.clone(),
                            ring: ri,
                        });
                    }
                    Ok((polygon, area))
                })
                .collect()
        })
        .collect()
}

/// Compute the coverage of every fine-grid ring by every coarse-grid ring,
/// keeping pairs whose coverage strictly exceeds `threshold_percent`.
///
/// Coverage is `100 * area(rc ∩ rf) / area(rf)` — the denominator is always
/// the fine (target) ring. Multi-ring records are tested per ring pair with
/// no union or deduplication, so one fine tile can emit several lines
/// against the same coarse tile.
///
/// Output order is the sequential scan order: coarse records as supplied,
/// rings in record order, then fine records as supplied, rings in record
/// order. Callers wanting deterministic output pre-sort both lists by
/// identifier. An R-tree over fine-ring bounding boxes prunes pairs whose
/// intersection is empty; candidates are sorted back into scan order, so the
/// output is identical to the full cross-product scan.
pub fn compute_overlaps(
    coarse: &[GeometryRecord],
    fine: &[GeometryRecord],
    threshold_percent: f64,
) -> Result<Vec<OverlapRecord>, OverlapError> {
    let coarse_rings = validated_rings(coarse)?;

    let fine_rings: Vec<FineRing> = validated_rings(fine)?
        .into_iter()
        .enumerate()
        .flat_map(|(fi, rings)| {
            rings.into_iter().map(move |(polygon, area)| FineRing { record: fi, polygon, area })
        })
        .collect();

    let rtree = RTree::bulk_load(
        fine_rings.iter().enumerate()
            .map(|(slot, fr)| RingBox { slot, bbox: fr.polygon.bounding_rect().unwrap() })
            .collect()
    );

    let mut out = Vec::new();
    for (ci, rec) in coarse.iter().enumerate() {
        for (rc, _) in &coarse_rings[ci] {
            let bbox = rc.bounding_rect().unwrap();
            let envelope = AABB::from_corners(bbox.min().into(), bbox.max().into());

            let mut candidates: Vec<usize> = rtree
                .locate_in_envelope_intersecting(&envelope)
                .map(|b| b.slot)
                .collect();
            candidates.sort_unstable();

            for slot in candidates {
                let fr = &fine_rings[slot];
                let coverage = 100.0 * rc.intersection(&fr.polygon).unsigned_area() / fr.area;
                if coverage > threshold_percent {
                    let frec = &fine[fr.record];
                    let anchor = frec.anchor.clone().unwrap_or_default();
                    out.push(OverlapRecord {
                        coarse_id: rec.identifier.clone(),
                        fine_id: frec.identifier.clone(),
                        anchor_x: anchor.x,
                        anchor_y: anchor.y,
                        coverage,
                    });
                }
            }
        }
    }

    Ok(out)
}
