use geo::LineString;

use super::GridKind;

/// Reference point of a fine tile, kept verbatim as text so the report can
/// echo exactly what the adapter supplied. Never used in overlap math.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Anchor {
    pub x: String,
    pub y: String,
}

impl Anchor {
    pub fn new(x: impl Into<String>, y: impl Into<String>) -> Self {
        Self { x: x.into(), y: y.into() }
    }
}

/// One tile of either grid, normalized to an ordered collection of closed
/// polygon boundaries in a shared planar coordinate system. A record may own
/// several disjoint rings (e.g. a swath split at the antimeridian).
#[derive(Debug, Clone)]
pub struct GeometryRecord {
    /// Unique within its own grid; cross-grid collisions are irrelevant.
    pub identifier: String,
    pub kind: GridKind,
    /// Closed boundaries; holes never occur in either tiling grid.
    pub rings: Vec<LineString<f64>>,
    /// Fine grid only.
    pub anchor: Option<Anchor>,
}

impl GeometryRecord {
    pub fn coarse(identifier: impl Into<String>, kind: GridKind, rings: Vec<LineString<f64>>) -> Self {
        debug_assert!(kind.is_coarse(), "coarse record with non-coarse kind");
        Self { identifier: identifier.into(), kind, rings, anchor: None }
    }

    pub fn fine(identifier: impl Into<String>, rings: Vec<LineString<f64>>, anchor: Option<Anchor>) -> Self {
        Self { identifier: identifier.into(), kind: GridKind::Fine, rings, anchor }
    }
}

/// One qualifying (coarse ring, fine ring) overlap. Coverage is held in full
/// precision; rounding to one decimal happens only in the report sink.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlapRecord {
    pub coarse_id: String,
    pub fine_id: String,
    pub anchor_x: String,
    pub anchor_y: String,
    /// Percent of the fine ring's area covered, in (threshold, 100].
    pub coverage: f64,
}
