use anyhow::{bail, Result};
use geo::{Coord, LineString};
use shapefile as shp;

/// Ensure first and last are the same for geo::LineString coords
fn ensure_closed(coords: &mut Vec<Coord<f64>>) {
    if !coords.is_empty() && coords[0] != coords[coords.len() - 1] {
        coords.push(coords[0]);
    }
}

/// Collect the outer rings of a shapefile polygon as closed line strings,
/// dropping any M/Z ordinates. Hole rings never occur in a tiling grid and
/// are ignored.
fn outer_rings<P>(rings: &[shp::PolygonRing<P>], xy: impl Fn(&P) -> (f64, f64)) -> Result<Vec<LineString<f64>>> {
    let mut out = Vec::with_capacity(rings.len());
    for ring in rings {
        let shp::PolygonRing::Outer(points) = ring else { continue };
        let mut coords: Vec<Coord<f64>> = points.iter()
            .map(|p| { let (x, y) = xy(p); Coord { x, y } })
            .collect();
        ensure_closed(&mut coords);
        // A closed ring needs 3 distinct vertices, so 4 coords after closing.
        if coords.len() < 4 {
            bail!("ring with fewer than 3 distinct vertices");
        }
        out.push(LineString(coords));
    }
    Ok(out)
}

/// Extract the outer boundary rings from any polygonal shapefile shape.
pub fn shape_outer_rings(shape: &shp::Shape) -> Result<Vec<LineString<f64>>> {
    match shape {
        shp::Shape::Polygon(p) => outer_rings(p.rings(), |pt| (pt.x, pt.y)),
        shp::Shape::PolygonM(p) => outer_rings(p.rings(), |pt| (pt.x, pt.y)),
        shp::Shape::PolygonZ(p) => outer_rings(p.rings(), |pt| (pt.x, pt.y)),
        other => bail!("unsupported shape type: {}", other.shapetype()),
    }
}

#[cfg(test)]
mod tests {
    use shapefile::{Point, PointZ, PolygonRing, NO_DATA};

    use super::*;

    #[test]
    fn open_ring_is_closed_on_ingest() {
        let shape = shp::Shape::Polygon(shp::Polygon::with_rings(vec![PolygonRing::Outer(vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
        ])]));
        let rings = shape_outer_rings(&shape).unwrap();
        assert_eq!(rings.len(), 1);
        let coords = &rings[0].0;
        assert_eq!(coords.first(), coords.last());
        assert_eq!(coords.len(), 5);
    }

    #[test]
    fn z_ordinate_is_dropped() {
        let shape = shp::Shape::PolygonZ(shp::PolygonZ::with_rings(vec![PolygonRing::Outer(vec![
            PointZ::new(0.0, 0.0, 7.0, NO_DATA),
            PointZ::new(0.0, 1.0, 7.0, NO_DATA),
            PointZ::new(1.0, 1.0, 7.0, NO_DATA),
            PointZ::new(0.0, 0.0, 7.0, NO_DATA),
        ])]));
        let rings = shape_outer_rings(&shape).unwrap();
        assert!(rings[0].0.contains(&Coord { x: 0.0, y: 1.0 }));
    }

    #[test]
    fn inner_rings_are_ignored() {
        let shape = shp::Shape::Polygon(shp::Polygon::with_rings(vec![
            PolygonRing::Outer(vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 4.0),
                Point::new(4.0, 4.0),
                Point::new(4.0, 0.0),
                Point::new(0.0, 0.0),
            ]),
            PolygonRing::Inner(vec![
                Point::new(1.0, 1.0),
                Point::new(2.0, 1.0),
                Point::new(2.0, 2.0),
                Point::new(1.0, 2.0),
                Point::new(1.0, 1.0),
            ]),
        ]));
        let rings = shape_outer_rings(&shape).unwrap();
        assert_eq!(rings.len(), 1);
    }

    #[test]
    fn non_polygon_shape_is_rejected() {
        let shape = shp::Shape::Point(Point::new(1.0, 2.0));
        assert!(shape_outer_rings(&shape).is_err());
    }
}
