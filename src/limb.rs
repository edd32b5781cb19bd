//! Outline of the shadowed part of the lunar disc.
//!
//! The disc is drawn first in a light colour; this polygon is filled on top of it in a
//! dark colour, which leaves the lit crescent or gibbous showing.

use crate::ephemeris::Ephemeris;

/// Vertices per edge of the outline.
pub const EDGE_POINTS: usize = 180;
/// Vertices in a complete outline.
pub const POLYGON_POINTS: usize = EDGE_POINTS * 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Closed outline of `POLYGON_POINTS` vertices: the leading edge top to bottom, then the
/// trailing edge bottom to top.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbPolygon {
    points: Vec<Point>,
}

impl LimbPolygon {
    pub fn compute(illumination_ratio: f64, phase_angle: f64, width: f64, height: f64) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        let waxing = phase_angle < 180.0;

        let mut leading = Vec::with_capacity(EDGE_POINTS);
        let mut trailing = Vec::with_capacity(EDGE_POINTS);

        for a in 0..EDGE_POINTS {
            let angle = (a as f64 - 90.0).to_radians();
            let half_chord = (angle.cos() * cx).ceil();
            let rise = (angle.sin() * cy).ceil();
            let moon_width = half_chord * 2.0;
            let lit = (moon_width * illumination_ratio).floor();

            let (x1, x2) = if waxing {
                let x1 = cx - half_chord;
                (x1, x1 + (moon_width - lit))
            } else {
                let x1 = cx + half_chord;
                (x1, x1 - (moon_width - lit))
            };
            let y = cy + rise;

            leading.push(Point::new(x1, y));
            trailing.push(Point::new(x2, y));
        }

        trailing.reverse();
        leading.extend(trailing);
        Self { points: leading }
    }

    pub fn for_ephemeris(ephemeris: &Ephemeris, width: f64, height: f64) -> Self {
        Self::compute(ephemeris.illumination_ratio, ephemeris.phase_angle, width, height)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn leading_edge(&self) -> &[Point] {
        &self.points[..EDGE_POINTS]
    }

    /// Trailing edge in polygon order, i.e. bottom to top.
    pub fn trailing_edge(&self) -> &[Point] {
        &self.points[EDGE_POINTS..]
    }

    /// Pairs of vertices that share a scanline, top to bottom.
    ///
    /// Filling the quad between consecutive rows covers the polygon without relying on
    /// a convex fill.
    pub fn rows(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let leading = self.leading_edge();
        let trailing = self.trailing_edge();
        (0..EDGE_POINTS).map(move |i| (leading[i], trailing[EDGE_POINTS - 1 - i]))
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }
}

/// Parameters of the lit disc the polygon is layered onto.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disc {
    pub center: Point,
    pub radius: f64,
}

impl Disc {
    pub fn for_canvas(width: f64, height: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius: (height / 2.0 - 2.0).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(polygon: &LimbPolygon, index: usize) -> (f64, f64) {
        let p = polygon.points()[index];
        (p.x, p.y)
    }

    #[test]
    fn test_polygon_always_has_360_points() {
        for (w, h) in [(1.0, 1.0), (16.0, 16.0), (100.0, 100.0), (121.0, 77.0), (640.0, 480.0)] {
            for (ratio, angle) in [(0.0, 0.0), (0.3, 60.0), (1.0, 180.0), (0.6, 250.0)] {
                let polygon = LimbPolygon::compute(ratio, angle, w, h);
                assert_eq!(polygon.points().len(), POLYGON_POINTS);
            }
        }
    }

    #[test]
    fn test_path_closes_on_the_same_scanline() {
        let polygon = LimbPolygon::compute(0.5, 90.0, 100.0, 100.0);
        let first = polygon.points()[0];
        let last = polygon.points()[POLYGON_POINTS - 1];
        assert_eq!(first.y, last.y);
        assert_eq!(first.y, 0.0);
    }

    #[test]
    fn test_waxing_half_moon_vertices() {
        let polygon = LimbPolygon::compute(0.5, 90.0, 100.0, 100.0);
        assert_eq!(at(&polygon, 0), (49.0, 0.0));
        assert_eq!(at(&polygon, 1), (49.0, 1.0));
        assert_eq!(at(&polygon, 90), (0.0, 50.0));
        assert_eq!(at(&polygon, 179), (49.0, 100.0));
        assert_eq!(at(&polygon, 180), (50.0, 100.0));
        assert_eq!(at(&polygon, 269), (50.0, 50.0));
        assert_eq!(at(&polygon, 359), (50.0, 0.0));
    }

    #[test]
    fn test_waning_half_moon_mirrors() {
        let polygon = LimbPolygon::compute(0.5, 270.0, 100.0, 100.0);
        assert_eq!(at(&polygon, 0), (51.0, 0.0));
        assert_eq!(at(&polygon, 90), (100.0, 50.0));
        assert_eq!(at(&polygon, 269), (50.0, 50.0));
    }

    #[test]
    fn test_new_moon_shadow_spans_the_disc() {
        let polygon = LimbPolygon::compute(0.0, 0.0, 100.0, 100.0);
        assert_eq!(at(&polygon, 90), (0.0, 50.0));
        assert_eq!(at(&polygon, 269), (100.0, 50.0));
    }

    #[test]
    fn test_full_moon_shadow_collapses() {
        let polygon = LimbPolygon::compute(1.0, 180.0, 100.0, 100.0);
        for (lead, trail) in polygon.rows() {
            assert_eq!(lead, trail);
        }
    }

    #[test]
    fn test_rectangular_canvas() {
        let polygon = LimbPolygon::compute(0.25, 45.0, 120.0, 80.0);
        assert_eq!(at(&polygon, 0), (59.0, 0.0));
        assert_eq!(at(&polygon, 90), (0.0, 40.0));
        assert_eq!(at(&polygon, 269), (90.0, 40.0));
        assert_eq!(at(&polygon, 359), (61.0, 0.0));
    }

    #[test]
    fn test_rows_pair_vertices_on_same_scanline() {
        let polygon = LimbPolygon::compute(0.4, 300.0, 200.0, 150.0);
        let rows: Vec<_> = polygon.rows().collect();
        assert_eq!(rows.len(), EDGE_POINTS);
        for (lead, trail) in rows {
            assert_eq!(lead.y, trail.y);
        }
    }

    #[test]
    fn test_edges_do_not_cross() {
        // waxing: leading edge stays left of trailing edge on every row
        let polygon = LimbPolygon::compute(0.35, 120.0, 300.0, 300.0);
        for (lead, trail) in polygon.rows() {
            assert!(lead.x <= trail.x);
        }
        let polygon = LimbPolygon::compute(0.35, 240.0, 300.0, 300.0);
        for (lead, trail) in polygon.rows() {
            assert!(lead.x >= trail.x);
        }
    }

    #[test]
    fn test_disc_radius() {
        let disc = Disc::for_canvas(200.0, 180.0);
        assert_eq!(disc.center, Point::new(100.0, 90.0));
        assert_eq!(disc.radius, 88.0);
    }

    #[test]
    fn test_disc_radius_never_negative_on_tiny_canvas() {
        assert_eq!(Disc::for_canvas(1.0, 1.0).radius, 0.0);
        assert_eq!(Disc::for_canvas(4.0, 4.0).radius, 0.0);
        assert_eq!(Disc::for_canvas(6.0, 6.0).radius, 1.0);
    }
}
