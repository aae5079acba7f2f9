use super::{Bounds, Point, Segment};
use serde::{Deserialize, Serialize};

/// Ordered closed polygon. The last vertex connects back to the first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Regular polygon centered on the origin, counter-clockwise, with a vertex
    /// every `step` radians starting on +X. The closing vertex is not repeated.
    pub fn regular(radius: f64, step: f64) -> Self {
        let count = (std::f64::consts::TAU / step).round().max(3.0) as usize;
        let step = std::f64::consts::TAU / count as f64;
        let vertices = (0..count)
            .map(|k| {
                let a = k as f64 * step;
                Point::new(radius * a.cos(), radius * a.sin())
            })
            .collect();
        Self { vertices }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.vertices.first()
    }

    /// Iterates the edges, closing segment included.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| Segment::new(self.vertices[i], self.vertices[(i + 1) % n]))
    }

    pub fn rotated(&self, angle: f64) -> Polygon {
        Polygon::new(self.vertices.iter().map(|p| p.rotated(angle)).collect())
    }

    pub fn translated(&self, offset: Point) -> Polygon {
        Polygon::new(self.vertices.iter().map(|p| *p + offset).collect())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::from_points(&self.vertices)
    }

    /// Shoelace area; positive for counter-clockwise winding.
    pub fn signed_area(&self) -> f64 {
        self.segments().map(|s| s.p0.cross(&s.p1)).sum::<f64>() * 0.5
    }

    pub fn perimeter(&self) -> f64 {
        self.segments().map(|s| s.length()).sum()
    }

    /// Mean distance of the vertices from the origin; 0 for an empty polygon.
    pub fn mean_radius(&self) -> f64 {
        if self.vertices.is_empty() {
            return 0.0;
        }
        self.vertices.iter().map(Point::length).sum::<f64>() / self.vertices.len() as f64
    }

    pub fn max_radius(&self) -> f64 {
        self.vertices.iter().map(Point::length).fold(0.0, f64::max)
    }

    pub fn min_radius(&self) -> f64 {
        self.vertices
            .iter()
            .map(Point::length)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn is_finite(&self) -> bool {
        self.vertices.iter().all(Point::is_finite)
    }
}

impl From<Vec<Point>> for Polygon {
    fn from(vertices: Vec<Point>) -> Self {
        Polygon::new(vertices)
    }
}

impl FromIterator<Point> for Polygon {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Polygon::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
    }

    #[test]
    fn test_segments_include_closing_edge() {
        let square = unit_square();
        let segments: Vec<_> = square.segments().collect();
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[3].p0, Point::new(0.0, 1.0));
        assert_eq!(segments[3].p1, Point::new(0.0, 0.0));
        assert!((square.perimeter() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_signed_area_follows_winding() {
        let square = unit_square();
        assert!((square.signed_area() - 1.0).abs() < 1e-12);

        let reversed: Polygon = square.vertices.iter().rev().copied().collect();
        assert!((reversed.signed_area() + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_regular_polygon() {
        let blank = Polygon::regular(50.0, 10f64.to_radians());
        assert_eq!(blank.len(), 36);
        assert!(blank.signed_area() > 0.0);
        assert!((blank.max_radius() - 50.0).abs() < 1e-9);
        assert!((blank.min_radius() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_transforms_return_new_polygons() {
        let square = unit_square();
        let moved = square.translated(Point::new(-2.0, 0.0));
        assert_eq!(square.vertices[0], Point::new(0.0, 0.0));
        assert_eq!(moved.vertices[0], Point::new(-2.0, 0.0));

        let turned = square.rotated(std::f64::consts::PI);
        assert!((turned.vertices[1].x + 1.0).abs() < 1e-12);
        assert!((turned.signed_area() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_polygon_radii() {
        let empty = Polygon::default();
        assert_eq!(empty.mean_radius(), 0.0);
        assert_eq!(empty.max_radius(), 0.0);
        assert!(!empty.bounds().is_valid());
    }
}
