//! Picking against the image-plane overlay.
//!
//! The overlay and every query point share one 2D frame: whatever frame the
//! key points were stored in. Meshes grown interactively keep them in model
//! coordinates (image pixel minus the session offset), so image positions
//! must be converted before picking.
//!
//! Consecutive key-point triples span quads `(o[k][0], o[k][1], o[k+1][1],
//! o[k+1][0])` between the diameter ends of neighbouring rings; their union
//! is the mesh silhouette as drawn by the user.

use nalgebra::Point2;

use crate::mesh::LayeredMesh;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned selection rectangle in the frame of the overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PickRect {
    /// Top-left corner.
    pub min: Point2<f64>,
    /// Bottom-right corner.
    pub max: Point2<f64>,
}

impl PickRect {
    /// Rectangle spanned by two corners in any order.
    #[must_use]
    pub fn new(a: Point2<f64>, b: Point2<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Whether `p` lies inside or on the border.
    #[must_use]
    pub fn contains(&self, p: Point2<f64>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }

    /// Corners in boundary order.
    #[must_use]
    pub fn corners(&self) -> [Point2<f64>; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

impl LayeredMesh {
    /// Whether `point` lies inside the overlay silhouette.
    ///
    /// Uses an even-odd crossing test per quad, so a point on a shared quad
    /// edge may land in either neighbour.
    #[must_use]
    pub fn contains(&self, point: Point2<f64>) -> bool {
        self.overlay_quads().any(|quad| crossing_test(&quad, point))
    }

    /// Whether the overlay silhouette touches `rect`.
    ///
    /// Rejects on bounds first, then accepts when a key point lies in the
    /// rectangle, a rectangle corner lies in the silhouette, or a quad edge
    /// crosses a rectangle edge.
    #[must_use]
    pub fn falls_into(&self, rect: &PickRect) -> bool {
        let points: Vec<Point2<f64>> = self
            .overlay
            .iter()
            .flatten()
            .map(|p| p.cast::<f64>())
            .collect();
        let Some(first) = points.first() else {
            return false;
        };
        let bounds = points
            .iter()
            .fold(PickRect::new(*first, *first), |acc, p| PickRect {
                min: acc.min.inf(p),
                max: acc.max.sup(p),
            });
        if !bounds.overlaps(rect) {
            return false;
        }

        if points.iter().any(|p| rect.contains(*p)) {
            return true;
        }
        let corners = rect.corners();
        if corners.iter().any(|c| self.contains(*c)) {
            return true;
        }
        self.overlay_quads().any(|quad| {
            (0..4).any(|i| {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                (0..4).any(|j| segments_cross(a, b, corners[j], corners[(j + 1) % 4]))
            })
        })
    }

    fn overlay_quads(&self) -> impl Iterator<Item = [Point2<f64>; 4]> {
        self.overlay.windows(2).map(|w| {
            [w[0][0], w[0][1], w[1][1], w[1][0]].map(|p| p.cast::<f64>())
        })
    }
}

fn crossing_test(polygon: &[Point2<f64>], p: Point2<f64>) -> bool {
    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

fn orientation(a: Point2<f64>, b: Point2<f64>, c: Point2<f64>) -> f64 {
    (b - a).perp(&(c - a))
}

fn on_segment(a: Point2<f64>, b: Point2<f64>, p: Point2<f64>) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_cross(p1: Point2<f64>, p2: Point2<f64>, q1: Point2<f64>, q2: Point2<f64>) -> bool {
    let d1 = orientation(q1, q2, p1);
    let d2 = orientation(q1, q2, p2);
    let d3 = orientation(p1, p2, q1);
    let d4 = orientation(p1, p2, q2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }
    (d1 == 0.0 && on_segment(q1, q2, p1))
        || (d2 == 0.0 && on_segment(q1, q2, p2))
        || (d3 == 0.0 && on_segment(p1, p2, q1))
        || (d4 == 0.0 && on_segment(p1, p2, q2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_tube() -> LayeredMesh {
        let mut mesh = LayeredMesh::new();
        mesh.set_overlay(vec![
            [Point2::new(0, 0), Point2::new(10, 0), Point2::new(5, 2)],
            [Point2::new(0, 10), Point2::new(10, 10), Point2::new(5, 12)],
        ]);
        mesh
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> PickRect {
        PickRect::new(Point2::new(x0, y0), Point2::new(x1, y1))
    }

    #[test]
    fn rect_corners_are_normalised() {
        let r = rect(6.0, 1.0, 2.0, 5.0);
        assert_eq!(r.min, Point2::new(2.0, 1.0));
        assert_eq!(r.max, Point2::new(6.0, 5.0));
        assert!(r.contains(Point2::new(2.0, 5.0)));
    }

    #[test]
    fn contains_point_in_quad() {
        let mesh = square_tube();
        assert!(mesh.contains(Point2::new(5.0, 5.0)));
        assert!(!mesh.contains(Point2::new(15.0, 5.0)));
        assert!(!mesh.contains(Point2::new(5.0, 11.0)));
    }

    #[test]
    fn single_triple_has_no_area() {
        let mut mesh = LayeredMesh::new();
        mesh.set_overlay(vec![[Point2::new(0, 0), Point2::new(10, 0), Point2::new(5, 2)]]);
        assert!(!mesh.contains(Point2::new(5.0, 0.0)));
        assert!(!LayeredMesh::new().falls_into(&rect(0.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn rectangle_hits() {
        let mesh = square_tube();
        // Rectangle inside the silhouette
        assert!(mesh.falls_into(&rect(4.0, 4.0, 6.0, 6.0)));
        // Key point inside the rectangle
        assert!(mesh.falls_into(&rect(8.0, -5.0, 12.0, 1.0)));
        // Band crossing the silhouette with no corner or key point inside
        assert!(mesh.falls_into(&rect(-5.0, 4.0, 15.0, 6.0)));
    }

    #[test]
    fn rectangle_misses() {
        let mesh = square_tube();
        assert!(!mesh.falls_into(&rect(20.0, 20.0, 30.0, 30.0)));
        // Inside the key-point bounds but above the quad
        assert!(!mesh.falls_into(&rect(1.0, 10.5, 3.0, 11.5)));
    }

    #[test]
    fn segment_crossing() {
        let p = |x, y| Point2::new(x, y);
        assert!(segments_cross(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0)));
        assert!(!segments_cross(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)));
        assert!(segments_cross(p(0.0, 0.0), p(2.0, 0.0), p(1.0, 0.0), p(1.0, 5.0)));
    }
}
