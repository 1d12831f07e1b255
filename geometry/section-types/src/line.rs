//! Implicit 2D lines.

use nalgebra::{Point2, Vector2};
use std::f64::consts::{FRAC_PI_2, PI};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A line `A·x + B·y + C = 0` through two points.
///
/// The coefficients are taken straight from the two points, so the normal
/// `(A, B)` is not unit length; distance queries divide by its norm. When both
/// points coincide the line degenerates and distances are measured to that
/// point instead.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use section_types::Line2;
///
/// let line = Line2::through(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
/// assert_eq!(line.distance(Point2::new(3.0, -4.0)), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Line2 {
    a: f64,
    b: f64,
    c: f64,
    origin: Point2<f64>,
}

impl Line2 {
    /// Line through two real-valued points.
    #[must_use]
    pub fn through(p0: Point2<f64>, p1: Point2<f64>) -> Self {
        Self {
            a: p0.y - p1.y,
            b: p1.x - p0.x,
            c: p0.x * p1.y - p1.x * p0.y,
            origin: p0,
        }
    }

    /// Line through two pixel positions.
    #[must_use]
    pub fn through_pixels(p0: Point2<i32>, p1: Point2<i32>) -> Self {
        Self::through(p0.cast(), p1.cast())
    }

    /// Coefficients `(A, B, C)`.
    #[must_use]
    pub const fn coefficients(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Whether the defining points coincided.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.a == 0.0 && self.b == 0.0
    }

    /// Signed distance; positive on the side the normal points to.
    #[must_use]
    pub fn signed_distance(&self, p: Point2<f64>) -> f64 {
        let norm = self.a.hypot(self.b);
        if norm == 0.0 {
            return (p - self.origin).norm();
        }
        self.a.mul_add(p.x, self.b.mul_add(p.y, self.c)) / norm
    }

    /// Unsigned distance from `p` to the line.
    #[must_use]
    pub fn distance(&self, p: Point2<f64>) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Unsigned distance from a pixel position to the line.
    #[must_use]
    pub fn distance_to_pixel(&self, p: Point2<i32>) -> f64 {
        self.distance(p.cast())
    }

    /// Normal vector `(A, B)`, not normalized.
    #[must_use]
    pub fn normal(&self) -> Vector2<f64> {
        Vector2::new(self.a, self.b)
    }

    /// Direction from the first defining point to the second.
    #[must_use]
    pub fn direction(&self) -> Vector2<f64> {
        Vector2::new(self.b, -self.a)
    }
}

/// Angle between the +X axis and `p1 - p0`, wrapped into `(-π/2, π/2]`.
///
/// The angle is negated when `p1` lies above `p0` (smaller Y). Coincident
/// points yield zero.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use section_types::inclination_angle;
/// use std::f64::consts::FRAC_PI_4;
///
/// let angle = inclination_angle(Point2::new(0, 0), Point2::new(5, 5));
/// assert!((angle - FRAC_PI_4).abs() < 1e-12);
///
/// // Reversing the pair gives the same inclination
/// let back = inclination_angle(Point2::new(5, 5), Point2::new(0, 0));
/// assert!((back - FRAC_PI_4).abs() < 1e-12);
/// ```
#[must_use]
pub fn inclination_angle(p0: Point2<i32>, p1: Point2<i32>) -> f64 {
    let d: Vector2<f64> = (p1 - p0).cast();
    let len = d.norm();
    if len == 0.0 {
        return 0.0;
    }
    let mut angle = (d.x / len).clamp(-1.0, 1.0).acos();
    if p1.y < p0.y {
        angle = -angle;
    }
    if angle > FRAC_PI_2 {
        angle -= PI;
    } else if angle <= -FRAC_PI_2 {
        angle += PI;
    }
    angle
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn coefficients_follow_points() {
        let line = Line2::through(Point2::new(1.0, 2.0), Point2::new(4.0, 6.0));
        let (a, b, c) = line.coefficients();
        assert_eq!((a, b, c), (-4.0, 3.0, -2.0));
        // Both defining points satisfy the equation
        assert_relative_eq!(line.signed_distance(Point2::new(1.0, 2.0)), 0.0);
        assert_relative_eq!(line.signed_distance(Point2::new(4.0, 6.0)), 0.0);
    }

    #[test]
    fn signed_distance_sides() {
        let line = Line2::through_pixels(Point2::new(0, 0), Point2::new(20, 0));
        assert_eq!(line.normal(), Vector2::new(0.0, 20.0));
        assert_relative_eq!(line.signed_distance(Point2::new(5.0, 3.0)), 3.0);
        assert_relative_eq!(line.signed_distance(Point2::new(5.0, -3.0)), -3.0);
        assert_relative_eq!(line.distance_to_pixel(Point2::new(7, -2)), 2.0);
    }

    #[test]
    fn direction_is_perpendicular_to_normal() {
        let line = Line2::through(Point2::new(2.0, 1.0), Point2::new(-3.0, 7.0));
        assert_relative_eq!(line.normal().dot(&line.direction()), 0.0);
        assert_eq!(line.direction(), Vector2::new(-5.0, 6.0));
    }

    #[test]
    fn degenerate_line_measures_to_point() {
        let line = Line2::through(Point2::new(1.0, 1.0), Point2::new(1.0, 1.0));
        assert!(line.is_degenerate());
        assert_relative_eq!(line.distance(Point2::new(4.0, 5.0)), 5.0);
    }

    #[test]
    fn inclination_wraps_into_half_open_range() {
        let o = Point2::new(0, 0);
        assert_relative_eq!(inclination_angle(o, Point2::new(10, 0)), 0.0);
        assert_relative_eq!(inclination_angle(o, Point2::new(-10, 0)), 0.0);
        assert_relative_eq!(inclination_angle(o, Point2::new(0, 10)), FRAC_PI_2);
        assert_relative_eq!(inclination_angle(o, Point2::new(0, -10)), FRAC_PI_2);
        assert_relative_eq!(
            inclination_angle(o, Point2::new(3, -3)),
            -std::f64::consts::FRAC_PI_4
        );
        assert_eq!(inclination_angle(o, o), 0.0);
    }
}
