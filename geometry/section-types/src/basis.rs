//! Three-point key sections.

use nalgebra::{Point2, Vector2};
use std::f64::consts::FRAC_PI_2;

use crate::{Line2, SectionError, SectionResult, inclination_angle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of points in a basis.
pub const BASIS_POINTS: usize = 3;

/// Key points describing one visible cross-section.
///
/// Points 0 and 1 are the ends of the apparent diameter. Point 2 sits on the
/// outline of the section and fixes the apparent minor axis, from which the
/// twist of the section towards the viewer is recovered.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use section_types::Basis;
///
/// let basis = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 5));
/// assert_eq!(basis.semi_major(), 10.0);
/// assert_eq!(basis.semi_minor(), 5.0);
/// assert_eq!(basis.center(), Point2::new(10.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Basis {
    points: [Point2<i32>; BASIS_POINTS],
}

impl Basis {
    /// Create a basis from its three key points.
    #[must_use]
    pub const fn new(p0: Point2<i32>, p1: Point2<i32>, p2: Point2<i32>) -> Self {
        Self {
            points: [p0, p1, p2],
        }
    }

    /// Create a basis from the first three points of a slice.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::InsufficientPoints`] if fewer than three points
    /// are given.
    pub fn from_slice(points: &[Point2<i32>]) -> SectionResult<Self> {
        match points {
            [p0, p1, p2, ..] => Ok(Self::new(*p0, *p1, *p2)),
            _ => Err(SectionError::insufficient_points(
                BASIS_POINTS,
                points.len(),
            )),
        }
    }

    /// The key points in order.
    #[must_use]
    pub const fn points(&self) -> &[Point2<i32>; BASIS_POINTS] {
        &self.points
    }

    /// Mutable access for refinement by a point mover.
    pub fn points_mut(&mut self) -> &mut [Point2<i32>; BASIS_POINTS] {
        &mut self.points
    }

    /// First diameter end.
    #[must_use]
    pub const fn p0(&self) -> Point2<i32> {
        self.points[0]
    }

    /// Second diameter end.
    #[must_use]
    pub const fn p1(&self) -> Point2<i32> {
        self.points[1]
    }

    /// Minor-axis point.
    #[must_use]
    pub const fn p2(&self) -> Point2<i32> {
        self.points[2]
    }

    /// Midpoint of the diameter.
    #[must_use]
    pub fn center(&self) -> Point2<f64> {
        let p0: Point2<f64> = self.p0().cast();
        let p1: Point2<f64> = self.p1().cast();
        nalgebra::center(&p0, &p1)
    }

    /// Full length of the diameter.
    #[must_use]
    pub fn diameter(&self) -> f64 {
        let d: Vector2<f64> = (self.p1() - self.p0()).cast();
        d.norm()
    }

    /// Half the diameter.
    #[must_use]
    pub fn semi_major(&self) -> f64 {
        self.diameter() / 2.0
    }

    /// Distance of the minor-axis point from the diameter line.
    #[must_use]
    pub fn semi_minor(&self) -> f64 {
        self.axis().distance_to_pixel(self.p2())
    }

    /// Line through the diameter ends.
    #[must_use]
    pub fn axis(&self) -> Line2 {
        Line2::through_pixels(self.p0(), self.p1())
    }

    /// Inclination of the diameter, see [`inclination_angle`].
    #[must_use]
    pub fn inclination(&self) -> f64 {
        inclination_angle(self.p0(), self.p1())
    }

    /// Rotation of the section plane away from the image plane.
    ///
    /// Computed as `|π/2 - acos(b / a)|` with the ratio clamped to `[-1, 1]`.
    /// A collapsed diameter has no twist.
    #[must_use]
    pub fn twist(&self) -> f64 {
        let a = self.semi_major();
        if a == 0.0 {
            return 0.0;
        }
        let ratio = (self.semi_minor() / a).clamp(-1.0, 1.0);
        (FRAC_PI_2 - ratio.acos()).abs()
    }

    /// Whether both diameter ends coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.p0() == self.p1()
    }

    /// The same basis shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vector2<i32>) -> Self {
        Self {
            points: self.points.map(|p| p + delta),
        }
    }
}

impl From<[Point2<i32>; BASIS_POINTS]> for Basis {
    fn from(points: [Point2<i32>; BASIS_POINTS]) -> Self {
        Self { points }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> Basis {
        Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 5))
    }

    #[test]
    fn from_slice_requires_three_points() {
        let pts = [Point2::new(0, 0), Point2::new(1, 1)];
        assert_eq!(
            Basis::from_slice(&pts),
            Err(SectionError::insufficient_points(3, 2))
        );

        let pts = [
            Point2::new(0, 0),
            Point2::new(1, 1),
            Point2::new(2, 2),
            Point2::new(9, 9),
        ];
        assert_eq!(Basis::from_slice(&pts).unwrap().p2(), Point2::new(2, 2));
    }

    #[test]
    fn axes() {
        let basis = sample();
        assert_relative_eq!(basis.diameter(), 20.0);
        assert_relative_eq!(basis.semi_major(), 10.0);
        assert_relative_eq!(basis.semi_minor(), 5.0);
        assert_relative_eq!(basis.inclination(), 0.0);
    }

    #[test]
    fn twist_spans_quarter_turn() {
        // b == a: circle seen face-on
        let face_on = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 10));
        assert_relative_eq!(face_on.twist(), FRAC_PI_2);

        // b == 0: section seen edge-on
        let edge_on = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 0));
        assert_relative_eq!(edge_on.twist(), 0.0);

        // b > a clamps rather than producing NaN
        let wide = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 30));
        assert_relative_eq!(wide.twist(), FRAC_PI_2);

        // asin(0.5)
        assert_relative_eq!(sample().twist(), std::f64::consts::FRAC_PI_6, epsilon = 1e-12);
    }

    #[test]
    fn degenerate_basis() {
        let basis = Basis::new(Point2::new(3, 3), Point2::new(3, 3), Point2::new(5, 5));
        assert!(basis.is_degenerate());
        assert_relative_eq!(basis.twist(), 0.0);
    }

    #[test]
    fn translation_moves_all_points() {
        let moved = sample().translated(Vector2::new(1, -2));
        assert_eq!(moved.p0(), Point2::new(1, -2));
        assert_eq!(moved.p2(), Point2::new(11, 3));
    }
}
