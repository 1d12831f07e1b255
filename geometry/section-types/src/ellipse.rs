//! Elliptic outlines and circular depth rings.

use nalgebra::{Point2, Point3, Rotation2, Vector2};
use std::f64::consts::TAU;

use crate::{Basis, SectionError, SectionResult, inclination_angle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest slice count that encloses an area.
pub const MIN_SLICES: usize = 3;

/// A tilted ellipse in the image plane.
///
/// This is the apparent outline of a circular cross-section: the semi-major
/// axis is half the visible diameter, the semi-minor axis comes from the
/// third key point, and the tilt follows the diameter.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use section_types::EllipseSection;
///
/// let ellipse = EllipseSection::from_points(
///     Point2::new(0, 0),
///     Point2::new(20, 0),
///     Point2::new(10, 5),
/// );
///
/// let pts = ellipse.points(4).unwrap();
/// assert_eq!(pts.len(), 4);
/// assert!((pts[0].x - 20.0).abs() < 1e-9);
/// assert!((pts[1].y - 5.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EllipseSection {
    center: Point2<f64>,
    semi_major: f64,
    semi_minor: f64,
    tilt: f64,
}

impl EllipseSection {
    /// Create an ellipse from its parameters. Negative axes are taken by magnitude.
    #[must_use]
    pub fn new(center: Point2<f64>, semi_major: f64, semi_minor: f64, tilt: f64) -> Self {
        Self {
            center,
            semi_major: semi_major.abs(),
            semi_minor: semi_minor.abs(),
            tilt,
        }
    }

    /// Ellipse through two diameter ends and a minor-axis point.
    #[must_use]
    pub fn from_points(p0: Point2<i32>, p1: Point2<i32>, p2: Point2<i32>) -> Self {
        Self::from_basis(&Basis::new(p0, p1, p2))
    }

    /// Ellipse described by a basis.
    #[must_use]
    pub fn from_basis(basis: &Basis) -> Self {
        Self {
            center: basis.center(),
            semi_major: basis.semi_major(),
            semi_minor: basis.semi_minor(),
            tilt: inclination_angle(basis.p0(), basis.p1()),
        }
    }

    /// Centre point.
    #[must_use]
    pub const fn center(&self) -> Point2<f64> {
        self.center
    }

    /// Semi-major axis length.
    #[must_use]
    pub const fn semi_major(&self) -> f64 {
        self.semi_major
    }

    /// Semi-minor axis length.
    #[must_use]
    pub const fn semi_minor(&self) -> f64 {
        self.semi_minor
    }

    /// Tilt of the major axis in radians.
    #[must_use]
    pub const fn tilt(&self) -> f64 {
        self.tilt
    }

    /// Point at eccentric angle `phi`.
    #[must_use]
    pub fn point_at(&self, phi: f64) -> Point2<f64> {
        let local = Vector2::new(self.semi_major * phi.cos(), self.semi_minor * phi.sin());
        self.center + Rotation2::new(self.tilt) * local
    }

    /// `slices` points evenly spaced in eccentric angle, without repeating
    /// the first point at the end.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::TooFewSlices`] for fewer than three slices.
    pub fn points(&self, slices: usize) -> SectionResult<Vec<Point2<f64>>> {
        check_slices(slices)?;
        Ok(angles(slices).map(|phi| self.point_at(phi)).collect())
    }

    /// Same as [`EllipseSection::points`], rounded to pixel positions.
    ///
    /// # Errors
    ///
    /// Returns [`SectionError::TooFewSlices`] for fewer than three slices.
    pub fn pixels(&self, slices: usize) -> SectionResult<Vec<Point2<i32>>> {
        Ok(self
            .points(slices)?
            .into_iter()
            .map(|p| Point2::new(round_i32(p.x), round_i32(p.y)))
            .collect())
    }
}

/// Outline of the section through three key points.
///
/// Shorthand for [`EllipseSection::from_points`] followed by
/// [`EllipseSection::points`].
///
/// # Errors
///
/// Returns [`SectionError::TooFewSlices`] for fewer than three slices.
pub fn create_ellipse(
    p0: Point2<i32>,
    p1: Point2<i32>,
    p2: Point2<i32>,
    slices: usize,
) -> SectionResult<Vec<Point2<f64>>> {
    EllipseSection::from_points(p0, p1, p2).points(slices)
}

/// Circular ring of a basis, standing upright in depth.
///
/// The ring has radius [`Basis::semi_major`] and lies in the vertical plane
/// through the diameter: each local point `(a·cos φ, 0, a·sin φ)` is rotated
/// about Z by `inclination` and moved to the basis centre at `z = 0`.
/// Coordinates are rounded to whole units.
///
/// # Errors
///
/// Returns [`SectionError::TooFewSlices`] for fewer than three slices.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use section_types::{Basis, depth_ring};
///
/// let basis = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 5));
/// let ring = depth_ring(&basis, 0.0, 4).unwrap();
///
/// assert_eq!(ring[0].coords.as_slice(), &[20.0, 0.0, 0.0]);
/// assert_eq!(ring[1].coords.as_slice(), &[10.0, 0.0, 10.0]);
/// ```
pub fn depth_ring(
    basis: &Basis,
    inclination: f64,
    slices: usize,
) -> SectionResult<Vec<Point3<f64>>> {
    check_slices(slices)?;
    let radius = basis.semi_major();
    let center = basis.center();
    let (sin_t, cos_t) = inclination.sin_cos();
    Ok(angles(slices)
        .map(|phi| {
            let planar = radius * phi.cos();
            Point3::new(
                planar.mul_add(cos_t, center.x).round(),
                planar.mul_add(sin_t, center.y).round(),
                (radius * phi.sin()).round(),
            )
        })
        .collect())
}

fn check_slices(slices: usize) -> SectionResult<()> {
    if slices < MIN_SLICES {
        return Err(SectionError::TooFewSlices(slices));
    }
    Ok(())
}

fn angles(slices: usize) -> impl Iterator<Item = f64> {
    let step = TAU / slices as f64;
    (0..slices).map(move |k| k as f64 * step)
}

fn round_i32(v: f64) -> i32 {
    v.round() as i32
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn bbox_center(points: &[Point2<f64>]) -> Point2<f64> {
        let (mut lo, mut hi) = (points[0], points[0]);
        for p in points {
            lo = lo.inf(p);
            hi = hi.sup(p);
        }
        nalgebra::center(&lo, &hi)
    }

    #[test]
    fn axis_aligned_ellipse() {
        let pts = create_ellipse(
            Point2::new(0, 0),
            Point2::new(20, 0),
            Point2::new(10, 5),
            4,
        )
        .unwrap();
        let expected = [(20.0, 0.0), (10.0, 5.0), (0.0, 0.0), (10.0, -5.0)];
        for (p, (x, y)) in pts.iter().zip(expected) {
            assert_relative_eq!(p.x, x, epsilon = 1e-9);
            assert_relative_eq!(p.y, y, epsilon = 1e-9);
        }
    }

    #[test]
    fn exact_slice_count_and_centre() {
        let ellipse = EllipseSection::from_points(
            Point2::new(3, 7),
            Point2::new(41, 29),
            Point2::new(20, 30),
        );
        for slices in [3, 7, 16, 33] {
            let pts = ellipse.points(slices).unwrap();
            assert_eq!(pts.len(), slices);
        }
        let c = bbox_center(&ellipse.points(16).unwrap());
        assert_relative_eq!(c.x, 22.0, epsilon = 1.0);
        assert_relative_eq!(c.y, 18.0, epsilon = 1.0);
    }

    #[test]
    fn too_few_slices() {
        let ellipse = EllipseSection::new(Point2::origin(), 1.0, 1.0, 0.0);
        assert_eq!(ellipse.points(2), Err(SectionError::TooFewSlices(2)));
        assert!(ellipse.pixels(0).is_err());
    }

    #[test]
    fn tilted_major_axis_follows_diameter() {
        let ellipse = EllipseSection::from_points(
            Point2::new(0, 0),
            Point2::new(10, 10),
            Point2::new(5, 5),
        );
        assert_relative_eq!(ellipse.tilt(), FRAC_PI_4);
        let end = ellipse.point_at(0.0);
        assert_relative_eq!(end.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(end.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn pixels_are_rounded() {
        let ellipse = EllipseSection::new(Point2::new(0.4, 0.6), 2.0, 1.0, 0.0);
        let px = ellipse.pixels(4).unwrap();
        assert_eq!(px[0], Point2::new(2, 1));
    }

    #[test]
    fn depth_ring_is_rounded_circle() {
        let basis = Basis::new(Point2::new(-8, 3), Point2::new(12, 3), Point2::new(2, 9));
        let ring = depth_ring(&basis, 0.0, 16).unwrap();
        assert_eq!(ring.len(), 16);
        for p in &ring {
            assert_eq!(p.x, p.x.round());
            assert_eq!(p.y, 3.0);
            let r = (p.x - 2.0).hypot(p.z);
            assert_relative_eq!(r, 10.0, epsilon = 1.0);
        }
    }

    #[test]
    fn depth_ring_rotates_with_inclination() {
        let basis = Basis::new(Point2::new(0, 0), Point2::new(0, 20), Point2::new(5, 10));
        let ring = depth_ring(&basis, basis.inclination(), 4).unwrap();
        assert_eq!(ring[0], Point3::new(0.0, 20.0, 0.0));
        assert_eq!(ring[2], Point3::new(0.0, 0.0, 0.0));
    }
}
