//! Ring planes for open-end classification.

use nalgebra::{Point3, Vector3};

/// A plane through a point with a unit normal.
///
/// The plane equation is `normal · (p - point) = 0`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Plane {
    pub point: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane {
    /// Plane from a point and normal; `None` if the normal vanishes.
    pub fn new(point: Point3<f64>, normal: Vector3<f64>) -> Option<Self> {
        let normal = normal.try_normalize(f64::EPSILON)?;
        Some(Self { point, normal })
    }

    /// Plane through three points with normal `(p1 - p0) × (p2 - p0)`.
    ///
    /// Returns `None` for collinear points.
    pub fn from_points(p0: Point3<f64>, p1: Point3<f64>, p2: Point3<f64>) -> Option<Self> {
        Self::new(p0, (p1 - p0).cross(&(p2 - p0)))
    }

    /// Same plane with the normal reversed.
    pub fn flipped(self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// Positive on the side the normal points to.
    pub fn signed_distance(&self, point: &Point3<f64>) -> f64 {
        self.normal.dot(&(point - self.point))
    }

    /// Parameter `t` at which `origin + t * dir` meets the plane.
    ///
    /// `None` when the line runs parallel to the plane.
    pub fn line_parameter(&self, origin: &Point3<f64>, dir: &Vector3<f64>) -> Option<f64> {
        let denom = self.normal.dot(dir);
        if denom.abs() < 1e-12 {
            return None;
        }
        Some(-self.signed_distance(origin) / denom)
    }
}
