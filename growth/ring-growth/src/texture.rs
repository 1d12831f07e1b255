//! Texture coordinates from the photograph.
//!
//! Rings are generated standing upright through their key diameter. To find
//! where a vertex shows up in the photograph the ring is first turned about
//! the diameter by the twist angle, so that it leans the way the user's third
//! click suggested, and then projected straight onto the image plane.

// Ring vertices carry whole-unit coordinates
#![allow(clippy::cast_precision_loss)]

use mesh_layered::Aabb;
use nalgebra::{Point2, Point3, Rotation3, Unit, Vector3};
use section_types::Basis;

use crate::config::TexturingMode;
use crate::session::Session;

/// Texture coordinates for one ring, one per vertex.
///
/// `key` is the key section the ring was generated from and `twist` the
/// rotation recovered from the first basis. Visible vertices map to
/// `u = (x + offset.x) / width`, `v = 1 - (y + offset.y) / height`; hidden
/// ones follow `mode`.
#[must_use]
pub fn tex_coords(
    ring: &[Point3<f64>],
    key: &Basis,
    twist: f64,
    session: &Session,
    mode: TexturingMode,
) -> Vec<Point2<f64>> {
    let turned = twisted(ring, key, twist);
    let offset = session.offset().cast::<f64>();
    let width = session.width().max(1) as f64;
    let height = session.height().max(1) as f64;
    let project = |p: &Point3<f64>| {
        Point2::new(
            (p.x + offset.x) / width,
            1.0 - (p.y + offset.y) / height,
        )
    };

    let n = turned.len();
    let half = n / 2;
    turned
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if p.z >= 0.0 {
                return project(p);
            }
            match mode {
                TexturingMode::Mirror => project(&turned[(i + half) % n]),
                TexturingMode::Cyclic => project(p),
            }
        })
        .collect()
}

/// The ring rotated about the key diameter by `twist`, around its bounds centre.
fn twisted(ring: &[Point3<f64>], key: &Basis, twist: f64) -> Vec<Point3<f64>> {
    let d = key.p0() - key.p1();
    let axis = Vector3::new(f64::from(d.x), f64::from(d.y), 0.0);
    let Some(axis) = Unit::try_new(axis, f64::EPSILON) else {
        return ring.to_vec();
    };
    let rotation = Rotation3::from_axis_angle(&axis, twist);
    let centre = Aabb::from_points(ring.iter()).center();
    ring.iter()
        .map(|p| (centre + rotation * (p - centre)).map(f64::round))
        .collect()
}
