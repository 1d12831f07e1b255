//! Open-end classification and end caps.
//!
//! A grown tube has two open ends. After unions the ring list still runs
//! from one end to the other, but nothing in the buffer says which ring is
//! which end, so the ends are found geometrically: every ring spans a plane,
//! and a ray from the ring centre along its normal crosses the planes of the
//! rings in front of it. The ring with nothing in front is the first end and
//! the ring with everything in front is the last.

use nalgebra::{Point3, Vector3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::face::{Cover, Face, VertexRef};
use crate::mesh::LayeredMesh;
use crate::plane::Plane;

/// Ray parameters closer to zero than this count as touching, not crossing.
const CROSSING_EPSILON: f64 = 1e-9;

impl LayeredMesh {
    /// List positions of the first and last open end.
    ///
    /// Ring planes pass through two adjacent ring points and the ring
    /// centroid, with normals turned towards the first ring of the list. Each
    /// ring scores the planes crossed ahead of its centroid minus those crossed
    /// behind it. The lowest score is the first end and the highest the last;
    /// ties go to the earliest and the latest list position respectively.
    ///
    /// This is a heuristic: strongly bent tubes can fool it. Returns `None`
    /// for a mesh without rings.
    #[must_use]
    pub fn open_ends(&self) -> Option<(usize, usize)> {
        let n = self.rings.len();
        match n {
            0 => return None,
            1 => return Some((0, 0)),
            _ => {}
        }

        let centroids: Vec<Point3<f64>> = (0..n)
            .map(|r| self.ring_centroid(r).unwrap_or_else(Point3::origin))
            .collect();
        let axis = centroids[0] - centroids[n - 1];
        let planes: Vec<Option<Plane>> = (0..n)
            .map(|r| self.ring_plane(r, centroids[r], &axis))
            .collect();

        let scores: Vec<i64> = (0..n)
            .map(|i| {
                let Some(own) = planes[i] else {
                    return 0;
                };
                planes
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != i)
                    .filter_map(|(_, p)| p.as_ref()?.line_parameter(&centroids[i], &own.normal))
                    .map(|t| {
                        if t > CROSSING_EPSILON {
                            1
                        } else if t < -CROSSING_EPSILON {
                            -1
                        } else {
                            0
                        }
                    })
                    .sum()
            })
            .collect();

        let mut first = 0;
        let mut last = 0;
        for (i, &score) in scores.iter().enumerate() {
            if score < scores[first] {
                first = i;
            }
            if score >= scores[last] {
                last = i;
            }
        }
        debug!(first, last, ?scores, "open ends classified");
        Some((first, last))
    }

    /// Close the first open end with an apex fan.
    ///
    /// Replaces any existing bottom cover. Normals of the new faces are set by
    /// the next [`LayeredMesh::update_normals`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NoRings`] for a mesh without rings.
    pub fn triangulate_first_layer(&mut self) -> MeshResult<()> {
        let (first, _) = self.open_ends().ok_or(MeshError::NoRings)?;
        let cover = self.fan(first, VertexRef::BottomApex)?;
        debug!(ring = first, faces = cover.faces.len(), "bottom cover triangulated");
        self.bottom = Some(cover);
        Ok(())
    }

    /// Close the last open end with an apex fan.
    ///
    /// Replaces any existing top cover.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::NoRings`] for a mesh without rings.
    pub fn triangulate_last_layer(&mut self) -> MeshResult<()> {
        let (_, last) = self.open_ends().ok_or(MeshError::NoRings)?;
        let cover = self.fan(last, VertexRef::TopApex)?;
        debug!(ring = last, faces = cover.faces.len(), "top cover triangulated");
        self.top = Some(cover);
        Ok(())
    }

    fn fan(&self, ring: usize, apex: VertexRef) -> MeshResult<Cover> {
        let r = *self.rings.get(ring).ok_or(MeshError::NoRings)?;
        let centre = self.ring_centroid(ring).ok_or(MeshError::NoRings)?;

        let mut faces = Vec::with_capacity(r.len());
        faces.push(Face::with_refs([
            VertexRef::Ring(r.end - 1),
            VertexRef::Ring(r.start),
            apex,
        ]));
        for i in r.start..r.end - 1 {
            faces.push(Face::with_refs([VertexRef::Ring(i), VertexRef::Ring(i + 1), apex]));
        }
        Ok(Cover {
            apex: centre,
            faces,
        })
    }

    fn ring_plane(&self, ring: usize, centroid: Point3<f64>, axis: &Vector3<f64>) -> Option<Plane> {
        let points = self.ring_points(ring)?;
        let plane = Plane::from_points(points[0], points[1], centroid)?;
        Some(if plane.normal.dot(axis) < 0.0 {
            plane.flipped()
        } else {
            plane
        })
    }
}
