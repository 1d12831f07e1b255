//! Ring-structured triangle mesh.

// Truncation: vertex indices are u32, so meshes past 4B vertices are unsupported
#![allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]

use nalgebra::{Point2, Point3, Vector2, Vector3};
use tracing::debug;

use crate::error::{MeshError, MeshResult};
use crate::face::{Cover, Face, Ring, VertexRef};
use crate::Aabb;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest ring that encloses an area.
pub const MIN_RING_POINTS: usize = 3;

/// A tube surface built ring by ring.
///
/// Vertices are appended one ring at a time and never reordered; each ring
/// owns a contiguous index range. Consecutive rings in the ring list are
/// joined by a sleeve of `2 * n` faces, and either open end can be closed by
/// an apex fan ([`Cover`]). A 2D overlay of key-point triples, one per ring,
/// outlines the mesh in the image plane for picking, in the same frame as
/// the key points it was built from.
///
/// # Example
///
/// ```
/// use mesh_layered::LayeredMesh;
/// use nalgebra::Point3;
///
/// let square = |y: f64| {
///     vec![
///         Point3::new(1.0, y, 0.0),
///         Point3::new(0.0, y, 1.0),
///         Point3::new(-1.0, y, 0.0),
///         Point3::new(0.0, y, -1.0),
///     ]
/// };
///
/// let mut mesh = LayeredMesh::new();
/// mesh.add_layer(&square(0.0)).unwrap();
/// mesh.add_layer(&square(2.0)).unwrap();
/// mesh.update_normals();
///
/// assert_eq!(mesh.ring_count(), 2);
/// assert_eq!(mesh.faces().len(), 8);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LayeredMesh {
    pub(crate) vertices: Vec<Point3<f64>>,
    pub(crate) faces: Vec<Face>,
    pub(crate) rings: Vec<Ring>,
    pub(crate) tex_coords: Vec<Point2<f64>>,
    pub(crate) top: Option<Cover>,
    pub(crate) bottom: Option<Cover>,
    pub(crate) overlay: Vec<[Point2<i32>; 3]>,
    pub(crate) texture_id: u32,
}

impl LayeredMesh {
    /// Create an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vertex buffer.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Sleeve faces, without the end caps.
    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Ring ranges in list order.
    #[inline]
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// Texture coordinates, one per vertex when complete.
    #[inline]
    #[must_use]
    pub fn tex_coords(&self) -> &[Point2<f64>] {
        &self.tex_coords
    }

    /// Cap over the last ring.
    #[inline]
    #[must_use]
    pub fn top_cover(&self) -> Option<&Cover> {
        self.top.as_ref()
    }

    /// Cap over the first ring.
    #[inline]
    #[must_use]
    pub fn bottom_cover(&self) -> Option<&Cover> {
        self.bottom.as_ref()
    }

    /// Key-point triples outlining the mesh in the image plane.
    #[inline]
    #[must_use]
    pub fn overlay(&self) -> &[[Point2<i32>; 3]] {
        &self.overlay
    }

    /// Replace the key-point overlay.
    pub fn set_overlay(&mut self, overlay: Vec<[Point2<i32>; 3]>) {
        self.overlay = overlay;
    }

    /// Texture handle chosen by the renderer.
    #[inline]
    #[must_use]
    pub const fn texture_id(&self) -> u32 {
        self.texture_id
    }

    /// Set the texture handle.
    pub fn set_texture_id(&mut self, id: u32) {
        self.texture_id = id;
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of rings.
    #[inline]
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// Whether the mesh has no vertices.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Vertices per ring, taken from the last ring.
    #[must_use]
    pub fn cardinality(&self) -> Option<usize> {
        self.rings.last().map(Ring::len)
    }

    /// Whether there is one texture coordinate per vertex.
    #[must_use]
    pub fn has_full_tex_coords(&self) -> bool {
        !self.vertices.is_empty() && self.tex_coords.len() == self.vertices.len()
    }

    /// Sleeve faces followed by both caps.
    pub fn all_faces(&self) -> impl Iterator<Item = &Face> {
        self.faces
            .iter()
            .chain(self.top.iter().flat_map(|c| c.faces.iter()))
            .chain(self.bottom.iter().flat_map(|c| c.faces.iter()))
    }

    /// Append a ring without connecting it to anything.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::TooFewRingPoints`] for fewer than three points.
    pub fn new_layer(&mut self, points: &[Point3<f64>]) -> MeshResult<Ring> {
        if points.len() < MIN_RING_POINTS {
            return Err(MeshError::TooFewRingPoints {
                min: MIN_RING_POINTS,
                actual: points.len(),
            });
        }
        let start = self.vertices.len() as u32;
        self.vertices.extend_from_slice(points);
        let ring = Ring {
            start,
            end: self.vertices.len() as u32,
        };
        self.rings.push(ring);
        Ok(ring)
    }

    /// Append a ring and sleeve it to the previous one.
    ///
    /// The first ring of a mesh is simply registered. Nothing is appended on
    /// error.
    ///
    /// # Errors
    ///
    /// - [`MeshError::TooFewRingPoints`] for fewer than three points
    /// - [`MeshError::CardinalityMismatch`] if the size differs from the last ring
    pub fn add_layer(&mut self, points: &[Point3<f64>]) -> MeshResult<Ring> {
        let previous = self.rings.last().copied();
        if let Some(prev) = previous {
            if points.len() >= MIN_RING_POINTS && prev.len() != points.len() {
                return Err(MeshError::CardinalityMismatch {
                    expected: prev.len(),
                    actual: points.len(),
                });
            }
        }
        let ring = self.new_layer(points)?;
        if let Some(prev) = previous {
            self.stitch(prev, ring);
        }
        debug!(ring = self.rings.len() - 1, points = points.len(), "ring appended");
        Ok(ring)
    }

    /// Sleeve triangulation between two rings of equal size.
    pub(crate) fn stitch(&mut self, first: Ring, second: Ring) {
        let mut cur = second.start;
        for i in first.start..first.end - 1 {
            self.faces.push(Face::new(i, cur, i + 1));
            self.faces.push(Face::new(cur, cur + 1, i + 1));
            cur += 1;
        }
        self.faces.push(Face::new(first.end - 1, cur, first.start));
        self.faces
            .push(Face::new(second.end - 1, second.start, first.start));
    }

    /// List position of the ring that holds buffer index `vertex`.
    #[must_use]
    pub fn ring_of(&self, vertex: u32) -> Option<usize> {
        self.rings.iter().position(|r| r.contains(vertex))
    }

    /// Vertices of the ring at list position `ring`.
    #[must_use]
    pub fn ring_points(&self, ring: usize) -> Option<&[Point3<f64>]> {
        let r = self.rings.get(ring)?;
        self.vertices.get(r.start as usize..r.end as usize)
    }

    /// Mean of the vertices of the ring at list position `ring`.
    #[must_use]
    pub fn ring_centroid(&self, ring: usize) -> Option<Point3<f64>> {
        let points = self.ring_points(ring)?;
        centroid(points)
    }

    /// Position of a face corner.
    #[must_use]
    pub fn position(&self, vertex: VertexRef) -> Option<Point3<f64>> {
        match vertex {
            VertexRef::Ring(i) => self.vertices.get(i as usize).copied(),
            VertexRef::TopApex => self.top.as_ref().map(|c| c.apex),
            VertexRef::BottomApex => self.bottom.as_ref().map(|c| c.apex),
        }
    }

    /// Bounds of the vertex buffer.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter())
    }

    /// Smallest distance between any vertex of `self` and any of `other`.
    ///
    /// Infinite when either mesh is empty.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        self.vertices
            .iter()
            .flat_map(|a| other.vertices.iter().map(move |b| (a - b).norm()))
            .fold(f64::INFINITY, f64::min)
    }

    /// Smallest distance between the centroids of the end rings of both meshes.
    ///
    /// Infinite when either mesh has no rings.
    #[must_use]
    pub fn end_distance(&self, other: &Self) -> f64 {
        let ours = self.end_centroids();
        let theirs = other.end_centroids();
        ours.iter()
            .flat_map(|a| theirs.iter().map(move |b| (a - b).norm()))
            .fold(f64::INFINITY, f64::min)
    }

    /// Centroids of the first and last ring in list order.
    pub(crate) fn end_centroids(&self) -> Vec<Point3<f64>> {
        match self.rings.len() {
            0 => Vec::new(),
            1 => self.ring_centroid(0).into_iter().collect(),
            n => [0, n - 1]
                .into_iter()
                .filter_map(|r| self.ring_centroid(r))
                .collect(),
        }
    }

    /// Remove all geometry, keeping the texture handle.
    pub fn clear(&mut self) {
        let texture_id = self.texture_id;
        *self = Self {
            texture_id,
            ..Self::default()
        };
    }

    /// Append texture coordinates for the most recent vertices.
    pub fn add_tex_coords(&mut self, coords: &[Point2<f64>]) {
        self.tex_coords.extend_from_slice(coords);
    }

    /// Remove the last ring in list order with every face touching it.
    ///
    /// See [`LayeredMesh::remove_layer`].
    pub fn remove_last_layer(&mut self) -> Option<Ring> {
        let last = self.rings.len().checked_sub(1)?;
        self.remove_layer(last)
    }

    /// Remove the ring at list position `index` with every face touching it.
    ///
    /// Later buffer indices shift down to close the gap. A cover fanned over
    /// the removed ring is dropped, as is the ring's overlay entry. The
    /// neighbours of an inner ring are not sleeved together again. Returns
    /// `None` when `index` is out of range.
    pub fn remove_layer(&mut self, index: usize) -> Option<Ring> {
        let ring = *self.rings.get(index)?;
        let had_tex = self.has_full_tex_coords();
        let had_overlay = self.overlay.len() == self.rings.len();
        self.rings.remove(index);

        let touches = |f: &Face| f.ring_indices().any(|i| ring.contains(i));
        self.faces.retain(|f| !touches(f));
        for slot in [&mut self.top, &mut self.bottom] {
            if slot.as_ref().is_some_and(|c| c.faces.iter().any(&touches)) {
                *slot = None;
            }
        }

        let range = ring.start as usize..ring.end as usize;
        self.vertices.drain(range.clone());
        if had_tex {
            self.tex_coords.drain(range);
        }

        let removed = ring.end - ring.start;
        let shift = |v: VertexRef| match v {
            VertexRef::Ring(i) if i >= ring.end => VertexRef::Ring(i - removed),
            other => other,
        };
        for face in self.faces.iter_mut().chain(
            [&mut self.top, &mut self.bottom]
                .into_iter()
                .flatten()
                .flat_map(|c| c.faces.iter_mut()),
        ) {
            face.vertices = face.vertices.map(shift);
        }
        for r in &mut self.rings {
            if r.start >= ring.end {
                *r = Ring {
                    start: r.start - removed,
                    end: r.end - removed,
                };
            }
        }
        if had_overlay {
            self.overlay.remove(index);
        }
        debug!(index, points = removed, "ring removed");
        Some(ring)
    }

    /// Close the ring at list position `index` with a flat fan on its own
    /// points, without an apex.
    ///
    /// Adds `n - 2` faces sharing the last point of the ring to the sleeve
    /// faces.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::RingOutOfRange`] if there is no such ring.
    pub fn triangulate_layer(&mut self, index: usize) -> MeshResult<()> {
        let ring = *self.rings.get(index).ok_or(MeshError::RingOutOfRange {
            index,
            count: self.rings.len(),
        })?;
        let apex = ring.end - 1;
        for i in ring.start..apex - 1 {
            self.faces.push(Face::new(i, i + 1, apex));
        }
        Ok(())
    }

    /// Recompute every face normal.
    ///
    /// The raw normal is `(v0 - v1) × (v2 - v1)`. It is flipped when it makes
    /// an angle above 90° with the direction from a reference point to `v0`:
    /// the centroid of the ring holding `v0` for sleeve faces, the centre of
    /// the mesh bounds for cap faces.
    pub fn update_normals(&mut self) {
        let centroids: Vec<Point3<f64>> = (0..self.rings.len())
            .map(|r| self.ring_centroid(r).unwrap_or_else(Point3::origin))
            .collect();
        let mut owner = vec![None; self.vertices.len()];
        for (r, ring) in self.rings.iter().enumerate() {
            for i in ring.indices() {
                if let Some(slot) = owner.get_mut(i as usize) {
                    *slot = Some(r);
                }
            }
        }
        let mesh_center = self.bounds().center();

        let corners = Corners {
            vertices: &self.vertices,
            top: self.top.as_ref().map(|c| c.apex),
            bottom: self.bottom.as_ref().map(|c| c.apex),
        };
        let ring_of = |v: VertexRef| v.index().and_then(|i| owner.get(i as usize).copied().flatten());
        for face in &mut self.faces {
            let rings = face.vertices.map(ring_of);
            // Flat fans lie in their own ring; orient them like caps
            let reference = match rings {
                [Some(r), b, c] if b != Some(r) || c != Some(r) => centroids[r],
                _ => mesh_center,
            };
            face.normal = corners.oriented_normal(face, reference);
        }
        for cover in [&mut self.top, &mut self.bottom].into_iter().flatten() {
            for face in &mut cover.faces {
                face.normal = corners.oriented_normal(face, mesh_center);
            }
        }
    }

    /// Translate vertices, cover apexes and the overlay by `delta`.
    pub fn translate(&mut self, delta: Vector3<i32>) {
        let d: Vector3<f64> = delta.cast();
        for v in &mut self.vertices {
            *v += d;
        }
        for cover in [&mut self.top, &mut self.bottom].into_iter().flatten() {
            cover.apex += d;
        }
        let planar = Vector2::new(delta.x, delta.y);
        for p in self.overlay.iter_mut().flatten() {
            *p += planar;
        }
    }

    /// Reflect X about `anchor`, or about the centre of the bounds when `None`.
    ///
    /// Winding is reversed and normals are recomputed so faces keep facing
    /// outwards. Returns the anchor used.
    pub fn mirror(&mut self, anchor: Option<f64>) -> f64 {
        let anchor = anchor.unwrap_or_else(|| {
            let bounds = self.bounds();
            if bounds.is_empty() { 0.0 } else { bounds.center().x }
        });
        let reflect = |x: f64| 2.0f64.mul_add(anchor, -x);

        for v in &mut self.vertices {
            v.x = reflect(v.x);
        }
        for cover in [&mut self.top, &mut self.bottom].into_iter().flatten() {
            cover.apex.x = reflect(cover.apex.x);
        }
        for p in self.overlay.iter_mut().flatten() {
            p.x = reflect(f64::from(p.x)).round() as i32;
        }
        for face in &mut self.faces {
            face.flip_winding();
        }
        for cover in [&mut self.top, &mut self.bottom].into_iter().flatten() {
            for face in &mut cover.faces {
                face.flip_winding();
            }
        }
        self.update_normals();
        anchor
    }
}

/// Corner lookup that can run while faces are borrowed mutably.
struct Corners<'a> {
    vertices: &'a [Point3<f64>],
    top: Option<Point3<f64>>,
    bottom: Option<Point3<f64>>,
}

impl Corners<'_> {
    fn get(&self, v: VertexRef) -> Point3<f64> {
        match v {
            VertexRef::Ring(i) => self.vertices.get(i as usize).copied(),
            VertexRef::TopApex => self.top,
            VertexRef::BottomApex => self.bottom,
        }
        .unwrap_or_else(Point3::origin)
    }

    fn oriented_normal(&self, face: &Face, reference: Point3<f64>) -> Vector3<f64> {
        let [a, b, c] = face.vertices.map(|v| self.get(v));
        let n = (a - b).cross(&(c - b));
        let n = if n.dot(&(a - reference)) < 0.0 { -n } else { n };
        n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::zeros)
    }
}

pub(crate) fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum: Vector3<f64> = points.iter().map(|p| p.coords).sum();
    Some(Point3::from(sum / points.len() as f64))
}
