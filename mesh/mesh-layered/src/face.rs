//! Rings, faces and end caps.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference to a face corner.
///
/// Sleeve faces only use [`VertexRef::Ring`]. Cap fans additionally point at
/// the apex of their cover, which lives outside the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VertexRef {
    /// Index into the vertex buffer.
    Ring(u32),
    /// Apex of the top (last ring) cover.
    TopApex,
    /// Apex of the bottom (first ring) cover.
    BottomApex,
}

impl VertexRef {
    /// Buffer index, if this is a ring vertex.
    #[inline]
    #[must_use]
    pub const fn index(self) -> Option<u32> {
        match self {
            Self::Ring(i) => Some(i),
            Self::TopApex | Self::BottomApex => None,
        }
    }

    /// Whether this refers to a cover apex.
    #[inline]
    #[must_use]
    pub const fn is_apex(self) -> bool {
        !matches!(self, Self::Ring(_))
    }

    pub(crate) const fn rebased(self, offset: u32) -> Self {
        match self {
            Self::Ring(i) => Self::Ring(i + offset),
            apex => apex,
        }
    }
}

impl From<u32> for VertexRef {
    fn from(index: u32) -> Self {
        Self::Ring(index)
    }
}

/// A triangle with its cached unit normal.
///
/// Normals are refreshed by [`crate::LayeredMesh::update_normals`]; a face
/// that has not been through it yet carries a zero normal.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    /// Corners in winding order.
    pub vertices: [VertexRef; 3],
    /// Outward unit normal.
    pub normal: Vector3<f64>,
}

impl Face {
    /// Face over three buffer indices.
    #[must_use]
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self::with_refs([VertexRef::Ring(a), VertexRef::Ring(b), VertexRef::Ring(c)])
    }

    /// Face over arbitrary corner references.
    #[must_use]
    pub fn with_refs(vertices: [VertexRef; 3]) -> Self {
        Self {
            vertices,
            normal: Vector3::zeros(),
        }
    }

    /// Buffer indices of the ring corners.
    pub fn ring_indices(&self) -> impl Iterator<Item = u32> {
        self.vertices.iter().filter_map(|v| v.index())
    }

    pub(crate) fn rebased(&self, offset: u32) -> Self {
        Self {
            vertices: self.vertices.map(|v| v.rebased(offset)),
            normal: self.normal,
        }
    }

    pub(crate) fn flip_winding(&mut self) {
        self.vertices.swap(1, 2);
    }
}

/// Half-open range `[start, end)` of one ring in the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ring {
    /// First vertex index.
    pub start: u32,
    /// One past the last vertex index.
    pub end: u32,
}

impl Ring {
    /// Number of vertices in the ring.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        (self.end - self.start) as usize
    }

    /// Whether the ring has no vertices.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether `index` lies in the ring.
    #[inline]
    #[must_use]
    pub const fn contains(&self, index: u32) -> bool {
        self.start <= index && index < self.end
    }

    /// Buffer indices of the ring.
    #[inline]
    pub fn indices(&self) -> std::ops::Range<u32> {
        self.start..self.end
    }

    pub(crate) const fn rebased(self, offset: u32) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

/// Apex fan closing one open end.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cover {
    /// Fan apex, placed at the centroid of the closed ring.
    pub apex: Point3<f64>,
    /// Fan faces; each has the apex as its third corner.
    pub faces: Vec<Face>,
}

impl Cover {
    pub(crate) fn rebased(&self, offset: u32) -> Self {
        Self {
            apex: self.apex,
            faces: self.faces.iter().map(|f| f.rebased(offset)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_ref_rebase_keeps_apexes() {
        assert_eq!(VertexRef::Ring(3).rebased(10), VertexRef::Ring(13));
        assert_eq!(VertexRef::TopApex.rebased(10), VertexRef::TopApex);
        assert!(VertexRef::BottomApex.is_apex());
        assert_eq!(VertexRef::from(7).index(), Some(7));
    }

    #[test]
    fn face_ring_indices_skip_apex() {
        let face = Face::with_refs([VertexRef::Ring(4), VertexRef::Ring(5), VertexRef::TopApex]);
        assert_eq!(face.ring_indices().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn flipping_swaps_last_two_corners() {
        let mut face = Face::new(0, 1, 2);
        face.flip_winding();
        assert_eq!(face.vertices, Face::new(0, 2, 1).vertices);
    }

    #[test]
    fn ring_range() {
        let ring = Ring { start: 6, end: 12 };
        assert_eq!(ring.len(), 6);
        assert!(ring.contains(6));
        assert!(!ring.contains(12));
        assert_eq!(ring.rebased(4), Ring { start: 10, end: 16 });
        assert_eq!(ring.indices().count(), 6);
    }
}
