//! Joining meshes.
//!
//! [`unite`] welds two tubes end to end through a new sleeve; [`merge`] just
//! packs two meshes into one buffer. In both, `a` keeps its indices and every
//! index of `b` is shifted by the vertex count of `a`.

// Truncation: vertex indices are u32, so meshes past 4B vertices are unsupported
#![allow(clippy::cast_possible_truncation)]

use tracing::{info, warn};

use crate::error::{MeshError, MeshResult};
use crate::face::Cover;
use crate::mesh::LayeredMesh;

/// Weld two tubes at their closest open ends.
///
/// Of the four pairings between the end rings of `a` and `b`, the one with
/// the closest centroids is joined. Ring lists are reversed where needed so
/// that the ring list of the result still runs from one open end to the
/// other, then the two meeting rings are sleeved together. Vertex buffers are
/// never reordered: `b`'s vertices follow `a`'s.
///
/// Covers are dropped, since the junction end would sit inside the surface;
/// re-cap the result. Texture coordinates survive only if both inputs carry a
/// full set. The texture handle is taken from `a`.
///
/// # Errors
///
/// - [`MeshError::NoRings`] if either mesh has no rings
/// - [`MeshError::CardinalityMismatch`] if the meeting rings differ in size
///
/// # Example
///
/// ```
/// use mesh_layered::{unite, LayeredMesh};
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
/// let tube = |y0: f64| {
///     let mut mesh = LayeredMesh::new();
///     mesh.add_layer(&square(y0)).unwrap();
///     mesh.add_layer(&square(y0 + 1.0)).unwrap();
///     mesh
/// };
///
/// let joined = unite(&tube(0.0), &tube(2.0)).unwrap();
/// assert_eq!(joined.ring_count(), 4);
/// assert_eq!(joined.faces().len(), 3 * 8);
/// ```
pub fn unite(a: &LayeredMesh, b: &LayeredMesh) -> MeshResult<LayeredMesh> {
    let na = a.rings.len();
    let nb = b.rings.len();
    if na == 0 || nb == 0 {
        return Err(MeshError::NoRings);
    }

    let (end_a, end_b) = closest_ends(a, b);
    let reverse_a = na > 1 && end_a == 0;
    let reverse_b = nb > 1 && end_b == nb - 1;

    let expected = a.rings[end_a].len();
    let actual = b.rings[end_b].len();
    if expected != actual {
        return Err(MeshError::CardinalityMismatch { expected, actual });
    }

    let offset = a.vertices.len() as u32;
    let mut out = LayeredMesh {
        texture_id: a.texture_id,
        ..LayeredMesh::default()
    };

    out.vertices.reserve(a.vertices.len() + b.vertices.len());
    out.vertices.extend_from_slice(&a.vertices);
    out.vertices.extend_from_slice(&b.vertices);

    out.faces.reserve(a.faces.len() + b.faces.len() + 2 * expected);
    out.faces.extend_from_slice(&a.faces);
    out.faces.extend(b.faces.iter().map(|f| f.rebased(offset)));

    out.rings.extend(ordered(&a.rings, reverse_a));
    out.rings
        .extend(ordered(&b.rings, reverse_b).map(|r| r.rebased(offset)));

    let first = a.rings[end_a];
    let second = b.rings[end_b].rebased(offset);
    out.stitch(first, second);

    if a.has_full_tex_coords() && b.has_full_tex_coords() {
        out.tex_coords.extend_from_slice(&a.tex_coords);
        out.tex_coords.extend_from_slice(&b.tex_coords);
    }

    out.overlay.extend(ordered(&a.overlay, reverse_a));
    out.overlay.extend(ordered(&b.overlay, reverse_b));

    out.update_normals();
    info!(
        end_a,
        end_b,
        rings = out.rings.len(),
        vertices = out.vertices.len(),
        "meshes united"
    );
    Ok(out)
}

/// Pack two meshes into one without connecting them.
///
/// Each cover slot takes `a`'s cover, else `b`'s. Texture coordinates
/// survive only if both inputs carry a full set.
#[must_use]
pub fn merge(a: &LayeredMesh, b: &LayeredMesh) -> LayeredMesh {
    let offset = a.vertices.len() as u32;

    let mut vertices = a.vertices.clone();
    vertices.extend_from_slice(&b.vertices);

    let mut faces = a.faces.clone();
    faces.extend(b.faces.iter().map(|f| f.rebased(offset)));

    let mut rings = a.rings.clone();
    rings.extend(b.rings.iter().map(|r| r.rebased(offset)));

    let tex_coords = if a.has_full_tex_coords() && b.has_full_tex_coords() {
        let mut coords = a.tex_coords.clone();
        coords.extend_from_slice(&b.tex_coords);
        coords
    } else {
        Vec::new()
    };

    let mut overlay = a.overlay.clone();
    overlay.extend_from_slice(&b.overlay);

    let pick = |ours: Option<&Cover>, theirs: Option<&Cover>, slot: &str| {
        if ours.is_some() && theirs.is_some() {
            warn!(slot, "both meshes carry a cover, keeping the first");
        }
        ours.cloned().or_else(|| theirs.map(|c| c.rebased(offset)))
    };
    let top = pick(a.top.as_ref(), b.top.as_ref(), "top");
    let bottom = pick(a.bottom.as_ref(), b.bottom.as_ref(), "bottom");

    LayeredMesh {
        vertices,
        faces,
        rings,
        tex_coords,
        top,
        bottom,
        overlay,
        texture_id: a.texture_id,
    }
}

/// List positions of the closest pair of end rings.
fn closest_ends(a: &LayeredMesh, b: &LayeredMesh) -> (usize, usize) {
    let ends = |m: &LayeredMesh| -> Vec<usize> {
        let n = m.rings.len();
        if n == 1 { vec![0] } else { vec![0, n - 1] }
    };

    let mut best = (0, 0);
    let mut best_dist = f64::INFINITY;
    for ra in ends(a) {
        let Some(ca) = a.ring_centroid(ra) else {
            continue;
        };
        for rb in ends(b) {
            let Some(cb) = b.ring_centroid(rb) else {
                continue;
            };
            let d = (ca - cb).norm();
            if d < best_dist {
                best_dist = d;
                best = (ra, rb);
            }
        }
    }
    best
}

fn ordered<T: Copy>(items: &[T], reverse: bool) -> Box<dyn Iterator<Item = T> + '_> {
    if reverse {
        Box::new(items.iter().rev().copied())
    } else {
        Box::new(items.iter().copied())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::face::Ring;
    use crate::mesh::tests::{ring, tube};
    use nalgebra::{Point2, Vector3};

    fn tube_at(rings: usize, y0: i32) -> LayeredMesh {
        let mut mesh = tube(rings, 6);
        mesh.translate(Vector3::new(0, y0, 0));
        mesh
    }

    fn assert_rebased(a: &LayeredMesh, b: &LayeredMesh, joined: &LayeredMesh) {
        let offset = a.vertex_count() as u32;
        for i in 0..b.vertex_count() as u32 {
            let r = joined.ring_of(i + offset).unwrap();
            assert!(joined.rings()[r].contains(i + offset));
            assert_eq!(joined.vertices()[(i + offset) as usize], b.vertices()[i as usize]);
        }
    }

    #[test]
    fn unite_end_to_start() {
        let a = tube_at(3, 0);
        let b = tube_at(2, 12);
        let joined = unite(&a, &b).unwrap();

        assert_eq!(joined.ring_count(), 5);
        assert_eq!(joined.vertex_count(), 30);
        assert_eq!(joined.faces().len(), 12 * 4);
        assert_rebased(&a, &b, &joined);
        assert_eq!(joined.rings()[3], Ring { start: 18, end: 24 });
        assert_eq!(joined.open_ends(), Some((0, 4)));
    }

    #[test]
    fn unite_reverses_to_meet() {
        // a's first ring is closest to b's last ring
        let a = tube_at(2, 20);
        let b = tube_at(3, 0);
        let joined = unite(&a, &b).unwrap();

        assert_eq!(joined.rings()[0], Ring { start: 6, end: 12 });
        assert_eq!(joined.rings()[1], Ring { start: 0, end: 6 });
        assert_eq!(joined.rings()[2], Ring { start: 24, end: 30 });
        assert_eq!(joined.rings()[4], Ring { start: 12, end: 18 });
        assert_rebased(&a, &b, &joined);

        let ys: Vec<f64> = (0..joined.ring_count())
            .map(|r| joined.ring_centroid(r).unwrap().y)
            .collect();
        assert!(ys.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn unite_drops_covers_and_partial_tex() {
        let mut a = tube_at(2, 0);
        a.triangulate_first_layer().unwrap();
        a.add_tex_coords(&[Point2::new(0.0, 0.0); 12]);
        let b = tube_at(2, 8);

        let joined = unite(&a, &b).unwrap();
        assert!(joined.top_cover().is_none());
        assert!(joined.bottom_cover().is_none());
        assert!(joined.tex_coords().is_empty());
    }

    #[test]
    fn unite_keeps_full_tex() {
        let mut a = tube_at(2, 0);
        let mut b = tube_at(2, 8);
        a.add_tex_coords(&[Point2::new(0.0, 0.0); 12]);
        b.add_tex_coords(&[Point2::new(1.0, 1.0); 12]);
        let joined = unite(&a, &b).unwrap();
        assert!(joined.has_full_tex_coords());
        assert_eq!(joined.tex_coords()[12], Point2::new(1.0, 1.0));
    }

    #[test]
    fn unite_rejects_mismatched_rings() {
        let a = tube_at(2, 0);
        let mut b = LayeredMesh::new();
        b.add_layer(&ring(5, 10.0, 10.0)).unwrap();
        assert_eq!(
            unite(&a, &b),
            Err(MeshError::CardinalityMismatch {
                expected: 6,
                actual: 5
            })
        );
        assert_eq!(unite(&a, &LayeredMesh::new()), Err(MeshError::NoRings));
    }

    #[test]
    fn merge_concatenates_and_keeps_first_cover() {
        let mut a = tube_at(2, 0);
        let mut b = tube_at(2, 50);
        a.triangulate_last_layer().unwrap();
        b.triangulate_last_layer().unwrap();
        b.triangulate_first_layer().unwrap();

        let merged = merge(&a, &b);
        assert_eq!(merged.vertex_count(), 24);
        assert_eq!(merged.faces().len(), 24);
        assert_eq!(merged.ring_count(), 4);
        assert_rebased(&a, &b, &merged);

        assert_eq!(merged.top_cover(), a.top_cover());
        let bottom = merged.bottom_cover().unwrap();
        assert!(bottom.faces.iter().all(|f| f.ring_indices().all(|i| (12..18).contains(&i))));
    }
}
