//! Mesh assembly from stored key sections.

use mesh_layered::{LayeredMesh, MeshError};
use nalgebra::Point3;
use section_types::{Basis, depth_ring};
use tracing::debug;

use crate::config::GrowthConfig;
use crate::error::GrowthResult;
use crate::session::Session;
use crate::texture::tex_coords;

/// Rebuild a tube from its key sections without pointer interaction.
///
/// Every key section becomes one ring, generated with the shared
/// `inclination`. The key sections are kept as the pick overlay, caps and
/// texture coordinates follow `config`, and the twist for texturing is taken
/// from the first key section.
///
/// # Errors
///
/// - [`crate::GrowthError::Mesh`] for an empty key list
/// - [`crate::GrowthError::Section`] or [`crate::GrowthError::InvalidStep`] for an
///   invalid `config`
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use ring_growth::{GrowthConfig, Session, build_mesh_from_key_rings};
/// use section_types::Basis;
///
/// let keys: Vec<Basis> = (0..3)
///     .map(|k| {
///         let y = 6 * k;
///         Basis::new(Point2::new(-8, y), Point2::new(8, y), Point2::new(0, y + 3))
///     })
///     .collect();
///
/// let config = GrowthConfig::default().with_slices(8).with_caps(true, true);
/// let mesh = build_mesh_from_key_rings(&Session::new(64, 64), &keys, 0.0, &config).unwrap();
///
/// assert_eq!(mesh.ring_count(), 3);
/// assert_eq!(mesh.overlay().len(), 3);
/// assert!(mesh.top_cover().is_some());
/// ```
pub fn build_mesh_from_key_rings(
    session: &Session,
    key_rings: &[Basis],
    inclination: f64,
    config: &GrowthConfig,
) -> GrowthResult<LayeredMesh> {
    config.validate()?;
    let first = key_rings.first().ok_or(MeshError::NoRings)?;
    let twist = first.twist();

    let mut mesh = LayeredMesh::new();
    mesh.set_texture_id(session.texture_id());
    for key in key_rings {
        let ring = depth_ring(key, inclination, config.slices)?;
        push_ring(&mut mesh, &ring, key, twist, session, config)?;
    }
    mesh.set_overlay(key_rings.iter().map(|k| *k.points()).collect());
    cap(&mut mesh, config)?;
    mesh.update_normals();

    debug!(rings = mesh.ring_count(), "mesh rebuilt from key rings");
    Ok(mesh)
}

/// Append `ring` with its texture coordinates when texturing is on.
pub(crate) fn push_ring(
    mesh: &mut LayeredMesh,
    ring: &[Point3<f64>],
    key: &Basis,
    twist: f64,
    session: &Session,
    config: &GrowthConfig,
) -> GrowthResult<()> {
    mesh.add_layer(ring)?;
    if let Some(mode) = config.texturing {
        mesh.add_tex_coords(&tex_coords(ring, key, twist, session, mode));
    }
    Ok(())
}

/// Close the open ends requested by `config`.
pub(crate) fn cap(mesh: &mut LayeredMesh, config: &GrowthConfig) -> GrowthResult<()> {
    if config.cap_first {
        mesh.triangulate_first_layer()?;
    }
    if config.cap_last {
        mesh.triangulate_last_layer()?;
    }
    Ok(())
}
