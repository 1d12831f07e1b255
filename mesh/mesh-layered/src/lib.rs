//! Ring-structured triangle meshes for swept tubes.
//!
//! A [`LayeredMesh`] is grown one ring at a time. Every ring is a closed loop
//! of vertices occupying a contiguous range of the vertex buffer, and each
//! new ring is sleeved to the previous one with `2 * n` triangles. The
//! surface can then be:
//!
//! - **Capped** - [`LayeredMesh::triangulate_first_layer`] and
//!   [`LayeredMesh::triangulate_last_layer`] close the open ends with apex fans
//! - **Welded** - [`unite`] joins two tubes at their closest ends; [`merge`]
//!   packs them into one buffer unconnected
//! - **Picked** - [`LayeredMesh::contains`] and [`LayeredMesh::falls_into`]
//!   test the 2D overlay of key points, in the frame the key points use
//! - **Moved** - [`LayeredMesh::translate`] and [`LayeredMesh::mirror`]
//!
//! Face normals are cached and refreshed by [`LayeredMesh::update_normals`],
//! which orients every face away from the axis of the tube.
//!
//! # Example
//!
//! ```
//! use mesh_layered::{LayeredMesh, VertexRef};
//! use nalgebra::Point3;
//!
//! let triangle = |y: f64| {
//!     vec![
//!         Point3::new(1.0, y, 0.0),
//!         Point3::new(-0.5, y, 0.87),
//!         Point3::new(-0.5, y, -0.87),
//!     ]
//! };
//!
//! let mut mesh = LayeredMesh::new();
//! for k in 0..3 {
//!     mesh.add_layer(&triangle(f64::from(k))).unwrap();
//! }
//! mesh.triangulate_first_layer().unwrap();
//! mesh.triangulate_last_layer().unwrap();
//! mesh.update_normals();
//!
//! assert_eq!(mesh.open_ends(), Some((0, 2)));
//! assert_eq!(mesh.all_faces().count(), 12 + 6);
//! assert!(mesh.position(VertexRef::TopApex).is_some());
//! ```
//!
//! # Index Stability
//!
//! Vertices are never reordered. Combining meshes shifts the second mesh's
//! indices by the vertex count of the first; removing the last ring shifts
//! later indices down by the ring size.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(clippy::float_cmp, clippy::suboptimal_flops, clippy::similar_names)]

mod bounds;
mod cover;
mod error;
mod face;
mod mesh;
mod pick;
mod plane;
mod weld;

pub use bounds::Aabb;
pub use error::{MeshError, MeshResult};
pub use face::{Cover, Face, Ring, VertexRef};
pub use mesh::{LayeredMesh, MIN_RING_POINTS};
pub use pick::PickRect;
pub use weld::{merge, unite};
