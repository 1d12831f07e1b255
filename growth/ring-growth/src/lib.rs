//! Interactive growth of tube meshes over a photograph.
//!
//! The user marks one cross-section of a tube-like object with three clicks:
//! both ends of its visible diameter and a point on its outline. From there
//! the [`GrowthController`] grows rings towards the pointer, snapping each
//! ring's diameter onto the object outline with a gradient field, and
//! stitches them into a [`mesh_layered::LayeredMesh`].
//!
//! - [`Session`] - Image size, model origin, cached gradient field and committed meshes
//! - [`GrowthConfig`] - Ring count, spacing, caps, texturing, welding and snapping settings
//! - [`GrowthController`] - Pointer-driven state machine
//! - [`build_mesh_from_key_rings`] - Non-interactive rebuild from stored key sections
//! - [`tex_coords`] - Photograph texture coordinates for a ring
//!
//! # Example
//!
//! ```
//! use nalgebra::Point2;
//! use ring_growth::{GrowthConfig, GrowthController, PointerButton, Session};
//! use tf_field::{GvfConfig, ScalarField};
//!
//! // A bright vertical bar
//! let image = ScalarField::from_fn(64, 64, |x, _| if (22..=42).contains(&x) { 255.0 } else { 0.0 });
//! let mut session = Session::from_image(&image, &GvfConfig::default().with_iterations(16)).unwrap();
//! let mut controller = GrowthController::new(GrowthConfig::default().with_caps(true, true)).unwrap();
//!
//! for (x, y) in [(22, 10), (42, 10), (32, 13)] {
//!     controller.pointer_pressed(&mut session, PointerButton::Left, Point2::new(x, y)).unwrap();
//! }
//! controller.pointer_moved(&session, Point2::new(32, 30)).unwrap();
//! let committed = controller
//!     .pointer_pressed(&mut session, PointerButton::Left, Point2::new(32, 30))
//!     .unwrap();
//!
//! assert_eq!(committed, Some(0));
//! assert!(session.meshes()[0].ring_count() > 1);
//! ```
//!
//! # Coordinates
//!
//! Pointer events carry image pixels. Key points, overlays and mesh vertices
//! live in model coordinates centred on [`Session::offset`], with Z pointing
//! towards the viewer.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for configs and data types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::float_cmp, clippy::suboptimal_flops)]

mod batch;
mod config;
mod controller;
mod error;
mod session;
mod texture;

pub use batch::build_mesh_from_key_rings;
pub use config::{GrowthConfig, TexturingMode};
pub use controller::{GrowthController, GrowthPhase, Overlay, PointerButton};
pub use error::{GrowthError, GrowthResult};
pub use session::Session;
pub use texture::tex_coords;
