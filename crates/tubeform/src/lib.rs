//! Tube reconstruction from a single photograph.
//!
//! This umbrella crate re-exports the tubeform crates behind one name. All of
//! them are Layer 0 (no windowing or rendering dependencies): a caller decodes
//! its image, feeds pointer events in, and draws the meshes and overlays that
//! come out.
//!
//! # Quick Start
//!
//! ```
//! use tubeform::prelude::*;
//!
//! // Grayscale photograph of a bright rod
//! let image = ScalarField::from_fn(64, 64, |x, _| if (22..=42).contains(&x) { 255.0 } else { 0.0 });
//! let mut session = Session::from_image(&image, &GvfConfig::default().with_iterations(16)).unwrap();
//!
//! let config = GrowthConfig::default().with_caps(true, true);
//! let mut controller = GrowthController::new(config).unwrap();
//!
//! // Mark the cross-section, drag along the rod, click to finish
//! for (x, y) in [(22, 8), (42, 8), (32, 11)] {
//!     controller.pointer_pressed(&mut session, PointerButton::Left, Point2::new(x, y)).unwrap();
//! }
//! controller.pointer_moved(&session, Point2::new(32, 40)).unwrap();
//! controller.pointer_pressed(&mut session, PointerButton::Left, Point2::new(32, 40)).unwrap();
//!
//! let mesh = &session.meshes()[0];
//! assert!(mesh.top_cover().is_some());
//! ```
//!
//! # Module Organization
//!
//! - [`field`] - Scalar image fields and gradient vector flow
//! - [`section`] - Key sections, ellipse outlines and depth rings
//! - [`snap`] - Point movers that climb the gradient field
//! - [`mesh`] - Ring-structured triangle meshes
//! - [`growth`] - Session context and the interactive growth controller
//!
//! # Feature Flags
//!
//! - `serde` - Enable serialization/deserialization across all crates

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Scalar image fields and gradient vector flow.
pub use tf_field as field;

/// Key sections, ellipse outlines and depth rings.
pub use section_types as section;

/// Point movers that climb the gradient field.
pub use tf_snap as snap;

/// Ring-structured triangle meshes.
pub use mesh_layered as mesh;

/// Session context and the interactive growth controller.
pub use ring_growth as growth;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for tube reconstruction.
///
/// # Usage
///
/// ```
/// use tubeform::prelude::*;
/// ```
pub mod prelude {
    // Fields
    pub use tf_field::{GradientField, GvfConfig, Point2, ScalarField};

    // Sections
    pub use section_types::{Basis, EllipseSection, Line2, depth_ring};

    // Snapping
    pub use tf_snap::{MoveConfig, PointMover};

    // Meshes
    pub use mesh_layered::{Face, LayeredMesh, PickRect, Ring, VertexRef, merge, unite};

    // Growth (main use case)
    pub use ring_growth::{
        GrowthConfig, GrowthController, GrowthPhase, Overlay, PointerButton, Session,
        TexturingMode, build_mesh_from_key_rings,
    };
}
