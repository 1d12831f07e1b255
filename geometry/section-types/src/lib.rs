//! Cross-section primitives for single-view tube reconstruction.
//!
//! A generalized cylinder is described on screen by a sequence of key
//! sections. Each one is given by three points: the two ends of the visible
//! diameter and a third point on the outline that reveals how far the section
//! is turned towards the viewer. This crate turns those points into geometry:
//!
//! - [`Basis`] - The three key points with derived axes, inclination and twist
//! - [`Line2`] - Implicit 2D line used for distances and growth directions
//! - [`EllipseSection`] - Apparent elliptic outline, sampled for overlays
//! - [`depth_ring`] - Circular 3D ring standing upright through the diameter
//!
//! # Example
//!
//! ```
//! use nalgebra::Point2;
//! use section_types::{Basis, EllipseSection, depth_ring};
//!
//! let basis = Basis::new(Point2::new(0, 0), Point2::new(20, 0), Point2::new(10, 5));
//!
//! // Outline drawn over the image
//! let outline = EllipseSection::from_basis(&basis).pixels(16).unwrap();
//! assert_eq!(outline.len(), 16);
//!
//! // Ring appended to the mesh
//! let ring = depth_ring(&basis, basis.inclination(), 16).unwrap();
//! assert!(ring.iter().all(|p| p.y == 0.0));
//! ```
//!
//! # Coordinate System
//!
//! Key points live in the model plane: X to the right, Y along image rows.
//! Depth rings add Z towards the viewer, with the key plane at `z = 0`.
//!
//! # Feature Flags
//!
//! - `serde`: Enable serialization/deserialization for all types

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::suboptimal_flops,
    clippy::many_single_char_names,
    clippy::similar_names
)]

mod basis;
mod ellipse;
mod error;
mod line;

pub use basis::{BASIS_POINTS, Basis};
pub use ellipse::{EllipseSection, MIN_SLICES, create_ellipse, depth_ring};
pub use error::{SectionError, SectionResult};
pub use line::{Line2, inclination_angle};
