//! Image fields for tube reconstruction.
//!
//! This crate holds the per-pixel data that drives snapping of cross-section
//! points onto object outlines:
//!
//! - [`ScalarField`] - Dense 2D grid of `f64` values with signed, bounds-checked access
//! - [`GradientField`] - Gradient vector flow (GVF) magnitude and direction of an image
//! - [`GvfConfig`] - Diffusion parameters for [`GradientField::compute`]
//!
//! # Layer 0 Crate
//!
//! No rendering or windowing dependencies. A caller decodes its image into a
//! grayscale buffer and hands it over as a [`ScalarField`].
//!
//! # Coordinate Systems
//!
//! Fields use image coordinates:
//! - X: column, growing to the right
//! - Y: row, growing downwards
//!
//! Signed accessors take `i32` coordinates so that searches can step past the
//! border and simply receive `None`.
//!
//! # Example
//!
//! ```
//! use tf_field::{GradientField, GvfConfig, ScalarField};
//!
//! // A bright vertical bar on a dark background
//! let image = ScalarField::from_fn(32, 32, |x, _| if (12..20).contains(&x) { 255.0 } else { 0.0 });
//!
//! let gvf = GradientField::compute(&image, &GvfConfig::default().with_iterations(16)).unwrap();
//!
//! // The flow is strongest near the bar edges
//! let edge = gvf.magnitude().get(12, 16).unwrap();
//! let far = gvf.magnitude().get(0, 16).unwrap();
//! assert!(edge > far);
//! ```
//!
//! # Quality Standards
//!
//! - Zero `unwrap`/`expect` in library code
//! - Every public operation returns [`FieldResult`] when it can fail

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod blur;
mod error;
mod field;
mod gvf;

pub use error::{FieldError, FieldResult};
pub use field::ScalarField;
pub use gvf::{GradientField, GvfConfig};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point2, Vector2};
