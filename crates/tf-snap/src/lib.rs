//! Snapping key points onto image outlines.
//!
//! When a tube is grown across a photo, every new cross-section starts as a
//! guess: the previous diameter pushed one step further. This crate corrects
//! the guess by sliding the diameter ends along the diameter line until they
//! sit on strong edges of a gradient magnitude field.
//!
//! - [`PointMover`] - `Independent` or `Symmetric` hill climbing
//! - [`MoveConfig`] - Push, slide direction, offset and look-ahead
//!
//! # Example
//!
//! ```
//! use nalgebra::{Point2, Vector2};
//! use tf_field::ScalarField;
//! use tf_snap::{MoveConfig, PointMover};
//!
//! // Two bright edge columns at x = 3 and x = 12
//! let edges = ScalarField::from_fn(16, 8, |x, _| if x == 3 || x == 12 { 255.0 } else { 0.0 });
//! let mut diameter = [Point2::new(4, 2), Point2::new(11, 2)];
//!
//! let config = MoveConfig::along(Vector2::x())
//!     .with_growth(Vector2::y(), 2.0)
//!     .with_look_ahead(true);
//! PointMover::Independent.move_points(&edges, &mut diameter, &config).unwrap();
//!
//! assert_eq!(diameter, [Point2::new(3, 4), Point2::new(12, 4)]);
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod config;
mod error;
mod mover;

pub use config::{MAX_LOOK_AHEAD, MoveConfig};
pub use error::{SnapError, SnapResult};
pub use mover::{MOVED_POINTS, PointMover};
