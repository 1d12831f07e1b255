//! Move parameters.
//!
//! [`MoveConfig`] describes one snapping pass: how far to push the points
//! before searching, which line to slide them along, and how the model-plane
//! coordinates of the points map onto the field.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector2;
//! use tf_snap::MoveConfig;
//!
//! // Push 4 pixels down, then slide horizontally with look-ahead
//! let config = MoveConfig::along(Vector2::x())
//!     .with_growth(Vector2::y(), 4.0)
//!     .with_look_ahead(true);
//!
//! assert_eq!(config.growth_shift(), Vector2::new(0, 4));
//! ```

// Step vectors are small multiples of unit directions
#![allow(clippy::cast_possible_truncation)]

use nalgebra::Vector2;

/// Largest look-ahead radius tried before a search gives up.
pub const MAX_LOOK_AHEAD: i32 = 4;

/// Parameters for [`crate::PointMover::move_points`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveConfig {
    /// Direction of the initial push, normally unit length.
    pub growth_dir: Vector2<f64>,

    /// Length of the initial push in pixels.
    pub growth_length: f64,

    /// Direction the points slide along while searching.
    pub change_dir: Vector2<f64>,

    /// Added to the points to reach field coordinates, removed afterwards.
    pub offset: Vector2<i32>,

    /// Whether to widen the search radius (up to [`MAX_LOOK_AHEAD`]) when no
    /// immediate neighbour is better.
    pub look_ahead: bool,
}

impl Default for MoveConfig {
    fn default() -> Self {
        Self {
            growth_dir: Vector2::zeros(),
            growth_length: 0.0,
            change_dir: Vector2::x(),
            offset: Vector2::zeros(),
            look_ahead: false,
        }
    }
}

impl MoveConfig {
    /// Configuration that slides along `change_dir` without any push.
    #[must_use]
    pub fn along(change_dir: Vector2<f64>) -> Self {
        Self {
            change_dir,
            ..Self::default()
        }
    }

    /// Set the initial push.
    #[must_use]
    pub fn with_growth(mut self, dir: Vector2<f64>, length: f64) -> Self {
        self.growth_dir = dir;
        self.growth_length = length;
        self
    }

    /// Set the model-to-field offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector2<i32>) -> Self {
        self.offset = offset;
        self
    }

    /// Enable or disable look-ahead.
    #[must_use]
    pub fn with_look_ahead(mut self, look_ahead: bool) -> Self {
        self.look_ahead = look_ahead;
        self
    }

    /// Initial push rounded to whole pixels.
    #[must_use]
    pub fn growth_shift(&self) -> Vector2<i32> {
        round_vec(self.growth_dir * self.growth_length)
    }

    /// Slide step at search radius `radius`, rounded to whole pixels.
    #[must_use]
    pub fn step(&self, radius: i32) -> Vector2<i32> {
        round_vec(self.change_dir * f64::from(radius))
    }

    /// Next search radius after a failed step, or `None` when the search is over.
    pub(crate) fn widen(&self, radius: i32) -> Option<i32> {
        (self.look_ahead && radius < MAX_LOOK_AHEAD).then_some(radius + 1)
    }
}

fn round_vec(v: Vector2<f64>) -> Vector2<i32> {
    v.map(|c| c.round() as i32)
}
