//! Growth settings.

use section_types::{MIN_SLICES, SectionError};
use tf_snap::PointMover;

use crate::error::{GrowthError, GrowthResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How texture coordinates are assigned to the hidden half of a ring.
///
/// The front half of every ring (`z >= 0`) is textured by projecting its
/// vertices straight onto the image. The back half is not visible in the
/// photograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TexturingMode {
    /// Reuse the coordinate of the vertex half a ring away.
    #[default]
    Mirror,
    /// Project the hidden vertex as well, wrapping the image around the tube.
    Cyclic,
}

/// Settings for [`crate::GrowthController`].
///
/// # Example
///
/// ```
/// use ring_growth::{GrowthConfig, TexturingMode};
/// use tf_snap::PointMover;
///
/// let config = GrowthConfig::default()
///     .with_slices(24)
///     .with_step(6)
///     .with_caps(true, true)
///     .with_texturing(TexturingMode::Cyclic)
///     .with_mover(PointMover::Symmetric)
///     .with_weld(16.0);
///
/// assert!(config.validate().is_ok());
/// assert!(config.weld);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GrowthConfig {
    /// Vertices per ring.
    pub slices: usize,

    /// Distance between consecutive rings in pixels.
    pub step: i32,

    /// Close the first open end on commit.
    pub cap_first: bool,

    /// Close the last open end on commit.
    pub cap_last: bool,

    /// Generate texture coordinates, and how.
    pub texturing: Option<TexturingMode>,

    /// Weld the committed mesh to nearby meshes of the session.
    pub weld: bool,

    /// Meshes closer than this are welded.
    pub weld_distance: f64,

    /// Strategy used to snap key points onto the image.
    pub mover: PointMover,

    /// Upper bound on rings per mesh.
    pub max_rings: usize,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            slices: 16,
            step: 4,
            cap_first: false,
            cap_last: false,
            texturing: None,
            weld: false,
            weld_distance: 32.0,
            mover: PointMover::Independent,
            max_rings: 1024,
        }
    }
}

impl GrowthConfig {
    /// Set the number of vertices per ring.
    #[must_use]
    pub fn with_slices(mut self, slices: usize) -> Self {
        self.slices = slices;
        self
    }

    /// Set the ring spacing.
    #[must_use]
    pub fn with_step(mut self, step: i32) -> Self {
        self.step = step;
        self
    }

    /// Choose which open ends are capped on commit.
    #[must_use]
    pub fn with_caps(mut self, first: bool, last: bool) -> Self {
        self.cap_first = first;
        self.cap_last = last;
        self
    }

    /// Enable texture coordinates.
    #[must_use]
    pub fn with_texturing(mut self, mode: TexturingMode) -> Self {
        self.texturing = Some(mode);
        self
    }

    /// Enable welding below `distance`.
    #[must_use]
    pub fn with_weld(mut self, distance: f64) -> Self {
        self.weld = true;
        self.weld_distance = distance;
        self
    }

    /// Set the snapping strategy.
    #[must_use]
    pub fn with_mover(mut self, mover: PointMover) -> Self {
        self.mover = mover;
        self
    }

    /// Set the ring limit.
    #[must_use]
    pub fn with_max_rings(mut self, max_rings: usize) -> Self {
        self.max_rings = max_rings;
        self
    }

    /// Check that the settings can drive growth.
    ///
    /// # Errors
    ///
    /// - [`GrowthError::Section`] for fewer than three slices
    /// - [`GrowthError::InvalidStep`] for a zero step or `i32::MIN`
    /// - [`GrowthError::InvalidWeldDistance`] for a negative or NaN threshold
    pub fn validate(&self) -> GrowthResult<()> {
        if self.slices < MIN_SLICES {
            return Err(SectionError::TooFewSlices(self.slices).into());
        }
        if self.step == 0 || self.step == i32::MIN {
            return Err(GrowthError::InvalidStep(self.step));
        }
        if self.weld_distance.is_nan() || self.weld_distance < 0.0 {
            return Err(GrowthError::InvalidWeldDistance(self.weld_distance));
        }
        Ok(())
    }
}
