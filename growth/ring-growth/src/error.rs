//! Error types for ring growth.

use mesh_layered::MeshError;
use section_types::SectionError;
use tf_field::FieldError;
use tf_snap::SnapError;
use thiserror::Error;

/// Result type for ring growth.
pub type GrowthResult<T> = Result<T, GrowthError>;

/// Errors that can occur while growing or assembling tube meshes.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum GrowthError {
    /// Building the gradient field failed.
    #[error(transparent)]
    Field(#[from] FieldError),

    /// Key points do not describe a usable cross-section.
    #[error(transparent)]
    Section(#[from] SectionError),

    /// Snapping key points onto the image failed.
    #[error(transparent)]
    Snap(#[from] SnapError),

    /// A mesh operation was rejected.
    #[error(transparent)]
    Mesh(#[from] MeshError),

    /// The session has no gradient field to snap against.
    #[error("session has no gradient field")]
    MissingGradient,

    /// The growth step is zero or has no positive counterpart.
    #[error("growth step must be non-zero and above i32::MIN, got {0}")]
    InvalidStep(i32),

    /// The weld threshold is negative or not a number.
    #[error("weld distance must be finite and non-negative, got {0}")]
    InvalidWeldDistance(f64),
}

impl GrowthError {
    /// Whether the error comes from degenerate key points.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Section(e) if e.is_degenerate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_component_errors() {
        let err: GrowthError = MeshError::NoRings.into();
        assert_eq!(err.to_string(), "mesh has no rings");

        let err: GrowthError = SectionError::degenerate("collapsed").into();
        assert!(err.is_degenerate());
        assert!(!GrowthError::MissingGradient.is_degenerate());
    }
}
