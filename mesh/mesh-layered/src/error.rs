//! Error types for layered mesh operations.

use thiserror::Error;

/// Result type for layered mesh operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// Errors that can occur while building or combining layered meshes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A ring has too few points to enclose an area.
    #[error("ring needs at least {min} points, got {actual}")]
    TooFewRingPoints {
        /// Minimum required points.
        min: usize,
        /// Actual point count.
        actual: usize,
    },

    /// Two rings that must be stitched differ in size.
    #[error("ring cardinality mismatch: expected {expected}, got {actual}")]
    CardinalityMismatch {
        /// Cardinality of the existing ring.
        expected: usize,
        /// Cardinality of the new ring.
        actual: usize,
    },

    /// The operation needs at least one ring.
    #[error("mesh has no rings")]
    NoRings,

    /// A ring list position past the end.
    #[error("ring {index} out of range, mesh has {count} rings")]
    RingOutOfRange {
        /// Requested list position.
        index: usize,
        /// Number of rings.
        count: usize,
    },
}
