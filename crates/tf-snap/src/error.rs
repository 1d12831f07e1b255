//! Error types for point snapping.

/// Result type for point snapping.
pub type SnapResult<T> = Result<T, SnapError>;

/// Errors that can occur while moving points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SnapError {
    /// Fewer points than the mover works on.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// A point landed outside the field after the initial shift.
    #[error("seed point ({x}, {y}) lies outside the field")]
    SeedOutOfBounds {
        /// Column in field coordinates.
        x: i32,
        /// Row in field coordinates.
        y: i32,
    },
}
