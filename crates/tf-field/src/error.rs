//! Error types for field operations.

/// Result type for field operations.
pub type FieldResult<T> = Result<T, FieldError>;

/// Errors that can occur while building or combining fields.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum FieldError {
    /// A field dimension is zero.
    #[error("invalid field dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width dimension.
        width: usize,
        /// Height dimension.
        height: usize,
    },

    /// The backing buffer does not match the requested dimensions.
    #[error("buffer holds {actual} values, {width}x{height} field needs {expected}")]
    BufferLength {
        /// Width dimension.
        width: usize,
        /// Height dimension.
        height: usize,
        /// Required number of values.
        expected: usize,
        /// Number of values provided.
        actual: usize,
    },

    /// Two fields that must agree in size do not.
    #[error("field size mismatch: {left:?} vs {right:?}")]
    SizeMismatch {
        /// Size of the left operand as `(width, height)`.
        left: (usize, usize),
        /// Size of the right operand as `(width, height)`.
        right: (usize, usize),
    },

    /// The field is too small for the requested operation.
    #[error("field must be at least {min}x{min}, got {width}x{height}")]
    TooSmall {
        /// Minimum edge length.
        min: usize,
        /// Width dimension.
        width: usize,
        /// Height dimension.
        height: usize,
    },

    /// The diffusion coefficient is outside the stable range.
    #[error("diffusivity must lie in (0, 0.25], got {0}")]
    InvalidDiffusivity(f64),

    /// A cell holds NaN or an infinity.
    #[error("non-finite value at ({x}, {y})")]
    NonFinite {
        /// Column of the first offending cell.
        x: usize,
        /// Row of the first offending cell.
        y: usize,
    },

    /// The blur radius parameter is not usable.
    #[error("blur sigma must be finite and non-negative, got {0}")]
    InvalidSigma(f64),
}
