//! Error types for cross-section construction.

use thiserror::Error;

/// Result type for cross-section operations.
pub type SectionResult<T> = std::result::Result<T, SectionError>;

/// Errors that can occur while building cross-sections.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SectionError {
    /// Not enough key points were supplied.
    #[error("insufficient points: need at least {required}, got {actual}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        actual: usize,
    },

    /// A ring needs at least three slices to enclose an area.
    #[error("slice count {0} is too small (minimum 3)")]
    TooFewSlices(usize),

    /// The key points do not span a usable section.
    #[error("degenerate section: {reason}")]
    Degenerate {
        /// Description of the degeneracy.
        reason: String,
    },
}

impl SectionError {
    /// Create an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, actual: usize) -> Self {
        Self::InsufficientPoints { required, actual }
    }

    /// Create a degenerate section error.
    #[must_use]
    pub fn degenerate(reason: impl Into<String>) -> Self {
        Self::Degenerate {
            reason: reason.into(),
        }
    }

    /// Check if this is a degenerate section error.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::Degenerate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SectionError::insufficient_points(3, 2);
        assert!(err.to_string().contains("need at least 3"));
        assert!(err.to_string().contains("got 2"));

        let err = SectionError::TooFewSlices(2);
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_error_predicates() {
        assert!(SectionError::degenerate("coincident ends").is_degenerate());
        assert!(!SectionError::TooFewSlices(1).is_degenerate());
    }
}
