//! Error handling for lenticular panels
//!
//! Configuration mistakes are caller contract violations and are reported
//! through [`ConfigError`] at construction time. Invalid inputs to the point
//! generators are reported through [`GeometryError`]. [`Error`] wraps both for
//! callers that do not care which layer failed.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Configuration error type
///
/// Raised when a panel or face configuration cannot describe a valid panel.
/// Values are never clamped: construction fails instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Slice count must be at least one
    #[error("Slice count must be at least 1, got {0}")]
    InvalidSliceCount(usize),

    /// A face side length is zero, negative or not finite
    #[error("Side length of face {face} must be positive, got {value}")]
    NonPositiveSideLength {
        /// Index of the offending face.
        face: usize,
        /// The rejected value.
        value: f64,
    },

    /// Interlace angle outside the open interval (0, π)
    #[error("Interlace angle must lie strictly between 0 and π radians, got {0}")]
    InterlaceAngleOutOfRange(f64),

    /// Panel width is zero, negative or not finite
    #[error("Panel width must be positive, got {0}")]
    NonPositiveWidth(f64),

    /// Panel aspect ratio is zero, negative or not finite
    #[error("Aspect ratio must be positive, got {0}")]
    NonPositiveAspectRatio(f64),

    /// Vertical alignment outside [0, 1]
    #[error("Vertical alignment must lie in [0, 1], got {0}")]
    AlignmentOutOfRange(f64),

    /// The panel layout needs a specific number of faces
    #[error("Expected {expected} faces, got {actual}")]
    FaceCount {
        /// Number of faces the layout supports.
        expected: usize,
        /// Number of faces supplied.
        actual: usize,
    },

    /// A colour string could not be parsed
    #[error("Unknown colour: {0}")]
    UnknownColor(String),
}

/// Geometry error type
///
/// Raised by the 2D point generators and polyline transforms when their
/// input cannot produce a meaningful outline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// Not enough sides for the requested polygon
    #[error("A polygon needs at least {min} sides, got {actual}")]
    TooFewSides {
        /// Minimum number of sides for this shape.
        min: usize,
        /// Number of sides requested.
        actual: usize,
    },

    /// No radius values were supplied
    #[error("At least one radius is required")]
    EmptyRadii,

    /// Star dilation outside [-1, 1]
    #[error("Dilation must lie in [-1, 1], got {0}")]
    DilationOutOfRange(f64),

    /// Not enough points for the operation
    #[error("Operation needs at least {min} points, got {actual}")]
    TooFewPoints {
        /// Minimum number of points.
        min: usize,
        /// Number of points supplied.
        actual: usize,
    },

    /// Extrusion depth is zero, negative or not finite
    #[error("Extrusion depth must be positive, got {0}")]
    NonPositiveDepth(f64),

    /// Two lines that were expected to cross are parallel
    #[error("Lines are parallel and do not intersect")]
    ParallelLines,
}

/// Main error type for lenticular operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Geometry error
    #[error("Geometry error: {0}")]
    Geometry(#[from] GeometryError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a generic error from any message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Result type alias using the umbrella error type
pub type Result<T> = std::result::Result<T, Error>;

/// Result type alias for configuration validation
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for geometry operations
pub type GeometryResult<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidSliceCount(0);
        assert_eq!(err.to_string(), "Slice count must be at least 1, got 0");

        let err = ConfigError::NonPositiveSideLength {
            face: 1,
            value: -2.0,
        };
        assert_eq!(
            err.to_string(),
            "Side length of face 1 must be positive, got -2"
        );

        let err = ConfigError::FaceCount {
            expected: 2,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Expected 2 faces, got 3");
    }

    #[test]
    fn test_geometry_error_display() {
        let err = GeometryError::TooFewSides { min: 3, actual: 2 };
        assert_eq!(err.to_string(), "A polygon needs at least 3 sides, got 2");
        assert_eq!(
            GeometryError::EmptyRadii.to_string(),
            "At least one radius is required"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ConfigError::InterlaceAngleOutOfRange(4.0).into();
        assert!(matches!(err, Error::Config(_)));

        let err: Error = GeometryError::ParallelLines.into();
        assert!(matches!(err, Error::Geometry(_)));
        assert_eq!(
            err.to_string(),
            "Geometry error: Lines are parallel and do not intersect"
        );

        let err = Error::other("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
