//! Error handling for SeaMark
//!
//! Provides the error types shared by every layer of the application:
//! - Geometry errors (GeoJSON decoding)
//! - The unified [`Error`] used in public APIs
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Every variant is a flavour of malformed geometry: raised by the codec
/// while decoding a single record. Callers recover by skipping the record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// The record carries no `type` discriminator
    #[error("Malformed geometry: missing type discriminator")]
    MissingType,

    /// The discriminator names a kind the codec does not know
    #[error("Malformed geometry: unrecognized type '{kind}'")]
    UnknownType {
        /// The unrecognized discriminator.
        kind: String,
    },

    /// A `Feature` wrapper without a geometry member
    #[error("Malformed geometry: feature has no geometry")]
    MissingGeometry,

    /// The `coordinates` member is absent
    #[error("Malformed geometry: {kind} has no coordinates")]
    MissingCoordinates {
        /// The geometry kind being decoded.
        kind: String,
    },

    /// The `coordinates` member has the wrong shape or element types
    #[error("Malformed geometry: invalid {kind} coordinates: {reason}")]
    InvalidCoordinates {
        /// The geometry kind being decoded.
        kind: String,
        /// What was wrong with the coordinate array.
        reason: String,
    },
}

impl GeometryError {
    /// Create an invalid-coordinates error
    pub fn invalid(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        GeometryError::InvalidCoordinates {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}

/// Main error type for SeaMark
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Geometry error
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a geometry error
    pub fn is_geometry_error(&self) -> bool {
        matches!(self, Error::Geometry(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
