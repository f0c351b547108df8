//! Error types for the map crate.

use thiserror::Error;

/// Errors raised by map display operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// No overlay with this name is registered.
    #[error("Unknown overlay: {0}")]
    UnknownOverlay(String),

    /// A search result index outside the last result list.
    #[error("No search result #{index} (last search returned {available})")]
    NoSuchResult { index: usize, available: usize },
}

/// Result type alias for map operations.
pub type MapResult<T> = Result<T, MapError>;
