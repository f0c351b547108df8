//! Bucket classification for persisted shapes.
//!
//! Every shape drawn during a session lands in the named-region bucket
//! (historically the "Blakeney" drawings), whatever its location. Only shapes
//! restored from the `others` bucket stay generic, and nothing is ever
//! reclassified. No spatial test against a region boundary is involved.

use serde::{Deserialize, Serialize};

use crate::geometry::Shape;

/// One of the two persisted buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Bucket {
    NamedRegion,
    Others,
}

impl Bucket {
    /// Bucket assigned to a shape completed with the draw toolbar.
    pub fn for_drawn_shape() -> Self {
        Bucket::NamedRegion
    }

    pub fn is_named_region(self) -> bool {
        matches!(self, Bucket::NamedRegion)
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bucket::NamedRegion => write!(f, "namedRegion"),
            Bucket::Others => write!(f, "others"),
        }
    }
}

/// Bucket a shape serializes into. Depends on the tag alone.
pub fn bucket(shape: &Shape) -> Bucket {
    if shape.is_named_region() {
        Bucket::NamedRegion
    } else {
        Bucket::Others
    }
}
