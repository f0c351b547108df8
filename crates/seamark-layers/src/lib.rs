//! # SeaMark Layers
//!
//! The live collection of drawn shapes and the manager that keeps it in
//! sync with storage.
//!
//! ## Architecture
//!
//! ```text
//! LayerCollectionManager
//!   ├── LayerCollection (live shapes, draw order)
//!   └── FeatureStore (storage slot "drawnFeatures")
//!
//! DrawControl (toolbar: enabled tools, circle resolution, delete tool)
//! ```
//!
//! Every mutation re-derives the full bucketed snapshot from the collection
//! and writes it back; nothing is patched incrementally.

pub mod collection;
pub mod draw_control;
pub mod manager;

pub use collection::{FeatureGroup, Layer, LayerCollection};
pub use draw_control::{DrawControl, DrawError};
pub use manager::{derive_snapshot, CollectionState, InitReport, LayerCollectionManager};
