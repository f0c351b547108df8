//! # SeaMark Store
//!
//! Durable string-keyed storage and the drawn feature collection persisted
//! in it.

pub mod error;
pub mod feature_store;
pub mod storage;

pub use error::{StorageError, StorageResult};
pub use feature_store::{FeatureCollection, FeatureStore, DRAWN_FEATURES_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
