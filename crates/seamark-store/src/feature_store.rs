//! Persistence for the bucketed feature collection.
//!
//! The whole collection lives under a single storage key as
//! `{"namedRegion": [...], "others": [...]}`, where each entry is a GeoJSON
//! record. Loading never fails: a missing slot, a backend read error, or a
//! value that does not parse all yield the empty collection, and the next
//! save overwrites whatever was there.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use seamark_core::GeometryRecord;

use crate::error::{StorageError, StorageResult};
use crate::storage::KeyValueStorage;

/// Storage key holding the drawn features.
pub const DRAWN_FEATURES_KEY: &str = "drawnFeatures";

/// Persisted snapshot of the live collection, split by bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureCollection {
    /// Records of named-region shapes. Older data names this field `blakeney`.
    #[serde(alias = "blakeney")]
    pub named_region: Vec<GeometryRecord>,
    /// Records of generic shapes.
    pub others: Vec<GeometryRecord>,
}

impl FeatureCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across both buckets.
    pub fn len(&self) -> usize {
        self.named_region.len() + self.others.len()
    }

    pub fn is_empty(&self) -> bool {
        self.named_region.is_empty() && self.others.is_empty()
    }
}

/// Reads and writes the feature collection through a storage backend.
#[derive(Debug, Clone)]
pub struct FeatureStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> FeatureStore<S> {
    /// Store using the default `drawnFeatures` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DRAWN_FEATURES_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Strict load: `Ok(None)` for an empty slot, `Err(Corrupt)` for a value
    /// that does not parse.
    pub fn try_load(&self) -> StorageResult<Option<FeatureCollection>> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| StorageError::Corrupt {
                key: self.key.clone(),
                reason: e.to_string(),
            })
    }

    /// Load the collection, falling back to empty on any failure.
    pub fn load(&self) -> FeatureCollection {
        match self.try_load() {
            Ok(Some(features)) => {
                info!(
                    named_region = features.named_region.len(),
                    others = features.others.len(),
                    "Loaded features from storage"
                );
                features
            }
            Ok(None) => {
                debug!("No saved features under '{}'", self.key);
                FeatureCollection::default()
            }
            Err(e @ StorageError::Corrupt { .. }) => {
                error!("Error parsing saved features: {}", e);
                FeatureCollection::default()
            }
            Err(e) => {
                warn!("Failed to read saved features: {}", e);
                FeatureCollection::default()
            }
        }
    }

    /// Overwrite the slot with the full collection.
    pub fn save(&mut self, features: &FeatureCollection) -> StorageResult<()> {
        let json = serde_json::to_string(features)?;
        self.storage.set(&self.key, &json)?;
        debug!(
            named_region = features.named_region.len(),
            others = features.others.len(),
            "Saved features to storage"
        );
        Ok(())
    }

    /// Clear the slot.
    pub fn clear(&mut self) -> StorageResult<bool> {
        self.storage.remove(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde_json::json;

    fn point_record() -> GeometryRecord {
        GeometryRecord::from_value(json!({
            "type": "Feature",
            "properties": {},
            "geometry": { "type": "Point", "coordinates": [1.024, 52.961] }
        }))
    }

    #[test]
    fn test_missing_key_loads_empty() {
        let store = FeatureStore::new(MemoryStorage::new());
        assert_eq!(store.try_load().unwrap(), None);
        assert_eq!(store.load(), FeatureCollection::default());
    }

    #[test]
    fn test_corrupt_value_loads_empty() {
        let store = FeatureStore::new(MemoryStorage::with_entry(
            DRAWN_FEATURES_KEY,
            "not valid json",
        ));
        assert!(store.try_load().unwrap_err().is_corrupt());

        let features = store.load();
        assert!(features.named_region.is_empty());
        assert!(features.others.is_empty());
    }

    #[test]
    fn test_wrong_record_shape_is_corrupt() {
        for raw in ["null", "[]", r#"{"namedRegion": []}"#, r#"{"others": 3}"#] {
            let store = FeatureStore::new(MemoryStorage::with_entry(DRAWN_FEATURES_KEY, raw));
            assert!(store.try_load().unwrap_err().is_corrupt(), "{raw}");
            assert!(store.load().is_empty());
        }
    }

    #[test]
    fn test_save_then_load() {
        let mut store = FeatureStore::new(MemoryStorage::new());
        let features = FeatureCollection {
            named_region: vec![point_record()],
            others: vec![point_record(), point_record()],
        };

        store.save(&features).unwrap();
        assert_eq!(store.load(), features);
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn test_wire_field_names() {
        let mut store = FeatureStore::new(MemoryStorage::new());
        store.save(&FeatureCollection::new()).unwrap();
        let raw = store.storage().get(DRAWN_FEATURES_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"namedRegion":[],"others":[]}"#);
    }

    #[test]
    fn test_legacy_blakeney_field_is_accepted() {
        let raw = json!({ "blakeney": [point_record()], "others": [] }).to_string();
        let store = FeatureStore::new(MemoryStorage::with_entry(DRAWN_FEATURES_KEY, raw));
        let features = store.load();
        assert_eq!(features.named_region.len(), 1);
        assert!(features.others.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut store = FeatureStore::with_key(MemoryStorage::new(), "custom");
        store.save(&FeatureCollection::new()).unwrap();
        assert!(store.storage().get("custom").unwrap().is_some());
        assert!(store.clear().unwrap());
        assert!(store.load().is_empty());
    }
}
