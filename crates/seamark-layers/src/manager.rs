//! Layer collection manager.
//!
//! Owns the live collection and its feature store. The only mutators are
//! [`LayerCollectionManager::init`], [`LayerCollectionManager::create`] and
//! [`LayerCollectionManager::remove_layers`] (the delete tool, followed by
//! [`LayerCollectionManager::on_deleted`]). Each mutation ends by re-deriving
//! the full bucketed snapshot from the collection and saving it, so the
//! stored value always matches the collection as of the last handled event.

use tracing::{debug, error, info, warn};

use seamark_core::{bucket, decode, Bucket, Geometry, GeometryRecord, LayerId, Shape};
use seamark_store::{FeatureCollection, FeatureStore, KeyValueStorage, StorageResult};

use crate::collection::{FeatureGroup, LayerCollection};
use crate::draw_control::DrawControl;

/// Lifecycle of the live collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionState {
    /// Nothing loaded yet.
    Empty,
    /// Loaded from storage; accepts create and delete.
    Populated,
}

/// Outcome of loading the stored collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitReport {
    /// Layers restored from the named-region bucket.
    pub named_region: usize,
    /// Layers restored from the others bucket.
    pub others: usize,
    /// Records that failed to decode and were dropped.
    pub skipped: usize,
}

impl InitReport {
    pub fn restored(&self) -> usize {
        self.named_region + self.others
    }
}

/// Build the persisted snapshot from a feature group's current membership.
pub fn derive_snapshot(group: &dyn FeatureGroup) -> FeatureCollection {
    let mut features = FeatureCollection::new();
    group.for_each_layer(&mut |layer| {
        let record = group.to_portable_geometry(layer);
        match bucket(layer.shape()) {
            Bucket::NamedRegion => features.named_region.push(record),
            Bucket::Others => features.others.push(record),
        }
    });
    features
}

/// Keeps the live collection and the storage slot in step.
#[derive(Debug)]
pub struct LayerCollectionManager<S> {
    store: FeatureStore<S>,
    layers: LayerCollection,
    state: CollectionState,
}

impl<S: KeyValueStorage> LayerCollectionManager<S> {
    /// Manager in the `Empty` state. Call [`init`](Self::init) before use.
    pub fn new(store: FeatureStore<S>) -> Self {
        Self {
            store,
            layers: LayerCollection::new(),
            state: CollectionState::Empty,
        }
    }

    /// Construct and initialize in one step.
    pub fn open(store: FeatureStore<S>) -> Self {
        let mut manager = Self::new(store);
        manager.init();
        manager
    }

    pub fn state(&self) -> CollectionState {
        self.state
    }

    /// Load the stored collection into the live collection.
    ///
    /// Runs once; later calls are ignored and return an empty report.
    pub fn init(&mut self) -> InitReport {
        if self.state == CollectionState::Populated {
            warn!("Layer collection already initialized");
            return InitReport::default();
        }

        let features = self.store.load();
        let mut report = InitReport::default();

        for record in &features.named_region {
            if self.restore(record, Bucket::NamedRegion) {
                report.named_region += 1;
            } else {
                report.skipped += 1;
            }
        }
        for record in &features.others {
            if self.restore(record, Bucket::Others) {
                report.others += 1;
            } else {
                report.skipped += 1;
            }
        }

        self.state = CollectionState::Populated;
        info!(
            named_region = report.named_region,
            others = report.others,
            skipped = report.skipped,
            "Layer collection initialized"
        );
        report
    }

    fn restore(&mut self, record: &GeometryRecord, bucket: Bucket) -> bool {
        match decode(record) {
            Ok(geometry) => {
                let id = self.layers.insert(Shape::restored(geometry, bucket));
                debug!("Added {} layer from storage: {}", bucket, id);
                true
            }
            Err(e) => {
                warn!("Skipping stored {} record: {}", bucket, e);
                false
            }
        }
    }

    fn ensure_populated(&mut self) {
        if self.state == CollectionState::Empty {
            warn!("Layer collection used before init; loading now");
            self.init();
        }
    }

    /// Add a newly drawn shape and persist the collection.
    ///
    /// The layer stays in the collection even if the save fails; the next
    /// successful save includes it.
    pub fn create(&mut self, geometry: Geometry) -> StorageResult<LayerId> {
        self.ensure_populated();

        let id = self.layers.insert(Shape::drawn(geometry));
        debug!("Created {}", id);
        self.persist("Saving features to storage")?;
        Ok(id)
    }

    /// Delete tool: `control` removes `ids` from the collection, then the
    /// remainder is persisted. Returns the ids actually removed.
    pub fn remove_layers(
        &mut self,
        control: &DrawControl,
        ids: &[LayerId],
    ) -> StorageResult<Vec<LayerId>> {
        self.ensure_populated();
        let removed = control.delete_layers(&mut self.layers, ids);
        self.on_deleted()?;
        Ok(removed)
    }

    /// Persist the collection after the toolbar has removed layers from it.
    ///
    /// Re-derives from whatever the collection holds now, so repeated or
    /// spurious delete events converge on the same stored value.
    pub fn on_deleted(&mut self) -> StorageResult<()> {
        self.ensure_populated();
        self.persist("Updating features after deletion")
    }

    fn persist(&mut self, what: &str) -> StorageResult<()> {
        let features = derive_snapshot(&self.layers);
        info!(
            named_region = features.named_region.len(),
            others = features.others.len(),
            "{}",
            what
        );
        self.store.save(&features).inspect_err(|e| {
            error!("Failed to save features: {}", e);
        })
    }

    /// Snapshot of the collection as it would be persisted now.
    pub fn snapshot(&self) -> FeatureCollection {
        derive_snapshot(&self.layers)
    }

    pub fn layers(&self) -> &LayerCollection {
        &self.layers
    }

    pub fn store(&self) -> &FeatureStore<S> {
        &self.store
    }

    pub fn into_store(self) -> FeatureStore<S> {
        self.store
    }
}
