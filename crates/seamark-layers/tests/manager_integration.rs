//! Layer collection manager integration tests

use proptest::prelude::*;
use seamark_core::geometry::drawn::DEFAULT_CIRCLE_SEGMENTS;
use seamark_core::{decode, encode, DrawnShape, Geometry, LatLng};
use seamark_layers::{CollectionState, DrawControl, LayerCollectionManager};
use seamark_store::{FeatureCollection, FeatureStore, MemoryStorage};

fn harbour_polygon() -> DrawnShape {
    DrawnShape::Polygon {
        points: vec![
            LatLng::new(52.958, 1.018),
            LatLng::new(52.964, 1.018),
            LatLng::new(52.964, 1.030),
            LatLng::new(52.958, 1.030),
        ],
    }
}

fn reopen(manager: LayerCollectionManager<MemoryStorage>) -> LayerCollectionManager<MemoryStorage> {
    let storage = manager.into_store().into_storage();
    LayerCollectionManager::open(FeatureStore::new(storage))
}

#[test]
fn test_create_then_reload() {
    let control = DrawControl::default();
    let mut manager = LayerCollectionManager::open(FeatureStore::new(MemoryStorage::new()));
    assert_eq!(manager.state(), CollectionState::Populated);

    let polygon = control.complete(&harbour_polygon()).unwrap();
    manager.create(polygon.clone()).unwrap();

    let reloaded = reopen(manager);
    let layers: Vec<_> = reloaded.layers().iter().collect();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].shape().geometry(), &polygon);
    assert!(layers[0].shape().is_named_region());
}

#[test]
fn test_delete_then_save() {
    let control = DrawControl::default();
    let mut manager = LayerCollectionManager::open(FeatureStore::new(MemoryStorage::new()));

    let marker = Geometry::Point(LatLng::new(52.961, 1.024));
    let line = Geometry::LineString(vec![LatLng::new(52.95, 1.0), LatLng::new(52.96, 1.01)]);
    let polygon = control.complete(&harbour_polygon()).unwrap();

    manager.create(marker.clone()).unwrap();
    let doomed = manager.create(line).unwrap();
    manager.create(polygon.clone()).unwrap();
    assert_eq!(manager.store().load().len(), 3);

    let removed = manager.remove_layers(&control, &[doomed]).unwrap();
    assert_eq!(removed, vec![doomed]);

    let saved = manager.store().load();
    assert_eq!(saved.len(), 2);
    let geometries: Vec<Geometry> = saved
        .named_region
        .iter()
        .chain(saved.others.iter())
        .map(|r| decode(r).unwrap())
        .collect();
    assert_eq!(geometries, vec![marker, polygon]);
}

#[test]
fn test_others_stay_generic_after_new_drawings() {
    let seeded = FeatureCollection {
        named_region: vec![],
        others: vec![encode(&Geometry::Point(LatLng::new(52.97, 1.05)))],
    };
    let mut store = FeatureStore::new(MemoryStorage::new());
    store.save(&seeded).unwrap();

    let mut manager = LayerCollectionManager::open(store);
    let circle = DrawnShape::Circle {
        center: LatLng::new(52.961, 1.024),
        radius_m: 150.0,
    };
    manager
        .create(circle.to_geometry(DEFAULT_CIRCLE_SEGMENTS))
        .unwrap();

    let reloaded = reopen(manager);
    let snapshot = reloaded.snapshot();
    assert_eq!(snapshot.others, seeded.others);
    assert_eq!(snapshot.named_region.len(), 1);
    assert_eq!(snapshot.named_region[0].kind(), Some("Polygon"));
}

#[test]
fn test_corrupt_storage_is_replaced_on_next_save() {
    let storage = MemoryStorage::with_entry("drawnFeatures", "not valid json");
    let mut manager = LayerCollectionManager::open(FeatureStore::new(storage));
    assert!(manager.layers().is_empty());

    manager
        .create(Geometry::Point(LatLng::new(52.961, 1.024)))
        .unwrap();
    assert!(manager.store().try_load().unwrap().is_some());
}

#[derive(Debug, Clone)]
enum Step {
    Draw(f64, f64),
    Delete(usize),
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => (50.0f64..55.0, 0.0f64..2.0).prop_map(|(lat, lng)| Step::Draw(lat, lng)),
        1 => (0usize..16).prop_map(Step::Delete),
    ]
}

proptest! {
    #[test]
    fn saved_buckets_partition_the_live_collection(
        seed_others in 0usize..4,
        steps in prop::collection::vec(step(), 1..24),
    ) {
        let control = DrawControl::default();
        let mut store = FeatureStore::new(MemoryStorage::new());
        let others = (0..seed_others)
            .map(|i| encode(&Geometry::Point(LatLng::new(i as f64, 0.0))))
            .collect();
        store.save(&FeatureCollection { named_region: vec![], others }).unwrap();
        let mut manager = LayerCollectionManager::open(store);

        for step in steps {
            match step {
                Step::Draw(lat, lng) => {
                    manager.create(Geometry::Point(LatLng::new(lat, lng))).unwrap();
                }
                Step::Delete(index) => {
                    let ids = manager.layers().ids();
                    let doomed: Vec<_> = ids.get(index % ids.len().max(1)).copied().into_iter().collect();
                    manager.remove_layers(&control, &doomed).unwrap();
                }
            }

            let saved = manager.store().load();
            prop_assert_eq!(saved.len(), manager.layers().len());

            let mut expected_named = Vec::new();
            let mut expected_others = Vec::new();
            for layer in manager.layers().iter() {
                let record = encode(layer.shape().geometry());
                if layer.shape().is_named_region() {
                    expected_named.push(record);
                } else {
                    expected_others.push(record);
                }
            }
            prop_assert_eq!(&saved.named_region, &expected_named);
            prop_assert_eq!(&saved.others, &expected_others);
        }
    }
}
