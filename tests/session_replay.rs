//! End-to-end session tests over file-backed storage

use seamark::{
    decode, AppEvent, Applied, Config, EventCategory, Geometry, Interest, Journal, Session,
    StorageBackend,
};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> Config {
    let mut config = Config::new();
    config.storage.backend = StorageBackend::File;
    config.storage.dir = Some(dir.path().to_path_buf());
    config
}

fn event(line: &str) -> AppEvent {
    serde_json::from_str(line).unwrap()
}

const SCRIPT: &[&str] = &[
    r#"{"map":{"mouse_move":{"position":{"lat":52.9612,"lng":1.0241}}}}"#,
    r#"{"draw":{"created":{"shape":{"tool":"marker","at":{"lat":52.961,"lng":1.024}}}}}"#,
    r#"{"draw":{"created":{"shape":{"tool":"rectangle","south_west":{"lat":52.95,"lng":1.0},"north_east":{"lat":52.96,"lng":1.02}}}}}"#,
    r#"{"draw":{"created":{"shape":{"tool":"circle","center":{"lat":52.97,"lng":1.03},"radius_m":250.0}}}}"#,
    r#"{"search":{"query":{"text":"blakeney point"}}}"#,
    r#"{"search":{"select":{"index":0}}}"#,
];

#[test]
fn test_replay_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let mut session = Session::from_config(&config).unwrap();
    for line in SCRIPT {
        session.dispatch(event(line)).unwrap();
    }
    assert_eq!(session.readout().text(), "Lat: 52.96120, Lng: 1.02410");
    assert_eq!(session.search_markers().len(), 1);
    assert_eq!(session.view().zoom(), 14);
    assert!(dir.path().join("drawnFeatures.json").exists());
    drop(session);

    let reopened = Session::from_config(&config).unwrap();
    let features = reopened.features();
    assert_eq!(features.named_region.len(), 3);
    assert!(features.others.is_empty());

    let kinds: Vec<&str> = features
        .named_region
        .iter()
        .map(|r| r.kind().unwrap())
        .collect();
    assert_eq!(kinds, vec!["Point", "Polygon", "Polygon"]);

    let Geometry::Polygon(rings) = decode(&features.named_region[2]).unwrap() else {
        panic!("circle should persist as a polygon");
    };
    assert_eq!(rings[0].len(), 65);

    // Search markers and view state are not persisted.
    assert!(reopened.search_markers().is_empty());
    assert_eq!(reopened.view().zoom(), 13);
}

#[test]
fn test_delete_is_persisted() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let mut session = Session::from_config(&config).unwrap();
    let mut created = Vec::new();
    for line in &SCRIPT[1..4] {
        if let Applied::Created(id) = session.dispatch(event(line)).unwrap() {
            created.push(id);
        }
    }
    assert_eq!(created.len(), 3);

    let delete = format!(r#"{{"draw":{{"deleted":{{"layers":[{}]}}}}}}"#, created[1].0);
    session.dispatch(event(&delete)).unwrap();
    drop(session);

    let reopened = Session::from_config(&config).unwrap();
    let features = reopened.features();
    let kinds: Vec<&str> = features
        .named_region
        .iter()
        .map(|r| r.kind().unwrap())
        .collect();
    assert_eq!(kinds, vec!["Point", "Polygon"]);
}

#[test]
fn test_legacy_bucket_name_is_read() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("drawnFeatures.json"),
        r#"{"blakeney":[{"type":"Point","coordinates":[1.024,52.961]}],"others":[{"type":"Point","coordinates":[1.1,52.9]}]}"#,
    )
    .unwrap();

    let session = Session::from_config(&file_config(&dir)).unwrap();
    let features = session.features();
    assert_eq!(features.named_region.len(), 1);
    assert_eq!(features.others.len(), 1);
}

fn memory_config() -> Config {
    let mut config = Config::new();
    config.storage.backend = StorageBackend::Memory;
    config
}

#[test]
fn test_bus_observes_applied_events() {
    let mut session = Session::from_config(&memory_config()).unwrap();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    session
        .bus()
        .observe(Interest::Only(vec![EventCategory::Draw]), move |e| {
            sink.lock().unwrap().push(e.description());
        });

    for line in SCRIPT {
        session.dispatch(event(line)).unwrap();
    }
    assert!(session
        .dispatch(event(r#"{"search":{"select":{"index":9}}}"#))
        .is_err());

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            "Draw created: marker",
            "Draw created: rectangle",
            "Draw created: circle"
        ]
    );
}

#[test]
fn test_journal_replays_into_same_features() {
    let dir = TempDir::new().unwrap();
    let journal = Journal::open(dir.path().join("events.jsonl")).unwrap();

    let mut original = Session::from_config(&memory_config()).unwrap();
    journal.attach(original.bus(), Interest::Everything);
    for line in SCRIPT {
        original.dispatch(event(line)).unwrap();
    }
    assert!(original
        .dispatch(event(r#"{"map":{"toggle_overlay":{"name":"Satellite"}}}"#))
        .is_err());
    original
        .dispatch(event(r#"{"draw":{"deleted":{"layers":[2]}}}"#))
        .unwrap();

    let recorded = std::fs::read_to_string(journal.path()).unwrap();
    assert_eq!(recorded.lines().count(), SCRIPT.len() + 1);
    assert!(!recorded.contains("Satellite"));

    let mut replayed = Session::from_config(&memory_config()).unwrap();
    for line in recorded.lines() {
        replayed.dispatch(event(line)).unwrap();
    }
    assert_eq!(replayed.features(), original.features());
    assert_eq!(replayed.features().named_region.len(), 2);
    assert_eq!(replayed.view(), original.view());
}
