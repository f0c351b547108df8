//! # SeaMark
//!
//! Draw annotations over a nautical chart and keep them across sessions.
//!
//! ## Architecture
//!
//! SeaMark is organized as a workspace with multiple crates:
//!
//! 1. **seamark-core** - Geometry model, GeoJSON codec, bucket classification, events
//! 2. **seamark-store** - Key-value storage backends and the bucketed feature store
//! 3. **seamark-layers** - Live layer collection, draw toolbar, collection manager
//! 4. **seamark-map** - Map view, tile layers, coordinate readout, location search
//! 5. **seamark-settings** - JSON/TOML configuration
//! 6. **seamark** - Session wiring, the event journal and the replay binary
//!
//! Every create or delete re-derives the whole feature collection from the
//! live layers and writes it under one storage key, so a reload always shows
//! what was on the map after the last handled event.

pub mod journal;
pub mod session;

pub use seamark_core::{
    bucket, decode, encode, AppEvent, Bucket, DrawEvent, DrawTool, DrawnShape, Error, EventBus,
    EventCategory, Geometry, GeometryError, GeometryKind, GeometryRecord, Interest, LatLng,
    LayerId, MapEvent, ObserverId, Result, SearchEvent, Shape,
};
pub use seamark_layers::{
    CollectionState, DrawControl, DrawError, FeatureGroup, InitReport, Layer, LayerCollection,
    LayerCollectionManager,
};
pub use seamark_map::{
    CoordinatesReadout, GeocodeHit, Geocoder, MapView, SearchControl, StaticGeocoder, TileLayer,
    TileLayers,
};
pub use seamark_settings::{Config, SettingsError, StorageBackend};
pub use seamark_store::{
    FeatureCollection, FeatureStore, FileStorage, KeyValueStorage, MemoryStorage, StorageError,
    DRAWN_FEATURES_KEY,
};
pub use journal::Journal;
pub use session::{Applied, Session, SessionError, SessionResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with tracing
///
/// Sets up structured logging with:
/// - Console output with pretty formatting on stderr
/// - RUST_LOG environment variable support
///
/// Stdout is left to the binary's own output.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
