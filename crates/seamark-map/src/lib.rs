//! # SeaMark Map
//!
//! Display-side state of the chart: where the map is looking, which tile
//! layers are shown, the pointer coordinate readout and location search.
//! None of it is persisted with the drawn features.

pub mod error;
pub mod readout;
pub mod search;
pub mod tiles;
pub mod view;

pub use error::{MapError, MapResult};
pub use readout::CoordinatesReadout;
pub use search::{GeocodeHit, Geocoder, SearchControl, SearchMarker, StaticGeocoder};
pub use tiles::{TileLayer, TileLayers};
pub use view::{MapView, MAX_ZOOM, MIN_ZOOM};
