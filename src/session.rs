//! Interactive map session.
//!
//! A [`Session`] wires the draw toolbar, the layer collection manager and the
//! map surface together and applies [`AppEvent`]s to them in order. Once an
//! event has been applied it is published on the session's [`EventBus`];
//! observers such as the [`journal`](crate::journal) never change session state.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info, warn};

use seamark_core::{AppEvent, DrawEvent, EventBus, LayerId, MapEvent, SearchEvent};
use seamark_layers::{DrawControl, DrawError, LayerCollectionManager};
use seamark_map::{CoordinatesReadout, MapError, MapView, SearchControl, SearchMarker, TileLayers};
use seamark_settings::{Config, SettingsError, StorageBackend};
use seamark_store::{
    FeatureCollection, FeatureStore, FileStorage, KeyValueStorage, MemoryStorage, StorageError,
};

/// Storage behind a session, chosen at runtime.
pub type DynStorage = Box<dyn KeyValueStorage>;

/// Errors raised while applying an event.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// What applying an event changed.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    /// A drawn shape became this layer.
    Created(LayerId),
    /// The delete tool removed these layers.
    Deleted(Vec<LayerId>),
    /// Map display state changed; nothing was persisted.
    Display,
}

/// One open map with its drawn features.
pub struct Session {
    manager: LayerCollectionManager<DynStorage>,
    draw: DrawControl,
    view: MapView,
    tiles: TileLayers,
    readout: CoordinatesReadout,
    search: SearchControl,
    bus: EventBus,
}

impl Session {
    /// Open the storage named by `config` and load its features.
    pub fn from_config(config: &Config) -> SessionResult<Self> {
        config.validate()?;
        let storage: DynStorage = match config.storage.backend {
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
            StorageBackend::File => Box::new(match &config.storage.dir {
                Some(dir) => FileStorage::new(dir.clone()),
                None => FileStorage::in_data_dir()?,
            }),
        };
        info!(
            "Opening {} storage under key '{}'",
            config.storage.backend, config.storage.key
        );
        Ok(Self::with_storage(storage, config))
    }

    /// Session over caller-supplied storage, configured otherwise from `config`.
    pub fn with_storage(storage: DynStorage, config: &Config) -> Self {
        let store = FeatureStore::with_key(storage, config.storage.key.clone());
        Self {
            manager: LayerCollectionManager::open(store),
            draw: DrawControl::new(config.draw.enabled_tools(), config.draw.circle_segments),
            view: config.map.view(),
            tiles: config.tiles.clone(),
            readout: CoordinatesReadout::new(),
            search: SearchControl::default().with_zoom(config.map.search_zoom),
            bus: EventBus::new(),
        }
    }

    /// Replace the location search box.
    pub fn with_search(mut self, search: SearchControl) -> Self {
        self.search = search;
        self
    }

    /// Apply one event, then publish it to bus observers.
    ///
    /// Events that fail are logged and not published.
    pub fn dispatch(&mut self, event: AppEvent) -> SessionResult<Applied> {
        debug!("Dispatching {}", event.description());
        let applied = match &event {
            AppEvent::Draw(draw) => self.apply_draw(draw),
            AppEvent::Map(map) => self.apply_map(map),
            AppEvent::Search(search) => self.apply_search(search),
        }
        .inspect_err(|e| warn!("{} failed: {}", event.description(), e))?;

        self.bus.publish(&event);
        Ok(applied)
    }

    fn apply_draw(&mut self, event: &DrawEvent) -> SessionResult<Applied> {
        match event {
            DrawEvent::Created { shape } => {
                let geometry = self.draw.complete(shape)?;
                let id = self.manager.create(geometry)?;
                Ok(Applied::Created(id))
            }
            DrawEvent::Deleted { layers } => {
                let removed = self.manager.remove_layers(&self.draw, layers)?;
                Ok(Applied::Deleted(removed))
            }
        }
    }

    fn apply_map(&mut self, event: &MapEvent) -> SessionResult<Applied> {
        match event {
            MapEvent::MouseMove { position } => self.readout.on_mouse_move(*position),
            MapEvent::SetView { center, zoom } => self.view.set_view(*center, *zoom),
            MapEvent::ToggleOverlay { name } => {
                self.tiles.toggle_overlay(name)?;
            }
        }
        Ok(Applied::Display)
    }

    fn apply_search(&mut self, event: &SearchEvent) -> SessionResult<Applied> {
        match event {
            SearchEvent::Query { text } => {
                let hits = self.search.query(text).len();
                info!("{} result(s) for '{}'", hits, text);
            }
            SearchEvent::Select { index } => {
                self.search.select(*index, &mut self.view)?;
            }
        }
        Ok(Applied::Display)
    }

    /// The persisted form of the current collection.
    pub fn features(&self) -> FeatureCollection {
        self.manager.snapshot()
    }

    pub fn manager(&self) -> &LayerCollectionManager<DynStorage> {
        &self.manager
    }

    pub fn draw_control(&self) -> &DrawControl {
        &self.draw
    }

    pub fn view(&self) -> &MapView {
        &self.view
    }

    pub fn tiles(&self) -> &TileLayers {
        &self.tiles
    }

    pub fn readout(&self) -> &CoordinatesReadout {
        &self.readout
    }

    pub fn search_markers(&self) -> &[SearchMarker] {
        self.search.markers()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }
}

/// Where file-backed storage for `config` would live, if it is file-backed.
pub fn storage_dir(config: &Config) -> Option<PathBuf> {
    match config.storage.backend {
        StorageBackend::Memory => None,
        StorageBackend::File => config.storage.dir.clone().or_else(FileStorage::default_dir),
    }
}
