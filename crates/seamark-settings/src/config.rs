//! Configuration management for SeaMark
//!
//! Configuration is organized into logical sections:
//! - Map view (initial centre and zoom, search zoom)
//! - Tile layers (base map and overlays)
//! - Storage (backend, directory, key)
//! - Draw toolbar (enabled tools, circle resolution)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use seamark_core::geometry::drawn::DEFAULT_CIRCLE_SEGMENTS;
use seamark_core::{DrawTool, LatLng};
use seamark_map::{MapView, SearchControl, TileLayers, MAX_ZOOM, MIN_ZOOM};
use seamark_store::FileStorage;

use crate::error::{SettingsError, SettingsResult};

/// Fewest segments accepted for circle approximation.
pub const MIN_CIRCLE_SEGMENTS: usize = 8;

/// Initial map view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    pub zoom: u8,
    /// Zoom used when jumping to a search result.
    #[serde(default = "default_search_zoom")]
    pub search_zoom: u8,
    pub center: LatLng,
}

fn default_search_zoom() -> u8 {
    SearchControl::DEFAULT_ZOOM
}

impl MapSettings {
    pub fn view(&self) -> MapView {
        MapView::new(self.center, self.zoom)
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            zoom: MapView::DEFAULT_ZOOM,
            search_zoom: default_search_zoom(),
            center: MapView::DEFAULT_CENTER,
        }
    }
}

/// Where the drawn features are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; lost on exit.
    Memory,
    /// One JSON file per key in a directory.
    #[default]
    File,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::File => write!(f, "file"),
        }
    }
}

/// Storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_storage_key")]
    pub key: String,
    /// Directory for the file backend; the platform data dir when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

fn default_storage_key() -> String {
    "drawnFeatures".to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            key: default_storage_key(),
            dir: None,
        }
    }
}

/// Draw toolbar settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawSettings {
    #[serde(default = "default_true")]
    pub marker: bool,
    #[serde(default = "default_true")]
    pub polyline: bool,
    #[serde(default = "default_true")]
    pub polygon: bool,
    #[serde(default = "default_true")]
    pub rectangle: bool,
    #[serde(default = "default_true")]
    pub circle: bool,
    #[serde(default = "default_circle_segments")]
    pub circle_segments: usize,
}

fn default_true() -> bool {
    true
}

fn default_circle_segments() -> usize {
    DEFAULT_CIRCLE_SEGMENTS
}

impl DrawSettings {
    pub fn is_enabled(&self, tool: DrawTool) -> bool {
        match tool {
            DrawTool::Marker => self.marker,
            DrawTool::Polyline => self.polyline,
            DrawTool::Polygon => self.polygon,
            DrawTool::Rectangle => self.rectangle,
            DrawTool::Circle => self.circle,
        }
    }

    /// Tools offered on the toolbar, in toolbar order.
    pub fn enabled_tools(&self) -> Vec<DrawTool> {
        DrawTool::ALL
            .into_iter()
            .filter(|tool| self.is_enabled(*tool))
            .collect()
    }
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            marker: true,
            polyline: true,
            polygon: true,
            rectangle: true,
            circle: true,
            circle_segments: DEFAULT_CIRCLE_SEGMENTS,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub map: MapSettings,
    #[serde(default)]
    pub tiles: TileLayers,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub draw: DrawSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// `<config dir>/seamark/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("seamark").join("config.toml"))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load from [`default_path`](Self::default_path), falling back to the
    /// defaults when no file exists there yet.
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()
            .ok_or_else(|| SettingsError::ConfigDirectory("no config directory".to_string()))?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            tracing::debug!("No config at {}; using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        for (key, zoom) in [("map.zoom", self.map.zoom), ("map.search_zoom", self.map.search_zoom)] {
            if !(MIN_ZOOM..=MAX_ZOOM).contains(&zoom) {
                return Err(SettingsError::invalid(
                    key,
                    format!("{} is outside {}..={}", zoom, MIN_ZOOM, MAX_ZOOM),
                ));
            }
        }

        if !(-90.0..=90.0).contains(&self.map.center.lat)
            || !(-180.0..=180.0).contains(&self.map.center.lng)
        {
            return Err(SettingsError::invalid(
                "map.center",
                format!("{} is not a valid position", self.map.center),
            ));
        }

        for layer in std::iter::once(&self.tiles.base).chain(self.tiles.overlays.iter()) {
            if !(0.0..=1.0).contains(&layer.opacity) {
                return Err(SettingsError::invalid(
                    "tiles.opacity",
                    format!("'{}' has opacity {}", layer.name, layer.opacity),
                ));
            }
            if layer.url_template.is_empty() {
                return Err(SettingsError::invalid(
                    "tiles.url_template",
                    format!("'{}' has no URL template", layer.name),
                ));
            }
        }

        if self.storage.key.trim().is_empty() {
            return Err(SettingsError::invalid("storage.key", "must not be empty"));
        }

        if self.storage.backend == StorageBackend::File
            && !FileStorage::is_valid_key(&self.storage.key)
        {
            return Err(SettingsError::invalid(
                "storage.key",
                format!(
                    "'{}' is not a file name (use letters, digits, '-', '_' or '.')",
                    self.storage.key
                ),
            ));
        }

        if self.draw.circle_segments < MIN_CIRCLE_SEGMENTS {
            return Err(SettingsError::invalid(
                "draw.circle_segments",
                format!("must be at least {}", MIN_CIRCLE_SEGMENTS),
            ));
        }

        Ok(())
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("").to_string(),
            )),
        }
    }
}
