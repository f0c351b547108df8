//! Tile layers: the base map and toggleable overlays.

use serde::{Deserialize, Serialize};

use crate::error::{MapError, MapResult};

/// A slippy-map tile source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    /// Display name, also used by the layer control.
    pub name: String,
    /// URL template with `{s}`, `{z}`, `{x}` and `{y}` placeholders.
    pub url_template: String,
    pub attribution: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl TileLayer {
    pub fn new(
        name: impl Into<String>,
        url_template: impl Into<String>,
        attribution: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url_template: url_template.into(),
            attribution: attribution.into(),
            opacity: default_opacity(),
            visible: default_visible(),
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn open_street_map() -> Self {
        Self::new(
            "OpenStreetMap",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "© OpenStreetMap contributors",
        )
    }

    pub fn open_sea_map() -> Self {
        Self::new(
            "OpenSeaMap Overlay",
            "https://tiles.openseamap.org/seamark/{z}/{x}/{y}.png",
            "© OpenSeaMap contributors",
        )
        .with_opacity(0.7)
    }

    /// Expand the URL template for one tile.
    pub fn tile_url(&self, z: u8, x: u32, y: u32, subdomain: char) -> String {
        self.url_template
            .replace("{s}", &subdomain.to_string())
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

/// Base layer plus overlays, as offered by the layer control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayers {
    pub base: TileLayer,
    #[serde(default)]
    pub overlays: Vec<TileLayer>,
}

impl TileLayers {
    pub fn new(base: TileLayer, overlays: Vec<TileLayer>) -> Self {
        Self { base, overlays }
    }

    pub fn overlay(&self, name: &str) -> Option<&TileLayer> {
        self.overlays.iter().find(|o| o.name == name)
    }

    /// Flip an overlay's visibility and return the new state.
    pub fn toggle_overlay(&mut self, name: &str) -> MapResult<bool> {
        let overlay = self
            .overlays
            .iter_mut()
            .find(|o| o.name == name)
            .ok_or_else(|| MapError::UnknownOverlay(name.to_string()))?;
        overlay.visible = !overlay.visible;
        tracing::info!("Overlay '{}' visible: {}", overlay.name, overlay.visible);
        Ok(overlay.visible)
    }

    /// Layers drawn in order: base first, then visible overlays.
    pub fn visible_layers(&self) -> impl Iterator<Item = &TileLayer> {
        std::iter::once(&self.base).chain(self.overlays.iter().filter(|o| o.visible))
    }

    /// Attribution line for the visible layers.
    pub fn attribution(&self) -> String {
        self.visible_layers()
            .map(|l| l.attribution.as_str())
            .filter(|a| !a.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

impl Default for TileLayers {
    fn default() -> Self {
        Self::new(TileLayer::open_street_map(), vec![TileLayer::open_sea_map()])
    }
}
