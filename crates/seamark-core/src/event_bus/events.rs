//! Event type definitions for the event bus.
//!
//! This module defines all application events organized by category.
//! Events are cloneable and serializable so a session can be replayed from
//! a JSON-lines log.

use serde::{Deserialize, Serialize};

use crate::geometry::{DrawnShape, LatLng, LayerId};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppEvent {
    /// Draw toolbar events
    Draw(DrawEvent),
    /// Map pointer and view events
    Map(MapEvent),
    /// Location search events
    Search(SearchEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Draw(_) => EventCategory::Draw,
            AppEvent::Map(_) => EventCategory::Map,
            AppEvent::Search(_) => EventCategory::Search,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Draw(e) => e.description(),
            AppEvent::Map(e) => e.description(),
            AppEvent::Search(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Draw toolbar events.
    Draw,
    /// Map pointer and view events.
    Map,
    /// Location search events.
    Search,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Draw => write!(f, "Draw"),
            EventCategory::Map => write!(f, "Map"),
            EventCategory::Search => write!(f, "Search"),
        }
    }
}

/// Draw toolbar events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawEvent {
    /// A shape was completed with one of the draw tools
    Created {
        /// The completed shape.
        shape: DrawnShape,
    },
    /// The delete tool removed layers from the feature group
    Deleted {
        /// Layers the toolbar removed before emitting the event.
        #[serde(default)]
        layers: Vec<LayerId>,
    },
}

impl DrawEvent {
    fn description(&self) -> String {
        match self {
            DrawEvent::Created { shape } => format!("Draw created: {}", shape.tool()),
            DrawEvent::Deleted { layers } => format!("Draw deleted: {} layer(s)", layers.len()),
        }
    }
}

/// Map pointer and view events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapEvent {
    /// Pointer moved over the map
    MouseMove {
        /// Position under the pointer.
        position: LatLng,
    },
    /// View recentred
    SetView {
        /// New map centre.
        center: LatLng,
        /// New zoom level.
        zoom: u8,
    },
    /// Overlay toggled from the layer control
    ToggleOverlay {
        /// Overlay display name.
        name: String,
    },
}

impl MapEvent {
    fn description(&self) -> String {
        match self {
            MapEvent::MouseMove { position } => format!("Mouse move: {}", position),
            MapEvent::SetView { center, zoom } => format!("Set view: {} @ z{}", center, zoom),
            MapEvent::ToggleOverlay { name } => format!("Toggle overlay: {}", name),
        }
    }
}

/// Location search events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchEvent {
    /// Search text submitted
    Query {
        /// Free-text query.
        text: String,
    },
    /// A result of the last query was picked
    Select {
        /// Index into the last result list.
        index: usize,
    },
}

impl SearchEvent {
    fn description(&self) -> String {
        match self {
            SearchEvent::Query { text } => format!("Search: {}", text),
            SearchEvent::Select { index } => format!("Search select: #{}", index),
        }
    }
}
