//! Pointer coordinate readout.

use seamark_core::LatLng;

/// Text shown under the map while the pointer is elsewhere.
pub const IDLE_TEXT: &str = "Move the mouse over the map";

/// Latitude/longitude readout that follows the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinatesReadout {
    text: String,
    last: Option<LatLng>,
}

impl CoordinatesReadout {
    pub fn new() -> Self {
        Self {
            text: IDLE_TEXT.to_string(),
            last: None,
        }
    }

    pub fn on_mouse_move(&mut self, position: LatLng) {
        self.text = format!("Lat: {:.5}, Lng: {:.5}", position.lat, position.lng);
        self.last = Some(position);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn last_position(&self) -> Option<LatLng> {
        self.last
    }
}

impl Default for CoordinatesReadout {
    fn default() -> Self {
        Self::new()
    }
}
