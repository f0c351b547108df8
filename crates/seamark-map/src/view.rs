//! Map view state (centre and zoom).

use seamark_core::LatLng;

/// Lowest zoom level served by the tile layers.
pub const MIN_ZOOM: u8 = 0;
/// Highest zoom level served by the tile layers.
pub const MAX_ZOOM: u8 = 19;

/// Where the map is looking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
}

impl MapView {
    /// Blakeney Harbour.
    pub const DEFAULT_CENTER: LatLng = LatLng {
        lat: 52.961,
        lng: 1.024,
    };
    pub const DEFAULT_ZOOM: u8 = 13;

    /// Creates a view; the zoom is clamped to the tile range.
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Recentres the map, clamping the zoom to the tile range.
    pub fn set_view(&mut self, center: LatLng, zoom: u8) {
        *self = Self::new(center, zoom);
        tracing::debug!("View set to {} @ z{}", self.center, self.zoom);
    }
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CENTER, Self::DEFAULT_ZOOM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_blakeney_harbour() {
        let view = MapView::default();
        assert_eq!(view.center(), LatLng::new(52.961, 1.024));
        assert_eq!(view.zoom(), 13);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut view = MapView::new(LatLng::new(0.0, 0.0), 40);
        assert_eq!(view.zoom(), MAX_ZOOM);

        view.set_view(LatLng::new(1.0, 2.0), u8::MAX);
        assert_eq!(view.zoom(), MAX_ZOOM);
        assert_eq!(view.center(), LatLng::new(1.0, 2.0));

        view.set_view(LatLng::new(1.0, 2.0), MIN_ZOOM);
        assert_eq!(view.zoom(), MIN_ZOOM);
    }
}
