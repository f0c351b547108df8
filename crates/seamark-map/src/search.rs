//! Location search.
//!
//! A [`Geocoder`] turns a free-text query into hits. Selecting a hit moves
//! the view there and drops a labelled search marker. Search markers sit on
//! the map only; they never join the drawn collection.

use serde::{Deserialize, Serialize};

use seamark_core::LatLng;

use crate::error::{MapError, MapResult};
use crate::view::MapView;

/// A single geocoding result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodeHit {
    pub name: String,
    pub center: LatLng,
}

impl GeocodeHit {
    pub fn new(name: impl Into<String>, center: LatLng) -> Self {
        Self {
            name: name.into(),
            center,
        }
    }
}

/// Resolves place names to coordinates.
pub trait Geocoder: Send + Sync {
    fn search(&self, query: &str) -> Vec<GeocodeHit>;
}

/// Fixed gazetteer matched by case-insensitive substring.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    places: Vec<GeocodeHit>,
}

impl StaticGeocoder {
    pub fn new(places: Vec<GeocodeHit>) -> Self {
        Self { places }
    }

    /// A handful of places around the harbour.
    pub fn norfolk_coast() -> Self {
        Self::new(vec![
            GeocodeHit::new("Blakeney", LatLng::new(52.9553, 1.0238)),
            GeocodeHit::new("Blakeney Point", LatLng::new(52.9779, 0.9697)),
            GeocodeHit::new("Morston", LatLng::new(52.9530, 0.9836)),
            GeocodeHit::new("Cley next the Sea", LatLng::new(52.9526, 1.0446)),
            GeocodeHit::new("Wells-next-the-Sea", LatLng::new(52.9541, 0.8518)),
        ])
    }
}

impl Geocoder for StaticGeocoder {
    fn search(&self, query: &str) -> Vec<GeocodeHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.places
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}

/// Marker left on the map by a selected search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMarker {
    pub label: String,
    pub position: LatLng,
}

/// Search box state: last results and the markers they produced.
pub struct SearchControl {
    geocoder: Box<dyn Geocoder>,
    results: Vec<GeocodeHit>,
    markers: Vec<SearchMarker>,
    zoom: u8,
}

impl SearchControl {
    pub const DEFAULT_ZOOM: u8 = 14;

    pub fn new(geocoder: Box<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            results: Vec::new(),
            markers: Vec::new(),
            zoom: Self::DEFAULT_ZOOM,
        }
    }

    /// Zoom level used when jumping to a selected result.
    pub fn with_zoom(mut self, zoom: u8) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn query(&mut self, text: &str) -> &[GeocodeHit] {
        self.results = self.geocoder.search(text);
        tracing::debug!("Search '{}' returned {} result(s)", text, self.results.len());
        &self.results
    }

    /// Jump to result `index` of the last query and mark it.
    pub fn select(&mut self, index: usize, view: &mut MapView) -> MapResult<SearchMarker> {
        let hit = self
            .results
            .get(index)
            .ok_or(MapError::NoSuchResult {
                index,
                available: self.results.len(),
            })?
            .clone();

        view.set_view(hit.center, self.zoom);
        tracing::info!("Search result selected: {}", hit.name);
        let marker = SearchMarker {
            label: hit.name,
            position: hit.center,
        };
        self.markers.push(marker.clone());
        Ok(marker)
    }

    pub fn results(&self) -> &[GeocodeHit] {
        &self.results
    }

    pub fn markers(&self) -> &[SearchMarker] {
        &self.markers
    }
}

impl std::fmt::Debug for SearchControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchControl")
            .field("results", &self.results)
            .field("markers", &self.markers)
            .field("zoom", &self.zoom)
            .finish_non_exhaustive()
    }
}

impl Default for SearchControl {
    fn default() -> Self {
        Self::new(Box::new(StaticGeocoder::norfolk_coast()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_geocoder_matches_substring() {
        let geocoder = StaticGeocoder::norfolk_coast();
        let names: Vec<String> = geocoder
            .search("blakeney")
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["Blakeney", "Blakeney Point"]);
        assert!(geocoder.search("   ").is_empty());
        assert!(geocoder.search("Atlantis").is_empty());
    }

    #[test]
    fn test_select_moves_view_and_adds_marker() {
        let mut control = SearchControl::default();
        let mut view = MapView::default();

        assert_eq!(control.query("morston").len(), 1);
        let marker = control.select(0, &mut view).unwrap();

        assert_eq!(marker.label, "Morston");
        assert_eq!(view.center(), marker.position);
        assert_eq!(view.zoom(), SearchControl::DEFAULT_ZOOM);
        assert_eq!(control.markers(), &[marker]);
    }

    #[test]
    fn test_select_out_of_range() {
        let mut control = SearchControl::default();
        let mut view = MapView::default();
        control.query("cley");

        assert_eq!(
            control.select(3, &mut view).unwrap_err(),
            MapError::NoSuchResult {
                index: 3,
                available: 1
            }
        );
        assert_eq!(view, MapView::default());
        assert!(control.markers().is_empty());
    }
}
