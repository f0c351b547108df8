//! Shapes as completed by the draw toolbar.
//!
//! Each toolbar tool yields a [`DrawnShape`], which is realized into a
//! [`Geometry`] before it enters the live collection. Circles have no GeoJSON
//! counterpart and are stored as a polygon tracing the geodesic circle.

use serde::{Deserialize, Serialize};

use super::{Geometry, LatLng};

/// Earth radius used for circle approximation, in metres.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Default number of vertices used to approximate a circle.
pub const DEFAULT_CIRCLE_SEGMENTS: usize = 64;

/// Draw toolbar tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawTool {
    Marker,
    Polyline,
    Polygon,
    Rectangle,
    Circle,
}

impl DrawTool {
    pub const ALL: [DrawTool; 5] = [
        DrawTool::Marker,
        DrawTool::Polyline,
        DrawTool::Polygon,
        DrawTool::Rectangle,
        DrawTool::Circle,
    ];
}

impl std::fmt::Display for DrawTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawTool::Marker => write!(f, "marker"),
            DrawTool::Polyline => write!(f, "polyline"),
            DrawTool::Polygon => write!(f, "polygon"),
            DrawTool::Rectangle => write!(f, "rectangle"),
            DrawTool::Circle => write!(f, "circle"),
        }
    }
}

/// A shape as emitted by the toolbar when drawing completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "lowercase")]
pub enum DrawnShape {
    Marker { at: LatLng },
    Polyline { points: Vec<LatLng> },
    Polygon { points: Vec<LatLng> },
    Rectangle { south_west: LatLng, north_east: LatLng },
    Circle { center: LatLng, radius_m: f64 },
}

impl DrawnShape {
    pub fn tool(&self) -> DrawTool {
        match self {
            DrawnShape::Marker { .. } => DrawTool::Marker,
            DrawnShape::Polyline { .. } => DrawTool::Polyline,
            DrawnShape::Polygon { .. } => DrawTool::Polygon,
            DrawnShape::Rectangle { .. } => DrawTool::Rectangle,
            DrawnShape::Circle { .. } => DrawTool::Circle,
        }
    }

    /// True when every coordinate (and a circle's radius) is a finite number.
    pub fn is_finite(&self) -> bool {
        match self {
            DrawnShape::Marker { at } => at.is_finite(),
            DrawnShape::Polyline { points } | DrawnShape::Polygon { points } => {
                points.iter().all(LatLng::is_finite)
            }
            DrawnShape::Rectangle {
                south_west,
                north_east,
            } => south_west.is_finite() && north_east.is_finite(),
            DrawnShape::Circle { center, radius_m } => center.is_finite() && radius_m.is_finite(),
        }
    }

    /// Realize the shape as a GeoJSON-compatible geometry.
    pub fn to_geometry(&self, circle_segments: usize) -> Geometry {
        match self {
            DrawnShape::Marker { at } => Geometry::Point(*at),
            DrawnShape::Polyline { points } => Geometry::LineString(points.clone()),
            DrawnShape::Polygon { points } => Geometry::Polygon(vec![closed_ring(points)]),
            DrawnShape::Rectangle {
                south_west,
                north_east,
            } => Geometry::Polygon(vec![rectangle_ring(*south_west, *north_east)]),
            DrawnShape::Circle { center, radius_m } => {
                Geometry::Polygon(vec![circle_ring(*center, *radius_m, circle_segments)])
            }
        }
    }
}

/// Close a ring by repeating its first vertex, unless it already is closed.
pub fn closed_ring(points: &[LatLng]) -> Vec<LatLng> {
    let mut ring = points.to_vec();
    if let (Some(first), Some(last)) = (points.first(), points.last()) {
        if points.len() > 1 && first != last {
            ring.push(*first);
        }
    }
    ring
}

fn rectangle_ring(sw: LatLng, ne: LatLng) -> Vec<LatLng> {
    let nw = LatLng::new(ne.lat, sw.lng);
    let se = LatLng::new(sw.lat, ne.lng);
    vec![sw, nw, ne, se, sw]
}

/// Closed ring of `segments` vertices on the geodesic circle around `center`.
pub fn circle_ring(center: LatLng, radius_m: f64, segments: usize) -> Vec<LatLng> {
    let segments = segments.max(3);
    let lat1 = center.lat.to_radians();
    let lng1 = center.lng.to_radians();
    let delta = radius_m / EARTH_RADIUS_M;

    let mut ring: Vec<LatLng> = (0..segments)
        .map(|i| {
            let bearing = 2.0 * std::f64::consts::PI * (i as f64) / (segments as f64);
            let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
            let lng2 = lng1
                + (bearing.sin() * delta.sin() * lat1.cos())
                    .atan2(delta.cos() - lat1.sin() * lat2.sin());
            LatLng::new(lat2.to_degrees(), lng2.to_degrees())
        })
        .collect();
    ring.push(ring[0]);
    ring
}

/// Great-circle distance between two positions, in metres.
pub fn haversine_m(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_and_polyline() {
        let at = LatLng::new(52.961, 1.024);
        assert_eq!(
            DrawnShape::Marker { at }.to_geometry(DEFAULT_CIRCLE_SEGMENTS),
            Geometry::Point(at)
        );

        let points = vec![at, LatLng::new(52.97, 1.03)];
        let line = DrawnShape::Polyline {
            points: points.clone(),
        };
        assert_eq!(line.tool(), DrawTool::Polyline);
        assert_eq!(
            line.to_geometry(DEFAULT_CIRCLE_SEGMENTS),
            Geometry::LineString(points)
        );
    }

    #[test]
    fn test_polygon_ring_is_closed_once() {
        let open = vec![
            LatLng::new(0.0, 0.0),
            LatLng::new(0.0, 1.0),
            LatLng::new(1.0, 1.0),
        ];
        let ring = closed_ring(&open);
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());

        assert_eq!(closed_ring(&ring), ring);
    }

    #[test]
    fn test_rectangle_corners() {
        let shape = DrawnShape::Rectangle {
            south_west: LatLng::new(52.95, 1.0),
            north_east: LatLng::new(52.97, 1.05),
        };
        let Geometry::Polygon(rings) = shape.to_geometry(DEFAULT_CIRCLE_SEGMENTS) else {
            panic!("rectangle should realize as a polygon");
        };
        assert_eq!(rings.len(), 1);
        assert_eq!(
            rings[0],
            vec![
                LatLng::new(52.95, 1.0),
                LatLng::new(52.97, 1.0),
                LatLng::new(52.97, 1.05),
                LatLng::new(52.95, 1.05),
                LatLng::new(52.95, 1.0),
            ]
        );
    }

    #[test]
    fn test_circle_vertices_lie_on_radius() {
        let center = LatLng::new(52.961, 1.024);
        let ring = circle_ring(center, 250.0, 64);
        assert_eq!(ring.len(), 65);
        assert_eq!(ring.first(), ring.last());
        for vertex in &ring {
            let d = haversine_m(center, *vertex);
            assert!((d - 250.0).abs() < 0.01, "vertex at {d} m");
        }
    }

    #[test]
    fn test_drawn_shape_json_shape() {
        let json = r#"{"tool":"circle","center":{"lat":52.9,"lng":1.0},"radius_m":100.0}"#;
        let shape: DrawnShape = serde_json::from_str(json).unwrap();
        assert_eq!(shape.tool(), DrawTool::Circle);
    }
}
