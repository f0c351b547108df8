//! GeoJSON codec for shape geometry.
//!
//! Records are kept as raw JSON values so that one bad record can be
//! rejected on its own without invalidating the collection around it.
//! Encoding always produces a `Feature` with empty properties; decoding
//! accepts either a `Feature` or a bare geometry object.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::{Geometry, GeometryKind, LatLng};
use crate::error::GeometryError;

/// Portable GeoJSON representation of a geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeometryRecord(Value);

impl GeometryRecord {
    /// Wrap an arbitrary JSON value. Nothing is validated until [`decode`].
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The geometry discriminator, looking through a `Feature` wrapper.
    pub fn kind(&self) -> Option<&str> {
        let kind = self.0.get("type")?.as_str()?;
        if kind == "Feature" {
            self.0.get("geometry")?.get("type")?.as_str()
        } else {
            Some(kind)
        }
    }
}

/// Encode a geometry as a GeoJSON `Feature`.
///
/// Coordinates must be finite: JSON has no NaN or infinity, so such a value
/// is written as `null` and the record will not decode.
pub fn encode(geometry: &Geometry) -> GeometryRecord {
    let coordinates = match geometry {
        Geometry::Point(p) => position(p),
        Geometry::MultiPoint(points) | Geometry::LineString(points) => positions(points),
        Geometry::MultiLineString(parts) | Geometry::Polygon(parts) => {
            Value::Array(parts.iter().map(|part| positions(part)).collect())
        }
        Geometry::MultiPolygon(polygons) => Value::Array(
            polygons
                .iter()
                .map(|rings| Value::Array(rings.iter().map(|ring| positions(ring)).collect()))
                .collect(),
        ),
    };

    GeometryRecord(json!({
        "type": "Feature",
        "properties": Value::Object(Map::new()),
        "geometry": {
            "type": geometry.kind().as_str(),
            "coordinates": coordinates,
        },
    }))
}

/// Decode a GeoJSON geometry or `Feature` into a [`Geometry`].
pub fn decode(record: &GeometryRecord) -> Result<Geometry, GeometryError> {
    let mut value = record.as_value();
    let mut discriminator = type_of(value)?;

    if discriminator == "Feature" {
        value = value
            .get("geometry")
            .filter(|g| !g.is_null())
            .ok_or(GeometryError::MissingGeometry)?;
        discriminator = type_of(value)?;
    }

    let kind = GeometryKind::from_discriminator(discriminator).ok_or_else(|| {
        GeometryError::UnknownType {
            kind: discriminator.to_string(),
        }
    })?;

    let coordinates =
        value
            .get("coordinates")
            .ok_or_else(|| GeometryError::MissingCoordinates {
                kind: kind.to_string(),
            })?;

    let geometry = match kind {
        GeometryKind::Point => Geometry::Point(read_position(kind, coordinates)?),
        GeometryKind::MultiPoint => Geometry::MultiPoint(read_positions(kind, coordinates)?),
        GeometryKind::LineString => Geometry::LineString(read_positions(kind, coordinates)?),
        GeometryKind::MultiLineString => {
            Geometry::MultiLineString(read_parts(kind, coordinates)?)
        }
        GeometryKind::Polygon => Geometry::Polygon(read_parts(kind, coordinates)?),
        GeometryKind::MultiPolygon => {
            let polygons = as_array(kind, coordinates, "polygons")?;
            Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(|rings| read_parts(kind, rings))
                    .collect::<Result<_, _>>()?,
            )
        }
    };

    Ok(geometry)
}

fn type_of(value: &Value) -> Result<&str, GeometryError> {
    value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(GeometryError::MissingType)
}

// GeoJSON orders positions longitude first.
fn position(p: &LatLng) -> Value {
    json!([p.lng, p.lat])
}

fn positions(points: &[LatLng]) -> Value {
    Value::Array(points.iter().map(position).collect())
}

fn as_array<'a>(
    kind: GeometryKind,
    value: &'a Value,
    what: &str,
) -> Result<&'a Vec<Value>, GeometryError> {
    value
        .as_array()
        .ok_or_else(|| GeometryError::invalid(kind.as_str(), format!("expected an array of {what}")))
}

fn read_position(kind: GeometryKind, value: &Value) -> Result<LatLng, GeometryError> {
    let items = as_array(kind, value, "numbers")?;
    if items.len() < 2 {
        return Err(GeometryError::invalid(
            kind.as_str(),
            format!("position has {} element(s), expected at least 2", items.len()),
        ));
    }
    // A third element (altitude) is allowed and ignored.
    let number = |v: &Value| {
        v.as_f64()
            .ok_or_else(|| GeometryError::invalid(kind.as_str(), "position element is not a number"))
    };
    Ok(LatLng::new(number(&items[1])?, number(&items[0])?))
}

fn read_positions(kind: GeometryKind, value: &Value) -> Result<Vec<LatLng>, GeometryError> {
    as_array(kind, value, "positions")?
        .iter()
        .map(|p| read_position(kind, p))
        .collect()
}

fn read_parts(kind: GeometryKind, value: &Value) -> Result<Vec<Vec<LatLng>>, GeometryError> {
    as_array(kind, value, "position lists")?
        .iter()
        .map(|part| read_positions(kind, part))
        .collect()
}
