//! Planar geometry over GeoJSON polygon coordinates
//!
//! Positions are GeoJSON `[x = longitude, y = latitude]` pairs. Results meant
//! for the map are returned as `[latitude, longitude]`.

pub mod bounds;
pub mod centroid;

pub use bounds::{bounds_of, Bounds};
pub use centroid::{centroid, polygon_centroid, ring_area, LatLng};

use serde_json::Value;

/// A linear ring as `(x, y)` positions
pub type Ring = Vec<(f64, f64)>;

/// Polygonal geometry decoded from GeoJSON
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonGeometry {
    /// Rings of a single polygon; the first is the outer ring
    Polygon(Vec<Ring>),
    /// One ring list per member polygon
    MultiPolygon(Vec<Vec<Ring>>),
}

impl PolygonGeometry {
    /// Decode a GeoJSON geometry object
    ///
    /// Returns `None` for any other geometry type or malformed coordinates.
    pub fn from_geojson(geometry: &Value) -> Option<Self> {
        let coordinates = geometry.get("coordinates")?;
        match geometry.get("type")?.as_str()? {
            "Polygon" => parse_rings(coordinates).map(Self::Polygon),
            "MultiPolygon" => coordinates
                .as_array()?
                .iter()
                .map(parse_rings)
                .collect::<Option<Vec<_>>>()
                .map(Self::MultiPolygon),
            _ => None,
        }
    }
}

fn parse_rings(value: &Value) -> Option<Vec<Ring>> {
    value.as_array()?.iter().map(parse_ring).collect()
}

fn parse_ring(value: &Value) -> Option<Ring> {
    value.as_array()?.iter().map(parse_position).collect()
}

// Extra ordinates (altitude) are ignored.
fn parse_position(value: &Value) -> Option<(f64, f64)> {
    let position = value.as_array()?;
    let x = position.first()?.as_f64()?;
    let y = position.get(1)?.as_f64()?;
    Some((x, y))
}

/// Every position of a GeoJSON geometry, whatever its type
///
/// Used for bounding boxes; unknown structures contribute nothing.
pub(crate) fn collect_positions(geometry: &Value, out: &mut Vec<(f64, f64)>) {
    if let Some(coordinates) = geometry.get("coordinates") {
        walk_coordinates(coordinates, out);
    }
    if let Some(members) = geometry.get("geometries").and_then(Value::as_array) {
        for member in members {
            collect_positions(member, out);
        }
    }
}

fn walk_coordinates(value: &Value, out: &mut Vec<(f64, f64)>) {
    if let Some(position) = parse_position(value) {
        out.push(position);
    } else if let Some(items) = value.as_array() {
        for item in items {
            walk_coordinates(item, out);
        }
    }
}
