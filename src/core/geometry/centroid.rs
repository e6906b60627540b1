//! Polygon centroid by the shoelace formula
//!
//! For consecutive vertices `(x_i, y_i)`, `(x_j, y_j)` with `j = (i + 1) mod n`:
//!
//! ```text
//! A  = 1/2 * Σ (x_i*y_j - x_j*y_i)
//! Cx = 1/(6A) * Σ (x_i + x_j)(x_i*y_j - x_j*y_i)
//! Cy = 1/(6A) * Σ (y_i + y_j)(x_i*y_j - x_j*y_i)
//! ```
//!
//! Only the outer ring is used; holes are ignored. A multipolygon is reduced
//! to its member whose outer ring has the largest unsigned area.

use super::{PolygonGeometry, Ring};
use crate::domain::Feature;
use serde::Serialize;

/// Areas below this are treated as degenerate
const MIN_AREA: f64 = 1e-12;

/// A map position in `[latitude, longitude]` order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// `[lat, lng]` array form used by the map
    pub fn to_array(self) -> [f64; 2] {
        [self.lat, self.lng]
    }
}

/// Signed area of a ring (positive for counter-clockwise)
pub fn ring_area(ring: &[(f64, f64)]) -> f64 {
    let n = ring.len();
    if n < 3 {
        return 0.0;
    }
    let twice_area: f64 = (0..n)
        .map(|i| {
            let (xi, yi) = ring[i];
            let (xj, yj) = ring[(i + 1) % n];
            xi * yj - xj * yi
        })
        .sum();
    twice_area / 2.0
}

/// Centroid of a polygon's outer ring
///
/// Returns `None` for rings with fewer than three positions or a
/// (near-)zero area.
pub fn polygon_centroid(rings: &[Ring]) -> Option<LatLng> {
    let outer = rings.first()?;
    let n = outer.len();
    if n < 3 {
        return None;
    }

    let area = ring_area(outer);
    if !area.is_finite() || area.abs() < MIN_AREA {
        return None;
    }

    let (mut cx, mut cy) = (0.0, 0.0);
    for i in 0..n {
        let (xi, yi) = outer[i];
        let (xj, yj) = outer[(i + 1) % n];
        let cross = xi * yj - xj * yi;
        cx += (xi + xj) * cross;
        cy += (yi + yj) * cross;
    }

    let factor = 1.0 / (6.0 * area);
    let (cx, cy) = (cx * factor, cy * factor);
    if !cx.is_finite() || !cy.is_finite() {
        return None;
    }

    Some(LatLng { lat: cy, lng: cx })
}

/// Centroid of decoded polygonal geometry
pub fn geometry_centroid(geometry: &PolygonGeometry) -> Option<LatLng> {
    match geometry {
        PolygonGeometry::Polygon(rings) => polygon_centroid(rings),
        PolygonGeometry::MultiPolygon(polygons) => {
            let largest = polygons
                .iter()
                .filter_map(|rings| rings.first().map(|outer| (rings, ring_area(outer).abs())))
                .max_by(|a, b| a.1.total_cmp(&b.1))?;
            polygon_centroid(largest.0)
        }
    }
}

/// Centroid of a feature's geometry as `[lat, lng]`
///
/// `None` when the geometry is absent, malformed, degenerate, or not a
/// Polygon/MultiPolygon.
///
/// # Examples
///
/// ```
/// use whisp::core::geometry::centroid;
/// use whisp::domain::Feature;
/// use serde_json::json;
///
/// let feature = Feature::new(json!({"geometry": {
///     "type": "Polygon",
///     "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 1], [0, 0]]]
/// }}));
/// let c = centroid(&feature).unwrap();
/// assert_eq!(c.to_array(), [0.5, 0.5]);
/// ```
pub fn centroid(feature: &Feature) -> Option<LatLng> {
    let geometry = PolygonGeometry::from_geojson(feature.geometry()?)?;
    geometry_centroid(&geometry)
}
