//! Bounding boxes for fitting the map view to a result set

use super::collect_positions;
use crate::domain::Feature;
use serde::Serialize;

/// Axis-aligned bounds in `[lat, lng]` terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Bounds {
    /// `[[south, west], [north, east]]`, the corner form map viewers expect
    pub fn corners(&self) -> [[f64; 2]; 2] {
        [[self.south, self.west], [self.north, self.east]]
    }

    /// GeoJSON `bbox` order: `[west, south, east, north]`
    pub fn to_bbox(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }
}

/// Bounds covering every geometry position of the given features
///
/// Features without geometry are skipped; `None` when nothing remains.
pub fn bounds_of(features: &[Feature]) -> Option<Bounds> {
    let mut positions = Vec::new();
    for geometry in features.iter().filter_map(Feature::geometry) {
        collect_positions(geometry, &mut positions);
    }

    let mut iter = positions.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite());
    let (x0, y0) = iter.next()?;
    let init = Bounds {
        south: y0,
        west: x0,
        north: y0,
        east: x0,
    };

    Some(iter.fold(init, |b, (x, y)| Bounds {
        south: b.south.min(y),
        west: b.west.min(x),
        north: b.north.max(y),
        east: b.east.max(x),
    }))
}
