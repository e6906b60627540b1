//! Map overlay of analysis results
//!
//! Every feature becomes a styled path colored by its overall risk. High
//! and low risk features with a computable centroid also get a marker whose
//! size follows the zoom level. The overlay serializes to a GeoJSON
//! FeatureCollection carrying simplestyle properties, so any viewer that
//! understands `stroke`/`fill`/`marker-color` can draw it.

use crate::core::geometry::{bounds_of, centroid, Bounds, LatLng};
use crate::core::style::{compliance_color, style_for, RiskStyle};
use crate::domain::properties::NOT_AVAILABLE;
use crate::domain::{Feature, ResolvedProperties, RiskLevel};
use serde::Serialize;
use serde_json::{json, Map, Value};

/// Outline width of every path
pub const PATH_WEIGHT: u32 = 2;

pub const DEFAULT_FILL_OPACITY: f64 = 0.7;

pub const DEFAULT_ZOOM: u8 = 8;

/// Initial view centered on Kalimantan
pub const DEFAULT_CENTER: [f64; 2] = [-1.0, 114.0];

/// Marker diameter in pixels for a zoom level
///
/// # Examples
///
/// ```
/// use whisp::core::render::map::marker_size;
///
/// assert_eq!(marker_size(8), 16);
/// assert_eq!(marker_size(18), 32);
/// ```
pub fn marker_size(zoom: u8) -> u32 {
    match zoom {
        15.. => 32,
        12..=14 => 26,
        10..=11 => 20,
        8..=9 => 16,
        6..=7 => 12,
        _ => 8,
    }
}

/// Whether a risk level gets a centroid marker
pub fn has_marker(risk: RiskLevel) -> bool {
    matches!(risk, RiskLevel::High | RiskLevel::Low)
}

/// Viewer settings for building an overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub zoom: u8,
    pub fill_opacity: f64,
    pub center: [f64; 2],
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            fill_opacity: DEFAULT_FILL_OPACITY,
            center: DEFAULT_CENTER,
        }
    }
}

/// Path styling of a feature outline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: u32,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
}

impl PathStyle {
    pub fn for_risk(risk: RiskLevel, fill_opacity: f64) -> Self {
        let color = style_for(risk).color;
        Self {
            color,
            weight: PATH_WEIGHT,
            opacity: (fill_opacity + 0.3).min(1.0),
            fill_color: color,
            fill_opacity,
        }
    }
}

/// Centroid marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub size: u32,
    pub style: RiskStyle,
}

/// One feature ready for drawing
#[derive(Debug, Clone)]
pub struct StyledFeature {
    pub properties: ResolvedProperties,
    pub geometry: Option<Value>,
    pub path: PathStyle,
    pub marker: Option<Marker>,
}

impl StyledFeature {
    pub fn new(feature: &Feature, index: usize, options: &MapOptions) -> Self {
        let properties = ResolvedProperties::resolve(feature, index);
        let risk = properties.overall_risk;

        let marker = if has_marker(risk) {
            centroid(feature).map(|position| Marker {
                position,
                size: marker_size(options.zoom),
                style: style_for(risk),
            })
        } else {
            None
        };

        Self {
            path: PathStyle::for_risk(risk, options.fill_opacity),
            geometry: feature.geometry().cloned(),
            marker,
            properties,
        }
    }

    /// Popup content as ordered key/value pairs
    pub fn popup(&self) -> Value {
        let props = &self.properties;
        let compliance = props
            .compliance_label
            .clone()
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());

        json!({
            "title": format!("Plot {}", props.plot_id),
            "country": props.country_display(),
            "area_ha": props.area_display(),
            "overall_risk": props.overall_risk.as_str(),
            "risk_color": self.path.color,
            "compliance_status": compliance,
            "compliance_color": compliance_color(props.compliance_status),
            "gfw_loss": props.gfw_loss_stat,
            "jrc_loss": props.jrc_loss_stat,
            "sbtn_loss": props.sbtn_loss_stat,
            "high_risk_datasets": props.high_risk_display(),
        })
    }
}

/// All drawable content of the map view
#[derive(Debug, Clone)]
pub struct MapOverlay {
    pub title: String,
    pub features: Vec<StyledFeature>,
    pub bounds: Option<Bounds>,
    pub options: MapOptions,
}

impl MapOverlay {
    pub fn build(features: &[Feature], options: MapOptions) -> Self {
        let styled: Vec<StyledFeature> = features
            .iter()
            .enumerate()
            .map(|(index, feature)| StyledFeature::new(feature, index, &options))
            .collect();

        let overlay = Self {
            title: format!("EUDR Map Viewer ({} features)", features.len()),
            bounds: bounds_of(features),
            features: styled,
            options,
        };

        tracing::debug!(
            features = overlay.features.len(),
            markers = overlay.marker_count(),
            has_bounds = overlay.bounds.is_some(),
            "Built map overlay"
        );
        overlay
    }

    pub fn marker_count(&self) -> usize {
        self.features.iter().filter(|f| f.marker.is_some()).count()
    }

    /// Map center: middle of the bounds, or the configured default
    pub fn center(&self) -> [f64; 2] {
        match self.bounds {
            Some(b) => [(b.south + b.north) / 2.0, (b.west + b.east) / 2.0],
            None => self.options.center,
        }
    }

    /// GeoJSON FeatureCollection with simplestyle properties
    ///
    /// Paths come first in input order, followed by one Point feature per
    /// marker. Marker points use GeoJSON `[lng, lat]` order.
    pub fn to_geojson(&self) -> Value {
        let mut features: Vec<Value> = self.features.iter().map(path_feature).collect();
        features.extend(self.features.iter().filter_map(marker_feature));

        let mut collection = Map::new();
        collection.insert("type".into(), json!("FeatureCollection"));
        collection.insert("title".into(), json!(self.title));
        collection.insert("center".into(), json!(self.center()));
        collection.insert("zoom".into(), json!(self.options.zoom));
        if let Some(bounds) = self.bounds {
            collection.insert("bbox".into(), json!(bounds.to_bbox()));
        }
        collection.insert("features".into(), Value::Array(features));
        Value::Object(collection)
    }
}

fn path_feature(styled: &StyledFeature) -> Value {
    let path = &styled.path;
    json!({
        "type": "Feature",
        "geometry": styled.geometry,
        "properties": {
            "title": format!("Plot {}", styled.properties.plot_id),
            "overall_risk": styled.properties.overall_risk.as_str(),
            "compliance_status": styled.properties.compliance_status.as_str(),
            "stroke": path.color,
            "stroke-width": path.weight,
            "stroke-opacity": path.opacity,
            "fill": path.fill_color,
            "fill-opacity": path.fill_opacity,
            "popup": styled.popup(),
        }
    })
}

fn marker_feature(styled: &StyledFeature) -> Option<Value> {
    let marker = styled.marker?;
    Some(json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [marker.position.lng, marker.position.lat]
        },
        "properties": {
            "title": format!("Plot {}", styled.properties.plot_id),
            "marker-color": marker.style.color,
            "marker-symbol": marker.style.icon,
            "marker-size-px": marker.size,
            "centroid": marker.position.to_array(),
        }
    }))
}
