//! GeoJSON export
//!
//! Produces a pretty-printed FeatureCollection. Each feature keeps its
//! geometry verbatim (or a `[0, 0]` point when it has none) and carries
//! exactly four properties: `ProducerName`, `ProducerCountry`,
//! `ProductionPlace` and `Area`.

use super::ExportOptions;
use crate::domain::country::to_iso2;
use crate::domain::{extract_features, AnalysisPayload, Feature, ResolvedProperties, Result};
use serde::Serialize;
use serde_json::{json, Number, Value};

#[derive(Debug, Serialize)]
struct ExportCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    features: Vec<ExportFeature>,
}

#[derive(Debug, Serialize)]
struct ExportFeature {
    #[serde(rename = "type")]
    kind: &'static str,
    properties: ExportProperties,
    geometry: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ExportProperties {
    producer_name: String,
    producer_country: String,
    production_place: String,
    area: Number,
}

/// Export a payload as a GeoJSON FeatureCollection
pub fn export_geojson(payload: &AnalysisPayload, options: &ExportOptions) -> Result<String> {
    let features: Vec<ExportFeature> = extract_features(payload)
        .iter()
        .enumerate()
        .map(|(index, feature)| export_feature(feature, index, options))
        .collect();

    let collection = ExportCollection {
        kind: "FeatureCollection",
        features,
    };

    tracing::debug!(
        features = collection.features.len(),
        "Built GeoJSON export"
    );
    Ok(serde_json::to_string_pretty(&collection)?)
}

fn export_feature(feature: &Feature, index: usize, options: &ExportOptions) -> ExportFeature {
    let props = ResolvedProperties::resolve(feature, index);

    ExportFeature {
        kind: "Feature",
        properties: ExportProperties {
            producer_name: options.producer_name.clone(),
            producer_country: to_iso2(props.country_or_unknown()),
            production_place: props.plot_id.production_place(),
            area: props.area_export(),
        },
        geometry: feature
            .geometry()
            .cloned()
            .unwrap_or_else(|| json!({"type": "Point", "coordinates": [0, 0]})),
    }
}
