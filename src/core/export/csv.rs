//! CSV export
//!
//! Columns: `ProducerName,ProducerCountry,ProductionPlace,ComplianceStatus,Area,Geometry`.
//! The geometry column is always quoted with inner quotes doubled, so commas
//! inside the geometry JSON never split the row. Other fields are quoted only
//! when they need it.

use super::ExportOptions;
use crate::domain::country::to_iso2;
use crate::domain::{extract_features, AnalysisPayload, Feature, ResolvedProperties};

/// Fixed header row
pub const CSV_HEADERS: [&str; 6] = [
    "ProducerName",
    "ProducerCountry",
    "ProductionPlace",
    "ComplianceStatus",
    "Area",
    "Geometry",
];

/// Export a payload as CSV text
///
/// # Examples
///
/// ```
/// use whisp::core::export::{csv::export_csv, ExportOptions};
/// use whisp::domain::AnalysisPayload;
/// use serde_json::json;
///
/// let payload = AnalysisPayload::new(json!([{"properties": {"plot_id": "P1"}}]));
/// let csv = export_csv(&payload, &ExportOptions::default());
/// assert_eq!(csv.lines().nth(1), Some(r#"Company A,UN,P1,Unknown,0,"""#));
/// ```
pub fn export_csv(payload: &AnalysisPayload, options: &ExportOptions) -> String {
    let features = extract_features(payload);

    let mut csv = CSV_HEADERS.join(",");
    csv.push('\n');

    for (index, feature) in features.iter().enumerate() {
        csv.push_str(&csv_row(feature, index, options));
        csv.push('\n');
    }

    tracing::debug!(rows = features.len(), "Built CSV export");
    csv
}

fn csv_row(feature: &Feature, index: usize, options: &ExportOptions) -> String {
    let props = ResolvedProperties::resolve(feature, index);

    let fields = [
        escape_field(&options.producer_name),
        escape_field(&to_iso2(props.country_or_unknown())),
        escape_field(&props.plot_id.production_place()),
        escape_field(props.compliance_export_label()),
        props.area_raw().to_string(),
        quote_field(&geometry_text(feature)),
    ];
    fields.join(",")
}

// Compact JSON of the geometry, empty when absent.
fn geometry_text(feature: &Feature) -> String {
    feature
        .geometry()
        .map(|g| g.to_string())
        .unwrap_or_default()
}

/// Quote a field, doubling embedded quotes
pub fn quote_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Quote a field only if it contains a delimiter, quote, or line break
pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        quote_field(value)
    } else {
        value.to_string()
    }
}
