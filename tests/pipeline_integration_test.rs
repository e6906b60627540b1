//! End-to-end tests of the rendering and export pipeline

use serde_json::json;
use tempfile::TempDir;
use whisp::core::export::{render_export, write_export, ExportFormat, ExportOptions};
use whisp::core::geometry::centroid;
use whisp::core::render::{feature_details, MapOptions, MapOverlay, ResultsTable};
use whisp::core::style::{GRAY, RED};
use whisp::domain::{
    resolve_all, AnalysisPayload, ComplianceStatus, PayloadShape, ResolvedProperties, RiskLevel,
};

fn indonesia_payload() -> AnalysisPayload {
    AnalysisPayload::new(json!({"data": {"features": [{
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[114, -1], [115, -1], [115, 0], [114, 0], [114, -1]]]
        },
        "properties": {
            "plot_id": "P1",
            "country_name": "Indonesia",
            "total_area_hectares": 12.345,
            "overall_compliance": {
                "overall_risk": "high",
                "compliance_status": "non-compliant"
            }
        }
    }]}}))
}

#[test]
fn test_resolved_properties_of_example() {
    let payload = indonesia_payload();
    assert_eq!(payload.shape(), PayloadShape::DataFeatures);

    let features = payload.features();
    let props = ResolvedProperties::resolve(&features[0], 0);
    assert_eq!(props.plot_id.to_string(), "P1");
    assert_eq!(props.country_display(), "Indonesia");
    assert_eq!(props.area_display(), "12.35");
    assert_eq!(props.area_raw(), 12.345);
    assert_eq!(props.overall_risk, RiskLevel::High);
    assert_eq!(props.compliance_status, ComplianceStatus::NonCompliant);
}

#[test]
fn test_csv_row_of_example() {
    let csv = render_export(
        &indonesia_payload(),
        ExportFormat::Csv,
        &ExportOptions::default(),
    )
    .unwrap();

    let mut lines = csv.lines();
    assert_eq!(
        lines.next(),
        Some("ProducerName,ProducerCountry,ProductionPlace,ComplianceStatus,Area,Geometry")
    );
    let row = lines.next().unwrap();
    assert!(row.starts_with("Company A,ID,P1,non-compliant,12.345,\"{\"\"type\"\":\"\"Polygon\"\""));
    assert!(row.ends_with("}\""));
    assert_eq!(lines.next(), None);
}

#[test]
fn test_map_marker_for_high_risk_plot() {
    let features = indonesia_payload().features();
    let overlay = MapOverlay::build(&features, MapOptions::default());

    assert_eq!(overlay.title, "EUDR Map Viewer (1 features)");
    assert_eq!(overlay.marker_count(), 1);

    let marker = overlay.features[0].marker.unwrap();
    assert_eq!(marker.style.color, RED);
    assert_eq!(marker.size, 16);

    let center = centroid(&features[0]).unwrap();
    assert!((center.lat - -0.5).abs() < 1e-9);
    assert!((center.lng - 114.5).abs() < 1e-9);

    let geojson = overlay.to_geojson();
    let collection = geojson["features"].as_array().unwrap();
    assert_eq!(collection.len(), 2);
    let point = collection[1]["geometry"]["coordinates"].as_array().unwrap();
    assert!((point[0].as_f64().unwrap() - 114.5).abs() < 1e-9);
    assert!((point[1].as_f64().unwrap() - -0.5).abs() < 1e-9);
}

#[test]
fn test_geojson_export_of_example() {
    let text = render_export(
        &indonesia_payload(),
        ExportFormat::GeoJson,
        &ExportOptions::default(),
    )
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();

    assert_eq!(value["type"], "FeatureCollection");
    assert_eq!(
        value["features"][0]["properties"],
        json!({
            "ProducerName": "Company A",
            "ProducerCountry": "ID",
            "ProductionPlace": "P1",
            "Area": 12.345
        })
    );
}

#[test]
fn test_table_and_details_of_example() {
    let features = indonesia_payload().features();
    let table = ResultsTable::new(&features);
    let text = table.to_text(1);
    assert!(text.starts_with("Results (1 records)"));
    assert!(text.contains("P1"));
    assert!(text.contains("Page 1 of 1"));

    let details = feature_details(&ResolvedProperties::resolve(&features[0], 0));
    assert_eq!(details[0], ("Plot ID", "P1".to_string()));
}

#[test]
fn test_all_payload_shapes_yield_same_features() {
    let feature = json!({"properties": {"plot_id": "X"}});
    let shapes = [
        json!({"data": {"features": [feature.clone()]}}),
        json!({"result": {"features": [feature.clone()]}}),
        json!({"features": [feature.clone()]}),
        json!([feature.clone()]),
        feature.clone(),
    ];

    for shape in shapes {
        let features = AnalysisPayload::new(shape).features();
        let props = resolve_all(&features);
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].plot_id.to_string(), "X");
    }
}

#[test]
fn test_unrecognized_payload_renders_empty() {
    let payload = AnalysisPayload::new(json!("not an object"));
    assert!(payload.features().is_empty());

    let table = ResultsTable::new(&payload.features());
    assert!(table.to_text(1).contains("No data available"));

    let overlay = MapOverlay::build(&payload.features(), MapOptions::default());
    assert!(overlay.bounds.is_none());
    assert_eq!(overlay.center(), MapOptions::default().center);

    let csv = render_export(&payload, ExportFormat::Csv, &ExportOptions::default()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_missing_fields_use_defaults() {
    let payload = AnalysisPayload::new(json!([{"properties": {}}, {}]));
    let features = payload.features();
    let props = resolve_all(&features);

    assert_eq!(props[0].plot_id.to_string(), "1");
    assert_eq!(props[1].plot_id.to_string(), "2");
    assert_eq!(props[0].country_display(), "N/A");
    assert_eq!(props[0].overall_risk, RiskLevel::Unknown);

    let overlay = MapOverlay::build(&features, MapOptions::default());
    assert_eq!(overlay.marker_count(), 0);
    assert_eq!(overlay.features[0].path.color, GRAY);

    let csv = render_export(&payload, ExportFormat::Csv, &ExportOptions::default()).unwrap();
    let row = csv.lines().nth(1).unwrap();
    assert!(row.starts_with("Company A,UN,PLOT-1,Unknown,0,"));
}

#[test]
fn test_write_both_exports() {
    let dir = TempDir::new().unwrap();
    let payload = indonesia_payload();
    let options = ExportOptions {
        producer_name: "Acme Cocoa".to_string(),
    };

    let csv = write_export(&payload, ExportFormat::Csv, &options, dir.path()).unwrap();
    let geojson = write_export(&payload, ExportFormat::GeoJson, &options, dir.path()).unwrap();

    assert_eq!(csv.path, dir.path().join("eudr_analysis_results.csv"));
    assert_eq!(geojson.path, dir.path().join("eudr_analysis_results.geojson"));
    assert_eq!(csv.feature_count, 1);

    let written = std::fs::read_to_string(&csv.path).unwrap();
    assert!(written.contains("Acme Cocoa,ID,P1"));
}
