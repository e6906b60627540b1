//! Integration tests for the analysis API client and runner

use std::sync::Arc;
use tempfile::TempDir;
use whisp::adapters::analysis::{HttpAnalysisClient, UploadFile};
use whisp::config::ApiConfig;
use whisp::core::analysis::AnalysisRunner;
use whisp::core::state::{FileStateStore, StateManager};
use whisp::domain::{AnalysisError, WhispError};

const RESPONSE: &str = r#"{
  "data": {
    "features": [
      {
        "type": "Feature",
        "geometry": {"type": "Polygon", "coordinates": [[[100, 1], [101, 1], [101, 2], [100, 2], [100, 1]]]},
        "properties": {
          "plot_id": "GH-01",
          "country_name": "Ghana",
          "total_area_hectares": 3.2,
          "overall_compliance": {"overall_risk": "low", "compliance_status": "compliant"}
        }
      },
      {
        "type": "Feature",
        "geometry": null,
        "properties": {"plot_id": "GH-02"}
      }
    ]
  }
}"#;

fn runner_for(server: &mockito::ServerGuard, dir: &TempDir) -> (AnalysisRunner, Arc<StateManager>) {
    let config = ApiConfig {
        base_url: server.url(),
        ..ApiConfig::default()
    };
    let client = HttpAnalysisClient::new(&config).unwrap();
    let store = FileStateStore::open(dir.path().join("state.json")).unwrap();
    let state = Arc::new(StateManager::new_with_store(Arc::new(store)));
    (AnalysisRunner::new(Arc::new(client), state.clone()), state)
}

fn geojson_upload(dir: &TempDir) -> UploadFile {
    let path = dir.path().join("cocoa.geojson");
    std::fs::write(&path, r#"{"type":"FeatureCollection","features":[]}"#).unwrap();
    UploadFile::from_path(path).unwrap()
}

#[tokio::test]
async fn test_analysis_round_trip_persists_results() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/upload-geojson")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(RESPONSE)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let (runner, state) = runner_for(&server, &dir);
    let outcome = runner.run(&geojson_upload(&dir)).await.unwrap();
    mock.assert_async().await;

    assert_eq!(outcome.feature_count, 2);
    assert_eq!(outcome.file_name, "cocoa.geojson");

    let stored = state.load_analysis().unwrap().unwrap();
    assert_eq!(stored.file_name.as_deref(), Some("cocoa.geojson"));
    assert_eq!(stored.payload.features().len(), 2);
}

#[tokio::test]
async fn test_server_error_leaves_state_untouched() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/v1/upload-geojson")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let (runner, state) = runner_for(&server, &dir);
    let err = runner.run(&geojson_upload(&dir)).await.unwrap_err();

    assert!(err.to_string().contains("HTTP error! status: 503"));
    assert!(matches!(
        err,
        WhispError::Analysis(AnalysisError::HttpStatus { status: 503, .. })
    ));
    assert!(state.load_analysis().unwrap().is_none());
    assert!(!runner.is_running());
}

#[tokio::test]
async fn test_upload_path_is_configurable() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v2/analyze")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let config = ApiConfig {
        base_url: format!("{}/", server.url()),
        upload_path: "/v2/analyze".to_string(),
        ..ApiConfig::default()
    };
    let client = HttpAnalysisClient::new(&config).unwrap();
    assert_eq!(client.upload_url(), format!("{}/v2/analyze", server.url()));

    let dir = TempDir::new().unwrap();
    let state = Arc::new(StateManager::new_with_store(Arc::new(
        FileStateStore::open(dir.path().join("state.json")).unwrap(),
    )));
    let runner = AnalysisRunner::new(Arc::new(client), state);
    let outcome = runner.run(&geojson_upload(&dir)).await.unwrap();

    mock.assert_async().await;
    assert_eq!(outcome.feature_count, 0);
}
