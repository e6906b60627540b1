//! Result exporters
//!
//! Both exporters normalize the payload through the feature extractor first,
//! then serialize:
//!
//! - [`csv`] - one row per feature with the geometry embedded as quoted JSON
//! - [`geojson`] - a FeatureCollection with a reduced property set
//!
//! [`write_export`] writes either format to its fixed download file name.

pub mod csv;
pub mod geojson;
pub mod summary;

pub use summary::ExportSummary;

use crate::domain::{AnalysisPayload, Result, WhispError};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;

/// Placeholder producer name written by both exporters
pub const DEFAULT_PRODUCER_NAME: &str = "Company A";

/// Download format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    GeoJson,
}

impl ExportFormat {
    /// Fixed file name of the download
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "eudr_analysis_results.csv",
            Self::GeoJson => "eudr_analysis_results.geojson",
        }
    }

    /// MIME type of the download
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::GeoJson => "application/geo+json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::GeoJson => "geojson",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = WhispError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "geojson" | "geo+json" | "json" => Ok(Self::GeoJson),
            _ => Err(WhispError::Validation(format!(
                "Invalid export format: {s}. Expected 'csv' or 'geojson'"
            ))),
        }
    }
}

/// Options shared by the exporters
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Value of the `ProducerName` column/property
    pub producer_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            producer_name: DEFAULT_PRODUCER_NAME.to_string(),
        }
    }
}

/// Render a payload in the given format
pub fn render_export(
    payload: &AnalysisPayload,
    format: ExportFormat,
    options: &ExportOptions,
) -> Result<String> {
    match format {
        ExportFormat::Csv => Ok(csv::export_csv(payload, options)),
        ExportFormat::GeoJson => geojson::export_geojson(payload, options),
    }
}

/// Render a payload and write it to `dir/<fixed file name>`
///
/// The directory is created if needed. Existing files are overwritten.
pub fn write_export(
    payload: &AnalysisPayload,
    format: ExportFormat,
    options: &ExportOptions,
    dir: impl AsRef<Path>,
) -> Result<ExportSummary> {
    let start = Instant::now();
    let dir = dir.as_ref();

    let content = render_export(payload, format, options)?;
    let feature_count = payload.features().len();

    std::fs::create_dir_all(dir).map_err(|e| {
        WhispError::Export(format!(
            "Failed to create output directory {}: {e}",
            dir.display()
        ))
    })?;

    let path = dir.join(format.file_name());
    std::fs::write(&path, content.as_bytes()).map_err(|e| {
        WhispError::Export(format!("Failed to write {}: {e}", path.display()))
    })?;

    let summary = ExportSummary {
        format,
        path,
        feature_count,
        bytes_written: content.len(),
        duration: start.elapsed(),
    };
    summary.log_summary();

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(
            "geojson".parse::<ExportFormat>().unwrap(),
            ExportFormat::GeoJson
        );
        assert!("xlsx".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_format_file_names_and_mime() {
        assert_eq!(ExportFormat::Csv.file_name(), "eudr_analysis_results.csv");
        assert_eq!(ExportFormat::Csv.mime_type(), "text/csv");
        assert_eq!(
            ExportFormat::GeoJson.file_name(),
            "eudr_analysis_results.geojson"
        );
        assert_eq!(ExportFormat::GeoJson.mime_type(), "application/geo+json");
    }

    #[test]
    fn test_write_export_creates_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("downloads");
        let payload = AnalysisPayload::new(json!({"features": [
            {"properties": {"plot_id": "P1"}, "geometry": null}
        ]}));

        let summary =
            write_export(&payload, ExportFormat::Csv, &ExportOptions::default(), &out).unwrap();

        assert_eq!(summary.feature_count, 1);
        assert_eq!(summary.path, out.join("eudr_analysis_results.csv"));
        let written = std::fs::read_to_string(&summary.path).unwrap();
        assert_eq!(written.len(), summary.bytes_written);
        assert!(written.starts_with("ProducerName,"));
    }
}
