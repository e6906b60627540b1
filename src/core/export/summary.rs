//! Export summary and reporting

use super::ExportFormat;
use std::path::PathBuf;
use std::time::Duration;

/// Summary of a written export file
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Format written
    pub format: ExportFormat,

    /// Path of the written file
    pub path: PathBuf,

    /// Number of features in the export
    pub feature_count: usize,

    /// Size of the file in bytes
    pub bytes_written: usize,

    /// Time spent rendering and writing
    pub duration: Duration,
}

impl ExportSummary {
    /// Whether the export contains any feature rows
    pub fn has_features(&self) -> bool {
        self.feature_count > 0
    }

    /// Log the summary
    pub fn log_summary(&self) {
        crate::log_export_written!(
            self.format.as_str(),
            self.path.display(),
            self.feature_count,
            self.bytes_written
        );
        tracing::debug!(
            mime = self.format.mime_type(),
            duration_ms = self.duration.as_millis() as u64,
            "Export timing"
        );

        if !self.has_features() {
            tracing::warn!(
                path = %self.path.display(),
                "Export contains no features"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(feature_count: usize) -> ExportSummary {
        ExportSummary {
            format: ExportFormat::GeoJson,
            path: PathBuf::from("out/eudr_analysis_results.geojson"),
            feature_count,
            bytes_written: 128,
            duration: Duration::from_millis(5),
        }
    }

    #[test]
    fn test_has_features() {
        assert!(summary(3).has_features());
        assert!(!summary(0).has_features());
    }

    #[test]
    fn test_log_summary_does_not_panic() {
        summary(0).log_summary();
        summary(2).log_summary();
    }
}
