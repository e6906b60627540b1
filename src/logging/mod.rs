//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Human-readable console output on stderr
//! - Optional JSON log files with daily or hourly rotation
//! - Log level from configuration, `--log-level` or `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use whisp::logging::init_logging;
//! use whisp::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! tracing::error!(error = "Upload failed", "Error occurred");
//! ```

pub mod structured;

pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an analysis upload
///
/// # Example
///
/// ```no_run
/// use whisp::log_analysis_start;
///
/// log_analysis_start!("plots.geojson", 2048);
/// ```
#[macro_export]
macro_rules! log_analysis_start {
    ($file_name:expr, $bytes:expr) => {
        tracing::info!(
            file_name = %$file_name,
            bytes = $bytes,
            "Starting analysis"
        );
    };
}

/// Log the completion of an analysis
///
/// # Example
///
/// ```no_run
/// use whisp::log_analysis_complete;
///
/// log_analysis_complete!("plots.geojson", 42, 1350u64);
/// ```
#[macro_export]
macro_rules! log_analysis_complete {
    ($file_name:expr, $feature_count:expr, $duration_ms:expr) => {
        tracing::info!(
            file_name = %$file_name,
            feature_count = $feature_count,
            duration_ms = $duration_ms,
            "Analysis completed"
        );
    };
}

/// Log a written export file
///
/// # Example
///
/// ```no_run
/// use whisp::log_export_written;
///
/// log_export_written!("csv", "out/eudr_analysis_results.csv", 12, 4096);
/// ```
#[macro_export]
macro_rules! log_export_written {
    ($format:expr, $path:expr, $feature_count:expr, $bytes:expr) => {
        tracing::info!(
            format = %$format,
            path = %$path,
            feature_count = $feature_count,
            bytes = $bytes,
            "Export written"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use whisp::log_error_with_context;
/// use whisp::domain::WhispError;
///
/// let error = WhispError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
    ($error:expr, $context:expr, $subject:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            subject = %$subject,
            "Error occurred"
        );
    };
}
