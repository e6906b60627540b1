//! Export command implementation
//!
//! Writes the stored analysis as CSV and/or GeoJSON downloads.

use crate::cli::context::{fail, CommandContext, EXIT_CONFIG, EXIT_OK};
use crate::core::export::{write_export, ExportFormat};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Format to write (csv or geojson); both when omitted
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Override the producer name written to every row
    #[arg(long)]
    pub producer_name: Option<String>,
}

impl ExportArgs {
    /// Formats selected by the arguments
    pub fn formats(&self) -> Vec<ExportFormat> {
        match self.format {
            Some(format) => vec![format],
            None => vec![ExportFormat::Csv, ExportFormat::GeoJson],
        }
    }

    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        let stored = match ctx.state.load_analysis() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                eprintln!("❌ No analysis results to export");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => return Ok(fail(&e, "Failed to read stored results")),
        };

        let mut options = ctx.export_options();
        if let Some(name) = &self.producer_name {
            options.producer_name = name.clone();
        }
        let output_dir = self
            .output_dir
            .as_deref()
            .unwrap_or(&ctx.config.export.output_dir);

        println!("📦 Exporting analysis results");
        for format in self.formats() {
            match write_export(&stored.payload, format, &options, output_dir) {
                Ok(summary) => println!(
                    "  ✅ {} ({} features, {} bytes)",
                    summary.path.display(),
                    summary.feature_count,
                    summary.bytes_written
                ),
                Err(e) => return Ok(fail(&e, "Export failed")),
            }
        }

        Ok(EXIT_OK)
    }
}
