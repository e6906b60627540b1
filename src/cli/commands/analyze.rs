//! Analyze command implementation
//!
//! Uploads a plot file to the analysis API and stores the result as the
//! current analysis.

use crate::adapters::analysis::{HttpAnalysisClient, UploadFile};
use crate::cli::context::{fail, CommandContext, EXIT_OK};
use crate::core::analysis::AnalysisRunner;
use crate::core::render::ResultsTable;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Plot file to analyze (.json, .geojson or .txt)
    pub file: PathBuf,

    /// Print the first page of results when done
    #[arg(long)]
    pub show: bool,
}

impl AnalyzeArgs {
    /// Execute the analyze command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        if let Err(e) = ctx.require_session() {
            return Ok(fail(&e, "Login required"));
        }

        let file = match UploadFile::from_path(&self.file) {
            Ok(f) => f,
            Err(e) => return Ok(fail(&e, "Cannot upload file")),
        };

        let client = match HttpAnalysisClient::new(&ctx.config.api) {
            Ok(c) => c,
            Err(e) => return Ok(fail(&e, "Failed to create API client")),
        };

        println!("🚀 Analyzing {} ...", file.file_name());
        tracing::info!(endpoint = %client.upload_url(), "Uploading to analysis API");

        let runner = AnalysisRunner::new(Arc::new(client), ctx.state.clone());
        let outcome = match runner.run(&file).await {
            Ok(o) => o,
            Err(e) => return Ok(fail(&e, "Analysis failed")),
        };

        println!(
            "✅ Analysis complete: {} features in {:.2}s",
            outcome.feature_count,
            outcome.duration.as_secs_f64()
        );
        println!("   Results saved to {}", ctx.config.state.path);

        if self.show {
            println!();
            print!("{}", ResultsTable::new(&outcome.payload.features()).to_text(1));
        }

        Ok(EXIT_OK)
    }
}
