//! Results command implementation
//!
//! Shows the stored analysis as a paginated table, or the detail panel of
//! a single plot.

use crate::cli::context::{fail, CommandContext, EXIT_CONFIG, EXIT_OK};
use crate::core::render::{feature_details, ResultsTable};
use crate::domain::{resolve_all, AnalysisPayload};
use clap::Args;

/// Arguments for the results command
#[derive(Args, Debug)]
pub struct ResultsArgs {
    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (10, 25 or 50)
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Show the details of one plot instead of the table
    #[arg(long, value_name = "PLOT_ID")]
    pub plot: Option<String>,

    /// Print the stored payload as JSON
    #[arg(long, conflicts_with_all = ["plot", "page"])]
    pub json: bool,
}

impl ResultsArgs {
    /// Execute the results command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        let stored = match ctx.state.load_analysis() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                println!("No analysis results found. Run `whisp analyze <file>` first.");
                return Ok(EXIT_OK);
            }
            Err(e) => return Ok(fail(&e, "Failed to read stored results")),
        };

        if self.json {
            println!("{}", serde_json::to_string_pretty(stored.payload.as_value())?);
            return Ok(EXIT_OK);
        }

        if let Some(file_name) = &stored.file_name {
            println!("📄 {file_name}");
        }

        if let Some(plot) = &self.plot {
            return Ok(print_plot(&stored.payload, plot));
        }

        let table = match ResultsTable::new(&stored.payload.features()).with_page_size(self.page_size)
        {
            Ok(t) => t,
            Err(e) => return Ok(fail(&e, "Invalid page size")),
        };
        print!("{}", table.to_text(self.page));
        Ok(EXIT_OK)
    }
}

fn print_plot(payload: &AnalysisPayload, plot_id: &str) -> i32 {
    let Some(props) = resolve_all(&payload.features())
        .into_iter()
        .find(|p| p.plot_id.to_string() == plot_id)
    else {
        eprintln!("❌ Plot not found: {plot_id}");
        return EXIT_CONFIG;
    };

    let details = feature_details(&props);
    let width = details.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    for (label, value) in details {
        println!("  {label:<width$}  {value}");
    }
    EXIT_OK
}
