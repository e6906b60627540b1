//! view-url and open-url commands
//!
//! Hand the stored analysis to the map viewer through its `data` query
//! parameter, or import an analysis from such a URL.

use crate::cli::context::{fail, CommandContext, EXIT_CONFIG, EXIT_OK};
use crate::core::handoff::{decode_view_url, encode_view_url};
use clap::Args;

/// Arguments for the view-url command
#[derive(Args, Debug)]
pub struct ViewUrlArgs {
    /// Viewer page to link to (defaults to map.viewer_url)
    #[arg(long)]
    pub viewer: Option<String>,
}

impl ViewUrlArgs {
    /// Execute the view-url command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        let stored = match ctx.state.load_analysis() {
            Ok(Some(stored)) => stored,
            Ok(None) => {
                eprintln!("❌ No analysis results to hand off");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => return Ok(fail(&e, "Failed to read stored results")),
        };

        let viewer = self.viewer.as_deref().unwrap_or(&ctx.config.map.viewer_url);
        match encode_view_url(viewer, &stored.payload) {
            Ok(url) => {
                println!("{url}");
                Ok(EXIT_OK)
            }
            Err(e) => Ok(fail(&e, "Failed to build viewer URL")),
        }
    }
}

/// Arguments for the open-url command
#[derive(Args, Debug)]
pub struct OpenUrlArgs {
    /// Viewer URL carrying a `data` parameter
    pub url: String,
}

impl OpenUrlArgs {
    /// Execute the open-url command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let ctx = match CommandContext::load(config_path) {
            Ok(ctx) => ctx,
            Err(e) => return Ok(fail(&e, "Failed to load configuration")),
        };

        let payload = match decode_view_url(&self.url) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                eprintln!("❌ URL has no data parameter");
                return Ok(EXIT_CONFIG);
            }
            Err(e) => return Ok(fail(&e, "Failed to read map data from URL")),
        };

        // An imported payload has no upload file behind it.
        let saved = ctx
            .state
            .clear_analysis()
            .and_then(|_| ctx.state.save_payload(&payload));
        if let Err(e) = saved {
            return Ok(fail(&e, "Failed to store imported results"));
        }

        println!(
            "✅ Imported {} features from viewer URL",
            payload.features().len()
        );
        Ok(EXIT_OK)
    }
}
