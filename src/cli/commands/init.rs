//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "whisp.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Whisp configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Optionally set WHISP_API_KEY in a .env file");
                println!("  3. Validate configuration: whisp validate-config");
                println!("  4. Log in: whisp login <username>");
                println!("  5. Analyze plots: whisp analyze plots.geojson");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# Whisp Configuration File
# EUDR geospatial compliance analysis client

[application]
log_level = "info"

[api]
base_url = "https://eudr-multilayer-api.fly.dev"
upload_path = "/api/v1/upload-geojson"

[export]
producer_name = "Company A"
output_dir = "."

[state]
path = ".whisp/state.json"

[session]
ttl_hours = 24
require_login = true
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# Whisp Configuration File
# EUDR geospatial compliance analysis client
#
# Every section is optional; omitted settings use the defaults shown here.
# Values may reference environment variables as ${VAR_NAME}, and any
# setting can be overridden with WHISP_<SECTION>_<KEY>, for example
# WHISP_API_BASE_URL or WHISP_SESSION_TTL_HOURS.

# ============================================================================
# Application
# ============================================================================
[application]
# trace | debug | info | warn | error
log_level = "info"

# ============================================================================
# Analysis API
# ============================================================================
[api]
# Analysis service; files are POSTed to base_url + upload_path
base_url = "https://eudr-multilayer-api.fly.dev"
upload_path = "/api/v1/upload-geojson"

# Tile server for the forest and deforestation overlays
tiles_base_url = "https://gis-development.koltivaapi.com"

# Request timeout in seconds; no timeout when omitted
# timeout_seconds = 120

# Bearer token sent with uploads, if the service requires one
# api_key = "${WHISP_API_KEY}"

# ============================================================================
# Export
# ============================================================================
[export]
# Written to the ProducerName column of CSV and GeoJSON downloads
producer_name = "Company A"

# Directory for eudr_analysis_results.csv / .geojson
output_dir = "."

# ============================================================================
# Persisted state
# ============================================================================
[state]
# Session, preferences and the last analysis result
path = ".whisp/state.json"

# ============================================================================
# Session
# ============================================================================
[session]
# Sessions expire this many hours after login
ttl_hours = 24

# Refuse to analyze without an active session
require_login = true

# ============================================================================
# Map
# ============================================================================
[map]
# Zoom level used to size risk markers
default_zoom = 8

# Fill opacity of plot polygons (0.0 - 1.0)
fill_opacity = 0.7

# [lat, lng] used when the results have no geometry
center = [-1.0, 114.0]

# Viewer page for `whisp view-url`
viewer_url = "map.html"

# ============================================================================
# Logging
# ============================================================================
[logging]
# JSON log files in addition to console output
local_enabled = false
local_path = "logs"

# daily | hourly
local_rotation = "daily"
"#
        .to_string()
    }
}
