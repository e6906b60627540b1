//! Validate config command implementation
//!
//! Loads the configuration file, validates it and prints a summary.

use crate::config::load_config;
use crate::core::render::LayerCatalog;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration is invalid");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Upload Endpoint: {}", config.api.upload_url());
        println!(
            "  Request Timeout: {}",
            config
                .api
                .timeout_seconds
                .map_or("none".to_string(), |s| format!("{s}s"))
        );
        println!(
            "  API Key: {}",
            if config.api.api_key.is_some() {
                "configured"
            } else {
                "not set"
            }
        );
        println!(
            "  Tile Server: {} ({} overlays)",
            config.api.tiles_base_url,
            LayerCatalog::new(&config.api.tiles_base_url).overlays().len()
        );
        println!("  Producer Name: {}", config.export.producer_name);
        println!("  Output Directory: {}", config.export.output_dir);
        println!("  State File: {}", config.state.path);
        println!(
            "  Session: {}h, login {}",
            config.session.ttl_hours,
            if config.session.require_login {
                "required"
            } else {
                "optional"
            }
        );
        println!(
            "  Map: zoom {}, fill opacity {}, viewer {}",
            config.map.default_zoom, config.map.fill_opacity, config.map.viewer_url
        );
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[session]\nttl_hours = 12\n").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(ValidateArgs {}.execute(&path).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_validate_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[api]\nbase_url = \"ftp://nope\"\n").unwrap();
        let path = file.path().to_string_lossy().to_string();
        assert_eq!(ValidateArgs {}.execute(&path).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        assert_eq!(args.execute("missing-whisp.toml").await.unwrap(), 2);
    }
}
