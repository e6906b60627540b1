//! Configuration management for Whisp.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Whisp uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `WHISP_<SECTION>_<KEY>` environment overrides
//! - Default values for every setting
//! - Validation with descriptive messages
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use whisp::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("whisp.toml")?;
//!
//! println!("Upload endpoint: {}", config.api.upload_url());
//! println!("State file: {}", config.state.path);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`ApiConfig`] - Analysis API endpoint, tile server, timeout and key
//! - [`ExportConfig`] - Producer name and download directory
//! - [`StateConfig`] - Location of the persisted state file
//! - [`SessionConfig`] - Session lifetime and login requirement
//! - [`MapConfig`] - Map zoom, fill opacity, center and viewer URL
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [api]
//! base_url = "https://eudr-multilayer-api.fly.dev"
//! upload_path = "/api/v1/upload-geojson"
//! api_key = "${WHISP_API_KEY}"
//!
//! [session]
//! ttl_hours = 24
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default, parse_config};
pub use schema::{
    ApiConfig, ApplicationConfig, ExportConfig, LoggingConfig, MapConfig, SessionConfig,
    StateConfig, WhispConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
