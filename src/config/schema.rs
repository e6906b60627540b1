//! Configuration schema types
//!
//! This module defines the configuration structure for Whisp. Every section
//! has defaults, so an empty file is a valid configuration.

use crate::config::SecretString;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Main Whisp configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WhispConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Analysis API settings
    #[serde(default)]
    pub api: ApiConfig,

    /// Export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Persisted state settings
    #[serde(default)]
    pub state: StateConfig,

    /// Session settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Map viewer settings
    #[serde(default)]
    pub map: MapConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WhispConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.api.validate()?;
        self.export.validate()?;
        self.state.validate()?;
        self.session.validate()?;
        self.map.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Analysis API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the analysis API
    #[serde(default = "default_api_base_url")]
    pub base_url: String,

    /// Path of the upload endpoint, appended to `base_url`
    #[serde(default = "default_upload_path")]
    pub upload_path: String,

    /// Base URL of the overlay tile service
    #[serde(default = "default_tiles_base_url")]
    pub tiles_base_url: String,

    /// Request timeout; none by default
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Bearer token sent with uploads
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

impl ApiConfig {
    /// Full upload endpoint URL
    pub fn upload_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path.trim_start_matches('/')
        )
    }

    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("api.base_url", &self.base_url),
            ("api.tiles_base_url", &self.tiles_base_url),
        ] {
            if value.is_empty() {
                return Err(format!("{name} cannot be empty"));
            }
            if !value.starts_with("http://") && !value.starts_with("https://") {
                return Err(format!("{name} must start with http:// or https://"));
            }
        }

        if self.upload_path.is_empty() {
            return Err("api.upload_path cannot be empty".to_string());
        }

        if self.timeout_seconds == Some(0) {
            return Err("api.timeout_seconds must be > 0 when set".to_string());
        }

        if self
            .api_key
            .as_ref()
            .is_some_and(|key| key.expose_secret().is_blank())
        {
            return Err("api.api_key cannot be blank when set".to_string());
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            upload_path: default_upload_path(),
            tiles_base_url: default_tiles_base_url(),
            timeout_seconds: None,
            api_key: None,
        }
    }
}

/// Export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Value written to the ProducerName column
    #[serde(default = "default_producer_name")]
    pub producer_name: String,

    /// Directory that downloads are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.producer_name.trim().is_empty() {
            return Err("export.producer_name cannot be empty".to_string());
        }
        if self.output_dir.is_empty() {
            return Err("export.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            producer_name: default_producer_name(),
            output_dir: default_output_dir(),
        }
    }
}

/// Persisted state configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Path of the JSON state file
    #[serde(default = "default_state_path")]
    pub path: String,
}

impl StateConfig {
    fn validate(&self) -> Result<(), String> {
        if self.path.is_empty() {
            return Err("state.path cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            path: default_state_path(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Hours after login before the session expires
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u32,

    /// Refuse to analyze without an active session
    #[serde(default = "default_true")]
    pub require_login: bool,
}

impl SessionConfig {
    /// Time-to-live as a duration
    pub fn ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(i64::from(self.ttl_hours))
    }

    fn validate(&self) -> Result<(), String> {
        if self.ttl_hours == 0 {
            return Err("session.ttl_hours must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            require_login: true,
        }
    }
}

/// Map viewer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Zoom level used for marker sizing (0-22)
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Fill opacity of plot polygons (0.0-1.0)
    #[serde(default = "default_fill_opacity")]
    pub fill_opacity: f64,

    /// Initial center as `[lat, lng]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    /// Viewer page used for handoff URLs
    #[serde(default = "default_viewer_url")]
    pub viewer_url: String,
}

impl MapConfig {
    fn validate(&self) -> Result<(), String> {
        if self.default_zoom > 22 {
            return Err("map.default_zoom must be between 0 and 22".to_string());
        }

        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err("map.fill_opacity must be between 0.0 and 1.0".to_string());
        }

        let [lat, lng] = self.center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(format!("map.center [{lat}, {lng}] is out of range"));
        }

        if self.viewer_url.is_empty() {
            return Err("map.viewer_url cannot be empty".to_string());
        }

        Ok(())
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_zoom: default_zoom(),
            fill_opacity: default_fill_opacity(),
            center: default_center(),
            viewer_url: default_viewer_url(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local_enabled".to_string());
        }

        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "https://eudr-multilayer-api.fly.dev".to_string()
}

fn default_upload_path() -> String {
    "/api/v1/upload-geojson".to_string()
}

fn default_tiles_base_url() -> String {
    crate::core::render::layers::DEFAULT_TILES_BASE_URL.to_string()
}

fn default_producer_name() -> String {
    crate::core::export::DEFAULT_PRODUCER_NAME.to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_state_path() -> String {
    ".whisp/state.json".to_string()
}

fn default_ttl_hours() -> u32 {
    crate::core::state::session::DEFAULT_TTL_HOURS
}

fn default_true() -> bool {
    true
}

fn default_zoom() -> u8 {
    crate::core::render::map::DEFAULT_ZOOM
}

fn default_fill_opacity() -> f64 {
    crate::core::render::map::DEFAULT_FILL_OPACITY
}

fn default_center() -> [f64; 2] {
    crate::core::render::map::DEFAULT_CENTER
}

fn default_viewer_url() -> String {
    crate::core::handoff::DEFAULT_VIEWER_URL.to_string()
}

fn default_local_path() -> String {
    "logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
