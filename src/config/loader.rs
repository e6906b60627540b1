//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::WhispConfig;
use super::secret::secret_string;
use crate::domain::errors::WhispError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into WhispConfig
/// 4. Applies environment variable overrides (WHISP_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use whisp::config::loader::load_config;
///
/// let config = load_config("whisp.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<WhispConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WhispError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        WhispError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Loads configuration from a file if it exists, otherwise from defaults
///
/// Environment overrides and validation apply in both cases.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<WhispConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        parse_config("")
    }
}

/// Parses configuration from TOML text
pub fn parse_config(contents: &str) -> Result<WhispConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: WhispConfig = toml::from_str(&contents)
        .map_err(|e| WhispError::Configuration(format!("Failed to parse TOML: {}", e)))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        WhispError::Configuration(format!("Configuration validation failed: {}", e))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| WhispError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(WhispError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn parse_override<T: std::str::FromStr>(name: &str, val: &str) -> Result<T> {
    val.parse().map_err(|_| {
        WhispError::Configuration(format!("Invalid value '{val}' for {name}"))
    })
}

/// Applies environment variable overrides using WHISP_* prefix
///
/// Environment variables follow the pattern: WHISP_<SECTION>_<KEY>
/// For example: WHISP_API_BASE_URL, WHISP_SESSION_TTL_HOURS
fn apply_env_overrides(config: &mut WhispConfig) -> Result<()> {
    let var = |name: &str| std::env::var(name).ok();

    // Application overrides
    if let Some(val) = var("WHISP_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // API overrides
    if let Some(val) = var("WHISP_API_BASE_URL") {
        config.api.base_url = val;
    }
    if let Some(val) = var("WHISP_API_UPLOAD_PATH") {
        config.api.upload_path = val;
    }
    if let Some(val) = var("WHISP_API_TILES_BASE_URL") {
        config.api.tiles_base_url = val;
    }
    if let Some(val) = var("WHISP_API_TIMEOUT_SECONDS") {
        config.api.timeout_seconds = Some(parse_override("WHISP_API_TIMEOUT_SECONDS", &val)?);
    }
    if let Some(val) = var("WHISP_API_API_KEY") {
        config.api.api_key = Some(secret_string(val));
    }

    // Export overrides
    if let Some(val) = var("WHISP_EXPORT_PRODUCER_NAME") {
        config.export.producer_name = val;
    }
    if let Some(val) = var("WHISP_EXPORT_OUTPUT_DIR") {
        config.export.output_dir = val;
    }

    // State overrides
    if let Some(val) = var("WHISP_STATE_PATH") {
        config.state.path = val;
    }

    // Session overrides
    if let Some(val) = var("WHISP_SESSION_TTL_HOURS") {
        config.session.ttl_hours = parse_override("WHISP_SESSION_TTL_HOURS", &val)?;
    }
    if let Some(val) = var("WHISP_SESSION_REQUIRE_LOGIN") {
        config.session.require_login = parse_override("WHISP_SESSION_REQUIRE_LOGIN", &val)?;
    }

    // Map overrides
    if let Some(val) = var("WHISP_MAP_DEFAULT_ZOOM") {
        config.map.default_zoom = parse_override("WHISP_MAP_DEFAULT_ZOOM", &val)?;
    }
    if let Some(val) = var("WHISP_MAP_FILL_OPACITY") {
        config.map.fill_opacity = parse_override("WHISP_MAP_FILL_OPACITY", &val)?;
    }
    if let Some(val) = var("WHISP_MAP_VIEWER_URL") {
        config.map.viewer_url = val;
    }

    // Logging overrides
    if let Some(val) = var("WHISP_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = parse_override("WHISP_LOGGING_LOCAL_ENABLED", &val)?;
    }
    if let Some(val) = var("WHISP_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = var("WHISP_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("WHISP_TEST_SUBST_VAR", "test_value");
        let input = "api_key = \"${WHISP_TEST_SUBST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "api_key = \"test_value\"\n");
        std::env::remove_var("WHISP_TEST_SUBST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("WHISP_TEST_MISSING_VAR");
        let input = "api_key = \"${WHISP_TEST_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("WHISP_TEST_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("WHISP_TEST_COMMENTED_VAR");
        let input = "# api_key = \"${WHISP_TEST_COMMENTED_VAR}\"";
        assert!(substitute_env_vars(input).is_ok());
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent-whisp.toml");
        assert!(matches!(result, Err(WhispError::Configuration(_))));
    }

    #[test]
    fn test_load_config_or_default_without_file() {
        let config = load_config_or_default("nonexistent-whisp.toml").unwrap();
        assert_eq!(config.state.path, ".whisp/state.json");
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[api]
base_url = "https://api.example.org"
timeout_seconds = 45
api_key = "secret-key"

[export]
producer_name = "Acme Cocoa"

[map]
default_zoom = 12
center = [5.5, -1.2]
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.api.base_url, "https://api.example.org");
        assert_eq!(config.api.timeout_seconds, Some(45));
        assert_eq!(
            config.api.api_key.as_ref().unwrap().expose_secret(),
            "secret-key"
        );
        assert_eq!(config.export.producer_name, "Acme Cocoa");
        assert_eq!(config.map.default_zoom, 12);
        assert_eq!(config.map.center, [5.5, -1.2]);
        assert_eq!(config.api.upload_path, "/api/v1/upload-geojson");
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let result = parse_config("[map]\nfill_opacity = 2.0\n");
        let err = result.unwrap_err().to_string();
        assert!(err.contains("fill_opacity"));
    }

    #[test]
    fn test_unparseable_toml() {
        assert!(matches!(
            parse_config("[api\nbase_url = 1"),
            Err(WhispError::Configuration(_))
        ));
    }
}
