//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Whisp using clap.
//! Every command returns a process exit code: 0 success, 2 configuration or
//! usage error, 3 login required or session expired, 4 connection or HTTP
//! failure, 5 fatal error.

pub mod commands;
pub mod context;

use clap::{Parser, Subcommand};

/// Whisp - EUDR geospatial compliance analysis client
#[derive(Parser, Debug)]
#[command(name = "whisp")]
#[command(version, about, long_about = None)]
#[command(author = "Whisp Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "whisp.toml", env = "WHISP_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WHISP_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a plot file for analysis and store the result
    Analyze(commands::analyze::AnalyzeArgs),

    /// Show the stored analysis results
    Results(commands::results::ResultsArgs),

    /// Write the stored results as CSV and/or GeoJSON
    Export(commands::export::ExportArgs),

    /// Render the stored results as a styled GeoJSON map overlay
    Map(commands::map::MapArgs),

    /// List base layers, data overlays and the legend
    Layers(commands::map::LayersArgs),

    /// Print a map viewer URL carrying the stored results
    ViewUrl(commands::handoff::ViewUrlArgs),

    /// Import results from a map viewer URL
    OpenUrl(commands::handoff::OpenUrlArgs),

    /// Start a session
    Login(commands::session::LoginArgs),

    /// End the session
    Logout(commands::session::LogoutArgs),

    /// Show session, preferences and stored results
    Status(commands::session::StatusArgs),

    /// Select compliance framework and plan
    Select(commands::select::SelectArgs),

    /// Remove the stored analysis results
    Clear(commands::select::ClearArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

impl Cli {
    /// Run the selected command and return its exit code
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let config = self.config.as_str();
        match &self.command {
            Commands::Analyze(args) => args.execute(config).await,
            Commands::Results(args) => args.execute(config).await,
            Commands::Export(args) => args.execute(config).await,
            Commands::Map(args) => args.execute(config).await,
            Commands::Layers(args) => args.execute(config).await,
            Commands::ViewUrl(args) => args.execute(config).await,
            Commands::OpenUrl(args) => args.execute(config).await,
            Commands::Login(args) => args.execute(config).await,
            Commands::Logout(args) => args.execute(config).await,
            Commands::Status(args) => args.execute(config).await,
            Commands::Select(args) => args.execute(config).await,
            Commands::Clear(args) => args.execute(config).await,
            Commands::ValidateConfig(args) => args.execute(config).await,
            Commands::Init(args) => args.execute().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_analyze() {
        let cli = Cli::parse_from(["whisp", "analyze", "plots.geojson", "--show"]);
        assert_eq!(cli.config, "whisp.toml");
        match cli.command {
            Commands::Analyze(args) => {
                assert_eq!(args.file.to_string_lossy(), "plots.geojson");
                assert!(args.show);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["whisp", "--config", "custom.toml", "status"]);
        assert_eq!(cli.config, "custom.toml");
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["whisp", "--log-level", "debug", "results"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_kebab_case_commands() {
        assert!(matches!(
            Cli::parse_from(["whisp", "validate-config"]).command,
            Commands::ValidateConfig(_)
        ));
        assert!(matches!(
            Cli::parse_from(["whisp", "view-url"]).command,
            Commands::ViewUrl(_)
        ));
        assert!(matches!(
            Cli::parse_from(["whisp", "open-url", "map.html?data=%5B%5D"]).command,
            Commands::OpenUrl(_)
        ));
    }

    #[test]
    fn test_cli_parse_login() {
        let cli = Cli::parse_from(["whisp", "login", "ana"]);
        match cli.command {
            Commands::Login(args) => assert_eq!(args.username, "ana"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["whisp"]).is_err());
    }
}
