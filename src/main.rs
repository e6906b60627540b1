// Whisp - EUDR Geospatial Compliance Analysis Client
// Copyright (c) 2025 Whisp Contributors
// Licensed under the MIT License

use clap::Parser;
use std::process;
use whisp::cli::Cli;
use whisp::config::{load_config_or_default, LoggingConfig};
use whisp::logging::init_logging;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Logging settings come from the config file when it loads; the command
    // itself reports configuration errors.
    let (config_level, logging_config) = match load_config_or_default(&cli.config) {
        Ok(config) => (config.application.log_level, config.logging),
        Err(_) => ("info".to_string(), LoggingConfig::default()),
    };
    let log_level = cli.log_level.clone().unwrap_or(config_level);

    let guard = match init_logging(&log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(2);
        }
    };

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        config = %cli.config,
        "Whisp - EUDR Geospatial Compliance Analysis Client"
    );

    let exit_code = match cli.execute().await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            5
        }
    };

    drop(guard);
    process::exit(exit_code);
}
