//! VerifyLens CLI
//!
//! Command-line client for the VerifyLens media verification service. A file
//! is uploaded to the service's analysis endpoint for its media type and the
//! returned JSON verdict is printed.
//!
//! # Usage
//!
//! ```bash
//! verifylens analyze --input interview.mp4
//! verifylens analyze --input statement.txt --media-type text --format json
//! verifylens info --api-url http://localhost:8000
//! verifylens config init
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use verifylens::cli::{commands, Cli, Commands};
use verifylens::config_initialization::initialize_configuration_hierarchy;
use verifylens::utils::logging::{init_logging, LogFormat, LoggingConfig};
use verifylens::TomlConfigAdapter;

/// Main entry point for the VerifyLens CLI
#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<ExitCode> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Resolve configuration before logging so the configured level applies
    let config_port = TomlConfigAdapter::new();
    let config = initialize_configuration_hierarchy(
        &config_port,
        &cli.config_overrides(),
        |key| std::env::var(key).ok(),
    )
    .await?;

    init_logging(&LoggingConfig {
        level: config.log_level,
        format: LogFormat::parse(&cli.log_format)?,
        target: false,
    })?;

    info!("Starting VerifyLens CLI against {}", config.api_url);

    // Execute the requested command
    let code = match cli.command {
        Commands::Analyze(args) => {
            info!("Executing analyze command");
            if commands::analyze(args, &config).await? {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Commands::Info(args) => {
            info!("Executing info command");
            commands::info(args, &config).await?;
            ExitCode::SUCCESS
        }
        Commands::Config(args) => {
            info!("Executing config command");
            commands::config(args, &config).await?;
            ExitCode::SUCCESS
        }
    };

    info!("VerifyLens CLI finished");
    Ok(code)
}
