//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::TomlConfigAdapter;
use crate::app::container::{AppContainer, DefaultAppContainer};
use crate::app::AnalyzeRequest;
use crate::cli::args::{AnalyzeArgs, ConfigArgs, ConfigCommand, InfoArgs};
use crate::config_initialization::ResolvedConfig;
use crate::domain::model::MediaCategory;
use crate::output::{render_document, Presenter};
use crate::ports::ConfigPort;

/// Execute the analyze command
///
/// Returns whether the session ended with a result.
pub async fn analyze(args: AnalyzeArgs, config: &ResolvedConfig) -> Result<bool> {
    info!("Starting analyze operation");
    info!("Input: {}", args.input);

    let media_type = args
        .media_type
        .as_deref()
        .map(MediaCategory::parse)
        .transpose()
        .map_err(|e| anyhow::anyhow!("Invalid media type: {}", e))?;

    let container = DefaultAppContainer::new(&config.api_url)
        .context("Failed to initialize analysis client")?;
    let interactor = container.analyze_interactor();

    let session = interactor.new_session();
    let follower = tokio::spawn(Presenter::terminal(config.output_format).follow(session.subscribe()));

    let request = match media_type {
        Some(media_type) => AnalyzeRequest::with_media_type(&args.input, media_type),
        None => AnalyzeRequest::new(&args.input),
    };
    let outcome = interactor.execute(&session, request).await;

    // Closing the session ends the presenter
    drop(session);
    follower
        .await
        .context("Presenter task panicked")?
        .context("Failed to write output")?;

    let response = outcome.with_context(|| format!("Failed to analyze {}", args.input))?;
    if let Some(message) = response.error_message() {
        warn!("Analysis of {} failed: {}", response.file.name, message);
    } else {
        info!("Analyze operation completed successfully");
    }

    Ok(response.success())
}

/// Execute the info command
pub async fn info(_args: InfoArgs, config: &ResolvedConfig) -> Result<()> {
    info!("Starting info operation against {}", config.api_url);

    let container = DefaultAppContainer::new(&config.api_url)
        .context("Failed to initialize analysis client")?;
    let descriptor = container
        .info_interactor()
        .execute()
        .await
        .context("Failed to query analysis service")?;

    println!("{}", render_document("Service Information", &descriptor, config.output_format));
    Ok(())
}

/// Execute the config command
pub async fn config(args: ConfigArgs, config: &ResolvedConfig) -> Result<()> {
    match args.command {
        ConfigCommand::Show => {
            println!("api_url = {}", config.api_url);
            println!("output_format = {}", config.output_format.as_str());
            println!("log_level = {}", config.log_level.as_str());
            match &config.source {
                Some(path) => println!("source = {}", path.display()),
                None => println!("source = defaults"),
            }
            Ok(())
        }
        ConfigCommand::Init { path, force } => {
            if Path::new(&path).exists() && !force {
                return Err(anyhow::anyhow!(
                    "Configuration file already exists: {} (use --force to replace it)",
                    path
                ));
            }

            let adapter = TomlConfigAdapter::new();
            adapter
                .save_config(&path)
                .await
                .with_context(|| format!("Failed to write {}", path))?;

            info!("Wrote default configuration to {}", path);
            println!("Wrote {}", path);
            Ok(())
        }
    }
}
