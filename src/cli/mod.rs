//! CLI module for VerifyLens
//!
//! This module handles command-line argument parsing and command execution.

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

use crate::config_initialization::ConfigOverrides;

/// VerifyLens CLI
///
/// Upload a video, audio or text file to the VerifyLens analysis service and
/// print the verdict.
#[derive(Parser, Debug)]
#[command(name = "verifylens")]
#[command(about = "VerifyLens CLI - AI-powered media verification from the terminal")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Base URL of the analysis service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Configuration file (TOML)
    #[arg(long, global = true, env = "VERIFYLENS_CONFIG")]
    pub config: Option<String>,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format (pretty, json)
    #[arg(long, default_value = "pretty", global = true)]
    pub log_format: String,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Configuration values given on the command line
    pub fn config_overrides(&self) -> ConfigOverrides {
        let output_format = match &self.command {
            Commands::Analyze(args) => args.format.clone(),
            Commands::Info(args) => args.format.clone(),
            Commands::Config(_) => None,
        };

        ConfigOverrides {
            config_path: self.config.clone(),
            api_url: self.api_url.clone(),
            output_format,
            log_level: self.log_level.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload a file and print the analysis
    Analyze(args::AnalyzeArgs),
    /// Show the analysis service descriptor
    Info(args::InfoArgs),
    /// Inspect or create the configuration file
    Config(args::ConfigArgs),
}
