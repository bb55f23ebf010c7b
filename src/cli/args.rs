//! Command-line argument definitions

use clap::{Args, Subcommand};

/// Arguments for the analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze (.txt, .mp3, .mp4, ...)
    #[arg(short, long)]
    pub input: String,

    /// Media type (video, audio, text); inferred from the extension when omitted
    #[arg(short, long)]
    pub media_type: Option<String>,

    /// Output format (text, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Output format (text, json, yaml)
    #[arg(short, long)]
    pub format: Option<String>,
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Write a configuration file with default values
    Init {
        /// Destination file
        #[arg(long, default_value = "verifylens.toml")]
        path: String,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}
