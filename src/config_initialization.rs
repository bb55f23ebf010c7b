//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::adapters::toml_config::{
    DEFAULT_CONFIG_FILE, KEY_API_URL, KEY_LOG_LEVEL, KEY_OUTPUT_FORMAT,
};
use crate::domain::model::OutputFormat;
use crate::domain::rules::EndpointRules;
use crate::error::{VerifyLensError, VerifyLensResult};
use crate::ports::{ConfigPort, LogLevel};

/// Environment variables mapped onto config keys
pub const ENV_MAPPINGS: [(&str, &str); 3] = [
    ("VERIFYLENS_API_URL", KEY_API_URL),
    ("VERIFYLENS_OUTPUT_FORMAT", KEY_OUTPUT_FORMAT),
    ("VERIFYLENS_LOG_LEVEL", KEY_LOG_LEVEL),
];

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<String>,
    pub api_url: Option<String>,
    pub output_format: Option<String>,
    pub log_level: Option<String>,
}

/// Effective configuration after applying every layer
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub api_url: String,
    pub output_format: OutputFormat,
    pub log_level: LogLevel,
    /// File the configuration was read from, if any
    pub source: Option<PathBuf>,
}

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
///
/// `env` looks up environment variables; pass `|key| std::env::var(key).ok()`
/// in production.
pub async fn initialize_configuration_hierarchy<E>(
    config_port: &dyn ConfigPort,
    overrides: &ConfigOverrides,
    env: E,
) -> VerifyLensResult<ResolvedConfig>
where
    E: Fn(&str) -> Option<String>,
{
    // Step 1: defaults come from the adapter
    // Step 2: file
    let source = load_config_file(config_port, overrides.config_path.as_deref()).await?;

    // Step 3: environment
    load_environment_variables(config_port, &env).await?;

    // Step 4: command line
    apply_cli_configuration_overrides(config_port, overrides).await?;

    config_port
        .validate_config()
        .await
        .map_err(|e| VerifyLensError::Config { message: e.to_string() })?;

    let resolved = ResolvedConfig {
        api_url: EndpointRules::normalize_base_url(&required(config_port, KEY_API_URL).await?)?,
        output_format: OutputFormat::parse(&required(config_port, KEY_OUTPUT_FORMAT).await?)?,
        log_level: LogLevel::parse(&required(config_port, KEY_LOG_LEVEL).await?)?,
        source,
    };

    debug!("Resolved configuration: {:?}", resolved);
    Ok(resolved)
}

/// Load the explicit config file, or the default one when it exists
async fn load_config_file(
    config_port: &dyn ConfigPort,
    explicit: Option<&str>,
) -> VerifyLensResult<Option<PathBuf>> {
    let path = match explicit {
        Some(path) => path,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => DEFAULT_CONFIG_FILE,
        None => {
            debug!("No configuration file found");
            return Ok(None);
        }
    };

    info!("Loading configuration from: {}", path);
    config_port
        .load_config(path)
        .await
        .map_err(|e| VerifyLensError::Config { message: e.to_string() })?;

    Ok(Some(PathBuf::from(path)))
}

/// Load environment variables and apply to configuration
async fn load_environment_variables<E>(config_port: &dyn ConfigPort, env: &E) -> VerifyLensResult<()>
where
    E: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    for (env_var, config_key) in ENV_MAPPINGS {
        if let Some(value) = env(env_var).filter(|v| !v.trim().is_empty()) {
            debug!("Found environment override: {} = {}", env_var, value);
            config_port.set_config(config_key, &value).await?;
            env_overrides += 1;
        }
    }

    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    Ok(())
}

/// Apply CLI argument overrides to configuration
async fn apply_cli_configuration_overrides(
    config_port: &dyn ConfigPort,
    overrides: &ConfigOverrides,
) -> VerifyLensResult<()> {
    let pairs = [
        (KEY_API_URL, &overrides.api_url),
        (KEY_OUTPUT_FORMAT, &overrides.output_format),
        (KEY_LOG_LEVEL, &overrides.log_level),
    ];

    for (key, value) in pairs {
        if let Some(value) = value {
            debug!("CLI override: {} = {}", key, value);
            config_port.set_config(key, value).await?;
        }
    }

    Ok(())
}

async fn required(config_port: &dyn ConfigPort, key: &str) -> VerifyLensResult<String> {
    config_port
        .get_config(key)
        .await?
        .ok_or_else(|| VerifyLensError::Config {
            message: format!("Missing configuration value: {}", key),
        })
}
