// TOML config adapter - Configuration management using TOML files

use crate::domain::errors::*;
use crate::domain::model::OutputFormat;
use crate::domain::rules::EndpointRules;
use crate::ports::*;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Table holding all client settings
pub const CONFIG_SECTION: &str = "verifylens";

pub const KEY_API_URL: &str = "api_url";
pub const KEY_OUTPUT_FORMAT: &str = "output_format";
pub const KEY_LOG_LEVEL: &str = "log_level";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "verifylens.toml";

/// TOML configuration adapter
pub struct TomlConfigAdapter {
    config: RwLock<BTreeMap<String, String>>,
    config_file_path: RwLock<Option<PathBuf>>,
}

impl TomlConfigAdapter {
    /// Create new TOML config adapter populated with defaults
    pub fn new() -> Self {
        Self {
            config: RwLock::new(Self::defaults()),
            config_file_path: RwLock::new(None),
        }
    }

    /// Default configuration values
    pub fn defaults() -> BTreeMap<String, String> {
        let mut config = BTreeMap::new();
        config.insert(KEY_API_URL.to_string(), EndpointRules::DEFAULT_BASE_URL.to_string());
        config.insert(KEY_OUTPUT_FORMAT.to_string(), OutputFormat::Text.as_str().to_string());
        config.insert(KEY_LOG_LEVEL.to_string(), LogLevel::Warn.as_str().to_string());
        config
    }

    /// Path of the last loaded or saved file
    pub async fn config_file_path(&self) -> Option<PathBuf> {
        self.config_file_path.read().await.clone()
    }

    /// Serialize config to TOML string
    async fn serialize_config(&self) -> Result<String, DomainError> {
        let config = self.config.read().await;
        let mut root = BTreeMap::new();
        root.insert(CONFIG_SECTION.to_string(), config.clone());

        toml::to_string(&root)
            .map_err(|e| DomainError::ConfigError(format!("Failed to serialize TOML config: {}", e)))
    }

    /// Deserialize config from TOML string
    async fn deserialize_config(&self, toml_content: &str) -> Result<(), DomainError> {
        let parsed: toml::Value = toml::from_str(toml_content)
            .map_err(|e| DomainError::ConfigError(format!("Failed to parse TOML config: {}", e)))?;

        let mut config = self.config.write().await;
        if let Some(table) = parsed.get(CONFIG_SECTION).and_then(|s| s.as_table()) {
            for (key, value) in table {
                match value.as_str() {
                    Some(str_value) => {
                        config.insert(key.clone(), str_value.to_string());
                    }
                    None => {
                        tracing::warn!("Ignoring non-string config value for {}", key);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for TomlConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigPort for TomlConfigAdapter {
    async fn get_config(&self, key: &str) -> Result<Option<String>, DomainError> {
        let config = self.config.read().await;
        Ok(config.get(key).cloned())
    }

    async fn set_config(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let mut config = self.config.write().await;
        config.insert(key.to_string(), value.to_string());
        tracing::debug!("Set config {} = {}", key, value);
        Ok(())
    }

    async fn load_config(&self, file_path: &str) -> Result<(), DomainError> {
        let path = PathBuf::from(file_path);

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to read config file {}: {}", file_path, e)))?;

        self.deserialize_config(&content).await?;
        *self.config_file_path.write().await = Some(path);

        Ok(())
    }

    async fn save_config(&self, file_path: &str) -> Result<(), DomainError> {
        let path = PathBuf::from(file_path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::FsFail(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = self.serialize_config().await?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| DomainError::FsFail(format!("Failed to write config file: {}", e)))?;

        *self.config_file_path.write().await = Some(path);
        Ok(())
    }

    async fn validate_config(&self) -> Result<(), DomainError> {
        let config = self.config.read().await;

        if let Some(api_url) = config.get(KEY_API_URL) {
            EndpointRules::normalize_base_url(api_url)
                .map_err(|e| DomainError::ConfigError(e.to_string()))?;
        }

        if let Some(format) = config.get(KEY_OUTPUT_FORMAT) {
            OutputFormat::parse(format).map_err(|e| DomainError::ConfigError(e.to_string()))?;
        }

        if let Some(log_level) = config.get(KEY_LOG_LEVEL) {
            LogLevel::parse(log_level).map_err(|e| DomainError::ConfigError(e.to_string()))?;
        }

        Ok(())
    }
}
