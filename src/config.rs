use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{Result, SeoAioError};
use crate::integrate::DEFAULT_BALANCE;

/// Global seoaio configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// AIO weight in percent used when `--balance` is not given
    #[serde(default = "default_balance")]
    pub default_balance: u8,

    /// Industry assumed when `--industry` is not given
    #[serde(default)]
    pub industry: Option<String>,

    #[serde(default)]
    pub ai: AiConfig,
}

/// AIO oracle settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Ask the oracle during `analyze`
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Oracle command (Claude CLI compatible)
    #[serde(default = "default_command")]
    pub command: String,

    /// Model passed as `--model`, if any
    #[serde(default)]
    pub model: Option<String>,
}

fn default_balance() -> u8 {
    DEFAULT_BALANCE
}

fn default_true() -> bool {
    true
}

fn default_command() -> String {
    "claude".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: default_command(),
            model: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_balance: default_balance(),
            industry: None,
            ai: AiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a config file's contents
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.default_balance > 100 {
            return Err(SeoAioError::ConfigError(format!(
                "default_balance must be between 0 and 100, got {}",
                config.default_balance
            )));
        }
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| SeoAioError::ConfigError(e.to_string()))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Supports SEOAIO_CONFIG environment variable for test isolation
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("SEOAIO_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", "seoaio")
            .ok_or_else(|| SeoAioError::ConfigError("Could not determine config directory".into()))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.default_balance, 50);
        assert!(config.industry.is_none());
        assert!(config.ai.enabled);
        assert_eq!(config.ai.command, "claude");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_toml("industry = \"不動産\"\n[ai]\nenabled = false\n").unwrap();
        assert_eq!(config.default_balance, 50);
        assert_eq!(config.industry.as_deref(), Some("不動産"));
        assert!(!config.ai.enabled);
        assert_eq!(config.ai.command, "claude");
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = Config::default();
        config.default_balance = 70;
        config.ai.model = Some("sonnet".into());
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_out_of_range_balance() {
        assert!(Config::from_toml("default_balance = 150").is_err());
    }
}
