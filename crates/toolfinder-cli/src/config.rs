//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use toolfinder_chat::ollama::DEFAULT_ENDPOINT;
use toolfinder_extractor::DiscoveryConfig;

/// Model used when a profile does not name one.
pub const DEFAULT_MODEL: &str = "llama3.2";

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Discovery tuning
    #[serde(default)]
    pub discovery: DiscoverySettings,
}

/// Discovery limits that apply to a single CLI run.
///
/// Every run builds a fresh discovery service, so the batch cache settings
/// of [`DiscoveryConfig`] are left at their defaults and not exposed here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    /// Maximum accepted reply length (characters)
    pub max_reply_length: usize,

    /// Maximum time for a single chat call (seconds)
    pub chat_timeout_secs: u64,
}

impl DiscoverySettings {
    /// Full discovery configuration for these settings.
    pub fn to_config(&self) -> DiscoveryConfig {
        DiscoveryConfig {
            max_reply_length: self.max_reply_length,
            chat_timeout_secs: self.chat_timeout_secs,
            ..DiscoveryConfig::default()
        }
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        let defaults = DiscoveryConfig::default();
        Self {
            max_reply_length: defaults.max_reply_length,
            chat_timeout_secs: defaults.chat_timeout_secs,
        }
    }
}

/// Chat service profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Chat endpoint URL
    pub endpoint: String,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".toolfinder").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.discovery.to_config().validate().map_err(CliError::Config)?;
        Ok(config)
    }

    /// Save configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the active profile.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        self.resolve_profile(None)
    }

    /// Get the named profile, or the active one when no name is given.
    ///
    /// Leaves `active_profile` untouched, so a one-run override is never saved.
    pub fn resolve_profile(&self, name: Option<&str>) -> Result<&Profile> {
        let name = name.unwrap_or(&self.active_profile);
        self.profiles
            .get(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", name)))
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        Ok(())
    }

    /// Delete a profile. The active profile cannot be deleted.
    pub fn delete_profile(&mut self, name: &str) -> Result<Profile> {
        if name == self.active_profile {
            return Err(CliError::Config(format!(
                "Cannot delete active profile '{}'",
                name
            )));
        }
        self.profiles
            .remove(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' does not exist", name)))
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(default_profile(), Profile::default());

        Self {
            active_profile: default_profile(),
            profiles,
            settings: Settings::default(),
            discovery: DiscoverySettings::default(),
        }
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: default_model(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        assert_eq!(config.get_active_profile().unwrap(), &Profile::default());
        assert!(config.settings.color);
        assert_eq!(config.discovery.chat_timeout_secs, 120);
        assert_eq!(config.discovery.to_config().cache_ttl_secs, 18_000);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        let profile = Profile {
            endpoint: "http://gpu-box:11434".to_string(),
            model: "mistral".to_string(),
        };

        config.set_profile("remote".to_string(), profile.clone());
        config.switch_profile("remote".to_string()).unwrap();
        assert_eq!(config.get_active_profile().unwrap(), &profile);

        assert!(config.delete_profile("remote").is_err());
        assert!(config.delete_profile("default").is_ok());
        assert!(config.delete_profile("default").is_err());
    }

    #[test]
    fn test_resolve_profile_override_is_not_persisted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        let lab = Profile {
            endpoint: "http://lab:11434".to_string(),
            model: "qwen2.5".to_string(),
        };
        config.set_profile("lab".to_string(), lab.clone());

        assert_eq!(config.resolve_profile(Some("lab")).unwrap(), &lab);
        assert!(config.resolve_profile(Some("missing")).is_err());
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.active_profile, "default");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile, "default");
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.discovery.chat_timeout_secs = 45;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.discovery.chat_timeout_secs, 45);
        assert_eq!(loaded.profiles.len(), 1);
    }

    #[test]
    fn test_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[profiles.default]\nendpoint = \"http://other:11434\"\n\n[discovery]\nmax_reply_length = 5000\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.endpoint, "http://other:11434");
        assert_eq!(profile.model, DEFAULT_MODEL);
        assert_eq!(config.discovery.max_reply_length, 5000);
        assert_eq!(config.discovery.chat_timeout_secs, 120);
    }

    #[test]
    fn test_invalid_discovery_section_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[discovery]\nchat_timeout_secs = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(CliError::Config(_))));
    }
}
