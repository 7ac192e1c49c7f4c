//! Configuration for discovery

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the discovery service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Maximum accepted reply length (characters)
    pub max_reply_length: usize,

    /// Maximum time for a single chat call (seconds)
    pub chat_timeout_secs: u64,

    /// How long a discovered batch stays fresh (seconds)
    pub cache_ttl_secs: u64,

    /// Maximum number of batches kept in the cache
    pub cache_capacity: usize,
}

impl DiscoveryConfig {
    /// Get the chat timeout as a Duration
    pub fn chat_timeout(&self) -> Duration {
        Duration::from_secs(self.chat_timeout_secs)
    }

    /// Get the cache freshness window as a Duration
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_reply_length == 0 {
            return Err("max_reply_length must be greater than 0".to_string());
        }
        if self.chat_timeout_secs == 0 {
            return Err("chat_timeout_secs must be greater than 0".to_string());
        }
        if self.cache_capacity == 0 {
            return Err("cache_capacity must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for DiscoveryConfig {
    /// Five-hour freshness, two-minute chat timeout
    fn default() -> Self {
        Self {
            max_reply_length: 200_000,
            chat_timeout_secs: 120,
            cache_ttl_secs: 5 * 60 * 60,
            cache_capacity: 32,
        }
    }
}

impl DiscoveryConfig {
    /// Aggressive preset: short timeouts and a short freshness window
    pub fn aggressive() -> Self {
        Self {
            max_reply_length: 50_000,
            chat_timeout_secs: 30,
            cache_ttl_secs: 15 * 60,
            cache_capacity: 8,
        }
    }

    /// Lenient preset: long timeouts, large replies, day-long freshness
    pub fn lenient() -> Self {
        Self {
            max_reply_length: 1_000_000,
            chat_timeout_secs: 300,
            cache_ttl_secs: 24 * 60 * 60,
            cache_capacity: 128,
        }
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}
