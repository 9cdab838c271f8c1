//! Configuration for the Business Registration subsystem

use crate::domain::AssetRules;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Handler configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrationConfig {
    /// Milestone that activates the operation type
    pub activation_milestone: String,
    /// Maximum characters in a business name
    pub max_name_length: usize,
    /// Maximum characters in a business website
    pub max_website_length: usize,
    /// Entries per page when replaying the operation log
    pub bootstrap_page_size: usize,
    /// Buffered events per notifier subscriber
    pub event_channel_capacity: usize,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            activation_milestone: "aip11".to_string(),
            max_name_length: 128,
            max_website_length: 256,
            bootstrap_page_size: 1000,
            event_channel_capacity: 1000,
            log_level: "info".to_string(),
        }
    }
}

impl RegistrationConfig {
    /// Creates a minimal config for testing.
    pub fn for_testing() -> Self {
        Self {
            bootstrap_page_size: 2,
            event_channel_capacity: 16,
            log_level: "debug".to_string(),
            ..Default::default()
        }
    }

    /// Parses a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activation_milestone.is_empty() {
            return Err(ConfigError::EmptyMilestone);
        }
        for (field, value) in [
            ("max_name_length", self.max_name_length),
            ("max_website_length", self.max_website_length),
            ("bootstrap_page_size", self.bootstrap_page_size),
            ("event_channel_capacity", self.event_channel_capacity),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroLimit(field));
            }
        }
        Ok(())
    }

    pub fn asset_rules(&self) -> AssetRules {
        AssetRules {
            max_name_length: self.max_name_length,
            max_website_length: self.max_website_length,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Activation milestone must not be empty")]
    EmptyMilestone,

    #[error("{0} must be greater than zero")]
    ZeroLimit(&'static str),
}
