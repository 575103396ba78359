//! Configuration types for the notification dispatcher

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::channel::Channel;
use crate::target::CheckId;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    #[serde(default)]
    pub checks: Vec<CheckConfig>,
    #[serde(default)]
    pub senders: Vec<SenderConfig>,
    #[serde(default = "default_change_channel_capacity")]
    pub change_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            checks: Vec::new(),
            senders: Vec::new(),
            change_channel_capacity: default_change_channel_capacity(),
        }
    }
}

impl Config {
    /// Reject configurations the service cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        for check in &self.checks {
            if check.id <= 0 {
                return Err(crate::DispatchError::Config(format!(
                    "check id must be a positive number, got {}",
                    check.id
                )));
            }
            if check.interval.is_zero() {
                return Err(crate::DispatchError::Config(format!(
                    "interval of check id {} must not be zero",
                    check.id
                )));
            }
        }
        if self.change_channel_capacity == 0 {
            return Err(crate::DispatchError::Config(
                "change_channel_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A check to poll for notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub id: CheckId,
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,
}

/// Sender configuration with tagged enum for extensibility
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SenderConfig {
    #[serde(rename = "log")]
    Log { channel: Channel },
}

impl SenderConfig {
    pub fn type_name(&self) -> &str {
        match self {
            SenderConfig::Log { .. } => "log",
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            SenderConfig::Log { channel } => *channel,
        }
    }
}

fn default_store_path() -> PathBuf {
    PathBuf::from("store.json")
}

fn default_interval() -> Duration {
    Duration::from_secs(60)
}

fn default_change_channel_capacity() -> usize {
    64
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::DispatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
