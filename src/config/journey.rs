//! Journey tuning configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Journey tuning configuration
///
/// The state TTL bounds how long an idle journey survives in the store.
/// Journeys idle for longer are lost; see the journey store port for the
/// durability contract.
#[derive(Debug, Clone, Deserialize)]
pub struct JourneyConfig {
    /// Journey state expiry in seconds
    #[serde(default = "default_state_ttl_secs")]
    pub state_ttl_secs: u64,

    /// Key prefix for journey entries in the store
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// Channel prefix for lifecycle events
    #[serde(default = "default_event_channel_prefix")]
    pub event_channel_prefix: String,
}

impl JourneyConfig {
    /// Get the state TTL as a Duration
    pub fn state_ttl(&self) -> Duration {
        Duration::from_secs(self.state_ttl_secs)
    }

    /// Validate journey configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.state_ttl_secs == 0 {
            return Err(ValidationError::InvalidStateTtl);
        }
        if self.key_prefix.is_empty() || self.event_channel_prefix.is_empty() {
            return Err(ValidationError::EmptyKeyPrefix);
        }
        Ok(())
    }
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            state_ttl_secs: default_state_ttl_secs(),
            key_prefix: default_key_prefix(),
            event_channel_prefix: default_event_channel_prefix(),
        }
    }
}

fn default_state_ttl_secs() -> u64 {
    3600
}

fn default_key_prefix() -> String {
    "compass:journey:".to_string()
}

fn default_event_channel_prefix() -> String {
    "compass:events:".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_store_contract() {
        let config = JourneyConfig::default();
        assert_eq!(config.state_ttl(), Duration::from_secs(3600));
        assert_eq!(config.key_prefix, "compass:journey:");
        assert_eq!(config.event_channel_prefix, "compass:events:");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = JourneyConfig {
            state_ttl_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_prefixes_are_rejected() {
        let config = JourneyConfig {
            key_prefix: String::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
