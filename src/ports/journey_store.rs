//! JourneyStore port - Interface for journey state persistence.
//!
//! The store is a TTL-bounded cache, not durable storage. Every write
//! carries an expiry; a journey idle for longer than its TTL is gone, and
//! the next turn on it returns NotFound. Integrators who need durability
//! must back an implementation with durable storage and treat the TTL as a
//! secondary caching concern.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::foundation::JourneyId;
use crate::domain::journey::Journey;

/// Default expiry for stored journeys: one hour of inactivity.
pub const DEFAULT_STATE_TTL: Duration = Duration::from_secs(3600);

/// Errors that can occur during journey store operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to serialize journey: {0}")]
    Serialization(String),

    #[error("Failed to deserialize journey: {0}")]
    Deserialization(String),

    #[error("Store connection error: {0}")]
    Connection(String),
}

/// Port for loading and saving journey state.
#[async_trait]
pub trait JourneyStore: Send + Sync {
    /// Loads a journey, returning `None` when the id is unknown or the
    /// entry has expired.
    async fn get(&self, journey_id: &JourneyId) -> Result<Option<Journey>, StoreError>;

    /// Saves a journey with the given expiry, replacing any previous entry
    /// and resetting its TTL.
    async fn put_with_expiry(&self, journey: &Journey, ttl: Duration) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn JourneyStore) {}

    #[test]
    fn default_ttl_is_one_hour() {
        assert_eq!(DEFAULT_STATE_TTL, Duration::from_secs(3600));
    }

    #[test]
    fn store_error_displays_cause() {
        let err = StoreError::Connection("refused".to_string());
        assert!(err.to_string().contains("refused"));
    }
}
