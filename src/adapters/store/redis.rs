//! Redis-backed journey store for production deployments.
//!
//! Journeys are stored as JSON strings under a prefixed key with `SET ... EX`,
//! so Redis itself enforces the TTL contract: an idle journey disappears
//! when its expiry lapses.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;

use crate::domain::foundation::JourneyId;
use crate::domain::journey::Journey;
use crate::ports::{JourneyStore, StoreError};

/// Default key prefix for journey entries.
pub const DEFAULT_KEY_PREFIX: &str = "compass:journey:";

/// Redis-backed journey store.
#[derive(Clone)]
pub struct RedisJourneyStore {
    conn: MultiplexedConnection,
    key_prefix: String,
}

impl RedisJourneyStore {
    /// Creates a store over an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            key_prefix: DEFAULT_KEY_PREFIX.to_string(),
        }
    }

    /// Overrides the key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    fn key_for(&self, journey_id: &JourneyId) -> String {
        journey_key(&self.key_prefix, journey_id)
    }
}

fn journey_key(prefix: &str, journey_id: &JourneyId) -> String {
    format!("{}{}", prefix, journey_id)
}

#[async_trait]
impl JourneyStore for RedisJourneyStore {
    async fn get(&self, journey_id: &JourneyId) -> Result<Option<Journey>, StoreError> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn
            .get(self.key_for(journey_id))
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        match value {
            Some(json) => {
                let journey = serde_json::from_str(&json)
                    .map_err(|e| StoreError::Deserialization(e.to_string()))?;
                Ok(Some(journey))
            }
            None => Ok(None),
        }
    }

    async fn put_with_expiry(&self, journey: &Journey, ttl: Duration) -> Result<(), StoreError> {
        let json = serde_json::to_string(journey)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let mut conn = self.conn.clone();
        // SET with EX so the entry and its TTL land atomically.
        conn.set_ex::<_, _, ()>(self.key_for(&journey.id()), json, ttl.as_secs())
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Key construction is the only logic that runs without a live Redis;
    // connection behavior is covered by integration environments.
    #[test]
    fn key_includes_prefix_and_journey_id() {
        let journey_id = JourneyId::new();
        let key = journey_key(DEFAULT_KEY_PREFIX, &journey_id);
        assert!(key.starts_with("compass:journey:"));
        assert!(key.ends_with(&journey_id.to_string()));
    }

    #[test]
    fn custom_prefix_replaces_default() {
        let journey_id = JourneyId::new();
        let key = journey_key("test:", &journey_id);
        assert_eq!(key, format!("test:{}", journey_id));
    }
}
