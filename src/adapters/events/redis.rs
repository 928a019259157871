//! Redis pub/sub event publisher for production deployments.
//!
//! Each envelope is serialized to JSON and published on a channel named
//! after its event type. Delivery is pub/sub semantics: subscribers absent
//! at publish time miss the event, which matches the best-effort contract.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::EventEnvelope;
use crate::ports::{EventPublisher, PublishError};

/// Default channel prefix for lifecycle events.
pub const DEFAULT_CHANNEL_PREFIX: &str = "compass:events:";

/// Redis pub/sub event publisher.
#[derive(Clone)]
pub struct RedisEventPublisher {
    conn: MultiplexedConnection,
    channel_prefix: String,
}

impl RedisEventPublisher {
    /// Creates a publisher over an established connection.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            channel_prefix: DEFAULT_CHANNEL_PREFIX.to_string(),
        }
    }

    /// Overrides the channel prefix.
    pub fn with_channel_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.channel_prefix = prefix.into();
        self
    }

    fn channel_for(&self, event_type: &str) -> String {
        event_channel(&self.channel_prefix, event_type)
    }
}

fn event_channel(prefix: &str, event_type: &str) -> String {
    format!("{}{}", prefix, event_type)
}

#[async_trait]
impl EventPublisher for RedisEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError> {
        let payload =
            serde_json::to_string(&event).map_err(|e| PublishError(e.to_string()))?;

        let mut conn = self.conn.clone();
        conn.publish::<_, _, ()>(self.channel_for(&event.event_type), payload)
            .await
            .map_err(|e| PublishError(e.to_string()))?;
        Ok(())
    }
}
