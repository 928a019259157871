//! EventPublisher port - Interface for lifecycle notification delivery.
//!
//! Publication is best-effort and fire-and-forget: the sequencer logs
//! failures and moves on, and consumers must tolerate duplicates and gaps.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::EventEnvelope;

/// Error raised when an event cannot be handed to the transport.
#[derive(Debug, Clone, Error)]
#[error("Failed to publish event: {0}")]
pub struct PublishError(pub String);

/// Port for publishing lifecycle events.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event envelope.
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[test]
    fn publish_error_displays_reason() {
        let err = PublishError("connection reset".to_string());
        assert!(err.to_string().contains("connection reset"));
    }
}
