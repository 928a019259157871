//! Ports - interfaces to external collaborators.
//!
//! The engine consumes well-typed data from, and hands well-typed results
//! to, these interfaces. Everything behind them (LLM calls, Redis, pub/sub
//! transports) lives in the adapters layer or outside the crate entirely.

mod event_publisher;
mod insight_generator;
mod journey_store;
mod question_generator;
mod signal_extractor;

pub use event_publisher::{EventPublisher, PublishError};
pub use insight_generator::{InsightContext, InsightGenerator};
pub use journey_store::{JourneyStore, StoreError, DEFAULT_STATE_TTL};
pub use question_generator::{QuestionContext, QuestionGenerator};
pub use signal_extractor::SignalExtractor;

use thiserror::Error;

/// Errors returned by content collaborators (question generation, signal
/// extraction, insight generation).
#[derive(Debug, Clone, Error)]
pub enum CollaboratorError {
    /// The collaborator could not be reached or failed outright.
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with data that fails validation.
    /// Malformed payloads are rejected here, never coerced into defaults.
    #[error("Collaborator returned malformed data: {0}")]
    Malformed(String),
}
