//! SignalExtractor port - Interface for free-text semantic extraction.
//!
//! Only free-text answers go through this port. Answers that select a known
//! option are resolved in-crate from the option's metadata, deterministically
//! and without any collaborator call.

use async_trait::async_trait;

use crate::domain::journey::Question;
use crate::domain::signal::SignalExtraction;

use super::CollaboratorError;

/// Port for mapping raw answer text to motivator/interest signals.
///
/// Implementations are external and non-deterministic. Returned extractions
/// are already validated: an implementation that cannot build valid signal
/// records must fail with [`CollaboratorError::Malformed`] rather than
/// return coerced values.
#[async_trait]
pub trait SignalExtractor: Send + Sync {
    /// Extracts signals from a free-text answer to the given question.
    async fn extract(
        &self,
        answer_text: &str,
        question: &Question,
    ) -> Result<SignalExtraction, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn SignalExtractor) {}
}
