//! QuestionGenerator port - Interface for question content generation.
//!
//! The engine decides *when* to ask and *what to target*; the collaborator
//! behind this port writes the actual question text and attaches the
//! per-option signal mappings.

use async_trait::async_trait;

use crate::domain::confidence::Gap;
use crate::domain::journey::{Demographics, Preferences, QuestionDraft};
use crate::domain::foundation::{JourneyId, SubjectId};

use super::CollaboratorError;

/// Everything the content collaborator needs to write the next question.
#[derive(Debug, Clone)]
pub struct QuestionContext {
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,

    /// Position the generated question will take (1-based).
    pub question_number: u32,

    /// True when the question resolves a low-confidence gap beyond the
    /// standard budget.
    pub is_clarification: bool,

    pub demographics: Demographics,
    pub preferences: Preferences,

    /// Areas the question should target, most severe first.
    pub target_gaps: Vec<Gap>,

    /// Interest categories seen in the last few answers.
    pub recent_interests: Vec<String>,

    /// Motivator types emerging from the last few answers.
    pub emerging_motivators: Vec<String>,

    /// Themes already used in this journey; the collaborator must not
    /// repeat them. Journey-scoped, never shared across journeys.
    pub avoid_themes: Vec<String>,
}

/// Port for question content generation.
///
/// Implementations must return at least one option for structured mode, or
/// none at all for free-text mode. Drafts are validated on construction;
/// a draft that cannot be built is a [`CollaboratorError::Malformed`].
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    /// Generates the next question for the journey.
    async fn generate(&self, context: &QuestionContext) -> Result<QuestionDraft, CollaboratorError>;
}
