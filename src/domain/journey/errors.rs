//! Journey-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, JourneyId, QuestionId, ValidationError};

/// Errors surfaced by journey turn operations.
///
/// Every failure maps to exactly one kind so callers can distinguish
/// missing identifiers, terminal-state violations, bad collaborator data,
/// and collaborator outages without string matching.
#[derive(Debug, Clone, Error)]
pub enum JourneyError {
    #[error("Journey not found: {0}")]
    NotFound(JourneyId),

    #[error("Question {question_id} not found in journey {journey_id}")]
    QuestionNotFound {
        journey_id: JourneyId,
        question_id: QuestionId,
    },

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Dependency failure: {0}")]
    Dependency(String),
}

impl JourneyError {
    pub fn not_found(id: JourneyId) -> Self {
        JourneyError::NotFound(id)
    }

    pub fn question_not_found(journey_id: JourneyId, question_id: QuestionId) -> Self {
        JourneyError::QuestionNotFound {
            journey_id,
            question_id,
        }
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        JourneyError::InvalidState(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        JourneyError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn dependency(message: impl Into<String>) -> Self {
        JourneyError::Dependency(message.into())
    }

    /// Machine-readable code for transports and logs.
    pub fn code(&self) -> ErrorCode {
        match self {
            JourneyError::NotFound(_) => ErrorCode::JourneyNotFound,
            JourneyError::QuestionNotFound { .. } => ErrorCode::QuestionNotFound,
            JourneyError::InvalidState(_) => ErrorCode::JourneyTerminal,
            JourneyError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            JourneyError::Dependency(_) => ErrorCode::DependencyFailure,
        }
    }
}

impl From<ValidationError> for JourneyError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        JourneyError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}
