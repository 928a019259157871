//! Answer records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, Timestamp};

/// One answer (or skip) to an asked question. Index-aligned with the
/// journey's extraction list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    question_id: QuestionId,
    text: Option<String>,
    skipped: bool,
    response_time_secs: Option<u32>,
    answered_at: Timestamp,
}

impl Answer {
    /// Records an answered question.
    pub fn answered(
        question_id: QuestionId,
        text: impl Into<String>,
        response_time_secs: Option<u32>,
    ) -> Self {
        Self {
            question_id,
            text: Some(text.into()),
            skipped: false,
            response_time_secs,
            answered_at: Timestamp::now(),
        }
    }

    /// Records a skipped question.
    pub fn skipped(question_id: QuestionId) -> Self {
        Self {
            question_id,
            text: None,
            skipped: true,
            response_time_secs: None,
            answered_at: Timestamp::now(),
        }
    }

    pub fn question_id(&self) -> QuestionId {
        self.question_id
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn is_skipped(&self) -> bool {
        self.skipped
    }

    pub fn response_time_secs(&self) -> Option<u32> {
        self.response_time_secs
    }

    pub fn answered_at(&self) -> &Timestamp {
        &self.answered_at
    }
}
