//! Journey lifecycle events.
//!
//! Published best-effort after each persisted turn; consumers must tolerate
//! duplicates and gaps.

use serde::{Deserialize, Serialize};

use crate::domain::decision::DecisionKind;
use crate::domain::foundation::{EventId, JourneyId, QuestionId, SubjectId, Timestamp};
use crate::domain_event;

/// A new journey was created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyStarted {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,
    pub started_at: Timestamp,
}

domain_event!(
    JourneyStarted,
    event_type = "journey.started",
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = started_at,
    event_id = event_id
);

/// A question was generated and appended to a journey.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionGenerated {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,
    pub question_id: QuestionId,
    pub question_number: u32,
    pub is_clarification: bool,
    pub occurred_at: Timestamp,
}

domain_event!(
    QuestionGenerated,
    event_type = "question.generated",
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = occurred_at,
    event_id = event_id
);

/// An answer was processed and a decision produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseProcessed {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,
    pub question_id: QuestionId,
    pub skipped: bool,
    pub decision: DecisionKind,
    pub overall_confidence: f64,
    pub occurred_at: Timestamp,
}

domain_event!(
    ResponseProcessed,
    event_type = "response.processed",
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A journey finished with a synthesized profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyCompleted {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,
    pub confidence_at_completion: f64,
    pub duration_minutes: f64,
    pub occurred_at: Timestamp,
}

domain_event!(
    JourneyCompleted,
    event_type = "journey.completed",
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A journey ended without a full profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyAbandoned {
    pub event_id: EventId,
    pub journey_id: JourneyId,
    pub subject_id: SubjectId,
    pub questions_answered: usize,
    pub occurred_at: Timestamp,
}

domain_event!(
    JourneyAbandoned,
    event_type = "journey.abandoned",
    aggregate_id = journey_id,
    aggregate_type = "Journey",
    occurred_at = occurred_at,
    event_id = event_id
);
