//! Journey aggregate entity.
//!
//! A journey is one interview instance. It owns the full turn history
//! (questions, answers, extractions), the derived aggregate profile and
//! confidence snapshot, and the clarification budget. All mutation goes
//! through the sequencer's turn operations; once the status is terminal,
//! every turn mutation is rejected.

use serde::{Deserialize, Serialize};

use crate::domain::confidence::ConfidenceSnapshot;
use crate::domain::foundation::{JourneyId, JourneyStatus, QuestionId, SubjectId, Timestamp};
use crate::domain::profile::CompletedProfile;
use crate::domain::signal::{aggregate, AggregatedProfile, SignalExtraction};

use super::{Answer, Demographics, JourneyError, Preferences, Question};

/// Questions beyond this count are clarifications.
pub const STANDARD_QUESTION_BUDGET: u32 = 15;

/// Upper bound on the clarification counter.
pub const MAX_CLARIFICATIONS: u8 = 3;

/// Journey aggregate - one interview instance.
///
/// # Invariants
///
/// - `answers` and `extractions` are index-aligned
/// - question numbers increase by exactly one per generated question
/// - `clarifications_used` stays within 0..=3
/// - terminal journeys (Completed, Abandoned) reject turn mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    /// Unique identifier for this journey.
    id: JourneyId,

    /// The person being interviewed.
    subject_id: SubjectId,

    /// Current lifecycle status.
    status: JourneyStatus,

    /// Subject demographics captured at start.
    demographics: Demographics,

    /// Interview preferences captured at start.
    preferences: Preferences,

    /// Questions asked, in order.
    questions: Vec<Question>,

    /// Answers received, index-aligned with `extractions`.
    answers: Vec<Answer>,

    /// Signal extractions, index-aligned with `answers`.
    extractions: Vec<SignalExtraction>,

    /// Current aggregated profile derived from the extraction history.
    profile: AggregatedProfile,

    /// Latest confidence snapshot, if any turn has completed.
    confidence: Option<ConfidenceSnapshot>,

    /// Clarifications consumed so far (0..=3).
    clarifications_used: u8,

    /// Question themes already used, to avoid repetition. Journey-scoped
    /// so concurrent journeys never interfere with each other.
    used_themes: Vec<String>,

    /// When the journey started.
    started_at: Timestamp,

    /// When the journey was last updated.
    updated_at: Timestamp,

    /// Final profile, present once synthesis has run.
    completed_profile: Option<CompletedProfile>,
}

impl Journey {
    /// Creates a new in-progress journey with an empty history.
    pub fn new(
        id: JourneyId,
        subject_id: SubjectId,
        demographics: Demographics,
        preferences: Preferences,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            subject_id,
            status: JourneyStatus::InProgress,
            demographics,
            preferences,
            questions: Vec::new(),
            answers: Vec::new(),
            extractions: Vec::new(),
            profile: AggregatedProfile::default(),
            confidence: None,
            clarifications_used: 0,
            used_themes: Vec::new(),
            started_at: now,
            updated_at: now,
            completed_profile: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> JourneyId {
        self.id
    }

    pub fn subject_id(&self) -> &SubjectId {
        &self.subject_id
    }

    pub fn status(&self) -> JourneyStatus {
        self.status
    }

    pub fn demographics(&self) -> &Demographics {
        &self.demographics
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn extractions(&self) -> &[SignalExtraction] {
        &self.extractions
    }

    /// Current aggregated profile (top motivators and interests).
    pub fn aggregated_profile(&self) -> &AggregatedProfile {
        &self.profile
    }

    pub fn confidence(&self) -> Option<&ConfidenceSnapshot> {
        self.confidence.as_ref()
    }

    pub fn clarifications_used(&self) -> u8 {
        self.clarifications_used
    }

    pub fn used_themes(&self) -> &[String] {
        &self.used_themes
    }

    pub fn started_at(&self) -> &Timestamp {
        &self.started_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    pub fn completed_profile(&self) -> Option<&CompletedProfile> {
        self.completed_profile.as_ref()
    }

    /// Number of questions asked so far.
    pub fn questions_asked(&self) -> u32 {
        self.questions.len() as u32
    }

    /// Position the next generated question will take.
    pub fn next_question_number(&self) -> u32 {
        self.questions_asked() + 1
    }

    /// True once the question count has passed the standard budget.
    pub fn in_clarification_phase(&self) -> bool {
        self.questions_asked() > STANDARD_QUESTION_BUDGET
    }

    /// Answers that were not skipped.
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| !a.is_skipped()).count()
    }

    /// Answers that were skipped.
    pub fn skipped_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_skipped()).count()
    }

    /// Fraction of answers that were skips (0.0 with no answers yet).
    pub fn skip_rate(&self) -> f64 {
        if self.answers.is_empty() {
            return 0.0;
        }
        self.skipped_count() as f64 / self.answers.len() as f64
    }

    /// Finds an asked question by id.
    pub fn question(&self, question_id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id() == question_id)
    }

    // ─────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────

    /// Appends a generated question and records its theme.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is terminal
    /// - `ValidationFailed` if the question number is not the next position
    pub fn record_question(&mut self, question: Question) -> Result<(), JourneyError> {
        self.ensure_active()?;

        if question.number() != self.next_question_number() {
            return Err(JourneyError::validation(
                "question_number",
                format!(
                    "expected question number {}, got {}",
                    self.next_question_number(),
                    question.number()
                ),
            ));
        }

        let theme = question.theme().to_string();
        if !self.used_themes.contains(&theme) {
            self.used_themes.push(theme);
        }

        self.questions.push(question);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Appends an answer with its extraction and refreshes the aggregated
    /// profile.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is terminal
    /// - `QuestionNotFound` if the answer references an unknown question
    pub fn record_turn(
        &mut self,
        answer: Answer,
        extraction: SignalExtraction,
    ) -> Result<(), JourneyError> {
        self.ensure_active()?;

        if self.question(answer.question_id()).is_none() {
            return Err(JourneyError::question_not_found(
                self.id,
                answer.question_id(),
            ));
        }

        self.answers.push(answer);
        self.extractions.push(extraction);
        self.profile = aggregate(&self.extractions);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Replaces the confidence snapshot after a turn.
    pub fn set_confidence(&mut self, snapshot: ConfidenceSnapshot) {
        self.confidence = Some(snapshot);
        self.updated_at = Timestamp::now();
    }

    /// Consumes one clarification from the budget.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is terminal or the budget is spent
    pub fn note_clarification(&mut self) -> Result<(), JourneyError> {
        self.ensure_active()?;

        if self.clarifications_used >= MAX_CLARIFICATIONS {
            return Err(JourneyError::invalid_state(
                "clarification budget already exhausted",
            ));
        }

        self.clarifications_used += 1;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attaches the synthesized profile. An in-progress journey moves to
    /// Completed; an abandoned journey keeps its status and just gains the
    /// (partial) profile.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if a profile is already attached
    pub fn attach_profile(&mut self, profile: CompletedProfile) -> Result<(), JourneyError> {
        if self.completed_profile.is_some() {
            return Err(JourneyError::invalid_state(
                "journey already has a synthesized profile",
            ));
        }

        if self.status == JourneyStatus::InProgress {
            self.status = JourneyStatus::Completed;
        }
        self.completed_profile = Some(profile);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Marks the journey abandoned regardless of current confidence.
    /// Idempotent on already-abandoned journeys.
    ///
    /// # Errors
    ///
    /// - `InvalidState` if the journey is completed
    pub fn abandon(&mut self) -> Result<(), JourneyError> {
        match self.status {
            JourneyStatus::InProgress => {
                self.status = JourneyStatus::Abandoned;
                self.updated_at = Timestamp::now();
                Ok(())
            }
            JourneyStatus::Abandoned => Ok(()),
            JourneyStatus::Completed => Err(JourneyError::invalid_state(
                "cannot abandon a completed journey",
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    fn ensure_active(&self) -> Result<(), JourneyError> {
        if self.status.is_active() {
            Ok(())
        } else {
            Err(JourneyError::invalid_state(format!(
                "journey is {}; turn operations are no longer accepted",
                self.status
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::journey::QuestionDraft;
    use crate::domain::profile::{
        CompletedProfile, DimensionScores, InterestClusters, MotivatorTiers, ProfileInsights,
    };

    fn test_journey() -> Journey {
        Journey::new(
            JourneyId::new(),
            SubjectId::new("subject-1").unwrap(),
            Demographics::new(24, None, None, None).unwrap(),
            Preferences::default(),
        )
    }

    fn question(journey: &Journey, theme: &str) -> Question {
        let draft = QuestionDraft::new("What would you pick?", theme, vec![], "note").unwrap();
        Question::from_draft(draft, journey.next_question_number())
    }

    fn test_profile(journey: &Journey) -> CompletedProfile {
        CompletedProfile {
            subject_id: journey.subject_id().clone(),
            journey_id: journey.id(),
            dimension_scores: DimensionScores::zeroed(),
            code: "RIA".to_string(),
            motivators: MotivatorTiers::default(),
            interests: InterestClusters::default(),
            insights: ProfileInsights::default(),
            completed_at: Timestamp::now(),
            questions_answered: 0,
            duration_minutes: 0.0,
            confidence_at_completion: 0.0,
        }
    }

    #[test]
    fn new_journey_is_in_progress_and_empty() {
        let journey = test_journey();
        assert_eq!(journey.status(), JourneyStatus::InProgress);
        assert_eq!(journey.questions_asked(), 0);
        assert!(journey.answers().is_empty());
        assert!(journey.confidence().is_none());
        assert_eq!(journey.clarifications_used(), 0);
    }

    #[test]
    fn record_question_tracks_count_and_theme() {
        let mut journey = test_journey();
        let q = question(&journey, "team_project");
        journey.record_question(q).unwrap();

        assert_eq!(journey.questions_asked(), 1);
        assert_eq!(journey.used_themes(), &["team_project".to_string()]);
    }

    #[test]
    fn record_question_rejects_wrong_number() {
        let mut journey = test_journey();
        let draft = QuestionDraft::new("Question?", "theme", vec![], "").unwrap();
        let wrong = Question::from_draft(draft, 5);

        let result = journey.record_question(wrong);
        assert!(matches!(result, Err(JourneyError::ValidationFailed { .. })));
        assert_eq!(journey.questions_asked(), 0);
    }

    #[test]
    fn duplicate_themes_are_stored_once() {
        let mut journey = test_journey();
        journey.record_question(question(&journey, "travel")).unwrap();
        journey.record_question(question(&journey, "travel")).unwrap();
        assert_eq!(journey.used_themes().len(), 1);
    }

    #[test]
    fn record_turn_appends_aligned_history_and_aggregates() {
        let mut journey = test_journey();
        let q = question(&journey, "theme");
        let question_id = q.id();
        journey.record_question(q).unwrap();

        let extraction = SignalExtraction::skipped();
        journey
            .record_turn(Answer::skipped(question_id), extraction)
            .unwrap();

        assert_eq!(journey.answers().len(), 1);
        assert_eq!(journey.extractions().len(), 1);
        assert_eq!(journey.skipped_count(), 1);
        assert_eq!(journey.answered_count(), 0);
        assert!((journey.skip_rate() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn record_turn_rejects_unknown_question() {
        let mut journey = test_journey();
        let result = journey.record_turn(
            Answer::skipped(QuestionId::new()),
            SignalExtraction::skipped(),
        );
        assert!(matches!(result, Err(JourneyError::QuestionNotFound { .. })));
        assert!(journey.answers().is_empty());
    }

    #[test]
    fn skip_rate_is_zero_with_no_answers() {
        assert_eq!(test_journey().skip_rate(), 0.0);
    }

    #[test]
    fn note_clarification_increments_until_budget() {
        let mut journey = test_journey();
        for expected in 1..=MAX_CLARIFICATIONS {
            journey.note_clarification().unwrap();
            assert_eq!(journey.clarifications_used(), expected);
        }
        assert!(journey.note_clarification().is_err());
        assert_eq!(journey.clarifications_used(), MAX_CLARIFICATIONS);
    }

    #[test]
    fn attach_profile_completes_in_progress_journey() {
        let mut journey = test_journey();
        let profile = test_profile(&journey);
        journey.attach_profile(profile).unwrap();

        assert_eq!(journey.status(), JourneyStatus::Completed);
        assert!(journey.completed_profile().is_some());
    }

    #[test]
    fn attach_profile_keeps_abandoned_status() {
        let mut journey = test_journey();
        journey.abandon().unwrap();
        let profile = test_profile(&journey);
        journey.attach_profile(profile).unwrap();

        assert_eq!(journey.status(), JourneyStatus::Abandoned);
        assert!(journey.completed_profile().is_some());
    }

    #[test]
    fn attach_profile_twice_fails() {
        let mut journey = test_journey();
        let profile = test_profile(&journey);
        journey.attach_profile(profile.clone()).unwrap();
        assert!(journey.attach_profile(profile).is_err());
    }

    #[test]
    fn terminal_journey_rejects_turn_mutations() {
        let mut journey = test_journey();
        let q = question(&journey, "theme");
        let question_id = q.id();
        journey.record_question(q).unwrap();
        journey.abandon().unwrap();

        let next = question(&journey, "other");
        assert!(matches!(
            journey.record_question(next),
            Err(JourneyError::InvalidState(_))
        ));
        assert!(matches!(
            journey.record_turn(Answer::skipped(question_id), SignalExtraction::skipped()),
            Err(JourneyError::InvalidState(_))
        ));
        assert!(matches!(
            journey.note_clarification(),
            Err(JourneyError::InvalidState(_))
        ));
    }

    #[test]
    fn abandon_is_idempotent_but_completed_cannot_abandon() {
        let mut journey = test_journey();
        journey.abandon().unwrap();
        assert!(journey.abandon().is_ok());

        let mut journey = test_journey();
        let profile = test_profile(&journey);
        journey.attach_profile(profile).unwrap();
        assert!(journey.abandon().is_err());
    }

    #[test]
    fn clarification_phase_starts_past_the_standard_budget() {
        let mut journey = test_journey();
        for _ in 0..STANDARD_QUESTION_BUDGET {
            journey.record_question(question(&journey, "t")).unwrap();
        }
        assert!(!journey.in_clarification_phase());
        journey.record_question(question(&journey, "t")).unwrap();
        assert!(journey.in_clarification_phase());
    }

    #[test]
    fn journey_serialization_round_trip() {
        let mut journey = test_journey();
        journey.record_question(question(&journey, "theme")).unwrap();

        let json = serde_json::to_string(&journey).unwrap();
        let restored: Journey = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, journey);
    }
}
