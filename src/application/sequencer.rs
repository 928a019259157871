//! Journey sequencer - drives one interview turn end-to-end.
//!
//! Per turn: load state under the journey's lock, obtain the next question
//! or accept an answer, run extraction, feed the aggregator, estimator, and
//! decision machine, persist exactly once, then emit lifecycle events. A
//! turn either completes and persists or fails without touching the stored
//! state; event publication is best-effort and never fails a turn.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::confidence::ConfidenceEstimator;
use crate::domain::decision::{Decision, DecisionEngine, DecisionKind};
use crate::domain::foundation::{
    EventEnvelope, EventId, JourneyId, QuestionId, SerializableDomainEvent, SubjectId, Timestamp,
};
use crate::domain::journey::{
    Answer, Demographics, Journey, JourneyAbandoned, JourneyCompleted, JourneyError,
    JourneyStarted, Preferences, Question, QuestionGenerated, ResponseProcessed,
    STANDARD_QUESTION_BUDGET,
};
use crate::domain::profile::{CompletedProfile, ProfileSynthesizer};
use crate::domain::signal::SignalExtraction;
use crate::ports::{
    EventPublisher, InsightGenerator, JourneyStore, QuestionContext, QuestionGenerator,
    SignalExtractor, DEFAULT_STATE_TTL,
};

use super::JourneyLocks;

/// Extractions examined when summarizing recent interests for the question
/// generator.
const RECENT_INTEREST_WINDOW: usize = 3;

/// Extractions examined when summarizing emerging motivators.
const EMERGING_MOTIVATOR_WINDOW: usize = 2;

/// An inbound answer to a question.
#[derive(Debug, Clone)]
pub enum AnswerInput {
    /// The subject answered, either by option id or free text.
    Text {
        text: String,
        response_time_secs: Option<u32>,
    },
    /// The subject skipped the question.
    Skip,
}

impl AnswerInput {
    /// Convenience constructor for a plain text answer.
    pub fn text(text: impl Into<String>) -> Self {
        AnswerInput::Text {
            text: text.into(),
            response_time_secs: None,
        }
    }
}

/// Drives interview turns against the stored journey state.
///
/// Operations on the same journey are serialized through a per-journey
/// lock; different journeys proceed fully in parallel.
pub struct JourneySequencer {
    store: Arc<dyn JourneyStore>,
    question_generator: Arc<dyn QuestionGenerator>,
    signal_extractor: Arc<dyn SignalExtractor>,
    insight_generator: Arc<dyn InsightGenerator>,
    event_publisher: Arc<dyn EventPublisher>,
    estimator: ConfidenceEstimator,
    engine: DecisionEngine,
    synthesizer: ProfileSynthesizer,
    locks: JourneyLocks,
    state_ttl: Duration,
}

impl JourneySequencer {
    pub fn new(
        store: Arc<dyn JourneyStore>,
        question_generator: Arc<dyn QuestionGenerator>,
        signal_extractor: Arc<dyn SignalExtractor>,
        insight_generator: Arc<dyn InsightGenerator>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            question_generator,
            signal_extractor,
            insight_generator,
            event_publisher,
            estimator: ConfidenceEstimator::new(),
            engine: DecisionEngine::new(),
            synthesizer: ProfileSynthesizer::new(),
            locks: JourneyLocks::new(),
            state_ttl: DEFAULT_STATE_TTL,
        }
    }

    /// Overrides the journey state TTL.
    pub fn with_state_ttl(mut self, ttl: Duration) -> Self {
        self.state_ttl = ttl;
        self
    }

    /// Starts a journey and generates its first question.
    pub async fn start(
        &self,
        subject_id: SubjectId,
        demographics: Demographics,
        preferences: Preferences,
    ) -> Result<Journey, JourneyError> {
        let mut journey = Journey::new(
            JourneyId::new(),
            subject_id,
            demographics,
            preferences,
        );

        let question = self.generate_and_record(&mut journey).await?;
        self.save(&journey).await?;

        info!(journey_id = %journey.id(), "journey started");

        let started = JourneyStarted {
            event_id: EventId::new(),
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            started_at: *journey.started_at(),
        };
        self.publish(started.to_envelope(), &journey).await;
        self.publish_question_generated(&journey, &question).await;

        Ok(journey)
    }

    /// Generates the next question for an in-progress journey.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the journey is unknown or expired
    /// - `InvalidState` if the journey is terminal
    /// - `Dependency` if the question collaborator or store fails
    pub async fn next_question(&self, journey_id: JourneyId) -> Result<Question, JourneyError> {
        let lock = self.locks.lock_for(journey_id);
        let _guard = lock.lock().await;

        let mut journey = self.load(journey_id).await?;
        self.ensure_active(&journey)?;

        let question = self.generate_and_record(&mut journey).await?;
        self.save(&journey).await?;
        self.publish_question_generated(&journey, &question).await;

        Ok(question)
    }

    /// Applies an answer (or skip) and decides how the journey proceeds.
    ///
    /// On a Complete decision the profile is synthesized and the journey
    /// frozen; on SavePartial the journey is marked abandoned. Either way
    /// the updated state is persisted exactly once, after all computation
    /// has succeeded.
    ///
    /// # Errors
    ///
    /// - `NotFound` / `QuestionNotFound` for unknown identifiers
    /// - `InvalidState` if the journey is terminal
    /// - `Dependency` if a collaborator or the store fails
    pub async fn respond(
        &self,
        journey_id: JourneyId,
        question_id: QuestionId,
        input: AnswerInput,
    ) -> Result<Decision, JourneyError> {
        let lock = self.locks.lock_for(journey_id);
        let _guard = lock.lock().await;

        let mut journey = self.load(journey_id).await?;
        self.ensure_active(&journey)?;

        let question = journey
            .question(question_id)
            .cloned()
            .ok_or(JourneyError::QuestionNotFound {
                journey_id,
                question_id,
            })?;

        let (answer, extraction) = self.build_turn(&question, input).await?;
        let skipped = answer.is_skipped();
        journey.record_turn(answer, extraction)?;

        let snapshot = self.estimator.estimate(
            journey.extractions(),
            journey.skipped_count(),
            journey.answers().len(),
            journey.questions_asked(),
        );
        journey.set_confidence(snapshot.clone());

        let decision = self.engine.decide(
            journey.questions_asked(),
            journey.clarifications_used(),
            journey.skip_rate(),
            snapshot,
        );
        debug!(
            journey_id = %journey.id(),
            decision = %decision.kind,
            confidence = decision.confidence.overall.value(),
            "turn decided"
        );

        match decision.kind {
            DecisionKind::Continue => {}
            DecisionKind::Clarify => journey.note_clarification()?,
            DecisionKind::Complete => {
                let profile = self.synthesizer
                    .synthesize(&journey, self.insight_generator.as_ref())
                    .await?;
                journey.attach_profile(profile)?;
            }
            DecisionKind::SavePartial => journey.abandon()?,
        }

        self.save(&journey).await?;

        let processed = ResponseProcessed {
            event_id: EventId::new(),
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            question_id,
            skipped,
            decision: decision.kind,
            overall_confidence: decision.confidence.overall.value(),
            occurred_at: Timestamp::now(),
        };
        self.publish(processed.to_envelope(), &journey).await;

        match decision.kind {
            DecisionKind::Complete => {
                self.publish_completed(&journey).await;
                self.locks.release(&journey_id);
            }
            DecisionKind::SavePartial => {
                self.publish_abandoned(&journey).await;
                self.locks.release(&journey_id);
            }
            _ => {}
        }

        Ok(decision)
    }

    /// Synthesizes (or returns the already-synthesized) completed profile.
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the journey is unknown or expired
    /// - `Dependency` if the insight collaborator or store fails
    pub async fn complete(&self, journey_id: JourneyId) -> Result<CompletedProfile, JourneyError> {
        let lock = self.locks.lock_for(journey_id);
        let _guard = lock.lock().await;

        let mut journey = self.load(journey_id).await?;

        if let Some(profile) = journey.completed_profile() {
            return Ok(profile.clone());
        }

        let profile = self.synthesizer
            .synthesize(&journey, self.insight_generator.as_ref())
            .await?;
        journey.attach_profile(profile.clone())?;
        self.save(&journey).await?;

        self.publish_completed(&journey).await;
        self.locks.release(&journey_id);

        Ok(profile)
    }

    /// Marks the journey abandoned regardless of current confidence.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the journey is unknown or expired
    /// - `InvalidState` if the journey is already completed
    pub async fn abandon(&self, journey_id: JourneyId) -> Result<Journey, JourneyError> {
        let lock = self.locks.lock_for(journey_id);
        let _guard = lock.lock().await;

        let mut journey = self.load(journey_id).await?;
        journey.abandon()?;
        self.save(&journey).await?;

        info!(journey_id = %journey.id(), "journey abandoned");
        self.publish_abandoned(&journey).await;
        self.locks.release(&journey_id);

        Ok(journey)
    }

    /// Read-only fetch of the current journey state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the journey is unknown or expired
    pub async fn journey(&self, journey_id: JourneyId) -> Result<Journey, JourneyError> {
        self.load(journey_id).await
    }

    // ─────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────

    async fn load(&self, journey_id: JourneyId) -> Result<Journey, JourneyError> {
        self.store
            .get(&journey_id)
            .await
            .map_err(|e| JourneyError::dependency(format!("journey store: {}", e)))?
            .ok_or(JourneyError::NotFound(journey_id))
    }

    async fn save(&self, journey: &Journey) -> Result<(), JourneyError> {
        self.store
            .put_with_expiry(journey, self.state_ttl)
            .await
            .map_err(|e| JourneyError::dependency(format!("journey store: {}", e)))
    }

    fn ensure_active(&self, journey: &Journey) -> Result<(), JourneyError> {
        if journey.status().is_terminal() {
            return Err(JourneyError::invalid_state(format!(
                "journey is {}; turn operations are no longer accepted",
                journey.status()
            )));
        }
        Ok(())
    }

    /// Resolves the answer input into the recorded answer and extraction.
    ///
    /// A skip is deterministic and free. An answer matching a known option
    /// id resolves from the option metadata, also deterministically. Only
    /// free text reaches the extraction collaborator.
    async fn build_turn(
        &self,
        question: &Question,
        input: AnswerInput,
    ) -> Result<(Answer, SignalExtraction), JourneyError> {
        match input {
            AnswerInput::Skip => Ok((
                Answer::skipped(question.id()),
                SignalExtraction::skipped(),
            )),
            AnswerInput::Text {
                text,
                response_time_secs,
            } => {
                let extraction = match question.option_matching(&text) {
                    Some(option) => option.to_extraction(),
                    None => self
                        .signal_extractor
                        .extract(&text, question)
                        .await
                        .map_err(|e| {
                            JourneyError::dependency(format!("signal extractor: {}", e))
                        })?,
                };
                Ok((
                    Answer::answered(question.id(), text, response_time_secs),
                    extraction,
                ))
            }
        }
    }

    async fn generate_and_record(&self, journey: &mut Journey) -> Result<Question, JourneyError> {
        let context = self.question_context(journey);
        let draft = self
            .question_generator
            .generate(&context)
            .await
            .map_err(|e| JourneyError::dependency(format!("question generator: {}", e)))?;

        let question = Question::from_draft(draft, journey.next_question_number());
        journey.record_question(question.clone())?;
        Ok(question)
    }

    fn question_context(&self, journey: &Journey) -> QuestionContext {
        let extractions = journey.extractions();

        let mut recent_interests = Vec::new();
        for extraction in extractions.iter().rev().take(RECENT_INTEREST_WINDOW) {
            for interest in &extraction.interests {
                let category = interest.category().to_string();
                if !recent_interests.contains(&category) {
                    recent_interests.push(category);
                }
            }
        }
        recent_interests.truncate(3);

        let mut emerging_motivators = Vec::new();
        for extraction in extractions.iter().rev().take(EMERGING_MOTIVATOR_WINDOW) {
            for motivator in &extraction.motivators {
                let name = motivator.motivator().to_string();
                if !emerging_motivators.contains(&name) {
                    emerging_motivators.push(name);
                }
            }
        }
        emerging_motivators.truncate(2);

        QuestionContext {
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            question_number: journey.next_question_number(),
            is_clarification: journey.next_question_number() > STANDARD_QUESTION_BUDGET,
            demographics: journey.demographics().clone(),
            preferences: journey.preferences().clone(),
            target_gaps: journey
                .confidence()
                .map(|c| c.gaps_by_severity().into_iter().cloned().collect())
                .unwrap_or_default(),
            recent_interests,
            emerging_motivators,
            avoid_themes: journey.used_themes().to_vec(),
        }
    }

    /// Best-effort publish: failures are logged, never surfaced.
    async fn publish(&self, envelope: EventEnvelope, journey: &Journey) {
        let envelope = envelope.with_subject_id(journey.subject_id().to_string());
        if let Err(err) = self.event_publisher.publish(envelope).await {
            warn!(journey_id = %journey.id(), error = %err, "event publish failed");
        }
    }

    async fn publish_question_generated(&self, journey: &Journey, question: &Question) {
        let event = QuestionGenerated {
            event_id: EventId::new(),
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            question_id: question.id(),
            question_number: question.number(),
            is_clarification: question.number() > STANDARD_QUESTION_BUDGET,
            occurred_at: Timestamp::now(),
        };
        self.publish(event.to_envelope(), journey).await;
    }

    async fn publish_completed(&self, journey: &Journey) {
        let (confidence, duration) = journey
            .completed_profile()
            .map(|p| (p.confidence_at_completion, p.duration_minutes))
            .unwrap_or((0.0, 0.0));

        let event = JourneyCompleted {
            event_id: EventId::new(),
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            confidence_at_completion: confidence,
            duration_minutes: duration,
            occurred_at: Timestamp::now(),
        };
        self.publish(event.to_envelope(), journey).await;
    }

    async fn publish_abandoned(&self, journey: &Journey) {
        let event = JourneyAbandoned {
            event_id: EventId::new(),
            journey_id: journey.id(),
            subject_id: journey.subject_id().clone(),
            questions_answered: journey.answers().len(),
            occurred_at: Timestamp::now(),
        };
        self.publish(event.to_envelope(), journey).await;
    }
}
