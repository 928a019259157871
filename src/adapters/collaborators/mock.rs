//! Mock collaborator implementations for testing.
//!
//! Deterministic stand-ins for the external question, extraction, and
//! insight collaborators. Each supports scripted responses, call capture
//! for assertions, and failure injection.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::domain::foundation::Dimension;
use crate::domain::journey::{
    OptionDimension, OptionInterest, OptionMotivator, Question, QuestionDraft, QuestionOption,
};
use crate::domain::profile::ProfileInsights;
use crate::domain::signal::{
    DimensionSignal, InterestSignal, MotivatorSignal, ResponseQuality, SignalExtraction,
};
use crate::ports::{
    CollaboratorError, InsightContext, InsightGenerator, QuestionContext, QuestionGenerator,
    SignalExtractor,
};

/// Scripted question generator.
///
/// Hands out queued drafts first, then falls back to generated two-option
/// drafts with unique themes.
pub struct MockQuestionGenerator {
    scripted: Mutex<VecDeque<QuestionDraft>>,
    contexts: Mutex<Vec<QuestionContext>>,
    theme_counter: AtomicU32,
    fail: bool,
}

impl MockQuestionGenerator {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            contexts: Mutex::new(Vec::new()),
            theme_counter: AtomicU32::new(0),
            fail: false,
        }
    }

    /// A generator whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Queues a draft to return before falling back to defaults.
    pub fn script(&self, draft: QuestionDraft) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(draft);
    }

    /// Contexts received so far, for assertions.
    pub fn received_contexts(&self) -> Vec<QuestionContext> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// A default structured draft with strong option metadata.
    pub fn default_draft(theme: &str) -> QuestionDraft {
        let option_a = QuestionOption::new(
            "A",
            "Spend the weekend building a gadget in your workshop",
            vec![OptionMotivator::new("autonomy", 0.8).unwrap()],
            vec![OptionInterest::new("technology", None, 0.9).unwrap()],
            vec![OptionDimension::new(Dimension::Realistic, 0.8).unwrap()],
            7.0,
        )
        .unwrap();
        let option_b = QuestionOption::new(
            "B",
            "Organize a fundraiser with friends for a local cause",
            vec![OptionMotivator::new("purpose", 0.9).unwrap()],
            vec![OptionInterest::new("social_impact", None, 0.8).unwrap()],
            vec![OptionDimension::new(Dimension::Social, 0.8).unwrap()],
            7.0,
        )
        .unwrap();

        QuestionDraft::new(
            "Your free weekend opens up unexpectedly. What do you do?",
            theme,
            vec![option_a, option_b],
            "Contrasting hands-on and people-centered preferences",
        )
        .expect("default draft is well-formed")
    }
}

impl Default for MockQuestionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuestionGenerator for MockQuestionGenerator {
    async fn generate(
        &self,
        context: &QuestionContext,
    ) -> Result<QuestionDraft, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Unavailable(
                "question generator offline".to_string(),
            ));
        }

        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(context.clone());

        if let Some(draft) = self
            .scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            return Ok(draft);
        }

        let n = self.theme_counter.fetch_add(1, Ordering::Relaxed);
        Ok(Self::default_draft(&format!("default-theme-{}", n)))
    }
}

/// Scripted free-text signal extractor.
pub struct MockSignalExtractor {
    scripted: Mutex<VecDeque<SignalExtraction>>,
    calls: Mutex<Vec<String>>,
    fail: bool,
}

impl MockSignalExtractor {
    pub fn new() -> Self {
        Self {
            scripted: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// An extractor whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Queues an extraction to return before falling back to the default.
    pub fn script(&self, extraction: SignalExtraction) {
        self.scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(extraction);
    }

    /// Answer texts received so far, for assertions.
    pub fn received_answers(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// A plausible medium-quality free-text extraction.
    pub fn default_extraction() -> SignalExtraction {
        SignalExtraction::new(
            vec![DimensionSignal::new(Dimension::Investigative, 6.0, 60.0).unwrap()],
            vec![MotivatorSignal::new("growth", 6.0, "mentions wanting to learn", 60.0).unwrap()],
            vec![InterestSignal::new("science", "research work", 6.0).unwrap()],
            ResponseQuality::Medium,
            vec![],
            vec![],
        )
    }
}

impl Default for MockSignalExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalExtractor for MockSignalExtractor {
    async fn extract(
        &self,
        answer_text: &str,
        _question: &Question,
    ) -> Result<SignalExtraction, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Unavailable(
                "signal extractor offline".to_string(),
            ));
        }

        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(answer_text.to_string());

        if let Some(extraction) = self
            .scripted
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
        {
            return Ok(extraction);
        }

        Ok(Self::default_extraction())
    }
}

/// Canned insight generator.
pub struct MockInsightGenerator {
    contexts: Mutex<Vec<InsightContext>>,
    fail: bool,
}

impl MockInsightGenerator {
    pub fn new() -> Self {
        Self {
            contexts: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// A generator whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Contexts received so far, for assertions.
    pub fn received_contexts(&self) -> Vec<InsightContext> {
        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The canned insight payload every successful call returns.
    pub fn canned_insights() -> ProfileInsights {
        ProfileInsights {
            summary: "A hands-on explorer who values independence.".to_string(),
            strengths: vec![
                "practical problem solving".to_string(),
                "self-direction".to_string(),
            ],
            ideal_environment: "Small teams with room to experiment.".to_string(),
            career_direction: "Roles that combine building with investigation.".to_string(),
            unique_combinations: vec!["technical depth with social awareness".to_string()],
            blind_spots: vec!["may under-invest in routine collaboration".to_string()],
        }
    }
}

impl Default for MockInsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InsightGenerator for MockInsightGenerator {
    async fn narrate(
        &self,
        context: &InsightContext,
    ) -> Result<ProfileInsights, CollaboratorError> {
        if self.fail {
            return Err(CollaboratorError::Unavailable(
                "insight generator offline".to_string(),
            ));
        }

        self.contexts
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(context.clone());

        Ok(Self::canned_insights())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{JourneyId, SubjectId};
    use crate::domain::journey::{Demographics, Preferences};

    fn context() -> QuestionContext {
        QuestionContext {
            journey_id: JourneyId::new(),
            subject_id: SubjectId::new("subject-1").unwrap(),
            question_number: 1,
            is_clarification: false,
            demographics: Demographics::new(22, None, None, None).unwrap(),
            preferences: Preferences::default(),
            target_gaps: vec![],
            recent_interests: vec![],
            emerging_motivators: vec![],
            avoid_themes: vec![],
        }
    }

    #[tokio::test]
    async fn question_generator_returns_scripted_drafts_first() {
        let generator = MockQuestionGenerator::new();
        generator.script(MockQuestionGenerator::default_draft("scripted"));

        let draft = generator.generate(&context()).await.unwrap();
        assert_eq!(draft.theme(), "scripted");

        let fallback = generator.generate(&context()).await.unwrap();
        assert!(fallback.theme().starts_with("default-theme-"));
    }

    #[tokio::test]
    async fn question_generator_produces_unique_default_themes() {
        let generator = MockQuestionGenerator::new();
        let first = generator.generate(&context()).await.unwrap();
        let second = generator.generate(&context()).await.unwrap();
        assert_ne!(first.theme(), second.theme());
    }

    #[tokio::test]
    async fn question_generator_captures_contexts() {
        let generator = MockQuestionGenerator::new();
        generator.generate(&context()).await.unwrap();
        assert_eq!(generator.received_contexts().len(), 1);
    }

    #[tokio::test]
    async fn failing_question_generator_errors() {
        let generator = MockQuestionGenerator::failing();
        assert!(generator.generate(&context()).await.is_err());
    }

    #[tokio::test]
    async fn extractor_returns_scripted_then_default() {
        let extractor = MockSignalExtractor::new();
        extractor.script(SignalExtraction::skipped());

        let question = Question::from_draft(
            QuestionDraft::new("Tell me more.", "t", vec![], "").unwrap(),
            1,
        );

        let scripted = extractor.extract("first answer", &question).await.unwrap();
        assert!(scripted.is_empty());

        let fallback = extractor.extract("second answer", &question).await.unwrap();
        assert!(!fallback.is_empty());
        assert_eq!(
            extractor.received_answers(),
            vec!["first answer", "second answer"]
        );
    }

    #[tokio::test]
    async fn failing_insight_generator_errors() {
        let generator = MockInsightGenerator::failing();
        let context = InsightContext {
            dimension_scores: Default::default(),
            code: "RIA".to_string(),
            motivators: Default::default(),
            interests: Default::default(),
            questions_answered: 12,
            quality_summary: "High quality responses overall".to_string(),
        };
        assert!(generator.narrate(&context).await.is_err());
    }
}
