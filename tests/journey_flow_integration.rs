//! End-to-end journey flows through the sequencer with in-memory adapters.

use std::sync::Arc;

use career_compass::adapters::collaborators::{
    MockInsightGenerator, MockQuestionGenerator, MockSignalExtractor,
};
use career_compass::adapters::events::InMemoryEventBus;
use career_compass::adapters::store::InMemoryJourneyStore;
use career_compass::application::{AnswerInput, JourneySequencer};
use career_compass::domain::decision::DecisionKind;
use career_compass::domain::foundation::{Dimension, JourneyStatus, SubjectId};
use career_compass::domain::journey::{
    Demographics, JourneyError, Preferences, QuestionDraft,
};
use career_compass::domain::signal::{
    DimensionSignal, InterestSignal, MotivatorSignal, ResponseQuality, SignalExtraction,
};

struct Harness {
    sequencer: JourneySequencer,
    bus: Arc<InMemoryEventBus>,
    question_generator: Arc<MockQuestionGenerator>,
    signal_extractor: Arc<MockSignalExtractor>,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryJourneyStore::new());
    let bus = Arc::new(InMemoryEventBus::new());
    let question_generator = Arc::new(MockQuestionGenerator::new());
    let signal_extractor = Arc::new(MockSignalExtractor::new());
    let sequencer = JourneySequencer::new(
        store,
        question_generator.clone(),
        signal_extractor.clone(),
        Arc::new(MockInsightGenerator::new()),
        bus.clone(),
    );
    Harness {
        sequencer,
        bus,
        question_generator,
        signal_extractor,
    }
}

fn subject() -> SubjectId {
    SubjectId::new("subject-integration").unwrap()
}

fn demographics() -> Demographics {
    Demographics::new(26, None, None, None).unwrap()
}

/// An extraction rich enough that twelve of them push overall confidence
/// past the early-completion threshold: every dimension covered with high
/// confidence, six distinct motivators, five interest categories.
fn rich_extraction() -> SignalExtraction {
    let dimension_signals = vec![
        DimensionSignal::new(Dimension::Realistic, 9.0, 95.0).unwrap(),
        DimensionSignal::new(Dimension::Investigative, 7.0, 95.0).unwrap(),
        DimensionSignal::new(Dimension::Artistic, 6.0, 95.0).unwrap(),
        DimensionSignal::new(Dimension::Social, 5.0, 95.0).unwrap(),
        DimensionSignal::new(Dimension::Enterprising, 5.0, 95.0).unwrap(),
        DimensionSignal::new(Dimension::Conventional, 4.0, 95.0).unwrap(),
    ];
    let motivators = vec![
        MotivatorSignal::new("autonomy", 9.0, "wants control of their time", 90.0).unwrap(),
        MotivatorSignal::new("growth", 8.0, "keeps seeking new skills", 85.0).unwrap(),
        MotivatorSignal::new("purpose", 7.0, "mentions impact repeatedly", 80.0).unwrap(),
        MotivatorSignal::new("stability", 6.0, "values predictable income", 75.0).unwrap(),
        MotivatorSignal::new("team", 5.0, "enjoys collaborative work", 70.0).unwrap(),
        MotivatorSignal::new("challenge", 7.0, "picks the harder option", 80.0).unwrap(),
    ];
    let interests = vec![
        InterestSignal::new("technology", "building tools", 9.0).unwrap(),
        InterestSignal::new("science", "applied research", 9.0).unwrap(),
        InterestSignal::new("business", "product strategy", 9.0).unwrap(),
        InterestSignal::new("arts", "industrial design", 9.0).unwrap(),
        InterestSignal::new("education", "mentoring juniors", 9.0).unwrap(),
    ];
    SignalExtraction::new(
        dimension_signals,
        motivators,
        interests,
        ResponseQuality::High,
        vec![],
        vec!["autonomy".to_string()],
    )
}

fn free_text_draft(theme: &str) -> QuestionDraft {
    QuestionDraft::new(
        format!("Tell me about {}.", theme),
        theme,
        vec![],
        "open exploration",
    )
    .unwrap()
}

#[tokio::test]
async fn consistent_low_information_answers_run_the_full_budget() {
    let harness = harness();
    let journey = harness
        .sequencer
        .start(subject(), demographics(), Preferences::default())
        .await
        .unwrap();
    let journey_id = journey.id();

    let mut question = journey.questions()[0].clone();
    let mut final_decision = None;

    // Answer option "A" every turn. Narrow signals never build broad
    // confidence, so the journey has to run through the clarification
    // budget before it can conclude.
    for turn in 1u32..=18 {
        let decision = harness
            .sequencer
            .respond(journey_id, question.id(), AnswerInput::text("A"))
            .await
            .unwrap();

        match turn {
            1..=14 => assert_eq!(decision.kind, DecisionKind::Continue, "turn {}", turn),
            15..=17 => {
                assert_eq!(decision.kind, DecisionKind::Clarify, "turn {}", turn);
                let journey = harness.sequencer.journey(journey_id).await.unwrap();
                assert_eq!(journey.clarifications_used() as u32, turn - 14);
            }
            _ => assert_eq!(decision.kind, DecisionKind::Complete, "turn {}", turn),
        }

        if decision.kind.is_terminal() {
            final_decision = Some(decision);
            break;
        }
        question = harness.sequencer.next_question(journey_id).await.unwrap();
    }

    let decision = final_decision.expect("journey should have concluded");
    assert!(decision.rationale.contains("budget exhausted"));

    let journey = harness.sequencer.journey(journey_id).await.unwrap();
    assert_eq!(journey.status(), JourneyStatus::Completed);
    assert_eq!(journey.questions_asked(), 18);
    assert_eq!(journey.clarifications_used(), 3);

    let profile = journey.completed_profile().unwrap();
    assert_eq!(profile.questions_answered, 18);
    // Every answer was the Realistic-leaning option.
    assert!(profile.code.starts_with('R'));
    assert!(!profile.insights.summary.is_empty());

    assert_eq!(harness.bus.events_of_type("journey.started").len(), 1);
    assert_eq!(harness.bus.events_of_type("question.generated").len(), 18);
    assert_eq!(harness.bus.events_of_type("response.processed").len(), 18);
    assert_eq!(harness.bus.events_of_type("journey.completed").len(), 1);

    // Questions 16-18 were clarifications.
    let clarifications: Vec<_> = harness
        .bus
        .events_of_type("question.generated")
        .into_iter()
        .filter(|e| e.payload["is_clarification"] == true)
        .collect();
    assert_eq!(clarifications.len(), 3);
}

#[tokio::test]
async fn rich_consistent_answers_complete_early_at_twelve_questions() {
    let harness = harness();

    // Free-text questions with scripted rich extractions.
    for n in 0..12 {
        harness
            .question_generator
            .script(free_text_draft(&format!("topic-{}", n)));
        harness.signal_extractor.script(rich_extraction());
    }

    let journey = harness
        .sequencer
        .start(subject(), demographics(), Preferences::default())
        .await
        .unwrap();
    let journey_id = journey.id();

    let mut question = journey.questions()[0].clone();
    let mut last_decision = None;

    for turn in 1..=12 {
        let decision = harness
            .sequencer
            .respond(
                journey_id,
                question.id(),
                AnswerInput::text("a long, thoughtful free-text answer"),
            )
            .await
            .unwrap();

        if turn < 12 {
            assert_eq!(decision.kind, DecisionKind::Continue, "turn {}", turn);
            question = harness.sequencer.next_question(journey_id).await.unwrap();
        }
        last_decision = Some(decision);
    }

    let decision = last_decision.unwrap();
    assert_eq!(decision.kind, DecisionKind::Complete);
    assert!(decision.rationale.contains("High confidence"));
    assert!(decision.confidence.ready_to_complete);
    assert!(decision.confidence.overall.value() >= 85.0);

    let journey = harness.sequencer.journey(journey_id).await.unwrap();
    assert_eq!(journey.status(), JourneyStatus::Completed);
    assert_eq!(journey.questions_asked(), 12);
    assert_eq!(journey.clarifications_used(), 0);

    let profile = journey.completed_profile().unwrap();
    // Realistic dominated every extraction.
    assert!(profile.code.starts_with('R'));
    assert_eq!(profile.questions_answered, 12);
    assert!(profile.confidence_at_completion >= 85.0);
    assert!(!profile.motivators.top.is_empty());
    assert!(!profile.interests.primary.is_empty());
}

#[tokio::test]
async fn completed_journey_rejects_further_turns() {
    let harness = harness();

    for n in 0..12 {
        harness
            .question_generator
            .script(free_text_draft(&format!("topic-{}", n)));
        harness.signal_extractor.script(rich_extraction());
    }

    let journey = harness
        .sequencer
        .start(subject(), demographics(), Preferences::default())
        .await
        .unwrap();
    let journey_id = journey.id();

    let mut question = journey.questions()[0].clone();
    for turn in 1..=12 {
        let decision = harness
            .sequencer
            .respond(journey_id, question.id(), AnswerInput::text("an answer"))
            .await
            .unwrap();
        if turn < 12 {
            question = harness.sequencer.next_question(journey_id).await.unwrap();
        } else {
            assert!(decision.kind.is_terminal());
        }
    }

    let result = harness.sequencer.next_question(journey_id).await;
    assert!(matches!(result, Err(JourneyError::InvalidState(_))));

    let result = harness
        .sequencer
        .respond(journey_id, question.id(), AnswerInput::text("A"))
        .await;
    assert!(matches!(result, Err(JourneyError::InvalidState(_))));
}

#[tokio::test]
async fn concurrent_journeys_do_not_share_theme_memory() {
    let harness = harness();

    let journey_a = harness
        .sequencer
        .start(subject(), demographics(), Preferences::default())
        .await
        .unwrap();
    let journey_b = harness
        .sequencer
        .start(
            SubjectId::new("subject-two").unwrap(),
            demographics(),
            Preferences::default(),
        )
        .await
        .unwrap();

    harness.sequencer.next_question(journey_a.id()).await.unwrap();

    let contexts = harness.question_generator.received_contexts();
    // The last context belongs to journey A's second question; its avoid
    // list holds exactly A's first theme, never B's.
    let last = contexts.last().unwrap();
    assert_eq!(last.journey_id, journey_a.id());
    assert_eq!(last.avoid_themes.len(), 1);

    let journey_b = harness.sequencer.journey(journey_b.id()).await.unwrap();
    assert_eq!(journey_b.used_themes().len(), 1);
    let journey_a = harness.sequencer.journey(journey_a.id()).await.unwrap();
    assert_eq!(journey_a.used_themes().len(), 2);
    assert_ne!(journey_a.used_themes(), journey_b.used_themes());
}

#[tokio::test]
async fn same_journey_turns_are_serialized_under_concurrency() {
    let harness = harness();
    let sequencer = Arc::new(harness.sequencer);

    let journey = sequencer
        .start(subject(), demographics(), Preferences::default())
        .await
        .unwrap();
    let journey_id = journey.id();
    let question_id = journey.questions()[0].id();

    // Fire several answers to the same question concurrently. Serialization
    // means every one applies against a consistent snapshot and the final
    // answer count equals the number of successful calls.
    let mut handles = Vec::new();
    for _ in 0..4 {
        let sequencer = sequencer.clone();
        handles.push(tokio::spawn(async move {
            sequencer
                .respond(journey_id, question_id, AnswerInput::text("A"))
                .await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    let journey = sequencer.journey(journey_id).await.unwrap();
    assert_eq!(journey.answers().len(), successes);
    assert_eq!(journey.extractions().len(), successes);
}
