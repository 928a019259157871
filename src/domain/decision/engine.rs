//! Decision state machine.
//!
//! Evaluates a priority-ordered rule set once per turn and always produces
//! exactly one decision: evaluation is total and infallible for every valid
//! combination of question count, clarification budget, and confidence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::confidence::{ConfidenceSnapshot, Gap, GapKind};
use crate::domain::foundation::Dimension;

/// The four possible outcomes of a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Continue,
    Clarify,
    Complete,
    SavePartial,
}

impl DecisionKind {
    /// Complete and SavePartial end the turn loop for a journey.
    pub fn is_terminal(&self) -> bool {
        matches!(self, DecisionKind::Complete | DecisionKind::SavePartial)
    }
}

impl fmt::Display for DecisionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DecisionKind::Continue => "continue",
            DecisionKind::Clarify => "clarify",
            DecisionKind::Complete => "complete",
            DecisionKind::SavePartial => "save_partial",
        };
        write!(f, "{}", s)
    }
}

/// One turn's verdict, with the reasoning and the confidence snapshot that
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub kind: DecisionKind,
    pub rationale: String,
    pub next_focus: Option<String>,
    pub confidence: ConfidenceSnapshot,
}

/// Question and clarification budgets.
const MIN_QUESTIONS: u32 = 12;
const STANDARD_QUESTIONS: u32 = 15;
const MAX_CLARIFICATIONS: u8 = 3;

/// Confidence thresholds.
const HIGH_CONFIDENCE: f64 = 85.0;
const ACCEPTABLE_CONFIDENCE: f64 = 75.0;

/// Skip-rate abandonment thresholds.
const SKIP_RATE_LIMIT: f64 = 0.5;
const SKIP_RATE_MIN_QUESTIONS: u32 = 5;

/// Priority-ordered decision rules, first match wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Decides how the journey proceeds after the latest answer.
    pub fn decide(
        &self,
        questions_asked: u32,
        clarifications_used: u8,
        skip_rate: f64,
        confidence: ConfidenceSnapshot,
    ) -> Decision {
        let overall = confidence.overall.value();

        // Abandonment signal: the subject is skipping more than answering.
        if skip_rate > SKIP_RATE_LIMIT && questions_asked >= SKIP_RATE_MIN_QUESTIONS {
            return Decision {
                kind: DecisionKind::SavePartial,
                rationale: "High skip rate detected - saving partial profile".to_string(),
                next_focus: None,
                confidence,
            };
        }

        // Early completion: high confidence once the minimum is reached.
        if questions_asked >= MIN_QUESTIONS && overall >= HIGH_CONFIDENCE {
            return Decision {
                kind: DecisionKind::Complete,
                rationale: format!(
                    "High confidence achieved ({:.0}%) after {} questions",
                    overall, questions_asked
                ),
                next_focus: None,
                confidence,
            };
        }

        // Standard flow up to the question budget.
        if questions_asked < STANDARD_QUESTIONS {
            if overall < HIGH_CONFIDENCE {
                let next_focus = Self::focus_for_largest_gap(&confidence);
                return Decision {
                    kind: DecisionKind::Continue,
                    rationale: format!(
                        "Continuing assessment (question {}/{}, confidence: {:.0}%)",
                        questions_asked + 1,
                        STANDARD_QUESTIONS,
                        overall
                    ),
                    next_focus: Some(next_focus),
                    confidence,
                };
            }
            return Decision {
                kind: DecisionKind::Continue,
                rationale: format!(
                    "Confidence is high ({:.0}%) but gathering additional data",
                    overall
                ),
                next_focus: Some(
                    "Confirming strong signals and exploring edge cases".to_string(),
                ),
                confidence,
            };
        }

        // The standard budget is spent: complete, clarify, or give up.
        if questions_asked == STANDARD_QUESTIONS {
            if overall >= ACCEPTABLE_CONFIDENCE {
                return Decision {
                    kind: DecisionKind::Complete,
                    rationale: format!(
                        "Standard assessment complete with good confidence ({:.0}%)",
                        overall
                    ),
                    next_focus: None,
                    confidence,
                };
            }
            if clarifications_used < MAX_CLARIFICATIONS {
                let focus = Self::focus_for_top_gaps(&confidence);
                return Decision {
                    kind: DecisionKind::Clarify,
                    rationale: format!(
                        "Confidence at {:.0}% - clarifying key gaps",
                        overall
                    ),
                    next_focus: Some(focus),
                    confidence,
                };
            }
            return Decision {
                kind: DecisionKind::Complete,
                rationale: format!(
                    "Question budget exhausted - completing with available data (confidence: {:.0}%)",
                    overall
                ),
                next_focus: None,
                confidence,
            };
        }

        // Clarification phase beyond the standard budget.
        if clarifications_used >= MAX_CLARIFICATIONS {
            return Decision {
                kind: DecisionKind::Complete,
                rationale: format!(
                    "Maximum clarifications reached - budget exhausted at {:.0}% confidence",
                    overall
                ),
                next_focus: None,
                confidence,
            };
        }
        if overall >= ACCEPTABLE_CONFIDENCE {
            return Decision {
                kind: DecisionKind::Complete,
                rationale: format!(
                    "Acceptable confidence achieved ({:.0}%) after clarifications",
                    overall
                ),
                next_focus: None,
                confidence,
            };
        }
        if clarifications_used < MAX_CLARIFICATIONS {
            let focus = confidence
                .largest_gap()
                .map(|gap| gap.describe())
                .unwrap_or_else(|| "general clarity".to_string());
            return Decision {
                kind: DecisionKind::Clarify,
                rationale: format!(
                    "Using clarification {}/{} to improve confidence",
                    clarifications_used + 1,
                    MAX_CLARIFICATIONS
                ),
                next_focus: Some(format!("Focusing on: {}", focus)),
                confidence,
            };
        }

        // Unreachable in practice; keeps evaluation total.
        Decision {
            kind: DecisionKind::Complete,
            rationale: format!("Assessment complete (confidence: {:.0}%)", overall),
            next_focus: None,
            confidence,
        }
    }

    /// Fixed gap-to-topic table keyed on the structured gap identifier.
    fn topic_for(gap: &Gap) -> &'static str {
        match gap.kind() {
            GapKind::Dimension(Dimension::Realistic) => {
                "Understanding hands-on and practical interests"
            }
            GapKind::Dimension(Dimension::Investigative) => {
                "Exploring analytical and research interests"
            }
            GapKind::Dimension(Dimension::Artistic) => {
                "Discovering creative and expressive preferences"
            }
            GapKind::Dimension(Dimension::Social) => {
                "Understanding interpersonal and helping motivations"
            }
            GapKind::Dimension(Dimension::Enterprising) => {
                "Exploring leadership and business interests"
            }
            GapKind::Dimension(Dimension::Conventional) => {
                "Understanding organizational and structured work preferences"
            }
            GapKind::Motivators => "Identifying key career drivers and values",
            GapKind::Interests => "Discovering specific areas of enthusiasm",
        }
    }

    fn focus_for_largest_gap(confidence: &ConfidenceSnapshot) -> String {
        confidence
            .largest_gap()
            .map(|gap| Self::topic_for(gap).to_string())
            .unwrap_or_else(|| "Exploring general career preferences".to_string())
    }

    fn focus_for_top_gaps(confidence: &ConfidenceSnapshot) -> String {
        let gaps = confidence.gaps_by_severity();
        if gaps.is_empty() {
            return "Clarifying: lowest confidence areas".to_string();
        }
        let descriptions: Vec<String> =
            gaps.iter().take(2).map(|gap| gap.describe()).collect();
        format!("Clarifying: {}", descriptions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::confidence::DimensionConfidences;
    use crate::domain::foundation::Confidence;

    fn snapshot_with_overall(overall: f64) -> ConfidenceSnapshot {
        ConfidenceSnapshot {
            overall: Confidence::new(overall),
            ..ConfidenceSnapshot::empty()
        }
    }

    fn snapshot_with_gap(overall: f64, kind: GapKind, gap_confidence: f64) -> ConfidenceSnapshot {
        ConfidenceSnapshot {
            overall: Confidence::new(overall),
            gaps: vec![Gap::new(kind, Confidence::new(gap_confidence))],
            ..ConfidenceSnapshot::empty()
        }
    }

    #[test]
    fn high_skip_rate_saves_partial_profile() {
        let decision =
            DecisionEngine::new().decide(5, 0, 0.6, snapshot_with_overall(80.0));
        assert_eq!(decision.kind, DecisionKind::SavePartial);
        assert!(decision.rationale.contains("skip rate"));
    }

    #[test]
    fn high_skip_rate_before_five_questions_continues() {
        let decision =
            DecisionEngine::new().decide(4, 0, 0.75, snapshot_with_overall(20.0));
        assert_eq!(decision.kind, DecisionKind::Continue);
    }

    #[test]
    fn completes_early_at_twelve_questions_with_high_confidence() {
        let decision = DecisionEngine::new().decide(12, 0, 0.0, snapshot_with_overall(85.0));
        assert_eq!(decision.kind, DecisionKind::Complete);
        assert!(decision.rationale.contains("High confidence"));
    }

    #[test]
    fn continues_below_fifteen_questions() {
        let decision = DecisionEngine::new().decide(8, 0, 0.0, snapshot_with_overall(60.0));
        assert_eq!(decision.kind, DecisionKind::Continue);
        assert!(decision.next_focus.is_some());
    }

    #[test]
    fn continue_focus_maps_largest_gap_through_topic_table() {
        let snapshot = ConfidenceSnapshot {
            overall: Confidence::new(50.0),
            gaps: vec![
                Gap::new(GapKind::Motivators, Confidence::new(65.0)),
                Gap::new(
                    GapKind::Dimension(Dimension::Artistic),
                    Confidence::new(20.0),
                ),
            ],
            ..ConfidenceSnapshot::empty()
        };

        let decision = DecisionEngine::new().decide(8, 0, 0.0, snapshot);
        assert_eq!(
            decision.next_focus.as_deref(),
            Some("Discovering creative and expressive preferences")
        );
    }

    #[test]
    fn continue_without_gaps_uses_generic_exploration_focus() {
        let decision = DecisionEngine::new().decide(8, 0, 0.0, snapshot_with_overall(70.0));
        assert_eq!(
            decision.next_focus.as_deref(),
            Some("Exploring general career preferences")
        );
    }

    #[test]
    fn high_confidence_before_minimum_keeps_gathering_data() {
        let decision = DecisionEngine::new().decide(10, 0, 0.0, snapshot_with_overall(90.0));
        assert_eq!(decision.kind, DecisionKind::Continue);
        assert!(decision.rationale.contains("gathering additional data"));
    }

    #[test]
    fn completes_at_fifteen_with_acceptable_confidence() {
        let decision = DecisionEngine::new().decide(15, 0, 0.0, snapshot_with_overall(75.0));
        assert_eq!(decision.kind, DecisionKind::Complete);
    }

    #[test]
    fn clarifies_at_fifteen_with_low_confidence_and_budget_left() {
        let decision = DecisionEngine::new().decide(
            15,
            0,
            0.0,
            snapshot_with_gap(70.0, GapKind::Interests, 40.0),
        );
        assert_eq!(decision.kind, DecisionKind::Clarify);
        assert!(decision.next_focus.as_deref().unwrap().contains("Clarifying:"));
    }

    #[test]
    fn clarify_focus_joins_two_most_severe_gaps() {
        let snapshot = ConfidenceSnapshot {
            overall: Confidence::new(60.0),
            gaps: vec![
                Gap::new(GapKind::Motivators, Confidence::new(50.0)),
                Gap::new(
                    GapKind::Dimension(Dimension::Social),
                    Confidence::new(10.0),
                ),
                Gap::new(GapKind::Interests, Confidence::new(30.0)),
            ],
            ..ConfidenceSnapshot::empty()
        };

        let decision = DecisionEngine::new().decide(15, 0, 0.0, snapshot);
        let focus = decision.next_focus.unwrap();
        assert!(focus.contains("Social dimension"));
        assert!(focus.contains("Personal interests"));
        assert!(!focus.contains("Career motivators"));
    }

    #[test]
    fn completes_at_fifteen_when_clarification_budget_spent() {
        let decision = DecisionEngine::new().decide(15, 3, 0.0, snapshot_with_overall(60.0));
        assert_eq!(decision.kind, DecisionKind::Complete);
        assert!(decision.rationale.contains("budget exhausted"));
    }

    #[test]
    fn completes_past_fifteen_once_clarifications_are_spent() {
        let decision = DecisionEngine::new().decide(18, 3, 0.0, snapshot_with_overall(50.0));
        assert_eq!(decision.kind, DecisionKind::Complete);
        assert!(decision.rationale.contains("budget exhausted"));
    }

    #[test]
    fn completes_past_fifteen_with_acceptable_confidence() {
        let decision = DecisionEngine::new().decide(16, 1, 0.0, snapshot_with_overall(78.0));
        assert_eq!(decision.kind, DecisionKind::Complete);
        assert!(decision.rationale.contains("after clarifications"));
    }

    #[test]
    fn clarifies_past_fifteen_with_budget_remaining() {
        let decision = DecisionEngine::new().decide(
            16,
            1,
            0.0,
            snapshot_with_gap(60.0, GapKind::Motivators, 40.0),
        );
        assert_eq!(decision.kind, DecisionKind::Clarify);
        assert!(decision.rationale.contains("clarification 2/3"));
        assert!(decision.next_focus.as_deref().unwrap().contains("Focusing on:"));
    }

    #[test]
    fn clarify_past_fifteen_without_gaps_focuses_on_general_clarity() {
        let decision = DecisionEngine::new().decide(17, 2, 0.0, snapshot_with_overall(60.0));
        assert_eq!(decision.kind, DecisionKind::Clarify);
        assert_eq!(
            decision.next_focus.as_deref(),
            Some("Focusing on: general clarity")
        );
    }

    #[test]
    fn decision_always_carries_its_snapshot() {
        let snapshot = ConfidenceSnapshot {
            dimensions: DimensionConfidences::zeroed(),
            overall: Confidence::new(42.0),
            ..ConfidenceSnapshot::empty()
        };
        let decision = DecisionEngine::new().decide(3, 0, 0.0, snapshot.clone());
        assert_eq!(decision.confidence, snapshot);
    }

    #[test]
    fn terminal_kinds_are_complete_and_save_partial() {
        assert!(DecisionKind::Complete.is_terminal());
        assert!(DecisionKind::SavePartial.is_terminal());
        assert!(!DecisionKind::Continue.is_terminal());
        assert!(!DecisionKind::Clarify.is_terminal());
    }
}
