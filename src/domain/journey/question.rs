//! Generated questions and their option metadata.
//!
//! An option carries the signal weights the content collaborator attached
//! to it. Selecting an option resolves to a [`SignalExtraction`] without any
//! further collaborator call, so structured answers stay deterministic.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Dimension, QuestionId, Timestamp, ValidationError};
use crate::domain::signal::{
    DimensionSignal, InterestSignal, MotivatorSignal, ResponseQuality, SignalExtraction,
};

/// Strength threshold for calling an option signal out as strong.
const STRONG_SIGNAL_THRESHOLD: f64 = 7.0;

/// A motivator weight attached to an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionMotivator {
    motivator: String,
    weight: f64,
}

impl OptionMotivator {
    /// # Errors
    ///
    /// - `EmptyField` if the motivator name is empty
    /// - `OutOfRange` if weight is outside 0-1
    pub fn new(motivator: impl Into<String>, weight: f64) -> Result<Self, ValidationError> {
        let motivator = motivator.into();
        if motivator.trim().is_empty() {
            return Err(ValidationError::empty_field("motivator"));
        }
        validate_weight(weight)?;
        Ok(Self { motivator, weight })
    }

    pub fn motivator(&self) -> &str {
        &self.motivator
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// An interest weight attached to an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionInterest {
    category: String,
    specific: Option<String>,
    weight: f64,
}

impl OptionInterest {
    /// # Errors
    ///
    /// - `EmptyField` if the category is empty
    /// - `OutOfRange` if weight is outside 0-1
    pub fn new(
        category: impl Into<String>,
        specific: Option<String>,
        weight: f64,
    ) -> Result<Self, ValidationError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }
        validate_weight(weight)?;
        Ok(Self {
            category,
            specific,
            weight,
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn specific(&self) -> Option<&str> {
        self.specific.as_deref()
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A dimension weight attached to an option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionDimension {
    dimension: Dimension,
    weight: f64,
}

impl OptionDimension {
    /// # Errors
    ///
    /// - `OutOfRange` if weight is outside 0-1
    pub fn new(dimension: Dimension, weight: f64) -> Result<Self, ValidationError> {
        validate_weight(weight)?;
        Ok(Self { dimension, weight })
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

fn validate_weight(weight: f64) -> Result<(), ValidationError> {
    if !(0.0..=1.0).contains(&weight) {
        return Err(ValidationError::out_of_range(
            "weight",
            0,
            1,
            weight as i32,
        ));
    }
    Ok(())
}

/// One selectable answer with its signal metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOption {
    id: String,
    text: String,
    motivators: Vec<OptionMotivator>,
    interests: Vec<OptionInterest>,
    dimensions: Vec<OptionDimension>,
    confidence_impact: f64,
}

impl QuestionOption {
    /// # Errors
    ///
    /// - `EmptyField` if the option id or text is empty
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        motivators: Vec<OptionMotivator>,
        interests: Vec<OptionInterest>,
        dimensions: Vec<OptionDimension>,
        confidence_impact: f64,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("option_id"));
        }
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("option_text"));
        }
        Ok(Self {
            id,
            text,
            motivators,
            interests,
            dimensions,
            confidence_impact,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn confidence_impact(&self) -> f64 {
        self.confidence_impact
    }

    /// Resolves this option to a deterministic signal extraction.
    ///
    /// Weights (0-1) map onto the signal scales: strength and enthusiasm
    /// become `weight * 10` (floored at 1), confidences become
    /// `weight * 100`.
    pub fn to_extraction(&self) -> SignalExtraction {
        let motivators: Vec<MotivatorSignal> = self
            .motivators
            .iter()
            .map(|m| {
                MotivatorSignal::new(
                    m.motivator.clone(),
                    (m.weight * 10.0).max(1.0),
                    format!("Chose option aligned with {}", m.motivator),
                    m.weight * 100.0,
                )
                .expect("option weights are range-checked on construction")
            })
            .collect();

        let interests: Vec<InterestSignal> = self
            .interests
            .iter()
            .map(|i| {
                InterestSignal::new(
                    i.category.clone(),
                    i.specific.clone().unwrap_or_default(),
                    (i.weight * 10.0).max(1.0),
                )
                .expect("option weights are range-checked on construction")
            })
            .collect();

        let dimension_signals: Vec<DimensionSignal> = self
            .dimensions
            .iter()
            .map(|d| {
                DimensionSignal::new(d.dimension, d.weight * 10.0, d.weight * 100.0)
                    .expect("option weights are range-checked on construction")
            })
            .collect();

        let strong_signals = Self::strong_signals(&motivators, &interests);
        let quality = if motivators.is_empty() && interests.is_empty() && dimension_signals.is_empty()
        {
            ResponseQuality::Medium
        } else {
            ResponseQuality::High
        };

        SignalExtraction::new(
            dimension_signals,
            motivators,
            interests,
            quality,
            vec![],
            strong_signals,
        )
    }

    /// Up to two notably strong signals: motivators first, interests to
    /// top up.
    fn strong_signals(
        motivators: &[MotivatorSignal],
        interests: &[InterestSignal],
    ) -> Vec<String> {
        let mut strong = Vec::new();

        let mut by_strength: Vec<&MotivatorSignal> = motivators.iter().collect();
        by_strength.sort_by(|a, b| {
            b.strength()
                .partial_cmp(&a.strength())
                .unwrap_or(Ordering::Equal)
        });
        for motivator in by_strength.into_iter().take(2) {
            if motivator.strength() >= STRONG_SIGNAL_THRESHOLD {
                strong.push(motivator.motivator().to_string());
            }
        }

        if strong.len() < 2 {
            let mut by_enthusiasm: Vec<&InterestSignal> = interests.iter().collect();
            by_enthusiasm.sort_by(|a, b| {
                b.enthusiasm()
                    .partial_cmp(&a.enthusiasm())
                    .unwrap_or(Ordering::Equal)
            });
            for interest in by_enthusiasm.into_iter().take(2) {
                if interest.enthusiasm() >= STRONG_SIGNAL_THRESHOLD && strong.len() < 2 {
                    strong.push(interest.category().to_string());
                }
            }
        }

        strong
    }
}

/// Question content as produced by the generation collaborator, before the
/// journey assigns identity and position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDraft {
    text: String,
    theme: String,
    options: Vec<QuestionOption>,
    context_note: String,
}

impl QuestionDraft {
    /// # Errors
    ///
    /// - `EmptyField` if the question text is empty
    pub fn new(
        text: impl Into<String>,
        theme: impl Into<String>,
        options: Vec<QuestionOption>,
        context_note: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("question_text"));
        }
        let theme = theme.into();
        // A missing theme falls back to a prefix of the question text so the
        // dedup memory always has something to match on.
        let theme = if theme.trim().is_empty() {
            text.chars().take(50).collect()
        } else {
            theme
        };
        Ok(Self {
            text,
            theme,
            options,
            context_note: context_note.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }
}

/// A question asked during a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    number: u32,
    text: String,
    theme: String,
    options: Vec<QuestionOption>,
    context_note: String,
    asked_at: Timestamp,
}

impl Question {
    /// Materializes a draft at the given position in the journey.
    pub fn from_draft(draft: QuestionDraft, number: u32) -> Self {
        Self {
            id: QuestionId::new(),
            number,
            text: draft.text,
            theme: draft.theme,
            options: draft.options,
            context_note: draft.context_note,
            asked_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> QuestionId {
        self.id
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn options(&self) -> &[QuestionOption] {
        &self.options
    }

    pub fn context_note(&self) -> &str {
        &self.context_note
    }

    pub fn asked_at(&self) -> &Timestamp {
        &self.asked_at
    }

    /// True when the question expects free text instead of an option pick.
    pub fn is_free_text(&self) -> bool {
        self.options.is_empty()
    }

    /// Finds the option the answer text selects, if any.
    pub fn option_matching(&self, answer_text: &str) -> Option<&QuestionOption> {
        let normalized = answer_text.trim();
        self.options
            .iter()
            .find(|option| option.id.eq_ignore_ascii_case(normalized))
    }
}
