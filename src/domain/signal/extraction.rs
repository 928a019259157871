//! Per-answer signal extraction records.
//!
//! Extractions arrive from the structured-option lookup or from the
//! free-text extraction collaborator. Either way, every entry is validated
//! on construction: malformed collaborator output is rejected, never
//! silently coerced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Confidence, Dimension, ValidationError};

/// Quality tag assigned to an answer by the extraction step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ResponseQuality {
    High,
    #[default]
    Medium,
    Low,
}

impl ResponseQuality {
    /// Weight multiplier applied to signals from answers of this quality
    /// during profile synthesis.
    pub fn synthesis_weight(&self) -> f64 {
        match self {
            ResponseQuality::High => 1.5,
            ResponseQuality::Medium | ResponseQuality::Low => 1.0,
        }
    }

    /// Numeric score used when summarizing overall response quality.
    pub fn score(&self) -> u32 {
        match self {
            ResponseQuality::High => 3,
            ResponseQuality::Medium => 2,
            ResponseQuality::Low => 1,
        }
    }
}

impl fmt::Display for ResponseQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ResponseQuality::High => "high",
            ResponseQuality::Medium => "medium",
            ResponseQuality::Low => "low",
        };
        write!(f, "{}", s)
    }
}

/// An orientation-dimension signal observed in one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionSignal {
    dimension: Dimension,
    score: f64,
    confidence: Confidence,
}

impl DimensionSignal {
    /// Creates a dimension signal, validating the raw score range.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if score is outside 0-10
    pub fn new(dimension: Dimension, score: f64, confidence: f64) -> Result<Self, ValidationError> {
        if !(0.0..=10.0).contains(&score) {
            return Err(ValidationError::out_of_range(
                "score",
                0,
                10,
                score as i32,
            ));
        }
        if !(0.0..=100.0).contains(&confidence) {
            return Err(ValidationError::out_of_range(
                "confidence",
                0,
                100,
                confidence as i32,
            ));
        }
        Ok(Self {
            dimension,
            score,
            confidence: Confidence::new(confidence),
        })
    }

    /// The dimension this signal touches.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Raw score on the 0-10 scale.
    pub fn score(&self) -> f64 {
        self.score
    }

    /// Confidence in the signal.
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

/// A career-motivator signal observed in one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivatorSignal {
    motivator: String,
    strength: f64,
    evidence: String,
    confidence: Confidence,
}

impl MotivatorSignal {
    /// Creates a motivator signal, validating name and strength.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the motivator name is empty
    /// - `OutOfRange` if strength is outside 1-10 or confidence outside 0-100
    pub fn new(
        motivator: impl Into<String>,
        strength: f64,
        evidence: impl Into<String>,
        confidence: f64,
    ) -> Result<Self, ValidationError> {
        let motivator = motivator.into();
        if motivator.trim().is_empty() {
            return Err(ValidationError::empty_field("motivator"));
        }
        if !(1.0..=10.0).contains(&strength) {
            return Err(ValidationError::out_of_range(
                "strength",
                1,
                10,
                strength as i32,
            ));
        }
        if !(0.0..=100.0).contains(&confidence) {
            return Err(ValidationError::out_of_range(
                "confidence",
                0,
                100,
                confidence as i32,
            ));
        }
        Ok(Self {
            motivator,
            strength,
            evidence: evidence.into(),
            confidence: Confidence::new(confidence),
        })
    }

    /// The motivator name (e.g. "autonomy").
    pub fn motivator(&self) -> &str {
        &self.motivator
    }

    /// Strength on the 1-10 scale.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Evidence quote supporting the signal.
    pub fn evidence(&self) -> &str {
        &self.evidence
    }

    /// Confidence in the signal.
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }
}

/// An interest signal observed in one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestSignal {
    category: String,
    specific: String,
    enthusiasm: f64,
}

impl InterestSignal {
    /// Creates an interest signal, validating category and enthusiasm.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the category is empty
    /// - `OutOfRange` if enthusiasm is outside 1-10
    pub fn new(
        category: impl Into<String>,
        specific: impl Into<String>,
        enthusiasm: f64,
    ) -> Result<Self, ValidationError> {
        let category = category.into();
        if category.trim().is_empty() {
            return Err(ValidationError::empty_field("category"));
        }
        if !(1.0..=10.0).contains(&enthusiasm) {
            return Err(ValidationError::out_of_range(
                "enthusiasm",
                1,
                10,
                enthusiasm as i32,
            ));
        }
        let specific = specific.into();
        let specific = if specific.trim().is_empty() {
            format!("General interest in {}", category)
        } else {
            specific
        };
        Ok(Self {
            category,
            specific,
            enthusiasm,
        })
    }

    /// The interest category (e.g. "technology").
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The specific interest within the category.
    pub fn specific(&self) -> &str {
        &self.specific
    }

    /// Enthusiasm on the 1-10 scale.
    pub fn enthusiasm(&self) -> f64 {
        self.enthusiasm
    }
}

/// The typed result of analyzing one answer. Created once per answer,
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SignalExtraction {
    /// Orientation-dimension signals found in the answer.
    pub dimension_signals: Vec<DimensionSignal>,

    /// Motivator signals found in the answer.
    pub motivators: Vec<MotivatorSignal>,

    /// Interest signals found in the answer.
    pub interests: Vec<InterestSignal>,

    /// Quality tag for the answer.
    pub quality: ResponseQuality,

    /// Notes on signals conflicting with earlier answers.
    pub contradictions: Vec<String>,

    /// Notably clear indicators called out by the extraction.
    pub strong_signals: Vec<String>,
}

impl SignalExtraction {
    /// Creates an extraction from validated signal lists.
    pub fn new(
        dimension_signals: Vec<DimensionSignal>,
        motivators: Vec<MotivatorSignal>,
        interests: Vec<InterestSignal>,
        quality: ResponseQuality,
        contradictions: Vec<String>,
        strong_signals: Vec<String>,
    ) -> Self {
        Self {
            dimension_signals,
            motivators,
            interests,
            quality,
            contradictions,
            strong_signals,
        }
    }

    /// The extraction recorded for a skipped question: no signals,
    /// low quality.
    pub fn skipped() -> Self {
        Self {
            dimension_signals: Vec::new(),
            motivators: Vec::new(),
            interests: Vec::new(),
            quality: ResponseQuality::Low,
            contradictions: Vec::new(),
            strong_signals: Vec::new(),
        }
    }

    /// True when the extraction carries no signals at all.
    pub fn is_empty(&self) -> bool {
        self.dimension_signals.is_empty() && self.motivators.is_empty() && self.interests.is_empty()
    }
}
