//! Confidence snapshot types.
//!
//! A snapshot is recomputed fresh on every turn from the full history; it
//! is never mutated incrementally.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Confidence, Dimension};

/// Per-dimension confidence over the fixed catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionConfidences(BTreeMap<Dimension, Confidence>);

impl DimensionConfidences {
    /// Creates a map with every catalog dimension at zero confidence.
    pub fn zeroed() -> Self {
        Self(
            Dimension::ALL
                .iter()
                .map(|d| (*d, Confidence::ZERO))
                .collect(),
        )
    }

    /// Creates a map from explicit per-dimension values. Dimensions not in
    /// the input default to zero.
    pub fn from_values(values: impl IntoIterator<Item = (Dimension, Confidence)>) -> Self {
        let mut map = Self::zeroed();
        for (dimension, confidence) in values {
            map.0.insert(dimension, confidence);
        }
        map
    }

    /// Confidence for one dimension.
    pub fn get(&self, dimension: Dimension) -> Confidence {
        self.0.get(&dimension).copied().unwrap_or(Confidence::ZERO)
    }

    /// Mean confidence across the whole catalog.
    pub fn mean(&self) -> f64 {
        let sum: f64 = Dimension::ALL.iter().map(|d| self.get(*d).value()).sum();
        sum / Dimension::COUNT as f64
    }

    /// Iterates dimensions in canonical order with their confidences.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Confidence)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

impl Default for DimensionConfidences {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Structured identifier for an area below its completion threshold.
///
/// Decision focus is selected from this identifier, never from substring
/// matching on rendered gap text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    Dimension(Dimension),
    Motivators,
    Interests,
}

/// A confidence gap with its numeric value, rendered for operator
/// visibility via [`Gap::describe`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gap {
    kind: GapKind,
    confidence: Confidence,
}

impl Gap {
    pub fn new(kind: GapKind, confidence: Confidence) -> Self {
        Self { kind, confidence }
    }

    /// The structured gap identifier.
    pub fn kind(&self) -> GapKind {
        self.kind
    }

    /// The confidence that fell below the threshold.
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    /// Human-readable rendering including the numeric confidence.
    pub fn describe(&self) -> String {
        match self.kind {
            GapKind::Dimension(d) => {
                format!("{} dimension (confidence: {:.0}%)", d.label(), self.confidence.value())
            }
            GapKind::Motivators => {
                format!("Career motivators (confidence: {:.0}%)", self.confidence.value())
            }
            GapKind::Interests => {
                format!("Personal interests (confidence: {:.0}%)", self.confidence.value())
            }
        }
    }
}

/// Multi-dimensional confidence estimate for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceSnapshot {
    /// Per-dimension confidence.
    pub dimensions: DimensionConfidences,

    /// Confidence in the motivator picture.
    pub motivator_confidence: Confidence,

    /// Confidence in the interest picture.
    pub interest_confidence: Confidence,

    /// Overall confidence, skip-adjusted and clamped.
    pub overall: Confidence,

    /// True when the journey has gathered enough to conclude.
    pub ready_to_complete: bool,

    /// Areas still below their completion thresholds.
    pub gaps: Vec<Gap>,
}

impl ConfidenceSnapshot {
    /// A snapshot for a journey with no history yet.
    pub fn empty() -> Self {
        Self {
            dimensions: DimensionConfidences::zeroed(),
            motivator_confidence: Confidence::ZERO,
            interest_confidence: Confidence::ZERO,
            overall: Confidence::ZERO,
            ready_to_complete: false,
            gaps: Vec::new(),
        }
    }

    /// The gap with the lowest confidence, if any.
    pub fn largest_gap(&self) -> Option<&Gap> {
        self.gaps.iter().min_by(|a, b| {
            a.confidence()
                .value()
                .partial_cmp(&b.confidence().value())
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Gaps ordered from lowest confidence to highest.
    pub fn gaps_by_severity(&self) -> Vec<&Gap> {
        let mut gaps: Vec<&Gap> = self.gaps.iter().collect();
        gaps.sort_by(|a, b| {
            a.confidence()
                .value()
                .partial_cmp(&b.confidence().value())
                .unwrap_or(Ordering::Equal)
        });
        gaps
    }
}

impl Default for ConfidenceSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}
