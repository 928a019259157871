//! Completed profile types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Dimension, JourneyId, SubjectId, Timestamp};

/// Final per-dimension scores (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores(BTreeMap<Dimension, f64>);

impl DimensionScores {
    /// Creates a map with every catalog dimension at zero.
    pub fn zeroed() -> Self {
        Self(Dimension::ALL.iter().map(|d| (*d, 0.0)).collect())
    }

    /// Creates a map from explicit values. Missing dimensions default
    /// to zero.
    pub fn from_values(values: impl IntoIterator<Item = (Dimension, f64)>) -> Self {
        let mut scores = Self::zeroed();
        for (dimension, score) in values {
            scores.0.insert(dimension, score);
        }
        scores
    }

    /// Score for one dimension.
    pub fn get(&self, dimension: Dimension) -> f64 {
        self.0.get(&dimension).copied().unwrap_or(0.0)
    }

    /// Iterates dimensions in canonical order with their scores.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        Dimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

impl Default for DimensionScores {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Motivators partitioned by rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MotivatorTiers {
    pub top: Vec<String>,
    pub moderate: Vec<String>,
    pub low: Vec<String>,
}

/// Interests partitioned by enthusiasm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterestClusters {
    pub primary: Vec<String>,
    pub secondary: Vec<String>,
    pub emerging: Vec<String>,
}

/// Narrative insights sourced from the external insight collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ProfileInsights {
    pub summary: String,
    pub strengths: Vec<String>,
    pub ideal_environment: String,
    pub career_direction: String,
    pub unique_combinations: Vec<String>,
    pub blind_spots: Vec<String>,
}

/// The synthesized end product of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedProfile {
    pub subject_id: SubjectId,
    pub journey_id: JourneyId,
    pub dimension_scores: DimensionScores,

    /// Three-letter code derived from the highest-scoring dimensions.
    pub code: String,

    pub motivators: MotivatorTiers,
    pub interests: InterestClusters,
    pub insights: ProfileInsights,
    pub completed_at: Timestamp,

    /// Questions answered, skips excluded.
    pub questions_answered: usize,

    pub duration_minutes: f64,
    pub confidence_at_completion: f64,
}
