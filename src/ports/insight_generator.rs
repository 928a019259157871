//! InsightGenerator port - Interface for narrative insight generation.

use async_trait::async_trait;

use crate::domain::profile::{DimensionScores, InterestClusters, MotivatorTiers, ProfileInsights};

use super::CollaboratorError;

/// The computed profile data handed to the narrative collaborator.
#[derive(Debug, Clone)]
pub struct InsightContext {
    pub dimension_scores: DimensionScores,
    pub code: String,
    pub motivators: MotivatorTiers,
    pub interests: InterestClusters,
    pub questions_answered: usize,
    pub quality_summary: String,
}

/// Port for generating the narrative portion of a completed profile.
///
/// Called exactly once per synthesis. The synthesizer does not retry: a
/// failure here surfaces to the caller as a synthesis failure.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Writes narrative insights for the computed scores and tiers.
    async fn narrate(&self, context: &InsightContext) -> Result<ProfileInsights, CollaboratorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn InsightGenerator) {}
}
