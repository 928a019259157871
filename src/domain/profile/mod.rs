//! Final profile synthesis.

mod completed;
mod synthesizer;

pub use completed::{
    CompletedProfile, DimensionScores, InterestClusters, MotivatorTiers, ProfileInsights,
};
pub use synthesizer::ProfileSynthesizer;
