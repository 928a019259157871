//! Profile synthesis from the full signal history.
//!
//! Runs once, at journey end. Scoring and clustering are pure functions of
//! the extraction history; the narrative text comes from the external
//! insight collaborator and is requested exactly once, with no retry.

use std::cmp::Ordering;

use crate::domain::foundation::{Dimension, Timestamp};
use crate::domain::journey::{Journey, JourneyError};
use crate::domain::signal::SignalExtraction;
use crate::ports::{InsightContext, InsightGenerator};

use super::{CompletedProfile, DimensionScores, InterestClusters, MotivatorTiers};

/// Enthusiasm thresholds for interest cluster assignment.
const PRIMARY_THRESHOLD: f64 = 8.0;
const SECONDARY_THRESHOLD: f64 = 6.0;

/// Cluster size caps.
const MAX_PRIMARY: usize = 5;
const MAX_SECONDARY: usize = 5;
const MAX_EMERGING: usize = 3;

/// Synthesizes the final profile at journey end.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileSynthesizer;

impl ProfileSynthesizer {
    pub fn new() -> Self {
        Self
    }

    /// Builds the completed profile, requesting narrative insights from the
    /// collaborator once.
    ///
    /// # Errors
    ///
    /// - `Dependency` if the insight collaborator fails; synthesis is not
    ///   retried
    pub async fn synthesize(
        &self,
        journey: &Journey,
        insight_generator: &dyn InsightGenerator,
    ) -> Result<CompletedProfile, JourneyError> {
        let extractions = journey.extractions();

        let dimension_scores = self.dimension_scores(extractions);
        let code = self.derive_code(&dimension_scores);
        let motivators = self.tier_motivators(extractions);
        let interests = self.cluster_interests(extractions);

        let context = InsightContext {
            dimension_scores: dimension_scores.clone(),
            code: code.clone(),
            motivators: motivators.clone(),
            interests: interests.clone(),
            questions_answered: journey.answered_count(),
            quality_summary: self.overall_quality(extractions).to_string(),
        };

        let insights = insight_generator
            .narrate(&context)
            .await
            .map_err(|err| JourneyError::dependency(err.to_string()))?;

        let completed_at = Timestamp::now();
        Ok(CompletedProfile {
            subject_id: journey.subject_id().clone(),
            journey_id: journey.id(),
            dimension_scores,
            code,
            motivators,
            interests,
            insights,
            completed_at,
            questions_answered: journey.answered_count(),
            duration_minutes: completed_at.minutes_since(journey.started_at()),
            confidence_at_completion: journey
                .confidence()
                .map(|c| c.overall.value())
                .unwrap_or(0.0),
        })
    }

    /// Final per-dimension scores: raw 0-10 signal scores, weighted by
    /// recency, signal confidence, and answer quality, scaled to 0-100.
    pub fn dimension_scores(&self, extractions: &[SignalExtraction]) -> DimensionScores {
        let n = extractions.len();
        let values = Dimension::ALL.iter().map(|dimension| {
            let mut scores = Vec::new();
            let mut weights = Vec::new();

            for (i, extraction) in extractions.iter().enumerate() {
                for signal in &extraction.dimension_signals {
                    if signal.dimension() == *dimension {
                        let recency_weight = 1.0 + (i as f64 / n as f64) * 0.5;
                        let confidence_weight = signal.confidence().as_fraction();
                        let quality_weight = extraction.quality.synthesis_weight();

                        scores.push(signal.score());
                        weights.push(recency_weight * confidence_weight * quality_weight);
                    }
                }
            }

            let score = if scores.is_empty() {
                0.0
            } else {
                (weighted_mean(&scores, &weights) * 10.0).min(100.0)
            };

            (*dimension, score)
        });

        DimensionScores::from_values(values.collect::<Vec<_>>())
    }

    /// Three-letter code from the highest-scoring dimensions, descending;
    /// ties resolved by canonical catalog order, never input order.
    pub fn derive_code(&self, scores: &DimensionScores) -> String {
        let mut ranked: Vec<(Dimension, f64)> = scores.iter().collect();
        ranked.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.canonical_index().cmp(&b.0.canonical_index()))
        });

        ranked.iter().take(3).map(|(d, _)| d.code()).collect()
    }

    /// Partitions motivators into top/moderate/low by mean
    /// confidence-weighted strength.
    pub fn tier_motivators(&self, extractions: &[SignalExtraction]) -> MotivatorTiers {
        // First-seen order is preserved so equal averages rank
        // deterministically.
        let mut scores_by_type: Vec<(String, Vec<f64>)> = Vec::new();
        for extraction in extractions {
            for motivator in &extraction.motivators {
                let score = motivator.strength() * motivator.confidence().as_fraction();
                match scores_by_type
                    .iter_mut()
                    .find(|(name, _)| name == motivator.motivator())
                {
                    Some((_, scores)) => scores.push(score),
                    None => scores_by_type.push((motivator.motivator().to_string(), vec![score])),
                }
            }
        }

        if scores_by_type.is_empty() {
            return MotivatorTiers::default();
        }

        let mut averaged: Vec<(String, f64)> = scores_by_type
            .into_iter()
            .map(|(name, scores)| {
                let avg = scores.iter().sum::<f64>() / scores.len() as f64;
                (name, avg)
            })
            .collect();
        averaged.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let total = averaged.len();
        let top_count = 3.max(total / 3).min(total);
        let moderate_count = 6.max(total * 2 / 3).min(total);

        let names: Vec<String> = averaged.into_iter().map(|(name, _)| name).collect();
        MotivatorTiers {
            top: names[..top_count].to_vec(),
            moderate: names[top_count..moderate_count.max(top_count)].to_vec(),
            low: names[moderate_count.max(top_count)..].to_vec(),
        }
    }

    /// Clusters interests keyed by (category, specific) into
    /// primary/secondary/emerging by mean enthusiasm.
    pub fn cluster_interests(&self, extractions: &[SignalExtraction]) -> InterestClusters {
        let mut enthusiasm_by_key: Vec<(String, Vec<f64>)> = Vec::new();
        for extraction in extractions {
            for interest in &extraction.interests {
                let key = format!("{}: {}", interest.category(), interest.specific());
                match enthusiasm_by_key.iter_mut().find(|(k, _)| *k == key) {
                    Some((_, values)) => values.push(interest.enthusiasm()),
                    None => enthusiasm_by_key.push((key, vec![interest.enthusiasm()])),
                }
            }
        }

        let mut averaged: Vec<(String, f64)> = enthusiasm_by_key
            .into_iter()
            .map(|(key, values)| {
                let avg = values.iter().sum::<f64>() / values.len() as f64;
                (key, avg)
            })
            .collect();
        averaged.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let mut clusters = InterestClusters::default();
        for (key, score) in averaged {
            if score >= PRIMARY_THRESHOLD || clusters.primary.len() < 3 {
                clusters.primary.push(key);
            } else if score >= SECONDARY_THRESHOLD || clusters.secondary.len() < 3 {
                clusters.secondary.push(key);
            } else {
                clusters.emerging.push(key);
            }
        }

        clusters.primary.truncate(MAX_PRIMARY);
        clusters.secondary.truncate(MAX_SECONDARY);
        clusters.emerging.truncate(MAX_EMERGING);
        clusters
    }

    /// One-line quality summary handed to the insight collaborator.
    pub fn overall_quality(&self, extractions: &[SignalExtraction]) -> &'static str {
        if extractions.is_empty() {
            return "unknown";
        }

        let total: u32 = extractions.iter().map(|e| e.quality.score()).sum();
        let avg = total as f64 / extractions.len() as f64;

        if avg >= 2.5 {
            "High quality responses overall"
        } else if avg >= 1.8 {
            "Good quality responses overall"
        } else {
            "Mixed quality responses"
        }
    }
}

fn weighted_mean(values: &[f64], weights: &[f64]) -> f64 {
    let weight_sum: f64 = weights.iter().sum();
    if weight_sum == 0.0 {
        return 0.0;
    }
    values
        .iter()
        .zip(weights)
        .map(|(v, w)| v * w)
        .sum::<f64>()
        / weight_sum
}
