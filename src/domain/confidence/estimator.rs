//! Multi-dimensional confidence estimation.
//!
//! Recomputes a full [`ConfidenceSnapshot`] from the extraction history and
//! answer-skip behavior on every turn. Later answers weigh more than earlier
//! ones, sparse evidence is scaled down, and heavy skipping pulls the overall
//! score toward zero.

use std::collections::BTreeMap;

use crate::domain::foundation::{Confidence, Dimension};
use crate::domain::signal::SignalExtraction;

use super::{ConfidenceSnapshot, DimensionConfidences, Gap, GapKind};

/// Minimum supporting signals before a dimension score is taken at face
/// value; below this the confidence scales down linearly.
const MIN_SIGNALS_FOR_CONFIDENCE: usize = 3;

/// Penalty factor per skipped answer.
const SKIP_PENALTY: f64 = 10.0;

/// Size of the motivator catalog used for coverage.
const MOTIVATOR_CATALOG_SIZE: f64 = 12.0;

/// Distinct motivator types needed for unscaled motivator confidence.
const MOTIVATOR_DISTINCT_FLOOR: f64 = 5.0;

/// Interest categories expected for full diversity credit.
const INTEREST_CATEGORY_TARGET: f64 = 5.0;

/// Total interest observations needed for unscaled interest confidence.
const INTEREST_OBSERVATION_FLOOR: f64 = 5.0;

/// Completion thresholds below which an area is reported as a gap.
const DIMENSION_GAP_THRESHOLD: f64 = 60.0;
const MOTIVATOR_GAP_THRESHOLD: f64 = 70.0;
const INTEREST_GAP_THRESHOLD: f64 = 60.0;

/// Computes confidence snapshots from the signal history.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceEstimator;

impl ConfidenceEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Estimates confidence from the full history.
    ///
    /// `skipped_answers` and `total_answers` describe skip behavior;
    /// `questions_asked` drives the readiness thresholds.
    pub fn estimate(
        &self,
        extractions: &[SignalExtraction],
        skipped_answers: usize,
        total_answers: usize,
        questions_asked: u32,
    ) -> ConfidenceSnapshot {
        let dimensions = self.dimension_confidences(extractions);
        let motivator_confidence = self.motivator_confidence(extractions);
        let interest_confidence = self.interest_confidence(extractions);
        let skip_adjustment = self.skip_adjustment(skipped_answers, total_answers);

        let base = dimensions.mean() * 0.5
            + motivator_confidence.value() * 0.3
            + interest_confidence.value() * 0.2;
        let overall = Confidence::new(base + skip_adjustment);

        let ready_to_complete = self.is_ready(overall, questions_asked);
        let gaps = self.identify_gaps(&dimensions, motivator_confidence, interest_confidence);

        ConfidenceSnapshot {
            dimensions,
            motivator_confidence,
            interest_confidence,
            overall,
            ready_to_complete,
            gaps,
        }
    }

    fn dimension_confidences(&self, extractions: &[SignalExtraction]) -> DimensionConfidences {
        let n = extractions.len();
        let values = Dimension::ALL.iter().map(|dimension| {
            let mut signals = Vec::new();
            let mut weights = Vec::new();

            for (i, extraction) in extractions.iter().enumerate() {
                for signal in &extraction.dimension_signals {
                    if signal.dimension() == *dimension {
                        signals.push(signal.confidence().value());
                        // More recent answers get higher weight.
                        weights.push(1.0 + (i as f64 / n as f64) * 0.5);
                    }
                }
            }

            let confidence = if signals.is_empty() {
                0.0
            } else {
                let weighted_avg = weighted_mean(&signals, &weights);
                let count_bonus = (signals.len() as f64 * 5.0).min(20.0);
                let mut confidence = (weighted_avg + count_bonus).min(100.0);

                if signals.len() < MIN_SIGNALS_FOR_CONFIDENCE {
                    confidence *= signals.len() as f64 / MIN_SIGNALS_FOR_CONFIDENCE as f64;
                }
                confidence
            };

            (*dimension, Confidence::new(confidence))
        });

        DimensionConfidences::from_values(values.collect::<Vec<_>>())
    }

    fn motivator_confidence(&self, extractions: &[SignalExtraction]) -> Confidence {
        let mut strengths_by_type: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        for extraction in extractions {
            for motivator in &extraction.motivators {
                strengths_by_type
                    .entry(motivator.motivator().to_string())
                    .or_default()
                    .push(motivator.strength());
            }
        }

        let distinct = strengths_by_type.len() as f64;
        let coverage = distinct / MOTIVATOR_CATALOG_SIZE * 100.0;

        // Lower strength spread per repeated type means higher consistency.
        let consistency_scores: Vec<f64> = strengths_by_type
            .values()
            .filter(|strengths| strengths.len() > 1)
            .map(|strengths| (100.0 - population_stddev(strengths) * 20.0).max(0.0))
            .collect();
        let avg_consistency = if consistency_scores.is_empty() {
            50.0
        } else {
            mean(&consistency_scores)
        };

        let mut confidence = coverage * 0.6 + avg_consistency * 0.4;
        if distinct < MOTIVATOR_DISTINCT_FLOOR {
            confidence *= distinct / MOTIVATOR_DISTINCT_FLOOR;
        }

        Confidence::new(confidence)
    }

    fn interest_confidence(&self, extractions: &[SignalExtraction]) -> Confidence {
        let mut enthusiasms_by_category: BTreeMap<String, Vec<f64>> = BTreeMap::new();
        let mut total_interests = 0usize;
        for extraction in extractions {
            for interest in &extraction.interests {
                total_interests += 1;
                enthusiasms_by_category
                    .entry(interest.category().to_string())
                    .or_default()
                    .push(interest.enthusiasm());
            }
        }

        if total_interests == 0 {
            return Confidence::ZERO;
        }

        let diversity_score = ((enthusiasms_by_category.len() as f64)
            / INTEREST_CATEGORY_TARGET
            * 100.0)
            .min(100.0);

        let depth_scores: Vec<f64> = enthusiasms_by_category
            .values()
            .map(|enthusiasms| {
                let count_factor = (enthusiasms.len() as f64 / 3.0).min(1.0);
                mean(enthusiasms) * 10.0 * count_factor
            })
            .collect();
        let avg_depth = if depth_scores.is_empty() {
            0.0
        } else {
            mean(&depth_scores)
        };

        let mut confidence = diversity_score * 0.4 + avg_depth * 0.6;
        if (total_interests as f64) < INTEREST_OBSERVATION_FLOOR {
            confidence *= total_interests as f64 / INTEREST_OBSERVATION_FLOOR;
        }

        Confidence::new(confidence)
    }

    /// Negative, additive adjustment: each skipped answer costs confidence.
    fn skip_adjustment(&self, skipped_answers: usize, total_answers: usize) -> f64 {
        if total_answers == 0 {
            return 0.0;
        }
        let skip_rate = skipped_answers as f64 / total_answers as f64;
        -(skip_rate * SKIP_PENALTY * total_answers as f64)
    }

    fn is_ready(&self, overall: Confidence, questions_asked: u32) -> bool {
        (questions_asked >= 12 && overall.at_least(85.0))
            || (questions_asked >= 15 && overall.at_least(75.0))
            || questions_asked >= 18
    }

    fn identify_gaps(
        &self,
        dimensions: &DimensionConfidences,
        motivator_confidence: Confidence,
        interest_confidence: Confidence,
    ) -> Vec<Gap> {
        let mut gaps = Vec::new();

        for (dimension, confidence) in dimensions.iter() {
            if confidence.is_below(DIMENSION_GAP_THRESHOLD) {
                gaps.push(Gap::new(GapKind::Dimension(dimension), confidence));
            }
        }

        if motivator_confidence.is_below(MOTIVATOR_GAP_THRESHOLD) {
            gaps.push(Gap::new(GapKind::Motivators, motivator_confidence));
        }

        if interest_confidence.is_below(INTEREST_GAP_THRESHOLD) {
            gaps.push(Gap::new(GapKind::Interests, interest_confidence));
        }

        gaps
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
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

fn population_stddev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}
