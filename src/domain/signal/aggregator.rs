//! Signal aggregation over the extraction history.
//!
//! Reduces the full ordered list of extractions into the journey's current
//! profile: the strongest observation per motivator type and per interest
//! category, capped. The reduction is a pure function of the history and
//! must stay deterministic: equal strengths keep their flattened history
//! order (stable sort), and the first occurrence per key wins.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::{InterestSignal, MotivatorSignal, SignalExtraction};

/// Maximum motivators retained in the aggregated profile.
pub const MAX_MOTIVATORS: usize = 12;

/// Maximum interests retained in the aggregated profile.
pub const MAX_INTERESTS: usize = 20;

/// The deduplicated, capped view of everything observed so far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AggregatedProfile {
    /// Top motivators, one entry per type, strongest first.
    pub motivators: Vec<MotivatorSignal>,

    /// Top interests, one entry per category, most enthusiastic first.
    pub interests: Vec<InterestSignal>,
}

/// Reduces the extraction history into the current aggregated profile.
pub fn aggregate(extractions: &[SignalExtraction]) -> AggregatedProfile {
    AggregatedProfile {
        motivators: top_motivators(extractions),
        interests: top_interests(extractions),
    }
}

fn top_motivators(extractions: &[SignalExtraction]) -> Vec<MotivatorSignal> {
    let mut all: Vec<&MotivatorSignal> = extractions
        .iter()
        .flat_map(|e| e.motivators.iter())
        .collect();

    // Stable sort: ties keep flattened history order.
    all.sort_by(|a, b| {
        b.strength()
            .partial_cmp(&a.strength())
            .unwrap_or(Ordering::Equal)
    });

    let mut seen = HashSet::new();
    all.into_iter()
        .filter(|m| seen.insert(m.motivator().to_string()))
        .take(MAX_MOTIVATORS)
        .cloned()
        .collect()
}

fn top_interests(extractions: &[SignalExtraction]) -> Vec<InterestSignal> {
    let mut all: Vec<&InterestSignal> = extractions
        .iter()
        .flat_map(|e| e.interests.iter())
        .collect();

    all.sort_by(|a, b| {
        b.enthusiasm()
            .partial_cmp(&a.enthusiasm())
            .unwrap_or(Ordering::Equal)
    });

    let mut seen = HashSet::new();
    all.into_iter()
        .filter(|i| seen.insert(i.category().to_string()))
        .take(MAX_INTERESTS)
        .cloned()
        .collect()
}
