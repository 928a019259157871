//! Signal types and aggregation.
//!
//! A signal extraction is the typed result of analyzing one answer. The
//! aggregator reduces the full extraction history into the journey's
//! current profile.

mod aggregator;
mod extraction;

pub use aggregator::{aggregate, AggregatedProfile, MAX_INTERESTS, MAX_MOTIVATORS};
pub use extraction::{
    DimensionSignal, InterestSignal, MotivatorSignal, ResponseQuality, SignalExtraction,
};
