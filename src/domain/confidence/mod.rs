//! Confidence estimation over the signal history.

mod estimator;
mod snapshot;

pub use estimator::ConfidenceEstimator;
pub use snapshot::{ConfidenceSnapshot, DimensionConfidences, Gap, GapKind};
