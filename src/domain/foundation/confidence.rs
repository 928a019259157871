//! Confidence value object (0-100 scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A confidence score between 0.0 and 100.0 inclusive.
///
/// Constructed by clamping, so every `Confidence` in the system is in range
/// no matter how large the adjustments that produced it were.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Zero confidence.
    pub const ZERO: Self = Self(0.0);

    /// Full confidence.
    pub const MAX: Self = Self(100.0);

    /// Creates a new Confidence, clamping to the 0-100 range.
    ///
    /// NaN is treated as zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::ZERO;
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the value as a fraction (0.0 to 1.0).
    pub fn as_fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// Returns true if this confidence is strictly below the threshold.
    pub fn is_below(&self, threshold: f64) -> bool {
        self.0 < threshold
    }

    /// Returns true if this confidence meets or exceeds the threshold.
    pub fn at_least(&self, threshold: f64) -> bool {
        self.0 >= threshold
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_new_accepts_in_range_values() {
        assert_eq!(Confidence::new(0.0).value(), 0.0);
        assert_eq!(Confidence::new(51.5).value(), 51.5);
        assert_eq!(Confidence::new(100.0).value(), 100.0);
    }

    #[test]
    fn confidence_new_clamps_out_of_range_values() {
        assert_eq!(Confidence::new(-25.0).value(), 0.0);
        assert_eq!(Confidence::new(140.0).value(), 100.0);
    }

    #[test]
    fn confidence_new_treats_nan_as_zero() {
        assert_eq!(Confidence::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn confidence_as_fraction_converts_correctly() {
        assert!((Confidence::new(50.0).as_fraction() - 0.5).abs() < f64::EPSILON);
        assert!((Confidence::MAX.as_fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn confidence_threshold_checks_work() {
        let c = Confidence::new(60.0);
        assert!(c.is_below(70.0));
        assert!(!c.is_below(60.0));
        assert!(c.at_least(60.0));
        assert!(!c.at_least(60.1));
    }

    #[test]
    fn confidence_displays_rounded_percentage() {
        assert_eq!(format!("{}", Confidence::new(74.6)), "75%");
        assert_eq!(format!("{}", Confidence::ZERO), "0%");
    }

    #[test]
    fn confidence_default_is_zero() {
        assert_eq!(Confidence::default(), Confidence::ZERO);
    }

    #[test]
    fn confidence_serializes_as_number() {
        let json = serde_json::to_string(&Confidence::new(42.0)).unwrap();
        assert_eq!(json, "42.0");
    }

    #[test]
    fn confidence_ordering_works() {
        assert!(Confidence::new(25.0) < Confidence::new(75.0));
    }
}
