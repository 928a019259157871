//! JourneyStatus enum for tracking the lifecycle of an interview journey.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an interview journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStatus {
    #[default]
    InProgress,
    Completed,
    Abandoned,
}

impl JourneyStatus {
    /// Returns true if the journey still accepts turn operations.
    pub fn is_active(&self) -> bool {
        matches!(self, JourneyStatus::InProgress)
    }

    /// Returns true if the journey has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        !self.is_active()
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - InProgress -> Completed
    /// - InProgress -> Abandoned
    pub fn can_transition_to(&self, target: &JourneyStatus) -> bool {
        use JourneyStatus::*;
        matches!((self, target), (InProgress, Completed) | (InProgress, Abandoned))
    }
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JourneyStatus::InProgress => "InProgress",
            JourneyStatus::Completed => "Completed",
            JourneyStatus::Abandoned => "Abandoned",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_progress() {
        assert_eq!(JourneyStatus::default(), JourneyStatus::InProgress);
    }

    #[test]
    fn is_active_works_correctly() {
        assert!(JourneyStatus::InProgress.is_active());
        assert!(!JourneyStatus::Completed.is_active());
        assert!(!JourneyStatus::Abandoned.is_active());
    }

    #[test]
    fn terminal_statuses_are_not_active() {
        assert!(JourneyStatus::Completed.is_terminal());
        assert!(JourneyStatus::Abandoned.is_terminal());
        assert!(!JourneyStatus::InProgress.is_terminal());
    }

    #[test]
    fn in_progress_can_transition_to_terminal_statuses() {
        assert!(JourneyStatus::InProgress.can_transition_to(&JourneyStatus::Completed));
        assert!(JourneyStatus::InProgress.can_transition_to(&JourneyStatus::Abandoned));
    }

    #[test]
    fn terminal_statuses_cannot_transition() {
        assert!(!JourneyStatus::Completed.can_transition_to(&JourneyStatus::Abandoned));
        assert!(!JourneyStatus::Abandoned.can_transition_to(&JourneyStatus::Completed));
        assert!(!JourneyStatus::Completed.can_transition_to(&JourneyStatus::InProgress));
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&JourneyStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::to_string(&JourneyStatus::Abandoned).unwrap(),
            "\"abandoned\""
        );
    }

    #[test]
    fn deserializes_from_snake_case_json() {
        let status: JourneyStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, JourneyStatus::Completed);
    }
}
