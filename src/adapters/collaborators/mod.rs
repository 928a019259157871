//! Collaborator adapters.
//!
//! The real question, extraction, and insight collaborators live outside
//! this crate; these mocks stand in for them in tests and local wiring.

mod mock;

pub use mock::{MockInsightGenerator, MockQuestionGenerator, MockSignalExtractor};
