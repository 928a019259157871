//! Application layer - the turn-driving sequencer.

mod locks;
mod sequencer;

pub use locks::JourneyLocks;
pub use sequencer::{AnswerInput, JourneySequencer};
