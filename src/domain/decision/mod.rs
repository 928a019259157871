//! Turn decisions and the rules that produce them.

mod engine;

pub use engine::{Decision, DecisionEngine, DecisionKind};
