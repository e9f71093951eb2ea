//! Automated play: the `Agent` interface and the rule-based opponent.

mod agent;
mod heuristic;

pub use agent::Agent;
pub use heuristic::{clock_seed, Decision, HeuristicAgent};
