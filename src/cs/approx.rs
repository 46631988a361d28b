pub mod greedy_change;

pub use greedy_change::{greedy_change, GreedyOutcome, GreedySolver};
