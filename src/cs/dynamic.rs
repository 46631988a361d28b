pub mod coin_change;

// Re-export dynamic programming algorithms with descriptive names
pub use coin_change::{build_table, min_coins_change, min_coins_for_change, DpSolver, DpTable};
