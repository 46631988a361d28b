pub mod approx;
pub mod change;
pub mod dynamic;

// Re-export both solvers behind their shared contract
pub use approx::*;
pub use change::{Change, ChangeSolver, Counterexample, Denominations, SolverConfig};
pub use dynamic::*;
