pub mod bench;
pub mod cs;
pub mod error;
pub mod report;

pub use cs::{approx, change, dynamic};
pub use cs::{
    Change, ChangeSolver, Denominations, DpSolver, DpTable, GreedyOutcome, GreedySolver,
    SolverConfig,
};
pub use error::{Error, Result};
