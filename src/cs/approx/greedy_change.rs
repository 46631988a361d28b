use log::{debug, warn};

use crate::cs::change::{trace_step, Change, ChangeSolver, SolverConfig};
use crate::error::{Error, Result};

/// Result of a greedy run, including whatever it could not pay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreedyOutcome {
    pub change: Change,
    /// Part of the amount left over after the last denomination. Zero when
    /// the change is exact.
    pub remainder: usize,
}

impl GreedyOutcome {
    pub fn is_exact(&self) -> bool {
        self.remainder == 0
    }
}

/// Greedy change-making: always take as many of the largest fitting coin as
/// possible.
///
/// Expects `coins` in descending order and does not sort them. For canonical
/// coin systems such as `[50, 25, 10, 5, 2, 1]` the result is optimal. For
/// others it may use more coins than needed, or fall short of the amount when
/// no unit coin is present. Falling short is not treated as an error by
/// [`ChangeSolver::solve`]; use [`GreedySolver::solve_exact`] to reject it.
///
/// # Examples
///
/// ```
/// use coinchange::cs::approx::greedy_change::GreedySolver;
/// use coinchange::Change;
///
/// let solver = GreedySolver::default();
/// let outcome = solver.solve_detailed(6, &[4, 3, 1]);
/// assert_eq!(outcome.change, Change::from([(4, 1), (1, 2)]));
/// assert!(outcome.is_exact());
///
/// // No unit coin: 7 - 5 leaves 2, which 3 cannot cover.
/// assert_eq!(solver.solve_detailed(7, &[5, 3]).remainder, 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreedySolver {
    pub config: SolverConfig,
}

impl GreedySolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Runs the greedy selection and reports any unpaid remainder.
    pub fn solve_detailed(&self, amount: usize, coins: &[usize]) -> GreedyOutcome {
        debug!("greedy: amount={amount}, denominations={}", coins.len());
        let mut change = Change::new();
        let mut remaining = amount;

        for &coin in coins {
            // Paid in full, smaller coins are not needed.
            if remaining == 0 {
                break;
            }
            // A zero coin never fits.
            if coin == 0 || remaining < coin {
                continue;
            }
            // Take as many of this coin as fit, the rest goes to smaller ones.
            let count = remaining / coin;
            change.add(coin, count);
            remaining -= coin * count;
            trace_step!(
                self.config,
                "coin: {coin}, count: {count}, remaining: {remaining}"
            );
        }

        // No unit coin: what is left cannot be paid. Reported, not an error.
        if remaining > 0 {
            warn!("greedy: amount={amount} under-represented, {remaining} left unpaid");
        }
        debug!("greedy: amount={amount} paid with {} coins", change.coin_count());
        GreedyOutcome {
            change,
            remainder: remaining,
        }
    }

    /// Like [`solve_detailed`](Self::solve_detailed) but fails with
    /// [`Error::Unrepresentable`] if the coins fall short of `amount`.
    pub fn solve_exact(&self, amount: usize, coins: &[usize]) -> Result<Change> {
        let outcome = self.solve_detailed(amount, coins);
        if outcome.is_exact() {
            Ok(outcome.change)
        } else {
            Err(Error::Unrepresentable {
                amount,
                remainder: outcome.remainder,
            })
        }
    }
}

impl ChangeSolver for GreedySolver {
    fn name(&self) -> &'static str {
        "greedy"
    }

    /// Never fails. A shortfall is returned as a partial change.
    fn solve(&self, amount: usize, coins: &[usize]) -> Result<Change> {
        Ok(self.solve_detailed(amount, coins).change)
    }
}

/// Greedy change for `amount` without tracing. May under-represent.
pub fn greedy_change(amount: usize, coins: &[usize]) -> Change {
    GreedySolver::default().solve_detailed(amount, coins).change
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_amount() {
        let change = greedy_change(113, &[50, 25, 10, 5, 2, 1]);
        assert_eq!(change, Change::from([(50, 2), (10, 1), (2, 1), (1, 1)]));
        assert_eq!(change.total_value(), 113);
    }

    #[test]
    fn test_non_canonical_sets() {
        assert_eq!(
            greedy_change(6, &[4, 3, 1]),
            Change::from([(4, 1), (1, 2)])
        );
        assert_eq!(
            greedy_change(30, &[25, 10, 5, 1]),
            Change::from([(25, 1), (5, 1)])
        );
    }

    #[test]
    fn test_zero_amount() {
        let outcome = GreedySolver::default().solve_detailed(0, &[50, 25, 1]);
        assert!(outcome.change.is_empty());
        assert!(outcome.is_exact());
    }

    #[test]
    fn test_under_representation() {
        let solver = GreedySolver::default();
        let outcome = solver.solve_detailed(1, &[5, 2]);
        assert!(outcome.change.is_empty());
        assert_eq!(outcome.remainder, 1);

        // 6 = 3 + 3, but greedy takes 4 first.
        let outcome = solver.solve_detailed(6, &[4, 3]);
        assert_eq!(outcome.change, Change::from([(4, 1)]));
        assert_eq!(outcome.remainder, 2);
        assert_eq!(ChangeSolver::solve(&solver, 6, &[4, 3]), Ok(Change::from([(4, 1)])));
        assert_eq!(
            solver.solve_exact(6, &[4, 3]),
            Err(Error::Unrepresentable {
                amount: 6,
                remainder: 2
            })
        );
    }

    #[test]
    fn test_unsorted_input_is_used_as_given() {
        let change = greedy_change(113, &[1, 2, 5, 10, 25, 50]);
        assert_eq!(change, Change::from([(1, 113)]));
    }

    #[test]
    fn test_verbose_does_not_change_result() {
        let quiet = GreedySolver::default().solve_detailed(289, &[100, 20, 7, 1]);
        let verbose =
            GreedySolver::new(SolverConfig::verbose()).solve_detailed(289, &[100, 20, 7, 1]);
        assert_eq!(quiet, verbose);
    }
}
