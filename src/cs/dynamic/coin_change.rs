use log::debug;

use crate::cs::change::{trace_step, Change, ChangeSolver, SolverConfig};
use crate::error::{Error, Result};

/// Minimum coin counts and last-coin trace for every sub-amount `0..=amount`.
///
/// `min_count[i]` holds the fewest coins summing to `i`, or the sentinel
/// `amount + 1` when `i` is unreachable. `last_coin[i]` is the denomination
/// used last in that optimal solution, or 0 when none was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpTable {
    min_count: Vec<usize>,
    last_coin: Vec<usize>,
    sentinel: usize,
}

impl DpTable {
    /// The largest sub-amount covered by the table.
    pub fn amount(&self) -> usize {
        self.min_count.len() - 1
    }

    /// Value standing in for "unreachable". Larger than any real count.
    pub fn sentinel(&self) -> usize {
        self.sentinel
    }

    /// Fewest coins for `amount`, `None` if unreachable or outside the table.
    pub fn min_count(&self, amount: usize) -> Option<usize> {
        self.min_count
            .get(amount)
            .copied()
            .filter(|&count| count != self.sentinel)
    }

    /// Denomination chosen last for `amount`, `None` if no coin was chosen.
    pub fn last_coin(&self, amount: usize) -> Option<usize> {
        self.last_coin.get(amount).copied().filter(|&coin| coin != 0)
    }

    pub fn is_reachable(&self, amount: usize) -> bool {
        self.min_count(amount).is_some()
    }

    /// Walks the last-coin trace back from `amount` down to zero.
    ///
    /// Fails with [`Error::Unrepresentable`] instead of looping when the trace
    /// hits a sub-amount no coin reached.
    pub fn reconstruct(&self, amount: usize, config: SolverConfig) -> Result<Change> {
        if amount > self.amount() {
            return Err(Error::invalid_input(format!(
                "amount {amount} is outside a table built up to {}",
                self.amount()
            )));
        }
        if !self.is_reachable(amount) {
            return Err(Error::Unrepresentable {
                amount,
                remainder: amount,
            });
        }

        // Each step pays the recorded last coin and moves to the smaller
        // sub-amount it came from.
        let mut change = Change::new();
        let mut current = amount;
        while current > 0 {
            let coin = self
                .last_coin(current)
                .ok_or(Error::Unrepresentable {
                    amount,
                    remainder: current,
                })?;
            change.add(coin, 1);
            current -= coin;
            trace_step!(
                config,
                "amount: {current}, coin: {coin}, count: {}",
                change.get(coin)
            );
        }
        Ok(change)
    }
}

/// Fills the DP table for every sub-amount up to `amount`.
///
/// Runs in O(amount * coins.len()) time and O(amount) space. When two coins
/// give the same count for a sub-amount, the first one in `coins` is kept.
pub fn build_table(amount: usize, coins: &[usize], config: SolverConfig) -> Result<DpTable> {
    // amount + 1 cells, one per sub-amount; the same value marks "unreachable"
    // since no solution needs more than `amount` coins.
    let sentinel = amount
        .checked_add(1)
        .ok_or_else(|| Error::invalid_input(format!("amount {amount} is too large")))?;

    let mut min_count = allocate_cells(sentinel, sentinel)?;
    let mut last_coin = allocate_cells(sentinel, 0)?;
    // Base case: zero is paid with no coins.
    min_count[0] = 0;

    trace_step!(config, "coin counts: {min_count:?}");
    trace_step!(config, "last coins: {last_coin:?}");

    for i in 1..=amount {
        for &coin in coins {
            // Paying `coin` last leaves i - coin, already solved optimally.
            // Strict `<` keeps the first coin on ties.
            if coin <= i && min_count[i - coin] + 1 < min_count[i] {
                min_count[i] = min_count[i - coin] + 1;
                last_coin[i] = coin;
                trace_step!(
                    config,
                    "amount: {i}, coin: {coin}, count: {}",
                    min_count[i]
                );
            }
        }
    }

    trace_step!(config, "coin counts: {min_count:?}");
    trace_step!(config, "last coins: {last_coin:?}");

    Ok(DpTable {
        min_count,
        last_coin,
        sentinel,
    })
}

// Allocates `len` cells without aborting when the table cannot fit in memory.
fn allocate_cells(len: usize, value: usize) -> Result<Vec<usize>> {
    let mut cells = Vec::new();
    cells.try_reserve_exact(len).map_err(|err| {
        Error::invalid_input(format!(
            "amount {} needs a table too large to allocate: {err}",
            len - 1
        ))
    })?;
    cells.resize(len, value);
    Ok(cells)
}

/// Exact change-making by dynamic programming.
///
/// Always returns a representation with the fewest possible coins. The order
/// of `coins` does not matter for the count, only for which coin is picked
/// among equally good ones.
///
/// # Examples
///
/// ```
/// use coinchange::cs::dynamic::coin_change::DpSolver;
/// use coinchange::Change;
///
/// let solver = DpSolver::default();
/// // Greedy would pay 6 as 4 + 1 + 1.
/// assert_eq!(solver.solve(6, &[4, 3, 1]), Ok(Change::from([(3, 2)])));
/// assert!(solver.solve(1, &[5, 2]).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DpSolver {
    pub config: SolverConfig,
}

impl DpSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn solve(&self, amount: usize, coins: &[usize]) -> Result<Change> {
        debug!("dp: amount={amount}, denominations={}", coins.len());
        let table = build_table(amount, coins, self.config)?;
        let change = table.reconstruct(amount, self.config)?;
        debug!("dp: amount={amount} paid with {} coins", change.coin_count());
        Ok(change)
    }
}

impl ChangeSolver for DpSolver {
    fn name(&self) -> &'static str {
        "dp"
    }

    fn solve(&self, amount: usize, coins: &[usize]) -> Result<Change> {
        DpSolver::solve(self, amount, coins)
    }
}

/// Optimal change for `amount` without tracing.
pub fn min_coins_change(amount: usize, coins: &[usize]) -> Result<Change> {
    DpSolver::default().solve(amount, coins)
}

/// Fewest coins needed for `amount`, `None` when it cannot be formed.
///
/// ```
/// use coinchange::cs::dynamic::coin_change::min_coins_for_change;
///
/// assert_eq!(min_coins_for_change(&[1, 6, 10], 18), Some(3));
/// assert_eq!(min_coins_for_change(&[2, 4], 7), None);
/// ```
pub fn min_coins_for_change(coins: &[usize], amount: usize) -> Option<usize> {
    build_table(amount, coins, SolverConfig::default())
        .ok()?
        .min_count(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Exhaustive minimum over all coin multisets, for small amounts.
    fn brute_force_min(coins: &[usize], amount: usize) -> Option<usize> {
        if amount == 0 {
            return Some(0);
        }
        coins
            .iter()
            .filter(|&&coin| coin <= amount)
            .filter_map(|&coin| brute_force_min(coins, amount - coin).map(|n| n + 1))
            .min()
    }

    #[test]
    fn test_table_contents() {
        let table = build_table(6, &[4, 3, 1], SolverConfig::default()).unwrap();
        assert_eq!(table.amount(), 6);
        assert_eq!(table.sentinel(), 7);
        let counts: Vec<_> = (0..=6).map(|i| table.min_count(i)).collect();
        assert_eq!(
            counts,
            vec![Some(0), Some(1), Some(2), Some(1), Some(1), Some(2), Some(2)]
        );
        assert_eq!(table.last_coin(0), None);
        assert_eq!(table.last_coin(6), Some(3));
        assert_eq!(table.min_count(7), None);
    }

    #[test]
    fn test_tie_break_keeps_first_coin() {
        // 3 = 1 + 2 = 2 + 1: equal counts, the coin listed first is recorded.
        let table = build_table(3, &[1, 2], SolverConfig::default()).unwrap();
        assert_eq!(table.last_coin(3), Some(1));
        let table = build_table(3, &[2, 1], SolverConfig::default()).unwrap();
        assert_eq!(table.last_coin(3), Some(2));

        let table = build_table(30, &[25, 10, 5, 1], SolverConfig::default()).unwrap();
        let change = table.reconstruct(30, SolverConfig::default()).unwrap();
        assert_eq!(change, Change::from([(25, 1), (5, 1)]));
    }

    #[test]
    fn test_reference_amount() {
        let change = min_coins_change(113, &[50, 25, 10, 5, 2, 1]).unwrap();
        assert_eq!(change, Change::from([(50, 2), (10, 1), (2, 1), (1, 1)]));
        assert_eq!(change.coin_count(), 5);
    }

    #[test]
    fn test_beats_greedy_on_non_canonical_set() {
        assert_eq!(
            min_coins_change(6, &[4, 3, 1]).unwrap(),
            Change::from([(3, 2)])
        );
    }

    #[test]
    fn test_zero_amount() {
        assert!(min_coins_change(0, &[50, 25, 1]).unwrap().is_empty());
        assert!(min_coins_change(0, &[5, 2]).unwrap().is_empty());
    }

    #[test]
    fn test_unrepresentable() {
        assert_eq!(
            min_coins_change(1, &[5, 2]),
            Err(Error::Unrepresentable {
                amount: 1,
                remainder: 1
            })
        );
        assert!(matches!(
            min_coins_change(3, &[2]),
            Err(Error::Unrepresentable { amount: 3, .. })
        ));
        assert!(matches!(
            min_coins_change(7, &[]),
            Err(Error::Unrepresentable { amount: 7, .. })
        ));
        // Reachable despite the missing unit coin.
        assert_eq!(min_coins_change(7, &[5, 2]).unwrap().coin_count(), 2);
    }

    #[test]
    fn test_reconstruct_outside_table() {
        let table = build_table(5, &[1], SolverConfig::default()).unwrap();
        assert!(matches!(
            table.reconstruct(6, SolverConfig::default()),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(
            table.reconstruct(3, SolverConfig::default()).unwrap(),
            Change::from([(1, 3)])
        );
    }

    #[test]
    fn test_amount_too_large() {
        assert!(matches!(
            build_table(usize::MAX, &[1], SolverConfig::default()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_table_too_large_to_allocate() {
        assert!(matches!(
            build_table(usize::MAX / 4, &[1], SolverConfig::default()),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            min_coins_change(usize::MAX / 2, &[1]),
            Err(Error::InvalidInput(_))
        ));
        assert_eq!(min_coins_for_change(&[1], usize::MAX / 4), None);
    }

    #[test]
    fn test_verbose_does_not_change_result() {
        let quiet = DpSolver::default().solve(37, &[1, 7, 10]).unwrap();
        let verbose = DpSolver::new(SolverConfig::verbose())
            .solve(37, &[1, 7, 10])
            .unwrap();
        assert_eq!(quiet, verbose);
    }

    #[test]
    fn test_min_coins_for_change() {
        let coins = vec![1, 6, 10];
        assert_eq!(min_coins_for_change(&coins, 18), Some(3));
        assert_eq!(min_coins_for_change(&coins, 0), Some(0));
        assert_eq!(min_coins_for_change(&coins, 1), Some(1));
        assert_eq!(min_coins_for_change(&[2, 4], 7), None);
    }

    #[test]
    fn test_matches_brute_force() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut coins: Vec<usize> = vec![1];
            for _ in 0..rng.gen_range(1..4) {
                let coin = rng.gen_range(2..12);
                if !coins.contains(&coin) {
                    coins.push(coin);
                }
            }
            let amount = rng.gen_range(0..16);
            let change = min_coins_change(amount, &coins).unwrap();
            assert_eq!(change.total_value(), amount);
            assert_eq!(Some(change.coin_count()), brute_force_min(&coins, amount));
        }
    }

    #[test]
    fn test_order_independent_count() {
        let a = min_coins_change(97, &[1, 5, 12, 19]).unwrap();
        let b = min_coins_change(97, &[19, 12, 5, 1]).unwrap();
        assert_eq!(a.coin_count(), b.coin_count());
        assert_eq!(a.total_value(), 97);
        assert_eq!(b.total_value(), 97);
    }
}
