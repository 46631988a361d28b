//! Wall-clock comparison of the greedy and dynamic-programming solvers.

use std::fmt;
use std::time::{Duration, Instant};

use log::{debug, info};
use serde::Serialize;

use crate::cs::approx::greedy_change::{GreedyOutcome, GreedySolver};
use crate::cs::change::{Change, Denominations};
use crate::cs::dynamic::coin_change::DpSolver;
use crate::error::{Error, Result};

/// Amounts used when none are given.
pub const DEFAULT_AMOUNTS: [usize; 6] = [113, 1113, 10113, 111307, 1113113, 11131137];

/// Denominations used when none are given, in ascending order.
pub const DEFAULT_COINS: [usize; 6] = [1, 2, 5, 10, 25, 50];

/// Largest amount the suite accepts. The DP table is linear in the amount.
pub const DEFAULT_MAX_AMOUNT: usize = 20_000_000;

/// Rejects amounts whose DP table would exceed `max_amount` cells.
pub fn check_amount(amount: usize, max_amount: usize) -> Result<()> {
    if amount > max_amount {
        return Err(Error::invalid_input(format!(
            "amount {amount} exceeds the limit of {max_amount}"
        )));
    }
    Ok(())
}

/// Runs `f` once and measures it with a monotonic clock.
pub fn timed<T, F>(f: F) -> (T, Duration)
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    let value = f();
    (value, start.elapsed())
}

/// Both solvers run on the same input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub greedy: GreedyOutcome,
    pub greedy_time: Duration,
    pub dp: Change,
    pub dp_time: Duration,
}

impl Comparison {
    /// Whether greedy paid exactly and used as few coins as DP.
    pub fn counts_agree(&self) -> bool {
        self.greedy.is_exact() && self.greedy.change.coin_count() == self.dp.coin_count()
    }

    /// Coins saved by DP over greedy, `None` when greedy fell short.
    pub fn dp_advantage(&self) -> Option<usize> {
        self.greedy
            .is_exact()
            .then(|| self.greedy.change.coin_count() - self.dp.coin_count())
    }
}

/// Times greedy, then DP, on `amount` and `coins` as given.
///
/// Fails only if DP finds the amount unrepresentable.
pub fn compare(amount: usize, coins: &[usize]) -> Result<Comparison> {
    let (greedy, greedy_time) = timed(|| GreedySolver::default().solve_detailed(amount, coins));
    let (dp, dp_time) = timed(|| DpSolver::default().solve(amount, coins));
    let dp = dp?;

    debug!(
        "compare: amount={amount}, greedy={:?} ({} coins), dp={:?} ({} coins)",
        greedy_time,
        greedy.change.coin_count(),
        dp_time,
        dp.coin_count()
    );

    Ok(Comparison {
        greedy,
        greedy_time,
        dp,
        dp_time,
    })
}

/// Order in which the denominations are handed to both solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinOrdering {
    /// Largest first, as greedy expects.
    Sorted,
    /// In the order the caller gave them.
    Unsorted,
}

impl CoinOrdering {
    pub const ALL: [CoinOrdering; 2] = [CoinOrdering::Sorted, CoinOrdering::Unsorted];

    pub fn arrange(self, coins: &Denominations) -> Vec<usize> {
        match self {
            CoinOrdering::Sorted => coins.descending(),
            CoinOrdering::Unsorted => coins.as_slice().to_vec(),
        }
    }
}

impl fmt::Display for CoinOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoinOrdering::Sorted => write!(f, "sorted"),
            CoinOrdering::Unsorted => write!(f, "unsorted"),
        }
    }
}

/// Inputs to [`run_suite`].
#[derive(Debug, Clone)]
pub struct SuiteConfig {
    pub amounts: Vec<usize>,
    pub coins: Denominations,
    pub max_amount: usize,
}

impl SuiteConfig {
    pub fn new(amounts: Vec<usize>, coins: Denominations) -> Self {
        Self {
            amounts,
            coins,
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }

    pub fn with_max_amount(mut self, max_amount: usize) -> Self {
        self.max_amount = max_amount;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.amounts.is_empty() {
            return Err(Error::invalid_input("no amounts to benchmark"));
        }
        self.amounts
            .iter()
            .try_for_each(|&amount| check_amount(amount, self.max_amount))
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            amounts: DEFAULT_AMOUNTS.to_vec(),
            coins: Denominations::new(&DEFAULT_COINS).expect("default coins are valid"),
            max_amount: DEFAULT_MAX_AMOUNT,
        }
    }
}

/// One measured input of the suite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteRecord {
    pub amount: usize,
    pub ordering: CoinOrdering,
    pub coins: Vec<usize>,
    pub comparison: Comparison,
}

/// Compares both solvers for every amount under every [`CoinOrdering`].
pub fn run_suite(config: &SuiteConfig) -> Result<Vec<SuiteRecord>> {
    config.validate()?;

    let mut records = Vec::with_capacity(config.amounts.len() * CoinOrdering::ALL.len());
    for &amount in &config.amounts {
        for ordering in CoinOrdering::ALL {
            let coins = ordering.arrange(&config.coins);
            let comparison = compare(amount, &coins)?;
            info!(
                "amount {amount}, {ordering} {coins:?}: greedy {} in {:.6}s, dp {} in {:.6}s",
                comparison.greedy.change,
                comparison.greedy_time.as_secs_f64(),
                comparison.dp,
                comparison.dp_time.as_secs_f64()
            );
            records.push(SuiteRecord {
                amount,
                ordering,
                coins,
                comparison,
            });
        }
    }
    Ok(records)
}
