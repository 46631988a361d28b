use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::cs::approx::greedy_change::GreedySolver;
use crate::cs::dynamic::coin_change::build_table;
use crate::error::{Error, Result};

/// Log target for the step-by-step trace emitted by verbose solvers.
pub const TRACE_TARGET: &str = "coinchange::trace";

/// Emits a trace line under [`TRACE_TARGET`] when the config is verbose.
macro_rules! trace_step {
    ($config:expr, $($arg:tt)+) => {
        if $config.verbose {
            log::info!(target: $crate::cs::change::TRACE_TARGET, $($arg)+);
        }
    };
}
pub(crate) use trace_step;

/// Per-call solver options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverConfig {
    /// Emit a human-readable trace of every step. Never changes the result.
    ///
    /// Trace lines go to the `log` facade at `info` level under
    /// [`TRACE_TARGET`]. Nothing is printed unless the caller installs a
    /// logger that writes that target to stdout, as the `coinchange` binary
    /// does.
    pub verbose: bool,
}

impl SolverConfig {
    pub fn verbose() -> Self {
        Self { verbose: true }
    }
}

/// A change-making algorithm: turns an amount into a multiset of coins.
pub trait ChangeSolver {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;

    /// Represents `amount` using the coins in `coins`.
    fn solve(&self, amount: usize, coins: &[usize]) -> Result<Change>;
}

/// Mapping from denomination to the number of coins of that denomination.
///
/// Entries always have a positive count. Iteration is in ascending
/// denomination order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Change {
    coins: BTreeMap<usize, usize>,
}

impl Change {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` coins of `coin`. A zero count leaves the change untouched.
    pub fn add(&mut self, coin: usize, count: usize) {
        if count > 0 {
            *self.coins.entry(coin).or_insert(0) += count;
        }
    }

    /// Number of coins of `coin`, zero if absent.
    pub fn get(&self, coin: usize) -> usize {
        self.coins.get(&coin).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.coins.iter().map(|(&coin, &count)| (coin, count))
    }

    /// Number of distinct denominations used.
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Total number of coins.
    pub fn coin_count(&self) -> usize {
        self.coins.values().sum()
    }

    /// Weighted sum of denomination times count.
    pub fn total_value(&self) -> usize {
        self.coins.iter().map(|(coin, count)| coin * count).sum()
    }
}

impl<const N: usize> From<[(usize, usize); N]> for Change {
    fn from(entries: [(usize, usize); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl FromIterator<(usize, usize)> for Change {
    fn from_iter<I: IntoIterator<Item = (usize, usize)>>(iter: I) -> Self {
        let mut change = Change::new();
        for (coin, count) in iter {
            change.add(coin, count);
        }
        change
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (coin, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{coin}: {count}")?;
        }
        write!(f, "}}")
    }
}

/// An amount the greedy algorithm gets wrong for a denomination set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterexample {
    pub amount: usize,
    /// Greedy coin count, `None` when greedy leaves a remainder.
    pub greedy_coins: Option<usize>,
    pub optimal_coins: usize,
}

/// A validated set of coin denominations.
///
/// Values are positive and distinct. The input order is kept, so callers can
/// feed the solvers either the original ordering or a sorted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denominations {
    coins: Vec<usize>,
}

impl Denominations {
    pub fn new(coins: &[usize]) -> Result<Self> {
        if coins.is_empty() {
            return Err(Error::invalid_input("denomination set is empty"));
        }
        let mut seen = coins.to_vec();
        seen.sort_unstable();
        if seen[0] == 0 {
            return Err(Error::invalid_input("denominations must be positive"));
        }
        if let Some(pair) = seen.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(Error::invalid_input(format!(
                "duplicate denomination {}",
                pair[0]
            )));
        }
        Ok(Self {
            coins: coins.to_vec(),
        })
    }

    /// Denominations in the order they were given.
    pub fn as_slice(&self) -> &[usize] {
        &self.coins
    }

    /// Largest first, the order the greedy solver expects.
    pub fn descending(&self) -> Vec<usize> {
        let mut coins = self.coins.clone();
        coins.sort_unstable_by(|a, b| b.cmp(a));
        coins
    }

    pub fn ascending(&self) -> Vec<usize> {
        let mut coins = self.coins.clone();
        coins.sort_unstable();
        coins
    }

    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Every amount is representable iff the unit coin is present.
    pub fn contains_unit(&self) -> bool {
        self.coins.contains(&1)
    }

    /// Smallest amount up to `limit` where greedy does worse than optimal.
    ///
    /// Amounts no combination can reach are skipped.
    pub fn find_counterexample(&self, limit: usize) -> Result<Option<Counterexample>> {
        let descending = self.descending();
        let table = build_table(limit, &descending, SolverConfig::default())?;
        let greedy = GreedySolver::default();

        for amount in 1..=limit {
            let Some(optimal_coins) = table.min_count(amount) else {
                continue;
            };
            let outcome = greedy.solve_detailed(amount, &descending);
            let greedy_coins = outcome.is_exact().then(|| outcome.change.coin_count());
            if greedy_coins != Some(optimal_coins) {
                return Ok(Some(Counterexample {
                    amount,
                    greedy_coins,
                    optimal_coins,
                }));
            }
        }
        Ok(None)
    }

    /// Amount bound past which no smallest counterexample can lie: the sum
    /// of the two largest denominations (Kozen and Zaks).
    pub fn counterexample_bound(&self) -> usize {
        let descending = self.descending();
        match descending.as_slice() {
            [largest, second, ..] => largest + second,
            [only] => *only,
            [] => 0,
        }
    }

    /// Whether greedy is optimal for every amount.
    pub fn is_canonical(&self) -> Result<bool> {
        Ok(self
            .find_counterexample(self.counterexample_bound())?
            .is_none())
    }
}

impl FromStr for Denominations {
    type Err = Error;

    /// Parses a comma-separated list such as `50,25,10,5,2,1`.
    fn from_str(s: &str) -> Result<Self> {
        let coins = s
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(parse_amount)
            .collect::<Result<Vec<_>>>()?;
        Denominations::new(&coins)
    }
}

/// Parses a non-negative amount, rejecting negative values explicitly.
pub fn parse_amount(s: &str) -> Result<usize> {
    let s = s.trim();
    let value: i128 = s
        .parse()
        .map_err(|_| Error::invalid_input(format!("`{s}` is not an integer")))?;
    if value < 0 {
        return Err(Error::invalid_input(format!("amount {value} is negative")));
    }
    usize::try_from(value).map_err(|_| Error::invalid_input(format!("amount {value} is too large")))
}

/// Parses a comma-separated list of amounts.
pub fn parse_amounts(s: &str) -> Result<Vec<usize>> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_amount)
        .collect()
}
