//! Time-vs-amount report over a benchmark suite.
//!
//! Records are grouped into one series per algorithm and coin ordering. Each
//! series gets a trend: the slope of a least-squares fit of ln(seconds)
//! against ln(amount), shown next to the expected complexity class.

use std::fmt;

use serde::Serialize;

use crate::bench::{CoinOrdering, SuiteRecord};

pub mod chart;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Greedy,
    Dp,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::Greedy, Algorithm::Dp];

    /// Asymptotic cost in terms of amount `n` and denomination count `m`.
    pub fn complexity(self) -> &'static str {
        match self {
            Algorithm::Greedy => "O(m)",
            Algorithm::Dp => "O(n * m)",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Greedy => write!(f, "greedy"),
            Algorithm::Dp => write!(f, "dp"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub amount: usize,
    pub seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trend {
    /// Fitted log-log slope, `None` with fewer than two usable points.
    pub slope: Option<f64>,
    pub complexity: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub label: String,
    pub algorithm: Algorithm,
    pub ordering: CoinOrdering,
    pub points: Vec<Point>,
    pub trend: Trend,
}

/// One line per measured input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub amount: usize,
    pub ordering: CoinOrdering,
    pub greedy_secs: f64,
    pub dp_secs: f64,
    pub greedy_coins: usize,
    pub dp_coins: usize,
    /// Amount greedy could not pay out.
    pub greedy_remainder: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub rows: Vec<Row>,
    pub series: Vec<Series>,
}

impl Report {
    pub fn from_records(records: &[SuiteRecord]) -> Self {
        let rows = records
            .iter()
            .map(|record| Row {
                amount: record.amount,
                ordering: record.ordering,
                greedy_secs: record.comparison.greedy_time.as_secs_f64(),
                dp_secs: record.comparison.dp_time.as_secs_f64(),
                greedy_coins: record.comparison.greedy.change.coin_count(),
                dp_coins: record.comparison.dp.coin_count(),
                greedy_remainder: record.comparison.greedy.remainder,
            })
            .collect::<Vec<_>>();

        let mut series = Vec::new();
        for ordering in CoinOrdering::ALL {
            for algorithm in Algorithm::ALL {
                let points: Vec<Point> = rows
                    .iter()
                    .filter(|row| row.ordering == ordering)
                    .map(|row| Point {
                        amount: row.amount,
                        seconds: match algorithm {
                            Algorithm::Greedy => row.greedy_secs,
                            Algorithm::Dp => row.dp_secs,
                        },
                    })
                    .collect();
                if points.is_empty() {
                    continue;
                }
                series.push(Series {
                    label: format!("{algorithm} ({ordering} coins)"),
                    algorithm,
                    ordering,
                    trend: Trend {
                        slope: log_log_slope(&points),
                        complexity: algorithm.complexity(),
                    },
                    points,
                });
            }
        }

        Report { rows, series }
    }

    /// Comma-separated rows with a header line.
    pub fn render_csv(&self) -> String {
        let mut out = String::from(
            "amount,ordering,greedy_secs,dp_secs,greedy_coins,dp_coins,greedy_remainder\n",
        );
        for row in &self.rows {
            out.push_str(&format!(
                "{},{},{:.9},{:.9},{},{},{}\n",
                row.amount,
                row.ordering,
                row.greedy_secs,
                row.dp_secs,
                row.greedy_coins,
                row.dp_coins,
                row.greedy_remainder
            ));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Text table of every row followed by one trend line per series.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>12} {:>9} {:>12} {:>12} {:>12} {:>9}",
            "amount", "ordering", "greedy (s)", "dp (s)", "greedy coins", "dp coins"
        )?;
        for row in &self.rows {
            let greedy_coins = if row.greedy_remainder > 0 {
                format!("{}*", row.greedy_coins)
            } else {
                row.greedy_coins.to_string()
            };
            writeln!(
                f,
                "{:>12} {:>9} {:>12.6} {:>12.6} {:>12} {:>9}",
                row.amount, row.ordering, row.greedy_secs, row.dp_secs, greedy_coins, row.dp_coins
            )?;
        }
        if self.rows.iter().any(|row| row.greedy_remainder > 0) {
            writeln!(f, "* greedy fell short of the amount")?;
        }

        writeln!(f)?;
        for series in &self.series {
            match series.trend.slope {
                Some(slope) => writeln!(
                    f,
                    "{:<28} slope {:>6.2}  expected {}",
                    series.label, slope, series.trend.complexity
                )?,
                None => writeln!(
                    f,
                    "{:<28} slope    n/a  expected {}",
                    series.label, series.trend.complexity
                )?,
            }
        }
        Ok(())
    }
}

/// Least-squares slope of ln(seconds) over ln(amount).
///
/// Points with a zero amount or zero duration have no logarithm and are
/// skipped.
pub fn log_log_slope(points: &[Point]) -> Option<f64> {
    let logs: Vec<(f64, f64)> = points
        .iter()
        .filter(|p| p.amount > 0 && p.seconds > 0.0)
        .map(|p| ((p.amount as f64).ln(), p.seconds.ln()))
        .collect();
    if logs.len() < 2 {
        return None;
    }

    let n = logs.len() as f64;
    let mean_x = logs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = logs.iter().map(|(_, y)| y).sum::<f64>() / n;
    let (cov, var) = logs.iter().fold((0.0, 0.0), |(cov, var), (x, y)| {
        let dx = x - mean_x;
        (cov + dx * (y - mean_y), var + dx * dx)
    });

    if var == 0.0 {
        None
    } else {
        Some(cov / var)
    }
}
