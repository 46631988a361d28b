use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use coinchange::bench::{self, SuiteConfig};
use coinchange::change::{parse_amount, parse_amounts};
use coinchange::report::{chart, Report};
use coinchange::{Denominations, DpSolver, GreedySolver, SolverConfig};
use tracing_subscriber::EnvFilter;

/// Greedy vs dynamic-programming change making.
#[derive(Parser, Debug)]
#[command(name = "coinchange", version, about)]
struct Cli {
    /// Print the step-by-step solver trace.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Make change for a single amount.
    Solve {
        /// Amount to pay out.
        #[arg(short, long, allow_hyphen_values = true)]
        amount: String,

        /// Comma-separated denominations.
        #[arg(short, long, default_value = "50,25,10,5,2,1", allow_hyphen_values = true)]
        coins: String,

        #[arg(long, value_enum, default_value_t = Algo::Both)]
        algo: Algo,

        /// Refuse amounts above this, the DP table is linear in the amount.
        #[arg(long, default_value_t = bench::DEFAULT_MAX_AMOUNT)]
        max_amount: usize,
    },
    /// Time both solvers over increasing amounts.
    Compare {
        /// Comma-separated amounts.
        #[arg(long, default_value = "113,1113,10113,111307,1113113,11131137", allow_hyphen_values = true)]
        amounts: String,

        /// Comma-separated denominations, in the "unsorted" order.
        #[arg(short, long, default_value = "1,2,5,10,25,50", allow_hyphen_values = true)]
        coins: String,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        /// Refuse amounts above this, the DP table is linear in the amount.
        #[arg(long, default_value_t = bench::DEFAULT_MAX_AMOUNT)]
        max_amount: usize,

        /// Chart width in columns, for `--format chart`.
        #[arg(long, default_value_t = chart::DEFAULT_WIDTH)]
        width: u16,

        /// Chart height in rows, for `--format chart`.
        #[arg(long, default_value_t = chart::DEFAULT_HEIGHT)]
        height: u16,
    },
    /// Check whether greedy is optimal for every amount.
    Canonical {
        /// Comma-separated denominations.
        #[arg(short, long, allow_hyphen_values = true)]
        coins: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Algo {
    Greedy,
    Dp,
    Both,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Table,
    Csv,
    Json,
    /// Log-log time-vs-amount chart.
    Chart,
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,coinchange::trace=info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_target(false)
        .without_time()
        .init();
}

struct ChartSize {
    width: u16,
    height: u16,
}

fn solve(
    amount: &str,
    coins: &str,
    algo: Algo,
    max_amount: usize,
    config: SolverConfig,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let coins: Denominations = coins.parse()?;
    println!("amount: {amount}, coins: {:?}", coins.as_slice());

    if algo != Algo::Dp {
        let outcome = GreedySolver::new(config).solve_detailed(amount, &coins.descending());
        println!(
            "greedy: {} ({} coins)",
            outcome.change,
            outcome.change.coin_count()
        );
        if !outcome.is_exact() {
            println!("greedy: {} left unpaid", outcome.remainder);
        }
    }
    if algo != Algo::Greedy {
        bench::check_amount(amount, max_amount)?;
        let change = DpSolver::new(config)
            .solve(amount, coins.as_slice())
            .with_context(|| format!("dynamic programming failed for amount {amount}"))?;
        println!("dp: {change} ({} coins)", change.coin_count());
    }
    Ok(())
}

fn compare(
    amounts: &str,
    coins: &str,
    format: Format,
    max_amount: usize,
    size: ChartSize,
) -> Result<()> {
    let config = SuiteConfig::new(parse_amounts(amounts)?, coins.parse::<Denominations>()?)
        .with_max_amount(max_amount);
    let records = bench::run_suite(&config)?;
    let report = Report::from_records(&records);

    match format {
        Format::Table => print!("{report}"),
        Format::Csv => print!("{}", report.render_csv()),
        Format::Json => println!("{}", report.to_json()?),
        Format::Chart => print!(
            "{}",
            chart::render_chart(&report, size.width, size.height)
        ),
    }
    Ok(())
}

fn canonical(coins: &str) -> Result<()> {
    let coins: Denominations = coins.parse()?;
    let bound = coins.counterexample_bound();
    match coins.find_counterexample(bound)? {
        None => println!("{:?} is canonical", coins.descending()),
        Some(found) => {
            let greedy = found
                .greedy_coins
                .map_or_else(|| "falls short".to_string(), |n| format!("{n} coins"));
            println!(
                "{:?} is not canonical: amount {} takes {} coins, greedy {greedy}",
                coins.descending(),
                found.amount,
                found.optimal_coins
            );
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = SolverConfig {
        verbose: cli.verbose,
    };

    match cli.command {
        Commands::Solve {
            amount,
            coins,
            algo,
            max_amount,
        } => solve(&amount, &coins, algo, max_amount, config),
        Commands::Compare {
            amounts,
            coins,
            format,
            max_amount,
            width,
            height,
        } => compare(
            &amounts,
            &coins,
            format,
            max_amount,
            ChartSize { width, height },
        ),
        Commands::Canonical { coins } => canonical(&coins),
    }
}
