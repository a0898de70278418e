use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use expense_median::{
    example_ledger, MedianReport, MedianStrategy, MiddlePivot, PivotRule, RandomPivot,
};

/// Median of expenses up to and including the first Sunday of each month
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Which median strategy to run
    #[arg(long, value_enum, default_value_t = StrategyArg::Both)]
    strategy: StrategyArg,

    /// Seed the random pivot for reproducible selection runs
    #[arg(long, conflicts_with = "middle_pivot")]
    seed: Option<u64>,

    /// Use the middle element as pivot instead of a random one
    #[arg(long)]
    middle_pivot: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Ledger as an inline JSON literal instead of the built-in example
    #[arg(long)]
    ledger: Option<String>,

    /// Log debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum StrategyArg {
    Sort,
    Select,
    Both,
}

impl StrategyArg {
    fn strategies(self) -> &'static [MedianStrategy] {
        match self {
            StrategyArg::Sort => &[MedianStrategy::Sort],
            StrategyArg::Select => &[MedianStrategy::Select],
            StrategyArg::Both => &[MedianStrategy::Sort, MedianStrategy::Select],
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let expenses: Value = match &args.ledger {
        Some(literal) => {
            serde_json::from_str(literal).context("Failed to parse --ledger as JSON")?
        }
        None => example_ledger(),
    };

    let mut pivot_rule = pivot_rule(&args);
    let reports: Vec<MedianReport> = args
        .strategy
        .strategies()
        .iter()
        .map(|&strategy| MedianReport::run(&expenses, strategy, pivot_rule.as_mut()))
        .collect();

    match args.format {
        Format::Json => {
            let json = serde_json::to_string_pretty(&reports)
                .context("Failed to serialize median report")?;
            println!("{}", json);
        }
        Format::Text => print_text(&reports),
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "expense_median=debug"
    } else {
        "expense_median=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn pivot_rule(args: &Args) -> Box<dyn PivotRule> {
    if args.middle_pivot {
        Box::new(MiddlePivot)
    } else if let Some(seed) = args.seed {
        Box::new(RandomPivot::new(SmallRng::seed_from_u64(seed)))
    } else {
        Box::new(RandomPivot::new(SmallRng::from_entropy()))
    }
}

fn print_text(reports: &[MedianReport]) {
    for report in reports {
        match report.median {
            Some(median) => println!("{}", median),
            None => println!("None"),
        }
        tracing::info!("{}", report.summary());
    }

    // Issues are identical across strategies
    if let Some(report) = reports.first() {
        for issue in &report.issues {
            eprintln!("invalid ledger: {}", issue);
        }
    }
}
