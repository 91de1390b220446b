//! Tally checkout CLI
//!
//! Prices an order file against a rule-set file and prints the receipt.

use std::{io, path::PathBuf};

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tally::{
    config,
    evaluation::{self, OrderSizeBasis},
    receipt,
};

/// Price an order against a set of discount rules.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the YAML rule-set file.
    #[arg(short, long)]
    rules: PathBuf,

    /// Path to the YAML order file.
    #[arg(short, long)]
    order: PathBuf,

    /// Evaluation date (YYYY-MM-DD); defaults to today.
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Measure order-size rules by distinct lines instead of total units.
    #[arg(long)]
    distinct_lines: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let registry = config::rules_from_path(&args.rules)?;
    let order = config::order_from_path(&args.order)?;

    let now = args.date.unwrap_or_else(|| Utc::now().date_naive());

    let basis = if args.distinct_lines {
        OrderSizeBasis::DistinctLines
    } else {
        OrderSizeBasis::TotalQuantity
    };

    debug!(rules = registry.len(), lines = order.line_count(), %now, "evaluating order");

    let evaluation = evaluation::evaluate_with(&order, &registry, now, basis);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    receipt::write_receipt(&mut handle, &order, &evaluation)?;

    Ok(())
}
