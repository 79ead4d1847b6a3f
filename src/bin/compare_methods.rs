//! Compare reserves across every reserving method the dataset supports
//!
//! Usage: cargo run --bin compare_methods -- [--data data/sample]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rust_decimal::Decimal;

use claims_reserving::loader::DEFAULT_DATA_PATH;
use claims_reserving::{MethodKind, ReservingRunner, ReservingSummary, RunConfig, TriangleKind};

#[derive(Parser, Debug)]
#[command(
    name = "compare_methods",
    about = "Reserves per accident period for each reserving method"
)]
struct Args {
    /// Directory holding claims.csv and parameters.csv
    #[arg(long, env = "RESERVING_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// The diagonals in claims.csv already hold cumulative claims
    #[arg(long)]
    cumulative: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = RunConfig {
        data_path: args.data,
        input_kind: if args.cumulative {
            TriangleKind::Cumulative
        } else {
            TriangleKind::Incremental
        },
    };
    let runner = ReservingRunner::from_config(&config)
        .with_context(|| format!("loading claims data from {}", config.data_path.display()))?;

    let mut summaries: Vec<ReservingSummary> = Vec::new();
    for kind in MethodKind::ALL {
        let spec = match runner.spec(kind) {
            Ok(spec) => spec,
            Err(err) => {
                log::warn!("skipping {kind}: {err}");
                continue;
            }
        };

        match runner.run(&spec) {
            Ok(summary) => summaries.push(summary),
            Err(err) => log::warn!("skipping {kind}: {err}"),
        }
    }

    if summaries.is_empty() {
        anyhow::bail!("no reserving method could be run on {}", config.data_path.display());
    }

    print!("{:>8}", "Period");
    for summary in &summaries {
        print!(" {:>22}", summary.method);
    }
    println!();
    println!("{}", "-".repeat(8 + 23 * summaries.len()));

    let periods = summaries[0].periods;
    for period in 0..periods {
        print!("{:>8}", period);
        for summary in &summaries {
            print!(" {:>22.2}", summary.reserves[period]);
        }
        println!();
    }

    println!("{}", "-".repeat(8 + 23 * summaries.len()));
    print!("{:>8}", "Total");
    for summary in &summaries {
        print!(" {:>22.2}", summary.total_reserve);
    }
    println!();

    let (lowest, highest) = summaries
        .iter()
        .map(|summary| summary.total_reserve)
        .fold((Decimal::MAX, Decimal::MIN), |(lo, hi), total| (lo.min(total), hi.max(total)));
    match highest.checked_sub(lowest) {
        Some(spread) => println!("\nSpread of total reserves: {:.2}", spread),
        None => log::warn!("spread of total reserves exceeds the decimal range"),
    }

    Ok(())
}
