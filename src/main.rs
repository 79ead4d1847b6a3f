//! Claims Reserving CLI
//!
//! Runs one reserving method over a claims dataset and prints its report

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use claims_reserving::loader::{self, DEFAULT_DATA_PATH};
use claims_reserving::{MethodKind, ReservingRunner, TriangleKind};

#[derive(Parser, Debug)]
#[command(
    name = "claims_reserving",
    version,
    about = "Estimate outstanding claims reserves from a run-off triangle"
)]
struct Args {
    /// Directory holding claims.csv and (optionally) parameters.csv
    #[arg(long, env = "RESERVING_DATA", default_value = DEFAULT_DATA_PATH)]
    data: PathBuf,

    /// Reserving method to run
    #[arg(long, value_enum, env = "RESERVING_METHOD", default_value_t = MethodKind::ChainLadder)]
    method: MethodKind,

    /// The diagonals in claims.csv already hold cumulative claims
    #[arg(long)]
    cumulative: bool,

    /// Print the summary as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let dataset = loader::load_dataset(&args.data)
        .with_context(|| format!("loading claims data from {}", args.data.display()))?;

    let input_kind = if args.cumulative {
        TriangleKind::Cumulative
    } else {
        TriangleKind::Incremental
    };
    let runner = ReservingRunner::from_dataset(&dataset, input_kind)?;

    let spec = runner.spec(args.method).with_context(|| {
        format!("{} needs parameters.csv in {}", args.method, args.data.display())
    })?;
    let summary = runner
        .run(&spec)
        .with_context(|| format!("running {}", args.method))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.report);
        println!();
        println!("{:>16} {:>14}", "Accident period", "Reserve");
        println!("{}", "-".repeat(31));
        for (period, reserve) in summary.reserves.iter().enumerate() {
            println!("{:>16} {:>14.2}", period, reserve);
        }
        println!();
        println!("{:>16} {:>14}", "Future period", "Cashflow");
        println!("{}", "-".repeat(31));
        for (offset, cashflow) in summary.cashflows.iter().enumerate() {
            println!("{:>16} {:>14.2}", offset + 1, cashflow);
        }
    }

    Ok(())
}
