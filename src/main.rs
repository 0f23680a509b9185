//! Unlevered Returns CLI
//!
//! Command-line interface for evaluating single assets and listing batches

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;
use unlevered_returns::batch::{summarize, write_report};
use unlevered_returns::listing::read_listings_from_path;
use unlevered_returns::projection::PeriodSchedule;
use unlevered_returns::{evaluate_detailed, AssumptionSet, BatchConfig, BatchRunner, Projection, ReturnResult};

#[derive(Parser)]
#[command(name = "unlevered_returns")]
#[command(author, version, about = "Unlevered return estimates for real-estate acquisitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one asset from a JSON assumption set
    Evaluate {
        /// Path to the assumption set (JSON)
        #[arg(short, long)]
        assumptions: PathBuf,

        /// Write the monthly cash-flow schedule to this CSV file
        #[arg(short, long)]
        cashflows: Option<PathBuf>,

        /// Acquisition month used to label the schedule (YYYY-MM-DD)
        #[arg(long, default_value = "2021-01-01")]
        start_date: NaiveDate,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate every row of a listing export
    Batch {
        /// Listing export (CSV)
        #[arg(short, long)]
        input: PathBuf,

        /// Augmented CSV output; defaults to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Batch assumptions (JSON); omitted keys keep their defaults
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Limit the number of worker threads
        #[arg(short, long)]
        threads: Option<usize>,
    },

    /// Evaluate the reference acquisition
    Example {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Evaluate {
            assumptions,
            cashflows,
            start_date,
            json,
        } => {
            let text = std::fs::read_to_string(&assumptions)
                .with_context(|| format!("reading {}", assumptions.display()))?;
            let assumptions: AssumptionSet = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", assumptions.display()))?;
            run_evaluate(&assumptions, cashflows.as_deref(), start_date, json)
        }
        Commands::Batch {
            input,
            output,
            config,
            threads,
        } => run_batch(&input, output.as_deref(), config.as_deref(), threads),
        Commands::Example { json } => {
            let start = NaiveDate::from_ymd_opt(2021, 1, 1).context("invalid start date")?;
            run_evaluate(&reference_assumptions(), None, start, json)
        }
    }
}

fn run_evaluate(
    assumptions: &AssumptionSet,
    cashflows: Option<&Path>,
    start_date: NaiveDate,
    json: bool,
) -> Result<()> {
    let (projection, result) = evaluate_detailed(assumptions).context("evaluation failed")?;

    if let Some(path) = cashflows {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_cashflows(file, &projection, start_date)?;
        log::info!("cash-flow schedule written to {}", path.display());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(assumptions, &projection, &result);
    }
    Ok(())
}

fn run_batch(input: &Path, output: Option<&Path>, config: Option<&Path>, threads: Option<usize>) -> Result<()> {
    let start = Instant::now();

    let mut config = match config {
        Some(path) => BatchConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => BatchConfig::default(),
    };
    if threads.is_some() {
        config.max_threads = threads;
    }

    let table = read_listings_from_path(input)
        .with_context(|| format!("reading listings from {}", input.display()))?;
    log::info!("loaded {} listings from {} in {:?}", table.len(), input.display(), start.elapsed());

    let outcomes = BatchRunner::new(config).run(&table)?;

    match output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            write_report(file, &table, &outcomes)?;
        }
        None => write_report(io::stdout().lock(), &table, &outcomes)?,
    }

    let summary = summarize(&outcomes);
    log::info!(
        "batch complete: {} evaluated, {} skipped, total time {:?}",
        summary.evaluated,
        summary.skipped,
        start.elapsed()
    );
    Ok(())
}

/// Monthly schedule over all modeled periods, labeled by calendar month
fn write_cashflows<W: Write>(writer: W, projection: &Projection, start_date: NaiveDate) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "Period", "Month", "Rent", "Vacancy", "Utilities", "Tax", "CommonCharges", "Insurance",
        "NOI", "CapitalReserve", "FreeCashFlow", "PurchaseOutlay", "SaleProceeds", "NetCashFlow",
    ])?;

    for row in &projection.rows {
        let month = PeriodSchedule::calendar_month(start_date, row.period)
            .map(|d| d.format("%Y-%m").to_string())
            .unwrap_or_default();
        let mut record = vec![row.period.to_string(), month];
        record.extend(
            [
                row.rent,
                row.vacancy,
                row.utilities,
                row.tax,
                row.common_charges,
                row.insurance,
                row.noi,
                row.capital_reserve,
                row.free_cash_flow,
                row.purchase_outlay,
                row.sale_proceeds,
                row.net_cash_flow,
            ]
            .iter()
            .map(|v| format!("{:.2}", v)),
        );
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

fn print_result(assumptions: &AssumptionSet, projection: &Projection, result: &ReturnResult) {
    let summary = projection.summary();

    println!("Unlevered Returns");
    println!("=================\n");
    println!("  Purchase Price:     ${:.2}", assumptions.purchase_price);
    match assumptions.area {
        Some(area) => println!("  Area:               {:.0}", area),
        None => println!("  Area:               unknown"),
    }
    println!("  Hold Period:        {} months", assumptions.hold_period_months);
    println!();
    println!("  Months Evaluated:   {}", summary.total_months);
    println!("  Total NOI:          ${:.2}", summary.total_noi);
    println!("  Total Free CF:      ${:.2}", summary.total_free_cash_flow);
    println!();
    println!("  IRR:                {:.4}%", result.irr * 100.0);
    println!("  Gross Sale Price:   ${:.2}", result.gross_sale_price);
    println!("  Net Sale Proceeds:  ${:.2}", projection.net_sale_proceeds);
    println!("  Equity:             ${:.2}", result.equity);
    println!("  Profit:             ${:.2}", result.profit);
    println!("  MOIC:               {:.4}x", result.moic);
    println!("  Sale Price / Area:  ${:.2}", result.price_per_area);
}

/// The reference acquisition used by `example`
fn reference_assumptions() -> AssumptionSet {
    AssumptionSet {
        purchase_price: 1_575_000.0,
        area: Some(1_758.0),
        closing_costs_fraction: 0.04,
        initial_downtime_months: 3,
        interim_downtime_months: 1,
        lease_length_months: 36,
        annual_rent_growth: 0.02,
        annual_expense_growth: 0.02,
        monthly_rent: 10_000.0,
        utilities_fraction_of_rent: 0.025,
        monthly_tax: 1_000.0,
        monthly_common_charges: 500.0,
        monthly_insurance: 100.0,
        monthly_capital_reserve: 500.0,
        hold_period_months: 60,
        exit_cap_rate: 0.035,
        exit_price_ceiling_per_area: 1_200.0,
        exit_costs_fraction: 0.08,
    }
}
