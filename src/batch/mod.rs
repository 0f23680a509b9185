//! Batch evaluation of listing exports
//!
//! Every row is evaluated independently and in parallel. A row that
//! cannot be modeled is logged and reported with its reason; the rest of
//! the batch carries on.

mod config;
pub mod report;

pub use config::{BatchConfig, CapitalReservePolicy, ExitCeilingPolicy, RentSource};
pub use report::{write_report, REPORT_COLUMNS};

use crate::error::ReturnError;
use crate::listing::{AmountParsing, ListingError, ListingRow, ListingTable};
use crate::projection::{evaluate, ReturnResult};
use rayon::prelude::*;
use std::time::Instant;
use thiserror::Error;

/// File-level failures of a batch run
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Why a row produced no result
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipReason {
    #[error("{0}")]
    Listing(#[from] ListingError),

    #[error("{0}")]
    Engine(#[from] ReturnError),
}

/// Result of evaluating one listing row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Evaluated {
        /// Monthly rent the evaluation used
        monthly_rent: f64,
        result: ReturnResult,
    },
    Skipped(SkipReason),
}

impl RowOutcome {
    pub fn is_evaluated(&self) -> bool {
        matches!(self, RowOutcome::Evaluated { .. })
    }
}

/// Counts for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub rows: usize,
    pub evaluated: usize,
    pub skipped: usize,
}

/// Pre-configured runner for listing batches
#[derive(Debug, Clone)]
pub struct BatchRunner {
    config: BatchConfig,
}

impl BatchRunner {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Evaluate every row, returning outcomes in input order
    pub fn run(&self, table: &ListingTable) -> Result<Vec<RowOutcome>, BatchError> {
        if self.config.amount_parsing == AmountParsing::Lenient {
            log::warn!("lenient amount parsing: unparsable amounts are read as zero");
        }

        let start = Instant::now();
        let outcomes = match self.config.max_threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                pool.install(|| self.evaluate_rows(&table.rows))
            }
            None => self.evaluate_rows(&table.rows),
        };

        let summary = summarize(&outcomes);
        log::info!(
            "evaluated {} of {} listings ({} skipped) in {:?}",
            summary.evaluated,
            summary.rows,
            summary.skipped,
            start.elapsed()
        );

        Ok(outcomes)
    }

    fn evaluate_rows(&self, rows: &[ListingRow]) -> Vec<RowOutcome> {
        rows.par_iter().map(|row| self.evaluate_row(row)).collect()
    }

    /// Evaluate a single row. Failures are logged and returned, never raised.
    pub fn evaluate_row(&self, row: &ListingRow) -> RowOutcome {
        match self.try_evaluate_row(row) {
            Ok((monthly_rent, result)) => RowOutcome::Evaluated { monthly_rent, result },
            Err(reason) => {
                log::warn!("skipping line {}: {}", row.line, reason);
                RowOutcome::Skipped(reason)
            }
        }
    }

    fn try_evaluate_row(&self, row: &ListingRow) -> Result<(f64, ReturnResult), SkipReason> {
        let raw = row.raw.as_ref().map_err(|e| e.clone())?;
        let listing = raw.to_listing(self.config.amount_parsing)?;
        let assumptions = self.config.assumptions_for(&listing)?;
        let result = evaluate(&assumptions)?;
        log::debug!("{}: irr {:.4}", listing.label(), result.irr);
        Ok((assumptions.monthly_rent, result))
    }
}

/// Tally evaluated and skipped rows
pub fn summarize(outcomes: &[RowOutcome]) -> BatchSummary {
    let evaluated = outcomes.iter().filter(|o| o.is_evaluated()).count();
    BatchSummary {
        rows: outcomes.len(),
        evaluated,
        skipped: outcomes.len() - evaluated,
    }
}
