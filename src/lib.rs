//! Unlevered Returns - cash-flow projection and return engine for a single real-estate asset
//!
//! This library provides:
//! - Monthly income and expense projection with compounding annual growth
//! - Exit valuation blending a cap-rate value with a price-per-area ceiling
//! - IRR, equity, profit, MOIC and exit price per area over the hold period
//! - Batch evaluation of listing exports with per-row failure isolation

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod listing;
pub mod batch;

// Re-export commonly used types
pub use error::{Result, ReturnError};
pub use assumptions::AssumptionSet;
pub use projection::{evaluate, evaluate_detailed, LineItemRow, Projection, ProjectionEngine, ReturnResult};
pub use batch::{BatchConfig, BatchRunner, RowOutcome};
