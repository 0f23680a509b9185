//! Monthly cash-flow projection, exit valuation and return metrics

mod schedule;
mod engine;
mod cashflows;
mod disposition;
mod irr;
mod returns;

pub use schedule::PeriodSchedule;
pub use engine::ProjectionEngine;
pub use cashflows::{LineItemRow, Projection, ProjectionSummary};
pub use disposition::{Disposition, FORWARD_NOI_MONTHS};
pub use irr::{annual_irr, annualize, npv_at_rate, periodic_irr, IRR_MAX_ITERATIONS, IRR_TOLERANCE};
pub use returns::{equity, evaluate, evaluate_detailed, moic, price_per_area, profit, ReturnResult};
