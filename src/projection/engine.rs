//! Core projection engine for monthly income and expense schedules

use crate::assumptions::AssumptionSet;
use crate::error::Result;
use super::cashflows::{LineItemRow, Projection};
use super::disposition::Disposition;
use super::schedule::PeriodSchedule;

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: AssumptionSet,
    schedule: PeriodSchedule,
}

impl ProjectionEngine {
    /// Create a new projection engine for one asset
    pub fn new(assumptions: AssumptionSet) -> Self {
        let schedule = PeriodSchedule::new(assumptions.hold_period_months);
        Self { assumptions, schedule }
    }

    pub fn assumptions(&self) -> &AssumptionSet {
        &self.assumptions
    }

    pub fn schedule(&self) -> PeriodSchedule {
        self.schedule
    }

    /// Project every month of the schedule, then book the sale at the exit period
    pub fn project_asset(&self) -> Result<Projection> {
        self.assumptions.validate()?;

        let a = &self.assumptions;
        if a.interim_downtime_months > 0 || a.lease_length_months > 0 {
            log::debug!(
                "interim downtime ({} months) and lease length ({} months) are not applied",
                a.interim_downtime_months,
                a.lease_length_months
            );
        }

        let mut projection = Projection::new(self.schedule.hold_period_months());
        for month in self.schedule.periods() {
            projection.add_row(self.calculate_month(month));
        }

        let disposition = Disposition::value(a, &projection.rows)?;
        projection.gross_sale_price = disposition.gross_sale_price;
        projection.net_sale_proceeds = disposition.net_sale_proceeds;

        let exit = self.schedule.hold_period_months() as usize;
        projection.rows[exit].sale_proceeds = disposition.net_sale_proceeds;

        for row in &mut projection.rows {
            row.net_cash_flow = row.free_cash_flow + row.purchase_outlay + row.sale_proceeds;
        }

        Ok(projection)
    }

    /// Calculate the operating lines for a single month
    fn calculate_month(&self, month: u32) -> LineItemRow {
        let a = &self.assumptions;
        let mut row = LineItemRow::new(month);

        let rent_growth = self.rent_growth(month);
        let expense_growth = self.expense_growth(month);

        row.rent = a.monthly_rent * rent_growth;
        // Only the initial lease-up is vacant
        row.vacancy = if month < a.initial_downtime_months {
            -a.monthly_rent
        } else {
            0.0
        };
        row.utilities = -a.utilities_fraction_of_rent * a.monthly_rent * expense_growth;
        row.tax = -a.monthly_tax * expense_growth;
        row.common_charges = -a.monthly_common_charges * expense_growth;
        row.insurance = -a.monthly_insurance * expense_growth;

        row.noi = row.rent + row.vacancy + row.utilities + row.tax + row.common_charges + row.insurance;

        row.capital_reserve = -a.monthly_capital_reserve * expense_growth;
        row.free_cash_flow = row.noi + row.capital_reserve;

        if month == 0 {
            row.purchase_outlay = -a.purchase_price * (1.0 + a.closing_costs_fraction);
        }

        row
    }

    /// Compound rent growth factor, stepping once per completed year
    fn rent_growth(&self, month: u32) -> f64 {
        (1.0 + self.assumptions.annual_rent_growth).powi(PeriodSchedule::year_index(month))
    }

    /// Compound expense growth factor, stepping once per completed year
    fn expense_growth(&self, month: u32) -> f64 {
        (1.0 + self.assumptions.annual_expense_growth).powi(PeriodSchedule::year_index(month))
    }
}
