//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

/// A single row of projection output for one month.
///
/// Outflows are negative, inflows positive.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItemRow {
    // Timing
    pub period: u32,

    // Operating lines
    pub rent: f64,
    pub vacancy: f64,
    pub utilities: f64,
    pub tax: f64,
    pub common_charges: f64,
    pub insurance: f64,
    pub noi: f64,

    // Below the NOI line
    pub capital_reserve: f64,
    pub free_cash_flow: f64,

    // Capital events
    pub purchase_outlay: f64,
    pub sale_proceeds: f64,

    // Summary
    pub net_cash_flow: f64,
}

impl LineItemRow {
    /// Create an empty row for `period`
    pub fn new(period: u32) -> Self {
        Self {
            period,
            ..Default::default()
        }
    }
}

/// Complete projection for one asset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projection {
    /// Hold period the projection was run for
    pub hold_period_months: u32,

    /// Monthly rows over the full `2 × hold` schedule
    pub rows: Vec<LineItemRow>,

    /// Sale price before exit costs
    pub gross_sale_price: f64,

    /// Sale price net of exit costs, booked at the exit period
    pub net_sale_proceeds: f64,
}

impl Projection {
    pub fn new(hold_period_months: u32) -> Self {
        Self {
            hold_period_months,
            rows: Vec::with_capacity(hold_period_months as usize * 2),
            gross_sale_price: 0.0,
            net_sale_proceeds: 0.0,
        }
    }

    /// Add a cashflow row
    pub fn add_row(&mut self, row: LineItemRow) {
        self.rows.push(row);
    }

    /// Rows for periods `0..=hold`
    pub fn evaluation_rows(&self) -> &[LineItemRow] {
        let end = (self.hold_period_months as usize + 1).min(self.rows.len());
        &self.rows[..end]
    }

    /// Net unlevered cash flows over the evaluation window
    pub fn net_cash_flows(&self) -> Vec<f64> {
        self.evaluation_rows().iter().map(|r| r.net_cash_flow).collect()
    }

    /// Get summary statistics over the evaluation window
    pub fn summary(&self) -> ProjectionSummary {
        let window = self.evaluation_rows();
        ProjectionSummary {
            total_months: window.len() as u32,
            total_rent: window.iter().map(|r| r.rent).sum(),
            total_vacancy: window.iter().map(|r| r.vacancy).sum(),
            total_noi: window.iter().map(|r| r.noi).sum(),
            total_capital_reserve: window.iter().map(|r| r.capital_reserve).sum(),
            total_free_cash_flow: window.iter().map(|r| r.free_cash_flow).sum(),
            total_net_cash_flow: window.iter().map(|r| r.net_cash_flow).sum(),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_rent: f64,
    pub total_vacancy: f64,
    pub total_noi: f64,
    pub total_capital_reserve: f64,
    pub total_free_cash_flow: f64,
    pub total_net_cash_flow: f64,
}
