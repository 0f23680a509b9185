//! Acquisition, operating and disposition assumptions for one asset

use crate::error::{Result, ReturnError};
use serde::{Deserialize, Serialize};

/// Every input the engine needs for one evaluation.
///
/// Has no `Default`; callers pass every value explicitly.
/// Fractions are decimals (0.04 for 4%). Monthly amounts are positive
/// magnitudes; the projector applies the sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssumptionSet {
    // Acquisition
    pub purchase_price: f64,
    /// Rentable area; `None` when the listing does not report it
    #[serde(default)]
    pub area: Option<f64>,
    pub closing_costs_fraction: f64,

    // Leasing
    pub initial_downtime_months: u32,
    /// Vacancy between leases. Accepted but not applied to the schedule.
    #[serde(default)]
    pub interim_downtime_months: u32,
    /// Lease term. Accepted but not applied to the schedule.
    #[serde(default)]
    pub lease_length_months: u32,

    // Annual growth trends
    pub annual_rent_growth: f64,
    pub annual_expense_growth: f64,

    // Monthly income and expenses
    pub monthly_rent: f64,
    /// Utilities as a fraction of (ungrown) monthly rent
    pub utilities_fraction_of_rent: f64,
    pub monthly_tax: f64,
    pub monthly_common_charges: f64,
    pub monthly_insurance: f64,
    pub monthly_capital_reserve: f64,

    // Disposition
    pub hold_period_months: u32,
    pub exit_cap_rate: f64,
    pub exit_price_ceiling_per_area: f64,
    pub exit_costs_fraction: f64,
}

impl AssumptionSet {
    /// Reject structurally invalid inputs before any projection work
    pub fn validate(&self) -> Result<()> {
        if self.hold_period_months == 0 {
            return Err(ReturnError::invalid(
                "hold_period_months",
                "hold period must be at least one month",
            ));
        }

        let finite_fields = [
            ("purchase_price", self.purchase_price),
            ("closing_costs_fraction", self.closing_costs_fraction),
            ("annual_rent_growth", self.annual_rent_growth),
            ("annual_expense_growth", self.annual_expense_growth),
            ("monthly_rent", self.monthly_rent),
            ("utilities_fraction_of_rent", self.utilities_fraction_of_rent),
            ("monthly_tax", self.monthly_tax),
            ("monthly_common_charges", self.monthly_common_charges),
            ("monthly_insurance", self.monthly_insurance),
            ("monthly_capital_reserve", self.monthly_capital_reserve),
            ("exit_cap_rate", self.exit_cap_rate),
            ("exit_price_ceiling_per_area", self.exit_price_ceiling_per_area),
            ("exit_costs_fraction", self.exit_costs_fraction),
        ];
        for (field, value) in finite_fields {
            if !value.is_finite() {
                return Err(ReturnError::invalid(field, format!("must be finite, got {}", value)));
            }
        }

        if let Some(area) = self.area {
            if area.is_nan() {
                return Err(ReturnError::invalid("area", "must be a number when present"));
            }
        }

        Ok(())
    }

    /// Area usable as a divisor, if any
    pub fn known_area(&self) -> Option<f64> {
        self.area.filter(|a| a.is_finite() && *a > 0.0)
    }
}
