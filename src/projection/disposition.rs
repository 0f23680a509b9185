//! Terminal sale valuation at the end of the hold period

use crate::assumptions::AssumptionSet;
use crate::error::{Result, ReturnError};
use super::cashflows::LineItemRow;
use serde::{Deserialize, Serialize};

/// Months of forward NOI capitalized at exit
pub const FORWARD_NOI_MONTHS: u32 = 12;

/// Sale valuation at the exit period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Disposition {
    /// NOI over the twelve months following the exit period
    pub forward_noi: f64,

    /// Forward NOI divided by the exit cap rate
    pub cap_rate_value: f64,

    /// Ceiling per area times area; +inf when the area is unknown
    pub ceiling_value: f64,

    /// Lower of the cap-rate value and the ceiling
    pub gross_sale_price: f64,

    /// Gross sale price net of exit costs
    pub net_sale_proceeds: f64,
}

impl Disposition {
    /// Value the asset at exit from the projected monthly rows.
    ///
    /// The forward window is periods `hold+1 ..= hold+12` and must lie
    /// entirely inside the projected rows.
    pub fn value(assumptions: &AssumptionSet, rows: &[LineItemRow]) -> Result<Self> {
        let hold = assumptions.hold_period_months as usize;
        let window_start = hold + 1;
        let window_end = hold + FORWARD_NOI_MONTHS as usize;

        if window_end >= rows.len() {
            return Err(ReturnError::undefined(
                "forward NOI",
                format!(
                    "window through month {} exceeds the {}-month schedule",
                    window_end,
                    rows.len()
                ),
            ));
        }

        let forward_noi: f64 = rows[window_start..=window_end].iter().map(|r| r.noi).sum();

        let cap_rate_value = forward_noi / assumptions.exit_cap_rate;
        if cap_rate_value.is_nan() {
            return Err(ReturnError::undefined(
                "cap rate value",
                format!(
                    "forward NOI {} over exit cap rate {}",
                    forward_noi, assumptions.exit_cap_rate
                ),
            ));
        }

        let ceiling_value = match assumptions.known_area() {
            Some(area) => assumptions.exit_price_ceiling_per_area * area,
            None => f64::INFINITY,
        };

        let gross_sale_price = cap_rate_value.min(ceiling_value);
        if !gross_sale_price.is_finite() {
            return Err(ReturnError::undefined(
                "gross sale price",
                "cap rate value is unbounded and no area ceiling applies",
            ));
        }

        let net_sale_proceeds = gross_sale_price * (1.0 - assumptions.exit_costs_fraction);

        Ok(Self {
            forward_noi,
            cap_rate_value,
            ceiling_value,
            gross_sale_price,
            net_sale_proceeds,
        })
    }

    /// Whether the area ceiling, rather than the cap rate, set the price
    pub fn is_ceiling_bound(&self) -> bool {
        self.ceiling_value < self.cap_rate_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::tests::reference_assumptions;
    use approx::assert_relative_eq;

    fn flat_rows(count: u32, noi: f64) -> Vec<LineItemRow> {
        (0..count)
            .map(|m| LineItemRow {
                noi,
                ..LineItemRow::new(m)
            })
            .collect()
    }

    #[test]
    fn test_forward_window_follows_exit() {
        let a = reference_assumptions();
        let mut rows = flat_rows(120, 1_000.0);
        // Exit month and month 73 sit outside the window
        rows[60].noi = 1.0e9;
        rows[73].noi = 1.0e9;
        rows[61].noi = 2_000.0;
        rows[72].noi = 2_000.0;

        let d = Disposition::value(&a, &rows).unwrap();
        assert_relative_eq!(d.forward_noi, 14_000.0);
    }

    #[test]
    fn test_cap_rate_value_when_below_ceiling() {
        let mut a = reference_assumptions();
        a.exit_price_ceiling_per_area = 10_000.0;
        let rows = flat_rows(120, 7_000.0);

        let d = Disposition::value(&a, &rows).unwrap();
        assert!(!d.is_ceiling_bound());
        assert_relative_eq!(d.gross_sale_price, 84_000.0 / 0.035, max_relative = 1e-12);
        assert_relative_eq!(d.net_sale_proceeds, d.gross_sale_price * 0.92, max_relative = 1e-12);
    }

    #[test]
    fn test_ceiling_when_cap_rate_value_is_higher() {
        let a = reference_assumptions();
        let rows = flat_rows(120, 9_000.0);

        let d = Disposition::value(&a, &rows).unwrap();
        assert!(d.is_ceiling_bound());
        assert_relative_eq!(d.gross_sale_price, 1_200.0 * 1_758.0);
    }

    #[test]
    fn test_unknown_area_is_unbounded() {
        let mut a = reference_assumptions();
        a.area = None;
        let rows = flat_rows(120, 9_000.0);

        let d = Disposition::value(&a, &rows).unwrap();
        assert!(d.ceiling_value.is_infinite());
        assert_relative_eq!(d.gross_sale_price, d.cap_rate_value);
    }

    #[test]
    fn test_short_schedule_is_undefined() {
        let mut a = reference_assumptions();
        a.hold_period_months = 12;
        let rows = flat_rows(24, 1_000.0);

        assert!(matches!(
            Disposition::value(&a, &rows),
            Err(ReturnError::NumericUndefined { quantity: "forward NOI", .. })
        ));
    }

    #[test]
    fn test_zero_cap_rate_without_area_is_undefined() {
        let mut a = reference_assumptions();
        a.exit_cap_rate = 0.0;
        a.area = None;
        let rows = flat_rows(120, 1_000.0);

        assert!(matches!(
            Disposition::value(&a, &rows),
            Err(ReturnError::NumericUndefined { .. })
        ));
    }
}
