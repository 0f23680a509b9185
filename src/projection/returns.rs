//! Return metrics over the hold period

use crate::assumptions::AssumptionSet;
use crate::error::{Result, ReturnError};
use super::cashflows::Projection;
use super::engine::ProjectionEngine;
use super::irr::annual_irr;
use serde::{Deserialize, Serialize};

/// Unlevered return metrics for one asset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnResult {
    /// Annualized IRR as a decimal
    pub irr: f64,
    pub gross_sale_price: f64,
    /// Total capital drawn (sum of negative net cash flows, as a positive amount)
    pub equity: f64,
    /// Undiscounted sum of net cash flows
    pub profit: f64,
    /// Multiple on invested capital, `1 + profit / equity`
    pub moic: f64,
    /// Gross sale price per unit of area
    pub price_per_area: f64,
}

impl ReturnResult {
    /// Derive all metrics from a completed projection
    pub fn from_projection(projection: &Projection, area: Option<f64>) -> Result<Self> {
        let cashflows = projection.net_cash_flows();

        let irr = annual_irr(&cashflows)?;
        let equity = equity(&cashflows);
        let profit = profit(&cashflows);
        let moic = moic(profit, equity)?;
        let price_per_area = price_per_area(projection.gross_sale_price, area)?;

        Ok(Self {
            irr,
            gross_sale_price: projection.gross_sale_price,
            equity,
            profit,
            moic,
            price_per_area,
        })
    }
}

/// Evaluate one asset: project, value the exit and compute returns
pub fn evaluate(assumptions: &AssumptionSet) -> Result<ReturnResult> {
    evaluate_detailed(assumptions).map(|(_, result)| result)
}

/// Like [`evaluate`], also returning the monthly projection
pub fn evaluate_detailed(assumptions: &AssumptionSet) -> Result<(Projection, ReturnResult)> {
    let engine = ProjectionEngine::new(assumptions.clone());
    let projection = engine.project_asset()?;
    let result = ReturnResult::from_projection(&projection, assumptions.area)?;
    Ok((projection, result))
}

/// Capital actually drawn: the negated sum of the negative entries
pub fn equity(cashflows: &[f64]) -> f64 {
    -cashflows.iter().filter(|&&cf| cf < 0.0).sum::<f64>()
}

/// Undiscounted sum of all entries
pub fn profit(cashflows: &[f64]) -> f64 {
    cashflows.iter().sum()
}

pub fn moic(profit: f64, equity: f64) -> Result<f64> {
    if equity == 0.0 {
        return Err(ReturnError::undefined("MOIC", "equity is zero"));
    }
    Ok(1.0 + profit / equity)
}

pub fn price_per_area(gross_sale_price: f64, area: Option<f64>) -> Result<f64> {
    match area {
        Some(a) if a.is_finite() && a > 0.0 => Ok(gross_sale_price / a),
        Some(a) => Err(ReturnError::undefined(
            "price per area",
            format!("area {} is not positive", a),
        )),
        None => Err(ReturnError::undefined("price per area", "area is unknown")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::tests::reference_assumptions;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_scenario() {
        let a = reference_assumptions();
        let result = evaluate(&a).unwrap();

        assert!(result.irr.is_finite());
        assert!(result.equity > 0.0);
        assert!(result.gross_sale_price <= 1_200.0 * 1_758.0);
        assert_relative_eq!(result.price_per_area, result.gross_sale_price / 1_758.0);
        assert_relative_eq!(result.moic, 1.0 + result.profit / result.equity);
    }

    #[test]
    fn test_reference_scenario_hits_ceiling() {
        // Forward NOI near 108k capitalizes at 3.5% well above 1,200 per area
        let (projection, result) = evaluate_detailed(&reference_assumptions()).unwrap();
        assert_relative_eq!(result.gross_sale_price, 1_200.0 * 1_758.0);
        assert_relative_eq!(projection.net_sale_proceeds, 1_200.0 * 1_758.0 * 0.92, max_relative = 1e-12);
        assert!(result.irr > 0.0);
        assert!(result.moic > 1.0);
    }

    #[test]
    fn test_equity_includes_every_negative_month() {
        let (projection, result) = evaluate_detailed(&reference_assumptions()).unwrap();

        // Lease-up months run negative on top of the purchase outlay
        let flows = projection.net_cash_flows();
        assert_eq!(flows.len(), 61);
        assert!(flows[1] < 0.0 && flows[2] < 0.0 && flows[3] > 0.0);
        assert!(result.equity > 1_575_000.0 * 1.04);
        assert_relative_eq!(result.equity, -(flows[0] + flows[1] + flows[2]), max_relative = 1e-12);
    }

    #[test]
    fn test_profit_is_window_sum() {
        let (projection, result) = evaluate_detailed(&reference_assumptions()).unwrap();
        let expected: f64 = projection.rows[..=60].iter().map(|r| r.net_cash_flow).sum();
        assert_relative_eq!(result.profit, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_unknown_area_price_per_area_is_undefined() {
        let mut a = reference_assumptions();
        a.area = None;
        assert!(matches!(
            evaluate(&a),
            Err(ReturnError::NumericUndefined { quantity: "price per area", .. })
        ));

        a.area = Some(0.0);
        assert!(matches!(
            evaluate(&a),
            Err(ReturnError::NumericUndefined { quantity: "price per area", .. })
        ));
    }

    #[test]
    fn test_no_sign_change_is_irr_not_found() {
        // Free property: nothing is ever paid out
        let mut a = reference_assumptions();
        a.purchase_price = 0.0;
        a.initial_downtime_months = 0;
        assert!(matches!(evaluate(&a), Err(ReturnError::IrrNotFound { .. })));
    }

    #[test]
    fn test_moic_with_zero_equity() {
        assert!(matches!(moic(100.0, 0.0), Err(ReturnError::NumericUndefined { quantity: "MOIC", .. })));
        assert_relative_eq!(moic(50.0, 100.0).unwrap(), 1.5);
    }

    #[test]
    fn test_equity_and_profit_helpers() {
        let flows = [-100.0, -50.0, 20.0, 200.0];
        assert_relative_eq!(equity(&flows), 150.0);
        assert_relative_eq!(profit(&flows), 70.0);
    }

    #[test]
    fn test_short_hold_is_unmodelable() {
        let mut a = reference_assumptions();
        a.hold_period_months = 6;
        assert!(matches!(evaluate(&a), Err(ReturnError::NumericUndefined { .. })));
    }

    #[test]
    fn test_shortest_modelable_hold() {
        // Hold 13 puts the forward window (13, 25] inside the 26-month schedule
        let mut a = reference_assumptions();
        a.hold_period_months = 13;
        let (projection, result) = evaluate_detailed(&a).unwrap();
        assert_eq!(projection.rows.len(), 26);
        assert_eq!(projection.net_cash_flows().len(), 14);
        assert!(result.irr.is_finite());

        a.hold_period_months = 12;
        assert!(matches!(
            evaluate(&a),
            Err(ReturnError::NumericUndefined { quantity: "forward NOI", .. })
        ));
    }
}
