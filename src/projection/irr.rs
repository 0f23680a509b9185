//! Internal Rate of Return (IRR) calculation
//!
//! Newton-Raphson on the NPV function, falling back to bisection when the
//! derivative vanishes or Newton fails to settle. Both stages use the same
//! tolerance and iteration cap, and failure is reported as
//! [`ReturnError::IrrNotFound`] rather than an approximate rate.

use crate::error::{Result, ReturnError};

/// Convergence tolerance on the periodic rate
pub const IRR_TOLERANCE: f64 = 1e-10;

/// Iteration cap for each solver stage
pub const IRR_MAX_ITERATIONS: usize = 1000;

/// Lowest periodic rate searched (-99%)
const MIN_RATE: f64 = -0.99;

/// Highest periodic rate searched (1000%)
const MAX_RATE: f64 = 10.0;

/// Cash flows with magnitude below this are treated as zero for the sign check
const ZERO_CASHFLOW: f64 = 1e-10;

/// Solve for the periodic rate at which the NPV of `cashflows` is zero.
///
/// `cashflows[0]` is undiscounted, `cashflows[t]` is discounted by `(1+r)^t`.
pub fn periodic_irr(cashflows: &[f64]) -> Result<f64> {
    if cashflows.is_empty() {
        return Err(ReturnError::irr_not_found("cash-flow series is empty"));
    }

    if let Some(bad) = cashflows.iter().find(|cf| !cf.is_finite()) {
        return Err(ReturnError::irr_not_found(format!("non-finite cash flow {}", bad)));
    }

    // Check if there's at least one sign change (required for IRR to exist)
    let has_positive = cashflows.iter().any(|&cf| cf > ZERO_CASHFLOW);
    let has_negative = cashflows.iter().any(|&cf| cf < -ZERO_CASHFLOW);
    if !has_positive || !has_negative {
        return Err(ReturnError::irr_not_found("cash-flow series has no sign change"));
    }

    // Newton-Raphson iteration for the periodic (monthly) rate
    let mut rate = 0.05 / 12.0;

    for _ in 0..IRR_MAX_ITERATIONS {
        let (npv, dnpv) = npv_and_derivative(cashflows, rate);

        if dnpv.abs() < 1e-20 || !dnpv.is_finite() {
            break;
        }

        let new_rate = (rate - npv / dnpv).clamp(MIN_RATE, MAX_RATE);

        if (new_rate - rate).abs() < IRR_TOLERANCE {
            // Pinned against a bound is not a root
            if new_rate > MIN_RATE && new_rate < MAX_RATE {
                return Ok(new_rate);
            }
            break;
        }

        rate = new_rate;
    }

    irr_bisection(cashflows)
}

/// Annual IRR for monthly cash flows: `(1 + r)^12 - 1`
pub fn annual_irr(cashflows: &[f64]) -> Result<f64> {
    periodic_irr(cashflows).map(|r| annualize(r, 12))
}

/// Compound a periodic rate to an annual one
pub fn annualize(periodic_rate: f64, periods_per_year: u32) -> f64 {
    (1.0 + periodic_rate).powi(periods_per_year as i32) - 1.0
}

/// Calculate NPV at a given periodic rate
pub fn npv_at_rate(cashflows: &[f64], rate: f64) -> f64 {
    cashflows
        .iter()
        .enumerate()
        .map(|(t, &cf)| cf / (1.0 + rate).powi(t as i32))
        .sum()
}

/// Calculate NPV and its derivative with respect to rate
fn npv_and_derivative(cashflows: &[f64], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for (t, &cf) in cashflows.iter().enumerate() {
        let discount = (1.0 + rate).powi(t as i32);
        npv += cf / discount;
        if t > 0 {
            dnpv -= (t as f64) * cf / ((1.0 + rate).powi(t as i32 + 1));
        }
    }

    (npv, dnpv)
}

/// Fallback IRR calculation using bisection over [MIN_RATE, MAX_RATE]
fn irr_bisection(cashflows: &[f64]) -> Result<f64> {
    let mut low = MIN_RATE;
    let mut high = MAX_RATE;

    let mut npv_low = npv_at_rate(cashflows, low);
    let npv_high = npv_at_rate(cashflows, high);

    if npv_low * npv_high > 0.0 {
        return Err(ReturnError::irr_not_found(format!(
            "NPV does not change sign between periodic rates {} and {}",
            MIN_RATE, MAX_RATE
        )));
    }

    for _ in 0..IRR_MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let npv_mid = npv_at_rate(cashflows, mid);

        if npv_mid.abs() < IRR_TOLERANCE || (high - low) / 2.0 < IRR_TOLERANCE {
            return Ok(mid);
        }

        if npv_mid * npv_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            npv_low = npv_mid;
        }
    }

    Err(ReturnError::irr_not_found(format!(
        "no convergence within {} iterations",
        IRR_MAX_ITERATIONS
    )))
}
