//! Failure taxonomy for a single evaluation

use thiserror::Error;

/// Errors raised while evaluating an asset's unlevered returns.
///
/// The engine never substitutes a default for any of these; the caller
/// decides whether to skip the asset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReturnError {
    /// Structurally invalid input (e.g. a zero hold period).
    #[error("invalid assumption `{field}`: {reason}")]
    InvalidAssumption {
        /// Name of the offending assumption
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },

    /// An arithmetic step has no meaningful value.
    #[error("{quantity} is undefined: {reason}")]
    NumericUndefined {
        /// The quantity being computed
        quantity: &'static str,
        /// What made it undefined
        reason: String,
    },

    /// The IRR root-finder found no solution.
    #[error("IRR not found: {reason}")]
    IrrNotFound {
        /// Why the solver gave up
        reason: String,
    },
}

impl ReturnError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ReturnError::InvalidAssumption {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn undefined(quantity: &'static str, reason: impl Into<String>) -> Self {
        ReturnError::NumericUndefined {
            quantity,
            reason: reason.into(),
        }
    }

    pub(crate) fn irr_not_found(reason: impl Into<String>) -> Self {
        ReturnError::IrrNotFound {
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the engine
pub type Result<T> = std::result::Result<T, ReturnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_quantity() {
        let err = ReturnError::undefined("price per area", "area is unknown");
        assert_eq!(err.to_string(), "price per area is undefined: area is unknown");

        let err = ReturnError::invalid("hold_period_months", "must be positive");
        assert!(err.to_string().contains("hold_period_months"));
    }
}
