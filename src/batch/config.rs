//! Per-batch assumptions applied to every listing

use crate::assumptions::AssumptionSet;
use crate::listing::{AmountParsing, Listing, ListingError};
use super::BatchError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Where each listing's monthly rent comes from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RentSource {
    /// The listing's rent column (observed or model-predicted)
    Column,
    /// A gross annual yield on purchase price, paid monthly
    GrossYield { annual_yield: f64 },
}

/// How the monthly capital reserve is sized
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapitalReservePolicy {
    Fixed { monthly: f64 },
    /// Scaled by building age, price and bedroom count
    Tiered,
}

impl CapitalReservePolicy {
    pub fn monthly_reserve(&self, listing: &Listing) -> f64 {
        match *self {
            CapitalReservePolicy::Fixed { monthly } => monthly,
            CapitalReservePolicy::Tiered => {
                let base = match listing.year_opened {
                    Some(year) if year >= 2010 => 200.0,
                    Some(year) if year >= 2000 => 300.0,
                    _ => 400.0,
                };
                let price_factor = if listing.price >= 2_000_000.0 { 1.5 } else { 1.0 };
                let beds_factor = match listing.beds {
                    Some(beds) if beds >= 2.0 => 2.0,
                    _ => 1.0,
                };
                base * price_factor * beds_factor
            }
        }
    }
}

/// How the exit price ceiling per unit of area is set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ExitCeilingPolicy {
    /// A fixed price per unit of area
    PerArea { price: f64 },
    /// A multiple of the purchase price per unit of area
    PurchaseMultiple { multiple: f64 },
}

/// Assumptions shared by every row of a batch.
///
/// `Default` reproduces the values the listing screens have always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    pub closing_costs_fraction: f64,
    pub initial_downtime_months: u32,
    pub interim_downtime_months: u32,
    pub lease_length_months: u32,
    pub annual_rent_growth: f64,
    pub annual_expense_growth: f64,
    pub utilities_fraction_of_rent: f64,
    pub monthly_insurance: f64,
    pub hold_period_months: u32,
    pub exit_cap_rate: f64,
    pub exit_costs_fraction: f64,
    pub rent: RentSource,
    pub capital_reserve: CapitalReservePolicy,
    pub exit_ceiling: ExitCeilingPolicy,
    pub amount_parsing: AmountParsing,
    /// Worker thread limit; `None` uses every core
    pub max_threads: Option<usize>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            closing_costs_fraction: 0.04,
            initial_downtime_months: 3,
            interim_downtime_months: 1,
            lease_length_months: 36,
            annual_rent_growth: 0.02,
            annual_expense_growth: 0.02,
            utilities_fraction_of_rent: 0.025,
            monthly_insurance: 100.0,
            hold_period_months: 60,
            exit_cap_rate: 0.035,
            exit_costs_fraction: 0.08,
            rent: RentSource::Column,
            capital_reserve: CapitalReservePolicy::Fixed { monthly: 500.0 },
            exit_ceiling: ExitCeilingPolicy::PurchaseMultiple { multiple: 1.5 },
            amount_parsing: AmountParsing::Strict,
            max_threads: None,
        }
    }
}

impl BatchConfig {
    /// Load a config from a JSON file; absent keys keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, BatchError> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Monthly rent for a listing under the configured source
    pub fn monthly_rent(&self, listing: &Listing) -> Result<f64, ListingError> {
        match self.rent {
            RentSource::Column => listing.rent.ok_or(ListingError::MissingField("rent")),
            RentSource::GrossYield { annual_yield } => Ok(listing.price * annual_yield / 12.0),
        }
    }

    /// Build the full assumption set for one listing.
    ///
    /// Listings without a positive area are rejected here; the engine
    /// cannot price them per unit of area.
    pub fn assumptions_for(&self, listing: &Listing) -> Result<AssumptionSet, ListingError> {
        let area = listing.known_area().ok_or(ListingError::UnknownArea)?;

        let exit_price_ceiling_per_area = match self.exit_ceiling {
            ExitCeilingPolicy::PerArea { price } => price,
            ExitCeilingPolicy::PurchaseMultiple { multiple } => listing.price * multiple / area,
        };

        Ok(AssumptionSet {
            purchase_price: listing.price,
            area: Some(area),
            closing_costs_fraction: self.closing_costs_fraction,
            initial_downtime_months: self.initial_downtime_months,
            interim_downtime_months: self.interim_downtime_months,
            lease_length_months: self.lease_length_months,
            annual_rent_growth: self.annual_rent_growth,
            annual_expense_growth: self.annual_expense_growth,
            monthly_rent: self.monthly_rent(listing)?,
            utilities_fraction_of_rent: self.utilities_fraction_of_rent,
            monthly_tax: listing.monthly_tax(),
            monthly_common_charges: listing.monthly_common_charges(),
            monthly_insurance: self.monthly_insurance,
            monthly_capital_reserve: self.capital_reserve.monthly_reserve(listing),
            hold_period_months: self.hold_period_months,
            exit_cap_rate: self.exit_cap_rate,
            exit_price_ceiling_per_area,
            exit_costs_fraction: self.exit_costs_fraction,
        })
    }
}
