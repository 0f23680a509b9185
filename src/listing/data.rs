//! Listing data structures matching the brokerage export format

use super::amount::AmountParsing;
use super::ListingError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Broad unit type bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Townhouse,
    Condop,
    Condo,
    Coop,
    Other,
}

impl UnitType {
    /// Bucket a free-text property type such as `"Condo"` or `"Co-op"`.
    /// `Condop` is checked before `Condo` since it contains it.
    pub fn from_property_type(raw: &str) -> Self {
        if raw.contains("Townhouse") {
            UnitType::Townhouse
        } else if raw.contains("Condop") {
            UnitType::Condop
        } else if raw.contains("Condo") {
            UnitType::Condo
        } else if raw.contains("Co-op") {
            UnitType::Coop
        } else {
            match raw.trim().to_ascii_lowercase().as_str() {
                "townhouse" => UnitType::Townhouse,
                "condop" => UnitType::Condop,
                "condo" => UnitType::Condo,
                "coop" => UnitType::Coop,
                _ => UnitType::Other,
            }
        }
    }
}

/// Raw CSV row. Every field is text so a bad value fails its own row
/// instead of the whole file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawListing {
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default, alias = "price_dollars")]
    pub price: Option<String>,
    #[serde(default, alias = "area", alias = "square_feet")]
    pub sq_ft: Option<String>,
    #[serde(default)]
    pub beds: Option<String>,
    #[serde(default)]
    pub baths: Option<String>,
    #[serde(default)]
    pub year_opened: Option<String>,
    #[serde(default)]
    pub building_units: Option<String>,
    #[serde(default, alias = "monthly_sales_charges", alias = "maintenance_common_charges")]
    pub common_charges: Option<String>,
    #[serde(default)]
    pub monthly_sales_charges_incl_taxes: Option<String>,
    #[serde(default, alias = "real_estate_taxes")]
    pub monthly_taxes: Option<String>,
    #[serde(default, alias = "predicted_rent")]
    pub rent: Option<String>,
    #[serde(default, alias = "property_type")]
    pub unit_type: Option<String>,
    #[serde(default)]
    pub first_listed: Option<String>,
    #[serde(default)]
    pub parking_spaces: Option<String>,
}

/// A parsed listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub permalink: Option<String>,
    pub address: Option<String>,
    pub neighborhood: Option<String>,
    pub price: f64,
    pub area: Option<f64>,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub year_opened: Option<u32>,
    pub building_units: Option<u32>,
    /// Monthly common charges / maintenance, excluding taxes
    pub monthly_common_charges: Option<f64>,
    /// Monthly charges including real estate taxes, when only the combined figure is listed
    pub monthly_charges_incl_taxes: Option<f64>,
    pub monthly_taxes: Option<f64>,
    /// Observed or predicted monthly rent
    pub rent: Option<f64>,
    pub unit_type: UnitType,
    pub first_listed: Option<NaiveDate>,
    pub parking_spaces: Option<u32>,
}

impl RawListing {
    pub fn to_listing(&self, parsing: AmountParsing) -> Result<Listing, ListingError> {
        let amount = |field: &'static str, raw: &Option<String>| parsing.parse(field, raw.as_deref());
        let count = |field: &'static str, raw: &Option<String>| -> Result<Option<u32>, ListingError> {
            Ok(amount(field, raw)?.filter(|v| *v >= 0.0).map(|v| v as u32))
        };

        let price = amount("price", &self.price)?.ok_or(ListingError::MissingField("price"))?;

        let first_listed = match self.first_listed.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                ListingError::MalformedDate {
                    field: "first_listed",
                    raw: raw.to_string(),
                }
            })?),
        };

        Ok(Listing {
            permalink: self.permalink.clone(),
            address: self.address.clone(),
            neighborhood: self.neighborhood.clone(),
            price,
            area: amount("sq_ft", &self.sq_ft)?,
            beds: amount("beds", &self.beds)?,
            baths: amount("baths", &self.baths)?,
            year_opened: count("year_opened", &self.year_opened)?,
            building_units: count("building_units", &self.building_units)?,
            monthly_common_charges: amount("common_charges", &self.common_charges)?,
            monthly_charges_incl_taxes: amount(
                "monthly_sales_charges_incl_taxes",
                &self.monthly_sales_charges_incl_taxes,
            )?,
            monthly_taxes: amount("monthly_taxes", &self.monthly_taxes)?,
            rent: amount("rent", &self.rent)?,
            unit_type: self
                .unit_type
                .as_deref()
                .map(UnitType::from_property_type)
                .unwrap_or(UnitType::Other),
            first_listed,
            parking_spaces: count("parking_spaces", &self.parking_spaces)?,
        })
    }
}

impl Listing {
    /// Area usable for per-area pricing
    pub fn known_area(&self) -> Option<f64> {
        self.area.filter(|a| a.is_finite() && *a > 0.0)
    }

    /// Monthly real estate tax.
    ///
    /// Uses the tax column when present, otherwise backs it out of the
    /// combined charges figure. Absent on both counts means zero.
    pub fn monthly_tax(&self) -> f64 {
        match (self.monthly_taxes, self.monthly_charges_incl_taxes) {
            (Some(tax), _) => tax,
            (None, Some(combined)) => combined - self.monthly_common_charges.unwrap_or(0.0),
            (None, None) => 0.0,
        }
    }

    pub fn monthly_common_charges(&self) -> f64 {
        self.monthly_common_charges.unwrap_or(0.0)
    }

    /// Label used in log lines
    pub fn label(&self) -> &str {
        self.permalink
            .as_deref()
            .or(self.address.as_deref())
            .unwrap_or("<unnamed listing>")
    }
}
