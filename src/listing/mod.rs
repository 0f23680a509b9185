//! Listing records supplied by the data-acquisition side and their loading

mod amount;
mod data;
pub mod loader;

pub use amount::AmountParsing;
pub use data::{Listing, RawListing, UnitType};
pub use loader::{padded, read_listings, read_listings_from_path, ListingRow, ListingTable};

use thiserror::Error;

/// Why a single listing row could not be turned into assumptions
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ListingError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("malformed amount in `{field}`: {raw:?}")]
    MalformedAmount { field: &'static str, raw: String },

    #[error("malformed date in `{field}`: {raw:?}")]
    MalformedDate { field: &'static str, raw: String },

    #[error("unreadable row: {0}")]
    Unreadable(String),

    #[error("area is unknown or not positive")]
    UnknownArea,
}
