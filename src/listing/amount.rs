//! Parsing of monetary and numeric listing fields

use super::ListingError;
use serde::{Deserialize, Serialize};

/// How free-text amounts such as `"$1,575,000"` are turned into numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountParsing {
    /// Strip `$`, `,` and whitespace, then require a finite decimal.
    /// Blank fields are missing; anything else is an error.
    #[default]
    Strict,
    /// Drop every non-digit character; a present field with no digits
    /// becomes zero. Blank fields are missing, as in strict mode.
    /// Decimal points are dropped too, so `"12.50"` reads as `1250`.
    Lenient,
}

impl AmountParsing {
    /// Parse an optional raw field. `Ok(None)` means the field is absent.
    pub fn parse(self, field: &'static str, raw: Option<&str>) -> Result<Option<f64>, ListingError> {
        match self {
            AmountParsing::Strict => parse_strict(field, raw),
            AmountParsing::Lenient => Ok(parse_lenient(raw)),
        }
    }
}

fn parse_strict(field: &'static str, raw: Option<&str>) -> Result<Option<f64>, ListingError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Ok(None);
    }

    match cleaned.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(ListingError::MalformedAmount {
            field,
            raw: raw.to_string(),
        }),
    }
}

fn parse_lenient(raw: Option<&str>) -> Option<f64> {
    let raw = raw.map(str::trim).filter(|r| !r.is_empty())?;
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    Some(digits.parse::<f64>().unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_accepts_formatted_currency() {
        let p = AmountParsing::Strict;
        assert_eq!(p.parse("price", Some("$1,575,000")).unwrap(), Some(1_575_000.0));
        assert_eq!(p.parse("price", Some(" 2450.50 ")).unwrap(), Some(2_450.5));
        assert_eq!(p.parse("price", Some("-12")).unwrap(), Some(-12.0));
    }

    #[test]
    fn test_strict_blank_is_missing() {
        let p = AmountParsing::Strict;
        assert_eq!(p.parse("sq_ft", None).unwrap(), None);
        assert_eq!(p.parse("sq_ft", Some("  ")).unwrap(), None);
    }

    #[test]
    fn test_strict_rejects_garbage() {
        let err = AmountParsing::Strict.parse("sq_ft", Some("approx 900 sf")).unwrap_err();
        assert!(matches!(err, ListingError::MalformedAmount { field: "sq_ft", .. }));
        assert!(AmountParsing::Strict.parse("price", Some("NaN")).is_err());
    }

    #[test]
    fn test_lenient_strips_everything() {
        let p = AmountParsing::Lenient;
        assert_eq!(p.parse("sq_ft", Some("approx 900 sf")).unwrap(), Some(900.0));
        assert_eq!(p.parse("price", Some("12.50")).unwrap(), Some(1250.0));
        assert_eq!(p.parse("price", Some("n/a")).unwrap(), Some(0.0));
    }

    #[test]
    fn test_lenient_absent_is_missing() {
        let p = AmountParsing::Lenient;
        assert_eq!(p.parse("monthly_taxes", None).unwrap(), None);
        assert_eq!(p.parse("monthly_taxes", Some(" ")).unwrap(), None);
    }

    #[test]
    fn test_config_spelling() {
        let p: AmountParsing = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(p, AmountParsing::Lenient);
    }
}
