//! Load listing rows from a CSV export

use super::{ListingError, RawListing};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;

/// One input row: the untouched record plus its typed view
#[derive(Debug, Clone)]
pub struct ListingRow {
    /// 1-based line number in the source file
    pub line: u64,
    /// Original fields, written back out unchanged
    pub record: StringRecord,
    pub raw: Result<RawListing, ListingError>,
}

/// All rows of a listing export, in file order
#[derive(Debug, Clone)]
pub struct ListingTable {
    pub headers: StringRecord,
    pub rows: Vec<ListingRow>,
}

impl ListingTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Load listings from any reader (e.g., string buffer, network stream)
///
/// Only a missing or unreadable header fails the whole load. A row that
/// cannot be read is kept with its error so the batch can report it.
/// Rows shorter than the header read their missing trailing fields as blank.
pub fn read_listings<R: Read>(reader: R) -> Result<ListingTable, csv::Error> {
    let mut csv_reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for (index, result) in csv_reader.byte_records().enumerate() {
        let line = index as u64 + 2;
        let row = match result {
            Ok(bytes) => match StringRecord::from_byte_record(bytes) {
                Ok(record) => {
                    let raw = padded(&record, headers.len())
                        .deserialize::<RawListing>(Some(&headers))
                        .map_err(|e| ListingError::Unreadable(e.to_string()));
                    ListingRow { line, record, raw }
                }
                Err(e) => {
                    let reason = ListingError::Unreadable(e.to_string());
                    let record: StringRecord = e
                        .into_byte_record()
                        .iter()
                        .map(|field| String::from_utf8_lossy(field).into_owned())
                        .collect();
                    ListingRow {
                        line,
                        record,
                        raw: Err(reason),
                    }
                }
            },
            Err(e) => ListingRow {
                line: e.position().map(|p| p.line()).unwrap_or(line),
                record: StringRecord::new(),
                raw: Err(ListingError::Unreadable(e.to_string())),
            },
        };
        rows.push(row);
    }

    Ok(ListingTable { headers, rows })
}

/// Copy of `record` with blank fields appended up to `len`
pub fn padded(record: &StringRecord, len: usize) -> StringRecord {
    let mut out = record.clone();
    while out.len() < len {
        out.push_field("");
    }
    out
}

/// Load all listings from a CSV file
pub fn read_listings_from_path<P: AsRef<Path>>(path: P) -> Result<ListingTable, csv::Error> {
    let file = std::fs::File::open(path)?;
    read_listings(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "\
permalink,address,price_dollars,sq_ft,monthly_sales_charges,monthly_sales_charges_incl_taxes,unit_type,first_listed
/a,1 Main St,\"$1,575,000\",1758,500,1500,Condo,2020-07-18
/b,2 Main St,900000,,700,,Co-op,
/c,3 Main St,650000,800
";

    #[test]
    fn test_read_listings_keeps_order_and_records() {
        let table = read_listings(EXPORT.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.headers.len(), 8);

        let lines: Vec<u64> = table.rows.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3, 4]);
        assert_eq!(&table.rows[0].record[2], "$1,575,000");

        let first = table.rows[0].raw.as_ref().unwrap();
        assert_eq!(first.permalink.as_deref(), Some("/a"));
        assert_eq!(first.price.as_deref(), Some("$1,575,000"));
        assert_eq!(first.common_charges.as_deref(), Some("500"));
    }

    #[test]
    fn test_short_rows_default_missing_fields() {
        let table = read_listings(EXPORT.as_bytes()).unwrap();
        let third = table.rows[2].raw.as_ref().unwrap();
        assert_eq!(third.sq_ft.as_deref(), Some("800"));
        assert_eq!(third.unit_type, None);
        assert_eq!(third.first_listed, None);
    }

    #[test]
    fn test_short_row_with_unknown_trailing_column() {
        let export = "permalink,price,sq_ft,rent,notes\n/ok,1575000,1758,10000\n";
        let table = read_listings(export.as_bytes()).unwrap();
        let row = &table.rows[0];

        // The record stays as read; only the typed view is padded
        assert_eq!(row.record.len(), 4);
        let raw = row.raw.as_ref().unwrap();
        assert_eq!(raw.price.as_deref(), Some("1575000"));
        assert_eq!(raw.rent.as_deref(), Some("10000"));
    }

    #[test]
    fn test_invalid_utf8_row_keeps_its_fields() {
        let mut export = b"permalink,price\n/a,".to_vec();
        export.extend_from_slice(&[0xff, b'1', b'\n']);
        export.extend_from_slice(b"/b,900000\n");
        let table = read_listings(export.as_slice()).unwrap();

        assert_eq!(table.len(), 2);
        assert!(matches!(table.rows[0].raw, Err(ListingError::Unreadable(_))));
        assert_eq!(table.rows[0].record.len(), 2);
        assert_eq!(&table.rows[0].record[0], "/a");
        assert!(table.rows[1].raw.is_ok());
    }

    #[test]
    fn test_padded_fills_to_length() {
        let record = StringRecord::from(vec!["a"]);
        let out = padded(&record, 3);
        assert_eq!(out, StringRecord::from(vec!["a", "", ""]));
        assert_eq!(padded(&out, 2), out);
    }

    #[test]
    fn test_blank_cells_are_none() {
        let table = read_listings(EXPORT.as_bytes()).unwrap();
        let second = table.rows[1].raw.as_ref().unwrap();
        assert_eq!(second.sq_ft, None);
        assert_eq!(second.monthly_sales_charges_incl_taxes, None);
    }
}
