//! Augmented CSV output for a batch run

use super::{BatchError, RowOutcome};
use crate::listing::{padded, ListingTable};
use csv::WriterBuilder;
use std::io::Write;

/// Columns appended to every input row
pub const REPORT_COLUMNS: [&str; 8] = [
    "irr",
    "gross_sale_price",
    "moic",
    "equity",
    "profit",
    "gross_sale_price_per_area",
    "monthly_rent",
    "error",
];

/// Write every input row followed by its result columns.
///
/// Rows shorter than the header are padded with blank fields first so
/// each metric lands under its own column. Skipped rows get blank metrics
/// and the skip reason in `error`.
pub fn write_report<W: Write>(
    writer: W,
    table: &ListingTable,
    outcomes: &[RowOutcome],
) -> Result<(), BatchError> {
    let mut csv_writer = WriterBuilder::new().flexible(true).from_writer(writer);

    let mut header = table.headers.clone();
    for column in REPORT_COLUMNS {
        header.push_field(column);
    }
    csv_writer.write_record(&header)?;

    for (row, outcome) in table.rows.iter().zip(outcomes) {
        let mut record = padded(&row.record, table.headers.len());
        match outcome {
            RowOutcome::Evaluated { monthly_rent, result } => {
                for value in [
                    result.irr,
                    result.gross_sale_price,
                    result.moic,
                    result.equity,
                    result.profit,
                    result.price_per_area,
                    *monthly_rent,
                ] {
                    record.push_field(&value.to_string());
                }
                record.push_field("");
            }
            RowOutcome::Skipped(reason) => {
                for _ in 0..REPORT_COLUMNS.len() - 1 {
                    record.push_field("");
                }
                record.push_field(&reason.to_string());
            }
        }
        csv_writer.write_record(&record)?;
    }

    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{BatchConfig, BatchRunner};
    use crate::listing::read_listings;

    const EXPORT: &str = "\
permalink,price,sq_ft,rent
/ok,1575000,1758,10000
/no-area,900000,,5000
";

    #[test]
    fn test_report_appends_columns_in_order() {
        let table = read_listings(EXPORT.as_bytes()).unwrap();
        let outcomes = BatchRunner::new(BatchConfig::default()).run(&table).unwrap();

        let mut out = Vec::new();
        write_report(&mut out, &table, &outcomes).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "permalink,price,sq_ft,rent,irr,gross_sale_price,moic,equity,profit,gross_sale_price_per_area,monthly_rent,error"
        );
        assert!(lines[1].starts_with("/ok,1575000,1758,10000,"));
        assert!(lines[1].ends_with(",10000,"));
        assert!(lines[2].starts_with("/no-area,900000,,5000,,,,,,,,"));
        assert!(lines[2].ends_with("area is unknown or not positive"));
    }

    #[test]
    fn test_short_row_metrics_sit_under_their_headers() {
        let export = "permalink,price,sq_ft,rent,common_charges\n/ok,1575000,1758,10000\n";
        let table = read_listings(export.as_bytes()).unwrap();
        let outcomes = BatchRunner::new(BatchConfig::default()).run(&table).unwrap();
        let result = match &outcomes[0] {
            RowOutcome::Evaluated { result, .. } => *result,
            other => panic!("expected evaluation, got {:?}", other),
        };

        let mut out = Vec::new();
        write_report(&mut out, &table, &outcomes).unwrap();
        let mut reader = csv::Reader::from_reader(out.as_slice());
        let headers = reader.headers().unwrap().clone();
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), headers.len());

        let cell = |name: &str| {
            let i = headers.iter().position(|h| h == name).unwrap();
            record[i].to_string()
        };
        assert_eq!(cell("rent"), "10000");
        assert_eq!(cell("common_charges"), "");
        assert_eq!(cell("irr"), result.irr.to_string());
        assert_eq!(cell("gross_sale_price"), result.gross_sale_price.to_string());
        assert_eq!(cell("monthly_rent"), "10000");
        assert_eq!(cell("error"), "");
    }
}
