//! CSV ingestion for historical credit prices.
//!
//! The input schema is data, not code: the two required column names are
//! resolved against the header row before any record is read. Row handling is
//! deliberately permissive: only an empty price field drops a row, while
//! unparseable dates and prices survive as tagged markers that flow through
//! to the charts and the allocator unchanged.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Header name of the required date column.
pub const DATE_COLUMN: &str = "Week Of";

/// Header name of the required price column. Rows with an empty value here
/// are dropped; every other row survives.
pub const PRICE_COLUMN: &str = "Weekly Average Credit Price ($)";

/// Date formats accepted for the `Week Of` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"];

/// A parsed calendar date, or a marker preserving the raw text that failed
/// to parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateValue {
    Valid(NaiveDate),
    Invalid(String),
}

impl DateValue {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return DateValue::Valid(date);
            }
        }
        DateValue::Invalid(raw.to_string())
    }

    /// Chart label: ISO date for valid values, the preserved raw text for
    /// invalid ones, "invalid date" when there is no text to show.
    pub fn label(&self) -> String {
        match self {
            DateValue::Valid(date) => date.format("%Y-%m-%d").to_string(),
            DateValue::Invalid(raw) if raw.trim().is_empty() => "invalid date".to_string(),
            DateValue::Invalid(raw) => raw.clone(),
        }
    }
}

/// One (date, price) data point from the historical records. `price` is NaN
/// when the source field was present but did not parse as a number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub date: DateValue,
    pub price: f64,
}

/// Column positions resolved against the header row. A column that is absent
/// keeps its slot as `None` and the affected field degrades row by row
/// instead of aborting the parse.
#[derive(Debug, Clone, Copy)]
struct ResolvedSchema {
    date: Option<usize>,
    price: Option<usize>,
}

impl ResolvedSchema {
    fn resolve(headers: &StringRecord) -> Self {
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        ResolvedSchema {
            date: position(DATE_COLUMN),
            price: position(PRICE_COLUMN),
        }
    }

    fn field<'a>(index: Option<usize>, record: &'a StringRecord) -> &'a str {
        index.and_then(|i| record.get(i)).unwrap_or("")
    }
}

/// Parses raw uploaded bytes into observations, preserving input row order.
///
/// The returned sequence fully replaces any previously loaded dataset; there
/// is no incremental merge. Empty or non-tabular input yields an empty or
/// garbage sequence rather than an error, per the ingest contract.
pub fn parse_observations(bytes: &[u8]) -> Vec<Observation> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(bytes);
    let schema = match reader.headers() {
        Ok(headers) => ResolvedSchema::resolve(headers),
        Err(e) => {
            debug!("Unreadable header row, producing no observations: {e}");
            return Vec::new();
        }
    };

    let mut observations = Vec::new();
    let mut dropped = 0usize;
    for record in reader.records() {
        let Ok(record) = record else {
            // Row isn't valid tabular text; nothing to construct from it.
            continue;
        };

        let price_field = ResolvedSchema::field(schema.price, &record);
        if price_field.is_empty() {
            dropped += 1;
            continue;
        }

        let date_field = ResolvedSchema::field(schema.date, &record);
        observations.push(Observation {
            date: DateValue::parse(date_field),
            price: price_field.trim().parse::<f64>().unwrap_or(f64::NAN),
        });
    }

    debug!(
        kept = observations.len(),
        dropped, "Parsed price observations"
    );
    observations
}

/// Reads and parses a CSV file from disk. Filesystem failures are real
/// errors; content-level problems degrade inside [`parse_observations`].
pub fn load_file(path: &Path) -> Result<Vec<Observation>> {
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read price history file: {}", path.display()))?;
    Ok(parse_observations(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Week Of,Weekly Average Credit Price ($)";

    fn parse(body: &str) -> Vec<Observation> {
        parse_observations(format!("{HEADER}\n{body}").as_bytes())
    }

    #[test]
    fn test_valid_rows_preserve_order() {
        let observations = parse("2024-01-01,5.00\n2024-01-08,5.50\n2024-01-15,6.00");
        assert_eq!(observations.len(), 3);
        assert_eq!(
            observations[0].date,
            DateValue::Valid(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(observations[0].price, 5.00);
        assert_eq!(observations[2].price, 6.00);
    }

    #[test]
    fn test_empty_price_field_drops_row() {
        // The middle row has an empty price and is dropped; the latest
        // price comes from the last surviving row.
        let observations = parse("2024-01-01,5.00\n2024-01-08,\n2024-01-15,6.00");
        assert_eq!(observations.len(), 2);
        assert_eq!(observations.last().unwrap().price, 6.00);
    }

    #[test]
    fn test_unparseable_date_becomes_invalid_marker() {
        let observations = parse("not a date,5.00");
        assert_eq!(observations.len(), 1);
        assert_eq!(
            observations[0].date,
            DateValue::Invalid("not a date".to_string())
        );
        assert_eq!(observations[0].price, 5.00);
    }

    #[test]
    fn test_unparseable_price_becomes_nan() {
        // Rows with a non-empty but unparseable price survive as NaN. This is
        // documented permissiveness, not something to "fix" with a drop.
        let observations = parse("2024-01-01,n/a");
        assert_eq!(observations.len(), 1);
        assert!(observations[0].price.is_nan());
    }

    #[test]
    fn test_whitespace_price_is_not_empty() {
        // A whitespace-only field is non-empty, so the row survives as NaN.
        let observations = parse("2024-01-01, ");
        assert_eq!(observations.len(), 1);
        assert!(observations[0].price.is_nan());
    }

    #[test]
    fn test_empty_input_yields_no_observations() {
        assert!(parse_observations(b"").is_empty());
        assert!(parse_observations(HEADER.as_bytes()).is_empty());
    }

    #[test]
    fn test_missing_price_column_drops_every_row() {
        let observations = parse_observations(b"Week Of\n2024-01-01\n2024-01-08");
        assert!(observations.is_empty());
    }

    #[test]
    fn test_missing_date_column_marks_dates_invalid() {
        let observations =
            parse_observations(b"Weekly Average Credit Price ($)\n5.00\n6.00");
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].date, DateValue::Invalid(String::new()));
        assert_eq!(observations[0].date.label(), "invalid date");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let observations = parse_observations(
            b"Region,Week Of,Weekly Average Credit Price ($)\nWest,2024-01-01,5.25\n",
        );
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].price, 5.25);
    }

    #[test]
    fn test_short_rows_degrade_to_markers() {
        // flexible() keeps rows with fewer fields than the header; the
        // missing price field resolves empty and drops the row.
        let observations = parse("2024-01-01,5.00\n2024-01-08");
        assert_eq!(observations.len(), 1);
    }

    #[test]
    fn test_non_tabular_bytes_produce_garbage_not_errors() {
        let observations = parse_observations(b"\x00\x01\x02 definitely not csv");
        assert!(observations.is_empty() || observations.iter().all(|o| o.price.is_nan()));
    }

    #[test]
    fn test_us_date_formats_accepted() {
        let observations = parse("01/15/2024,6.00\n1/22/24,6.10");
        assert_eq!(
            observations[0].date,
            DateValue::Valid(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(
            observations[1].date,
            DateValue::Valid(NaiveDate::from_ymd_opt(2024, 1, 22).unwrap())
        );
    }

    #[test]
    fn test_ingest_length_property() {
        // Output length equals input rows minus rows with an empty price.
        let body = "2024-01-01,5.00\n2024-01-08,\n2024-01-15,6.00\n2024-01-22,\n2024-01-29,7.00";
        assert_eq!(parse(body).len(), 3);
    }

    #[test]
    fn test_date_label_formats() {
        assert_eq!(
            DateValue::Valid(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()).label(),
            "2024-03-04"
        );
        assert_eq!(DateValue::Invalid("garbled".into()).label(), "garbled");
        assert_eq!(DateValue::Invalid("  ".into()).label(), "invalid date");
    }
}
