//! # CSV Snapshot Provider
//!
//! A periodic CSV export of the table, used when the API is unavailable.
//! Cells may be quoted and span lines. Every column is read as text
//! (schema inference disabled), then headers and cells are trimmed. Empty
//! cells are dropped, matching how the API omits them.

use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use meridian_stats::{FieldValue, RawRecord, RecordSet};
use polars::prelude::{CsvReadOptions, PolarsResult, SerReader, StringChunked};

use crate::error::SourceError;
use crate::source::RecordSource;

/// Parse CSV bytes into records.
pub fn parse_csv(bytes: &[u8]) -> Result<RecordSet, SourceError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(RecordSet::default());
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|po| po.with_truncate_ragged_lines(true))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    let headers: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.trim().to_string())
        .collect();
    let cells = df
        .get_columns()
        .iter()
        .map(|column| column.str())
        .collect::<PolarsResult<Vec<&StringChunked>>>()?;

    let mut rows = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row: RawRecord = headers
            .iter()
            .zip(&cells)
            .filter_map(|(header, column)| {
                let value = column.get(idx)?.trim();
                (!value.is_empty()).then(|| (header.clone(), FieldValue::from(value)))
            })
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(RecordSet::new(headers, rows))
}

/// CSV export on disk.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RecordSource for CsvSource {
    fn name(&self) -> &str {
        "csv"
    }

    async fn fetch(&self) -> Result<RecordSet, SourceError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records = tokio::task::spawn_blocking(move || parse_csv(&bytes))
            .await
            .map_err(|e| SourceError::decode("CSV snapshot", e))??;
        tracing::debug!(path = %self.path.display(), records = records.len(), "read CSV snapshot");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_columns_as_text() {
        let csv = "Country,ISO 3166-1 alpha-3,Cases\nChile,CHL,007\nPeru,PER,\n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.headers(), ["Country", "ISO 3166-1 alpha-3", "Cases"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows()[0].get("Cases"), Some(&FieldValue::from("007")));
        assert!(!set.rows()[1].contains_key("Cases"));
    }

    #[test]
    fn quoted_cells_span_lines() {
        let csv = "Country,Notes\n\"Côte d'Ivoire\",\"line one\nline \"\"two\"\"\"\nGhana,plain\n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.rows()[0].get("Notes"),
            Some(&FieldValue::from("line one\nline \"two\""))
        );
    }

    #[test]
    fn headers_and_cells_are_trimmed() {
        let csv = "Country , Status \n Chile , UN Member State \n";
        let set = parse_csv(csv.as_bytes()).unwrap();
        assert_eq!(set.headers(), ["Country", "Status"]);
        assert_eq!(
            set.rows()[0].get("Status"),
            Some(&FieldValue::from("UN Member State"))
        );
    }

    #[test]
    fn empty_input_is_empty_set() {
        assert!(parse_csv(b"").unwrap().is_empty());
        assert!(parse_csv(b"  \n").unwrap().is_empty());
    }
}
