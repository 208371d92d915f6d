//! Errors for the few fallible operations in this crate. Classification and
//! aggregation are infallible; only auxiliary inputs can be rejected.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    /// A corpus totals entry did not have the `year,words,pages,volumes` shape.
    #[error("malformed corpus totals entry: {0:?}")]
    MalformedTotals(String),

    /// A required column was absent from a record.
    #[error("missing column: {0}")]
    MissingColumn(String),

    #[error("invalid number: {0:?}")]
    InvalidNumber(String),

    #[error("regex: {0}")]
    Regex(#[from] regex::Error),
}
