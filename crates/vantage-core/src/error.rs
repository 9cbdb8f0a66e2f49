//! Error types for core Vantage types.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while constructing or validating core types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Error in date construction or parsing.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A valuation that is zero or negative.
    #[error("Non-positive valuation on {date} for {series}: {value}")]
    NonPositiveValuation {
        /// Date of the offending point.
        date: String,
        /// Which series carried the value (portfolio or a benchmark code).
        series: String,
        /// The offending value.
        value: String,
    },

    /// Dates that are not strictly ascending.
    #[error("Valuation dates out of order at index {index}: {previous} is not before {current}")]
    OutOfOrder {
        /// Index of the later point.
        index: usize,
        /// Date of the earlier point.
        previous: String,
        /// Date of the later point.
        current: String,
    },

    /// Unknown benchmark code.
    #[error("Unknown benchmark: {code}")]
    UnknownBenchmark {
        /// The code that failed to parse.
        code: String,
    },
}

impl CoreError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates a non-positive valuation error.
    #[must_use]
    pub fn non_positive(
        date: impl ToString,
        series: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self::NonPositiveValuation {
            date: date.to_string(),
            series: series.into(),
            value: value.to_string(),
        }
    }

    /// Creates an unknown benchmark error.
    #[must_use]
    pub fn unknown_benchmark(code: impl Into<String>) -> Self {
        Self::UnknownBenchmark { code: code.into() }
    }
}
