//! Error and warning types for performance analytics.
//!
//! Three outcomes are distinguished:
//! - `AnalyticsError::Data`: malformed or insufficient input, fatal to the component
//! - `AnalyticsError::InsufficientData`: one metric for one benchmark is undefined
//! - `DegenerateInputWarning`: a fallback value was substituted, carried in `Diagnosed`

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use vantage_core::{BenchmarkId, CoreError};
use vantage_math::MathError;

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Value substituted for a statistic whose denominator is zero.
pub const DEGENERATE_FALLBACK: f64 = 0.0;

/// Errors that can occur during analytics computation.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsError {
    /// Malformed or insufficient input.
    #[error("Data error: {reason}")]
    Data {
        /// The reason the input was rejected.
        reason: String,
    },

    /// A single metric cannot be computed for a benchmark.
    #[error("Insufficient data for {metric} against {benchmark}: {reason}")]
    InsufficientData {
        /// The metric that could not be computed.
        metric: String,
        /// The benchmark it was computed against.
        benchmark: BenchmarkId,
        /// Why it could not be computed.
        reason: String,
    },

    /// Invalid analytics configuration.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why it is invalid.
        reason: String,
    },
}

impl AnalyticsError {
    /// Creates a data error.
    #[must_use]
    pub fn data(reason: impl Into<String>) -> Self {
        Self::Data {
            reason: reason.into(),
        }
    }

    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(
        metric: impl Into<String>,
        benchmark: BenchmarkId,
        reason: impl Into<String>,
    ) -> Self {
        Self::InsufficientData {
            metric: metric.into(),
            benchmark,
            reason: reason.into(),
        }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if dependent computations must be skipped.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::InsufficientData { .. })
    }
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        Self::data(err.to_string())
    }
}

impl From<MathError> for AnalyticsError {
    fn from(err: MathError) -> Self {
        Self::data(err.to_string())
    }
}

/// A statistic was computed through its fallback rule rather than its formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegenerateInputWarning {
    /// The affected metric.
    pub metric: String,

    /// Benchmark involved, if the metric is benchmark-relative.
    pub benchmark: Option<BenchmarkId>,

    /// What was degenerate.
    pub detail: String,

    /// How many values received the fallback.
    pub occurrences: usize,
}

impl DegenerateInputWarning {
    /// Creates a warning for a single fallback.
    #[must_use]
    pub fn new(metric: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            benchmark: None,
            detail: detail.into(),
            occurrences: 1,
        }
    }

    /// Associates the warning with a benchmark.
    #[must_use]
    pub fn with_benchmark(mut self, benchmark: BenchmarkId) -> Self {
        self.benchmark = Some(benchmark);
        self
    }

    /// Sets the number of values that received the fallback.
    #[must_use]
    pub fn with_occurrences(mut self, occurrences: usize) -> Self {
        self.occurrences = occurrences;
        self
    }
}

impl fmt::Display for DegenerateInputWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.metric)?;
        if let Some(benchmark) = self.benchmark {
            write!(f, " vs {benchmark}")?;
        }
        write!(
            f,
            ": {} (fallback {DEGENERATE_FALLBACK} applied {}x)",
            self.detail, self.occurrences
        )
    }
}

/// A computed value together with the fallbacks applied while computing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosed<T> {
    /// The computed value.
    pub value: T,

    /// Fallbacks applied, empty when every statistic used its formula.
    pub warnings: Vec<DegenerateInputWarning>,
}

impl<T> Diagnosed<T> {
    /// Wraps a value computed without fallbacks.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Wraps a value with the warnings raised while computing it.
    pub fn new(value: T, warnings: Vec<DegenerateInputWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if any fallback was applied.
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Splits into value and warnings.
    pub fn into_parts(self) -> (T, Vec<DegenerateInputWarning>) {
        (self.value, self.warnings)
    }
}
