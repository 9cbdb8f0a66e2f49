//! Configuration for performance analytics computation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use vantage_core::BenchmarkId;

use crate::error::{AnalyticsError, AnalyticsResult};

/// Configuration for performance analytics computation.
///
/// Every field has a serde default, so a configuration file only needs the
/// values it overrides.
///
/// # Example
///
/// ```rust
/// use vantage_analytics::AnalyticsConfig;
///
/// let config = AnalyticsConfig::from_toml_str("risk_free_rate = 1.75").unwrap();
/// assert_eq!(config.risk_free_rate, 1.75);
/// assert_eq!(config.histogram_bin_count, 20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// Annual risk-free rate in percent (2.0 = 2%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,

    /// Number of equal-width bins in the return histogram.
    #[serde(default = "default_histogram_bin_count")]
    pub histogram_bin_count: usize,

    /// Periods per year used to annualize daily statistics.
    #[serde(default = "default_annualization_factor")]
    pub annualization_factor: f64,

    /// Trailing window, in periods, of the relative performance series.
    #[serde(default = "default_relative_window")]
    pub relative_window: usize,

    /// Benchmark whose beta and alpha drive the attribution breakdown.
    #[serde(default = "default_attribution_benchmark")]
    pub attribution_benchmark: BenchmarkId,

    /// Enable parallel processing (requires 'parallel' feature).
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Minimum number of return periods to trigger parallel processing.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

fn default_risk_free_rate() -> f64 {
    2.0
}

fn default_histogram_bin_count() -> usize {
    20
}

fn default_annualization_factor() -> f64 {
    252.0
}

fn default_relative_window() -> usize {
    90
}

fn default_attribution_benchmark() -> BenchmarkId {
    BenchmarkId::Csi300
}

fn default_true() -> bool {
    true
}

fn default_parallel_threshold() -> usize {
    500
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            histogram_bin_count: default_histogram_bin_count(),
            annualization_factor: default_annualization_factor(),
            relative_window: default_relative_window(),
            attribution_benchmark: default_attribution_benchmark(),
            parallel: true,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

impl AnalyticsConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config that always uses sequential processing.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Sets the annual risk-free rate (percent).
    #[must_use]
    pub fn with_risk_free_rate(mut self, rate: f64) -> Self {
        self.risk_free_rate = rate;
        self
    }

    /// Sets the histogram bin count.
    #[must_use]
    pub fn with_histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bin_count = bins;
        self
    }

    /// Sets the annualization factor.
    #[must_use]
    pub fn with_annualization_factor(mut self, factor: f64) -> Self {
        self.annualization_factor = factor;
        self
    }

    /// Sets the relative performance window.
    #[must_use]
    pub fn with_relative_window(mut self, window: usize) -> Self {
        self.relative_window = window;
        self
    }

    /// Sets the attribution benchmark.
    #[must_use]
    pub fn with_attribution_benchmark(mut self, benchmark: BenchmarkId) -> Self {
        self.attribution_benchmark = benchmark;
        self
    }

    /// Sets whether to use parallel processing.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets the threshold for parallel processing.
    #[must_use]
    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Returns true if parallel processing should be used for the given count.
    #[must_use]
    pub fn should_parallelize(&self, count: usize) -> bool {
        cfg!(feature = "parallel") && self.parallel && count >= self.parallel_threshold
    }

    /// Checks that every field is usable.
    pub fn validate(&self) -> AnalyticsResult<()> {
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyticsError::invalid_config(
                "risk_free_rate",
                "must be a finite percentage",
            ));
        }
        if self.histogram_bin_count == 0 {
            return Err(AnalyticsError::invalid_config(
                "histogram_bin_count",
                "must be at least 1",
            ));
        }
        if !self.annualization_factor.is_finite() || self.annualization_factor <= 0.0 {
            return Err(AnalyticsError::invalid_config(
                "annualization_factor",
                "must be a positive number of periods",
            ));
        }
        if self.relative_window == 0 {
            return Err(AnalyticsError::invalid_config(
                "relative_window",
                "must be at least 1 period",
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration from TOML.
    pub fn from_toml_str(content: &str) -> AnalyticsResult<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AnalyticsError::invalid_config("toml", e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> AnalyticsResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            AnalyticsError::invalid_config("path", format!("{}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }
}
