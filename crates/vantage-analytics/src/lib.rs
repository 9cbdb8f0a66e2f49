//! # Vantage Analytics
//!
//! Performance and risk analytics of a portfolio against market benchmarks.
//!
//! This crate turns a valuation history (portfolio value plus benchmark index
//! levels per date) into the statistics a performance review needs.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every component is a stateless transformation of the return series
//! - **Partial results**: A metric that cannot be computed is reported, never fatal to its siblings
//! - **Explicit fallbacks**: Zero-variance inputs use `DEGENERATE_FALLBACK` and raise a warning
//! - **Linear rolling windows**: Sliding accumulators, O(1) per step
//! - **Config-driven parallelism**: Optional rayon support with threshold-based switching
//!
//! ## Features
//!
//! - **Returns**: Period, monthly, yearly and annualized returns
//! - **Distribution**: Histogram, mean, median, skewness, excess kurtosis
//! - **Risk**: Beta and CAPM alpha against every benchmark
//! - **Capture**: Up/down market capture and their ratio
//! - **Rolling**: 30/60/90-period volatility, Sharpe ratio and correlation
//! - **Attribution**: Risk-free, market, alpha and residual components; trailing relative performance
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use vantage_analytics::prelude::*;
//!
//! let config = AnalyticsConfig::from_file("analytics.toml")?;
//! let report = PerformanceAnalyzer::new(config)?.analyze(&valuations)?;
//!
//! for error in &report.errors {
//!     eprintln!("skipped: {error}");
//! }
//! println!("beta vs CSI 300: {:?}", report.risk.map(|r| r.beta(BenchmarkId::Csi300)));
//! ```
//!
//! ## Module Overview
//!
//! - [`returns`] - Return series, calendar aggregation, annualization
//! - [`distribution`] - Histogram and higher moments
//! - [`risk`] - Beta/alpha, capture ratios, rolling metrics
//! - [`attribution`] - Return decomposition and relative performance
//! - [`analyzer`] - End-to-end report
//! - [`config`] - Analytics configuration
//!
//! ## Feature Flags
//!
//! - `parallel`: Evaluate independent components with rayon for long series

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod analyzer;
pub mod attribution;
pub mod config;
pub mod distribution;
pub mod error;
pub mod parallel;
pub mod returns;
pub mod risk;

// Re-export error types at crate root
pub use error::{
    AnalyticsError, AnalyticsResult, DegenerateInputWarning, Diagnosed, DEGENERATE_FALLBACK,
};

pub use config::AnalyticsConfig;

pub use analyzer::{PerformanceAnalyzer, PerformanceReport};

// Re-export component types and functions
pub use returns::{
    annualized_return, annualized_returns, monthly_returns, yearly_returns, AnnualizedReturns,
    MonthlyReturn, PeriodReturn, ReturnSeries, YearlyReturn,
};

pub use distribution::{histogram, return_distribution, HistogramBin, ReturnDistribution};

pub use risk::{
    beta, capm_alpha, capture_ratios, down_capture, risk_metrics, rolling_metrics, up_capture,
    CaptureRatios, RiskMetrics, RollingMetricPoint, RollingWindow, WindowMetrics,
};

pub use attribution::{
    attribution_for, decompose, rolling_relative_performance, AttributionBreakdown,
    AttributionInput, RelativePerformancePoint,
};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use vantage_analytics::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{
        AnalyticsError, AnalyticsResult, DegenerateInputWarning, Diagnosed, DEGENERATE_FALLBACK,
    };

    pub use crate::config::AnalyticsConfig;

    pub use crate::analyzer::{PerformanceAnalyzer, PerformanceReport};

    pub use crate::returns::{AnnualizedReturns, MonthlyReturn, ReturnSeries, YearlyReturn};

    pub use crate::distribution::ReturnDistribution;

    pub use crate::risk::{CaptureRatios, RiskMetrics, RollingMetricPoint, RollingWindow};

    pub use crate::attribution::{AttributionBreakdown, RelativePerformancePoint};

    pub use vantage_core::prelude::*;
}
