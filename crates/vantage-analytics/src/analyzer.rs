//! End-to-end performance analysis.
//!
//! Builds the return series once, then evaluates the independent components
//! (distribution, monthly aggregation, risk and attribution, capture ratios,
//! rolling metrics, relative performance). A component that fails records
//! its error in the report; only an unusable valuation history aborts.

use serde::{Deserialize, Serialize};
use vantage_core::{Date, ValuationPoint};

use crate::attribution::{
    attribution_for, rolling_relative_performance, AttributionBreakdown, RelativePerformancePoint,
};
use crate::config::AnalyticsConfig;
use crate::distribution::{return_distribution, ReturnDistribution};
use crate::error::{AnalyticsError, AnalyticsResult, DegenerateInputWarning, Diagnosed};
use crate::parallel::maybe_join;
use crate::returns::{
    annualized_returns, monthly_returns, yearly_returns, AnnualizedReturns, MonthlyReturn,
    ReturnSeries, YearlyReturn,
};
use crate::risk::{
    capture_ratios, risk_metrics, rolling_metrics, CaptureRatios, RiskMetrics, RollingMetricPoint,
};

/// Every externally consumed analytics structure for one valuation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// Number of return periods analysed.
    pub periods: usize,

    /// Date of the first return period.
    pub start_date: Date,

    /// Date of the last return period.
    pub end_date: Date,

    /// Annualized returns of portfolio and benchmarks.
    pub annualized: AnnualizedReturns,

    /// Distribution of portfolio returns.
    pub distribution: Option<ReturnDistribution>,

    /// Beta and alpha per benchmark; `None` with fewer than two periods.
    pub risk: Option<RiskMetrics>,

    /// Up/down capture per benchmark.
    pub capture: CaptureRatios,

    /// Trailing-window metrics.
    pub rolling: Vec<RollingMetricPoint>,

    /// Compounded monthly portfolio returns.
    pub monthly: Vec<MonthlyReturn>,

    /// Compounded yearly portfolio returns.
    pub yearly: Vec<YearlyReturn>,

    /// Return decomposition against the configured benchmark.
    pub attribution: Option<AttributionBreakdown>,

    /// Trailing relative performance against the configured benchmark.
    pub relative: Vec<RelativePerformancePoint>,

    /// Per-component and per-metric failures.
    pub errors: Vec<AnalyticsError>,

    /// Fallbacks applied while computing the report.
    pub warnings: Vec<DegenerateInputWarning>,
}

impl PerformanceReport {
    /// Returns true if every component and metric was computed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if any fallback value was substituted.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Errors that prevented a whole component from being computed.
    pub fn fatal_errors(&self) -> impl Iterator<Item = &AnalyticsError> {
        self.errors.iter().filter(|e| e.is_fatal())
    }
}

/// Computes performance reports under one configuration.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use vantage_analytics::{AnalyticsConfig, PerformanceAnalyzer};
/// use vantage_core::{BenchmarkLevels, Date, ValuationPoint};
///
/// let start = Date::from_ymd(2024, 1, 1).unwrap();
/// let points: Vec<_> = (0..40)
///     .map(|i| {
///         let level = Decimal::from(100 + i);
///         ValuationPoint::new(
///             start.add_days(i),
///             level,
///             BenchmarkLevels::new(level, level, level),
///         )
///     })
///     .collect();
///
/// let analyzer = PerformanceAnalyzer::new(AnalyticsConfig::default()).unwrap();
/// let report = analyzer.analyze(&points).unwrap();
/// assert_eq!(report.periods, 39);
/// assert_eq!(report.rolling.len(), 9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PerformanceAnalyzer {
    config: AnalyticsConfig,
}

impl PerformanceAnalyzer {
    /// Creates an analyzer after validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::InvalidConfig` if the configuration is invalid.
    pub fn new(config: AnalyticsConfig) -> AnalyticsResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration in use.
    #[must_use]
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Analyses a valuation history.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::Data` if no return series can be derived:
    /// fewer than two points, non-positive values, or dates out of order.
    /// Failures of individual components are reported in the returned report.
    pub fn analyze(&self, points: &[ValuationPoint]) -> AnalyticsResult<PerformanceReport> {
        let series = ReturnSeries::from_valuations(points)?;
        self.analyze_returns(&series)
    }

    /// Analyses an already built return series.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::Data` if the series is empty.
    pub fn analyze_returns(&self, series: &ReturnSeries) -> AnalyticsResult<PerformanceReport> {
        let config = &self.config;
        let (Some(first), Some(last)) = (series.periods().first(), series.periods().last()) else {
            return Err(AnalyticsError::data("return series is empty"));
        };
        let annualized = annualized_returns(series, config.annualization_factor)?;
        log::debug!(
            "analysing {} periods from {} to {}",
            series.len(),
            first.date,
            last.date
        );

        let ((distribution, calendar), (risk, (capture, (rolling, relative)))) = maybe_join(
            config,
            series.len(),
            || {
                maybe_join(
                    config,
                    series.len(),
                    || {
                        return_distribution(&series.portfolio_returns(), config.histogram_bin_count)
                    },
                    || {
                        let monthly = monthly_returns(series);
                        let yearly = yearly_returns(&monthly);
                        (monthly, yearly)
                    },
                )
            },
            || {
                maybe_join(
                    config,
                    series.len(),
                    || risk_metrics(series, &annualized, config.risk_free_rate),
                    || {
                        maybe_join(
                            config,
                            series.len(),
                            || capture_ratios(series),
                            || {
                                (
                                    rolling_metrics(
                                        series,
                                        config.risk_free_rate,
                                        config.annualization_factor,
                                    ),
                                    rolling_relative_performance(
                                        series,
                                        config.attribution_benchmark,
                                        config.relative_window,
                                    ),
                                )
                            },
                        )
                    },
                )
            },
        );

        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let distribution = collect(distribution, &mut errors, &mut warnings);
        let risk = collect(risk, &mut errors, &mut warnings);
        let attribution = risk.as_ref().map(|risk| {
            attribution_for(
                risk,
                &annualized,
                config.attribution_benchmark,
                config.risk_free_rate,
            )
        });

        let (capture, capture_errors) = capture;
        errors.extend(capture_errors);

        let (rolling, rolling_warnings) = rolling.into_parts();
        warnings.extend(rolling_warnings);

        let relative = relative.unwrap_or_else(|e| {
            errors.push(e);
            Vec::new()
        });

        let (monthly, yearly) = calendar;
        log::debug!(
            "analysis complete: {} errors, {} warnings",
            errors.len(),
            warnings.len()
        );

        Ok(PerformanceReport {
            periods: series.len(),
            start_date: first.date,
            end_date: last.date,
            annualized,
            distribution,
            risk,
            capture,
            rolling,
            monthly,
            yearly,
            attribution,
            relative,
            errors,
            warnings,
        })
    }
}

/// Moves a component result into the report's error and warning lists.
fn collect<T>(
    result: AnalyticsResult<Diagnosed<T>>,
    errors: &mut Vec<AnalyticsError>,
    warnings: &mut Vec<DegenerateInputWarning>,
) -> Option<T> {
    match result {
        Ok(diagnosed) => {
            let (value, component_warnings) = diagnosed.into_parts();
            warnings.extend(component_warnings);
            Some(value)
        }
        Err(e) => {
            log::warn!("component skipped: {e}");
            errors.push(e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use vantage_core::{BenchmarkId, BenchmarkLevels};

    fn point(day: i64, value: i64) -> ValuationPoint {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let level = Decimal::from(value);
        ValuationPoint::new(
            start.add_days(day),
            level,
            BenchmarkLevels::new(level, level, level),
        )
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = AnalyticsConfig::default().with_histogram_bins(0);
        assert!(matches!(
            PerformanceAnalyzer::new(config),
            Err(AnalyticsError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_single_point_is_fatal() {
        let analyzer = PerformanceAnalyzer::default();
        assert!(matches!(
            analyzer.analyze(&[point(0, 100)]),
            Err(AnalyticsError::Data { .. })
        ));
    }

    #[test]
    fn test_two_points_skip_risk() {
        let analyzer = PerformanceAnalyzer::default();
        let report = analyzer.analyze(&[point(0, 100), point(1, 101)]).unwrap();

        assert_eq!(report.periods, 1);
        assert!(report.distribution.is_some());
        assert!(report.risk.is_none());
        assert!(report.attribution.is_none());
        assert!(report.rolling.is_empty());
        assert!(report.fatal_errors().count() >= 1);
        assert!(report.capture.up_capture.get(BenchmarkId::Sha).is_some());
    }

    #[test]
    fn test_report_dates() {
        let points: Vec<_> = (0..5).map(|i| point(i, 100 + i)).collect();
        let report = PerformanceAnalyzer::default().analyze(&points).unwrap();

        assert_eq!(report.start_date, points[1].date);
        assert_eq!(report.end_date, points[4].date);
        assert_eq!(report.monthly.len(), 1);
        assert_eq!(report.yearly.len(), 1);
    }

    #[test]
    fn test_empty_returns_rejected() {
        let analyzer = PerformanceAnalyzer::default();
        assert!(analyzer.analyze_returns(&ReturnSeries::default()).is_err());
    }
}
