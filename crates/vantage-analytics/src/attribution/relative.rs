//! Trailing relative performance against a benchmark.

use serde::{Deserialize, Serialize};
use vantage_core::{BenchmarkId, Date};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::returns::ReturnSeries;

/// Compounded returns over the window ending on `date` (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativePerformancePoint {
    /// Last date of the window.
    pub date: Date,

    /// Portfolio compounded return over the window (%).
    pub portfolio_return: f64,

    /// Benchmark compounded return over the window (%).
    pub benchmark_return: f64,

    /// Portfolio minus benchmark (%).
    pub excess_return: f64,
}

fn wealth_index(returns: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut index = vec![1.0];
    let mut level = 1.0;
    for r in returns {
        level *= 1.0 + r / 100.0;
        index.push(level);
    }
    index
}

/// Compounded return over every trailing window of `window` periods.
///
/// One point per return index `i >= window - 1`, each covering the
/// `window` returns ending at `i`. Windows are read off a cumulative
/// wealth index, so the pass is O(n).
///
/// # Errors
///
/// Returns `AnalyticsError::Data` for a zero window.
pub fn rolling_relative_performance(
    series: &ReturnSeries,
    benchmark: BenchmarkId,
    window: usize,
) -> AnalyticsResult<Vec<RelativePerformancePoint>> {
    if window == 0 {
        return Err(AnalyticsError::data("relative performance window must be positive"));
    }

    let periods = series.periods();
    let portfolio = wealth_index(periods.iter().map(|p| p.portfolio));
    let bench = wealth_index(periods.iter().map(|p| p.benchmark(benchmark)));

    let trailing = |index: &[f64], end: usize| (index[end] / index[end - window] - 1.0) * 100.0;

    Ok(periods
        .iter()
        .enumerate()
        .skip(window - 1)
        .map(|(i, period)| {
            let portfolio_return = trailing(&portfolio, i + 1);
            let benchmark_return = trailing(&bench, i + 1);
            RelativePerformancePoint {
                date: period.date,
                portfolio_return,
                benchmark_return,
                excess_return: portfolio_return - benchmark_return,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::PeriodReturn;
    use approx::assert_relative_eq;
    use vantage_math::compound_percent;

    fn series_from(portfolio: &[f64], benchmark: &[f64]) -> ReturnSeries {
        let start = Date::from_ymd(2024, 6, 3).unwrap();
        ReturnSeries::from_periods(
            portfolio
                .iter()
                .zip(benchmark)
                .enumerate()
                .map(|(i, (&p, &b))| PeriodReturn::new(start.add_days(i as i64), p, b, b, b))
                .collect(),
        )
    }

    #[test]
    fn test_window_compounding() {
        let portfolio = [1.0, -2.0, 0.5, 3.0, -1.0, 0.2];
        let benchmark = [0.5, -1.0, 0.0, 1.0, 0.3, -0.4];
        let series = series_from(&portfolio, &benchmark);
        let points = rolling_relative_performance(&series, BenchmarkId::She, 3).unwrap();

        assert_eq!(points.len(), 4);
        assert_eq!(points[0].date, series.periods()[2].date);
        for (k, point) in points.iter().enumerate() {
            let p = compound_percent(portfolio[k..k + 3].iter().copied());
            let b = compound_percent(benchmark[k..k + 3].iter().copied());
            assert_relative_eq!(point.portfolio_return, p, epsilon = 1e-9);
            assert_relative_eq!(point.benchmark_return, b, epsilon = 1e-9);
            assert_relative_eq!(point.excess_return, p - b, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_window_longer_than_series() {
        let series = series_from(&[1.0, 2.0], &[1.0, 2.0]);
        assert!(rolling_relative_performance(&series, BenchmarkId::Sha, 3)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_zero_window_rejected() {
        let series = series_from(&[1.0], &[1.0]);
        assert!(rolling_relative_performance(&series, BenchmarkId::Sha, 0).is_err());
    }
}
