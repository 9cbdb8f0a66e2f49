//! Per-period simple returns.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use vantage_core::types::validate_chronology;
use vantage_core::{BenchmarkId, BenchmarkMap, Date, ValuationPoint};

use crate::error::{AnalyticsError, AnalyticsResult};

/// Returns of the portfolio and every benchmark over one period, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodReturn {
    /// Date the period ends on.
    pub date: Date,

    /// Portfolio return (%).
    pub portfolio: f64,

    /// Benchmark returns (%); `average` is the mean of the tracked three.
    pub benchmarks: BenchmarkMap<f64>,
}

impl PeriodReturn {
    /// Creates a period return, deriving the average benchmark from the tracked three.
    #[must_use]
    pub fn new(date: Date, portfolio: f64, sha: f64, she: f64, csi300: f64) -> Self {
        Self {
            date,
            portfolio,
            benchmarks: BenchmarkMap::new(sha, she, csi300, (sha + she + csi300) / 3.0),
        }
    }

    /// Return of one benchmark (%).
    #[must_use]
    pub fn benchmark(&self, id: BenchmarkId) -> f64 {
        *self.benchmarks.get(id)
    }
}

/// Chronological sequence of period returns.
///
/// Built from `n` valuation points it holds `n - 1` periods, in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    periods: Vec<PeriodReturn>,
}

impl ReturnSeries {
    /// Derives simple returns from consecutive valuation points.
    ///
    /// `return = (value[i] - value[i-1]) / value[i-1] * 100`
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::Data` if fewer than two points are supplied,
    /// any value is zero or negative, or dates are not strictly ascending.
    pub fn from_valuations(points: &[ValuationPoint]) -> AnalyticsResult<Self> {
        if points.len() < 2 {
            return Err(AnalyticsError::data(format!(
                "at least two valuation points are required, got {}",
                points.len()
            )));
        }
        for point in points {
            point.validate()?;
        }
        validate_chronology(points)?;

        let periods = points
            .windows(2)
            .map(|pair| {
                let (prev, curr) = (&pair[0], &pair[1]);
                let level = |id: BenchmarkId| -> AnalyticsResult<f64> {
                    match (prev.level(id), curr.level(id)) {
                        (Some(p), Some(c)) => percent_change(p, c),
                        _ => Err(AnalyticsError::data(format!("missing level for {id}"))),
                    }
                };
                Ok(PeriodReturn::new(
                    curr.date,
                    percent_change(prev.portfolio_value, curr.portfolio_value)?,
                    level(BenchmarkId::Sha)?,
                    level(BenchmarkId::She)?,
                    level(BenchmarkId::Csi300)?,
                ))
            })
            .collect::<AnalyticsResult<Vec<_>>>()?;

        log::debug!(
            "built {} period returns from {} to {}",
            periods.len(),
            points[0].date,
            points[points.len() - 1].date
        );
        Ok(Self { periods })
    }

    /// Wraps already-computed period returns.
    #[must_use]
    pub fn from_periods(periods: Vec<PeriodReturn>) -> Self {
        Self { periods }
    }

    /// Number of periods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns true if there are no periods.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// The periods in chronological order.
    #[must_use]
    pub fn periods(&self) -> &[PeriodReturn] {
        &self.periods
    }

    /// Period end dates.
    #[must_use]
    pub fn dates(&self) -> Vec<Date> {
        self.periods.iter().map(|p| p.date).collect()
    }

    /// Portfolio returns (%).
    #[must_use]
    pub fn portfolio_returns(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.portfolio).collect()
    }

    /// Returns of one benchmark (%).
    #[must_use]
    pub fn benchmark_returns(&self, id: BenchmarkId) -> Vec<f64> {
        self.periods.iter().map(|p| p.benchmark(id)).collect()
    }
}

/// Percentage change from `prev` to `curr`.
fn percent_change(prev: Decimal, curr: Decimal) -> AnalyticsResult<f64> {
    (curr - prev)
        .checked_div(prev)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .and_then(|pct| pct.to_f64())
        .ok_or_else(|| AnalyticsError::data(format!("cannot compute change from {prev} to {curr}")))
}
