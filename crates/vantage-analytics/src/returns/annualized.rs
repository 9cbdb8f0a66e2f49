//! Geometric annualization of return series.

use serde::{Deserialize, Serialize};
use vantage_core::{BenchmarkId, BenchmarkMap};
use vantage_math::compounding::growth_factor;

use super::ReturnSeries;
use crate::error::{AnalyticsError, AnalyticsResult};

/// Annualized returns of the portfolio and every benchmark, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnnualizedReturns {
    /// Portfolio annualized return (%).
    pub portfolio: f64,

    /// Benchmark annualized returns (%).
    pub benchmarks: BenchmarkMap<f64>,
}

impl AnnualizedReturns {
    /// Annualized return of one benchmark (%).
    #[must_use]
    pub fn benchmark(&self, id: BenchmarkId) -> f64 {
        *self.benchmarks.get(id)
    }
}

/// Annualizes percentage returns observed at `periods_per_year` frequency.
///
/// `(prod(1 + r/100) ^ (periods_per_year / n) - 1) * 100`
///
/// A series that loses everything annualizes to -100%.
///
/// # Errors
///
/// Returns `AnalyticsError::Data` for an empty series or a non-positive frequency.
pub fn annualized_return(returns: &[f64], periods_per_year: f64) -> AnalyticsResult<f64> {
    if returns.is_empty() {
        return Err(AnalyticsError::data("cannot annualize an empty return series"));
    }
    if periods_per_year <= 0.0 {
        return Err(AnalyticsError::data(format!(
            "periods per year must be positive, got {periods_per_year}"
        )));
    }

    let growth = growth_factor(returns.iter().copied());
    if growth <= 0.0 {
        return Ok(-100.0);
    }
    let years = returns.len() as f64 / periods_per_year;
    Ok((growth.powf(1.0 / years) - 1.0) * 100.0)
}

/// Annualizes the portfolio and every benchmark of a return series.
pub fn annualized_returns(
    series: &ReturnSeries,
    periods_per_year: f64,
) -> AnalyticsResult<AnnualizedReturns> {
    let portfolio = annualized_return(&series.portfolio_returns(), periods_per_year)?;

    let mut benchmarks = BenchmarkMap::default();
    for id in BenchmarkId::ALL {
        *benchmarks.get_mut(id) = annualized_return(&series.benchmark_returns(id), periods_per_year)?;
    }

    Ok(AnnualizedReturns {
        portfolio,
        benchmarks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::PeriodReturn;
    use approx::assert_relative_eq;
    use vantage_core::Date;

    #[test]
    fn test_full_year_equals_total() {
        // 12 monthly returns of 1% annualize to the compounded total
        let returns = vec![1.0; 12];
        let annual = annualized_return(&returns, 12.0).unwrap();
        assert_relative_eq!(annual, (1.01_f64.powi(12) - 1.0) * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_half_year_is_extrapolated() {
        // 10% over half a year is 21% annualized
        let returns = vec![10.0];
        assert_relative_eq!(annualized_return(&returns, 2.0).unwrap(), 21.0, epsilon = 1e-9);
    }

    #[test]
    fn test_total_loss() {
        assert_relative_eq!(annualized_return(&[-100.0, 5.0], 252.0).unwrap(), -100.0);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(annualized_return(&[], 252.0).is_err());
        assert!(annualized_return(&[1.0], 0.0).is_err());
    }

    #[test]
    fn test_annualized_series() {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
        let periods = (0..4)
            .map(|i| PeriodReturn::new(start.add_days(i), 1.0, 2.0, 0.0, -1.0))
            .collect();
        let series = ReturnSeries::from_periods(periods);
        let annual = annualized_returns(&series, 4.0).unwrap();

        assert_relative_eq!(annual.portfolio, (1.01_f64.powi(4) - 1.0) * 100.0, epsilon = 1e-9);
        assert_relative_eq!(annual.benchmark(BenchmarkId::She), 0.0, epsilon = 1e-12);
        assert!(annual.benchmark(BenchmarkId::Csi300) < 0.0);
        assert_relative_eq!(
            annual.benchmark(BenchmarkId::Average),
            ((1.0 + 1.0 / 300.0_f64).powi(4) - 1.0) * 100.0,
            epsilon = 1e-9
        );
    }
}
