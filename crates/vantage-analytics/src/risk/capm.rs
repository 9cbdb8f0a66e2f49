//! Beta and CAPM alpha against each benchmark.

use serde::{Deserialize, Serialize};
use vantage_core::{BenchmarkId, BenchmarkMap};
use vantage_math::statistics::{
    is_degenerate_variance, mean, sample_covariance, sample_variance,
};

use crate::error::{
    AnalyticsError, AnalyticsResult, DegenerateInputWarning, Diagnosed, DEGENERATE_FALLBACK,
};
use crate::returns::{AnnualizedReturns, ReturnSeries};

/// Beta and annualized alpha of the portfolio against every benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Regression slope of portfolio on benchmark returns.
    pub beta: BenchmarkMap<f64>,

    /// CAPM alpha, annualized (%).
    pub alpha: BenchmarkMap<f64>,
}

impl RiskMetrics {
    /// Beta against one benchmark.
    #[must_use]
    pub fn beta(&self, id: BenchmarkId) -> f64 {
        *self.beta.get(id)
    }

    /// Alpha against one benchmark (%).
    #[must_use]
    pub fn alpha(&self, id: BenchmarkId) -> f64 {
        *self.alpha.get(id)
    }
}

/// Beta = sample covariance / sample variance of the benchmark.
///
/// A constant benchmark has no variance; beta is then `DEGENERATE_FALLBACK`
/// and the result carries a warning.
///
/// # Errors
///
/// Returns `AnalyticsError::Data` for mismatched lengths or fewer than two periods.
pub fn beta(portfolio: &[f64], benchmark: &[f64]) -> AnalyticsResult<Diagnosed<f64>> {
    let variance = sample_variance(benchmark)?;
    let covariance = sample_covariance(portfolio, benchmark)?;

    if is_degenerate_variance(variance, mean(benchmark)?) {
        return Ok(Diagnosed::new(
            DEGENERATE_FALLBACK,
            vec![DegenerateInputWarning::new("beta", "benchmark variance is zero")],
        ));
    }
    Ok(Diagnosed::clean(covariance / variance))
}

/// CAPM alpha: `portfolio - (rf + beta * (benchmark - rf))`, all annualized percent.
#[must_use]
pub fn capm_alpha(
    annualized_portfolio: f64,
    annualized_benchmark: f64,
    beta: f64,
    risk_free_rate: f64,
) -> f64 {
    annualized_portfolio - (risk_free_rate + beta * (annualized_benchmark - risk_free_rate))
}

/// Computes beta and alpha against every benchmark.
///
/// Periods are aligned by construction: every `PeriodReturn` carries the
/// portfolio and all benchmark returns for the same date.
///
/// # Errors
///
/// Returns `AnalyticsError::Data` if the series has fewer than two periods.
pub fn risk_metrics(
    series: &ReturnSeries,
    annualized: &AnnualizedReturns,
    risk_free_rate: f64,
) -> AnalyticsResult<Diagnosed<RiskMetrics>> {
    if series.len() < 2 {
        return Err(AnalyticsError::data(format!(
            "beta needs at least two return periods, got {}",
            series.len()
        )));
    }

    let portfolio = series.portfolio_returns();
    let mut warnings = Vec::new();
    let mut betas = BenchmarkMap::default();
    let mut alphas = BenchmarkMap::default();

    for id in BenchmarkId::ALL {
        let (b, beta_warnings) = beta(&portfolio, &series.benchmark_returns(id))?.into_parts();
        for warning in beta_warnings {
            let warning = warning.with_benchmark(id);
            log::warn!("{warning}");
            warnings.push(warning);
        }

        *betas.get_mut(id) = b;
        *alphas.get_mut(id) = capm_alpha(
            annualized.portfolio,
            annualized.benchmark(id),
            b,
            risk_free_rate,
        );
    }

    Ok(Diagnosed::new(
        RiskMetrics {
            beta: betas,
            alpha: alphas,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::{annualized_returns, PeriodReturn};
    use approx::assert_relative_eq;
    use vantage_core::Date;

    fn series_from(portfolio: &[f64], benchmark: &[f64]) -> ReturnSeries {
        let start = Date::from_ymd(2024, 1, 1).unwrap();
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
    fn test_beta_of_scaled_series() {
        let bench = [0.5, -1.2, 0.8, 0.1, -0.4, 1.5];
        let port: Vec<f64> = bench.iter().map(|b| 1.5 * b + 0.01).collect();
        let result = beta(&port, &bench).unwrap();
        assert!(!result.is_degenerate());
        assert_relative_eq!(result.value, 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_beta_constant_benchmark() {
        let result = beta(&[1.0, 2.0, -1.0], &[0.2, 0.2, 0.2]).unwrap();
        assert!(result.is_degenerate());
        assert_eq!(result.value, DEGENERATE_FALLBACK);
    }

    #[test]
    fn test_beta_needs_two_points() {
        assert!(matches!(beta(&[1.0], &[1.0]), Err(AnalyticsError::Data { .. })));
    }

    #[test]
    fn test_capm_alpha() {
        // 12% portfolio, 10% market, beta 1.2, rf 2% -> 12 - (2 + 1.2 * 8) = 0.4
        assert_relative_eq!(capm_alpha(12.0, 10.0, 1.2, 2.0), 0.4, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_series() {
        let returns = [0.4, -0.3, 1.1, 0.2, -0.9, 0.6, 0.05];
        let series = series_from(&returns, &returns);
        let annualized = annualized_returns(&series, 252.0).unwrap();
        let metrics = risk_metrics(&series, &annualized, 2.0).unwrap();

        assert!(!metrics.is_degenerate());
        for id in BenchmarkId::ALL {
            assert_relative_eq!(metrics.value.beta(id), 1.0, epsilon = 1e-12);
            assert_relative_eq!(metrics.value.alpha(id), 0.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_flat_benchmark_warns_per_benchmark() {
        let series = series_from(&[0.4, -0.3, 1.1], &[0.1, 0.1, 0.1]);
        let annualized = annualized_returns(&series, 252.0).unwrap();
        let metrics = risk_metrics(&series, &annualized, 2.0).unwrap();

        assert_eq!(metrics.warnings.len(), 4);
        assert_eq!(metrics.warnings[0].benchmark, Some(BenchmarkId::Sha));
        // alpha with beta 0 reduces to excess return over the risk-free rate
        assert_relative_eq!(
            metrics.value.alpha(BenchmarkId::Sha),
            annualized.portfolio - 2.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_single_period_is_data_error() {
        let series = series_from(&[0.4], &[0.1]);
        let annualized = annualized_returns(&series, 252.0).unwrap();
        assert!(risk_metrics(&series, &annualized, 2.0).is_err());
    }
}
