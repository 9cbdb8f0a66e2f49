//! Up/down market capture ratios.

use serde::{Deserialize, Serialize};
use vantage_core::{BenchmarkId, BenchmarkMap};

use crate::error::{AnalyticsError, AnalyticsResult};
use crate::returns::ReturnSeries;

/// Capture statistics per benchmark.
///
/// `None` marks a metric that could not be computed for that benchmark;
/// the matching `AnalyticsError::InsufficientData` is returned alongside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaptureRatios {
    /// Up-market capture (%).
    pub up_capture: BenchmarkMap<Option<f64>>,
    /// Down-market capture (%).
    pub down_capture: BenchmarkMap<Option<f64>>,
    /// Up capture divided by down capture.
    pub capture_ratio: BenchmarkMap<Option<f64>>,
}

#[derive(Clone, Copy)]
enum Market {
    Up,
    Down,
}

impl Market {
    fn metric(self) -> &'static str {
        match self {
            Self::Up => "up_capture",
            Self::Down => "down_capture",
        }
    }

    fn contains(self, benchmark_return: f64) -> bool {
        match self {
            Self::Up => benchmark_return > 0.0,
            Self::Down => benchmark_return < 0.0,
        }
    }
}

fn capture(series: &ReturnSeries, id: BenchmarkId, market: Market) -> AnalyticsResult<f64> {
    let (count, portfolio_sum, benchmark_sum) = series
        .periods()
        .iter()
        .filter(|p| market.contains(p.benchmark(id)))
        .fold((0usize, 0.0, 0.0), |(n, ps, bs), p| {
            (n + 1, ps + p.portfolio, bs + p.benchmark(id))
        });

    if count == 0 {
        let side = match market {
            Market::Up => "no periods with a positive benchmark return",
            Market::Down => "no periods with a negative benchmark return",
        };
        return Err(AnalyticsError::insufficient_data(market.metric(), id, side));
    }

    let benchmark_mean = benchmark_sum / count as f64;
    if benchmark_mean == 0.0 {
        return Err(AnalyticsError::insufficient_data(
            market.metric(),
            id,
            "benchmark mean is zero",
        ));
    }

    Ok(portfolio_sum / count as f64 / benchmark_mean * 100.0)
}

/// Up-market capture against one benchmark.
///
/// # Errors
///
/// `InsufficientData` if no period has a positive benchmark return.
pub fn up_capture(series: &ReturnSeries, id: BenchmarkId) -> AnalyticsResult<f64> {
    capture(series, id, Market::Up)
}

/// Down-market capture against one benchmark.
///
/// # Errors
///
/// `InsufficientData` if no period has a negative benchmark return.
pub fn down_capture(series: &ReturnSeries, id: BenchmarkId) -> AnalyticsResult<f64> {
    capture(series, id, Market::Down)
}

/// Computes capture ratios against every benchmark.
///
/// Failures are per metric and per benchmark: the returned errors are all
/// `InsufficientData` and never prevent the other entries from being filled.
pub fn capture_ratios(series: &ReturnSeries) -> (CaptureRatios, Vec<AnalyticsError>) {
    let mut errors = Vec::new();
    let mut ratios = CaptureRatios {
        up_capture: BenchmarkMap::default(),
        down_capture: BenchmarkMap::default(),
        capture_ratio: BenchmarkMap::default(),
    };

    for id in BenchmarkId::ALL {
        let up = up_capture(series, id).map_err(|e| errors.push(e)).ok();
        let down = down_capture(series, id).map_err(|e| errors.push(e)).ok();

        let ratio = match (up, down) {
            (Some(_), Some(d)) if d == 0.0 => {
                errors.push(AnalyticsError::insufficient_data(
                    "capture_ratio",
                    id,
                    "down capture is zero",
                ));
                None
            }
            (Some(u), Some(d)) => Some(u / d),
            _ => None,
        };

        *ratios.up_capture.get_mut(id) = up;
        *ratios.down_capture.get_mut(id) = down;
        *ratios.capture_ratio.get_mut(id) = ratio;
    }

    for error in &errors {
        log::warn!("{error}");
    }

    (ratios, errors)
}
