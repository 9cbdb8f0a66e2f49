//! Trailing-window volatility, Sharpe ratio and correlation.
//!
//! Each window length keeps one `RollingMoments` for the portfolio and one
//! `RollingCovariance` per benchmark. Every step adds the newest period and
//! drops the one leaving the window, so a full pass is O(n) per window.

use serde::{Deserialize, Serialize};
use vantage_core::{BenchmarkId, BenchmarkMap, Date};
use vantage_math::{RollingCovariance, RollingMoments};

use crate::error::{DegenerateInputWarning, Diagnosed, DEGENERATE_FALLBACK};
use crate::returns::ReturnSeries;

/// Supported trailing window lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RollingWindow {
    /// 30 periods.
    Days30,
    /// 60 periods.
    Days60,
    /// 90 periods.
    Days90,
}

impl RollingWindow {
    /// All windows, shortest first.
    pub const ALL: [RollingWindow; 3] = [Self::Days30, Self::Days60, Self::Days90];

    /// Number of periods in the window.
    #[must_use]
    pub fn periods(self) -> usize {
        match self {
            Self::Days30 => 30,
            Self::Days60 => 60,
            Self::Days90 => 90,
        }
    }

    /// Short label, e.g. `30d`.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Days30 => "30d",
            Self::Days60 => "60d",
            Self::Days90 => "90d",
        }
    }

    /// Shortest window; no point is produced before it is available.
    #[must_use]
    pub fn shortest() -> Self {
        Self::Days30
    }
}

/// Metrics for one window ending on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowMetrics {
    /// Annualized volatility (%).
    pub volatility: f64,

    /// Annualized Sharpe ratio.
    pub sharpe: f64,

    /// Pearson correlation with each benchmark, in [-1, 1].
    pub correlation: BenchmarkMap<f64>,
}

/// Rolling metrics for one date.
///
/// Longer windows stay `None` until enough periods precede the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollingMetricPoint {
    /// Date of the last period in each window.
    pub date: Date,
    /// 30-period window.
    pub window_30d: Option<WindowMetrics>,
    /// 60-period window.
    pub window_60d: Option<WindowMetrics>,
    /// 90-period window.
    pub window_90d: Option<WindowMetrics>,
}

impl RollingMetricPoint {
    /// Metrics for one window, if available at this date.
    #[must_use]
    pub fn get(&self, window: RollingWindow) -> Option<&WindowMetrics> {
        match window {
            RollingWindow::Days30 => self.window_30d.as_ref(),
            RollingWindow::Days60 => self.window_60d.as_ref(),
            RollingWindow::Days90 => self.window_90d.as_ref(),
        }
    }

    fn slot(&mut self, window: RollingWindow) -> &mut Option<WindowMetrics> {
        match window {
            RollingWindow::Days30 => &mut self.window_30d,
            RollingWindow::Days60 => &mut self.window_60d,
            RollingWindow::Days90 => &mut self.window_90d,
        }
    }
}

/// Accumulators for one window length.
struct WindowState {
    window: RollingWindow,
    portfolio: RollingMoments,
    pairs: BenchmarkMap<RollingCovariance>,
    flat_sharpe: usize,
    flat_correlation: BenchmarkMap<usize>,
}

impl WindowState {
    fn new(window: RollingWindow) -> Self {
        Self {
            window,
            portfolio: RollingMoments::new(),
            pairs: BenchmarkMap::default(),
            flat_sharpe: 0,
            flat_correlation: BenchmarkMap::default(),
        }
    }

    fn advance(&mut self, series: &ReturnSeries, i: usize) {
        let periods = series.periods();
        let incoming = &periods[i];
        let outgoing = i.checked_sub(self.window.periods()).map(|j| &periods[j]);

        self.portfolio
            .slide(incoming.portfolio, outgoing.map(|p| p.portfolio));
        for id in BenchmarkId::ALL {
            self.pairs.get_mut(id).slide(
                (incoming.portfolio, incoming.benchmark(id)),
                outgoing.map(|p| (p.portfolio, p.benchmark(id))),
            );
        }
    }

    fn metrics(&mut self, risk_free_rate: f64, annualization_factor: f64) -> WindowMetrics {
        let scale = annualization_factor.sqrt();
        let mean = self.portfolio.mean().unwrap_or(0.0);

        let (volatility, sharpe) = match self.portfolio.sample_std_dev() {
            Some(sd) => {
                let volatility = sd * scale;
                (
                    volatility,
                    (mean * annualization_factor - risk_free_rate) / volatility,
                )
            }
            None => {
                self.flat_sharpe += 1;
                (0.0, DEGENERATE_FALLBACK)
            }
        };

        let mut correlation = BenchmarkMap::default();
        for id in BenchmarkId::ALL {
            *correlation.get_mut(id) = match self.pairs.get(id).correlation() {
                Some(rho) => rho,
                None => {
                    *self.flat_correlation.get_mut(id) += 1;
                    DEGENERATE_FALLBACK
                }
            };
        }

        WindowMetrics {
            volatility,
            sharpe,
            correlation,
        }
    }

    fn warnings(&self) -> Vec<DegenerateInputWarning> {
        let label = self.window.label();
        let mut warnings = Vec::new();

        if self.flat_sharpe > 0 {
            warnings.push(
                DegenerateInputWarning::new(
                    format!("sharpe_{label}"),
                    "portfolio returns constant over the window",
                )
                .with_occurrences(self.flat_sharpe),
            );
        }
        for (id, &count) in self.flat_correlation.iter() {
            if count > 0 {
                warnings.push(
                    DegenerateInputWarning::new(
                        format!("correlation_{label}"),
                        "portfolio or benchmark returns constant over the window",
                    )
                    .with_benchmark(id)
                    .with_occurrences(count),
                );
            }
        }
        warnings
    }
}

/// Computes rolling metrics for every window length.
///
/// A point is produced for each return index `i >= 30`; the window of
/// length `w` covers `returns[i-w+1..=i]` and is filled once `i >= w`.
///
/// Fallbacks (Sharpe and correlation on constant windows) are reported as
/// one warning per window, metric and benchmark with an occurrence count.
pub fn rolling_metrics(
    series: &ReturnSeries,
    risk_free_rate: f64,
    annualization_factor: f64,
) -> Diagnosed<Vec<RollingMetricPoint>> {
    let start = RollingWindow::shortest().periods();
    let mut states: Vec<WindowState> = RollingWindow::ALL
        .into_iter()
        .map(WindowState::new)
        .collect();
    let mut points = Vec::with_capacity(series.len().saturating_sub(start));

    for (i, period) in series.periods().iter().enumerate() {
        for state in &mut states {
            state.advance(series, i);
        }
        if i < start {
            continue;
        }

        let mut point = RollingMetricPoint {
            date: period.date,
            window_30d: None,
            window_60d: None,
            window_90d: None,
        };
        for state in &mut states {
            if i >= state.window.periods() {
                *point.slot(state.window) =
                    Some(state.metrics(risk_free_rate, annualization_factor));
            }
        }
        points.push(point);
    }

    let warnings: Vec<_> = states.iter().flat_map(WindowState::warnings).collect();
    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::debug!(
        "rolling metrics: {} points from {} periods",
        points.len(),
        series.len()
    );

    Diagnosed::new(points, warnings)
}
