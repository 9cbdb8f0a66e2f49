//! CAPM return decomposition:
//! - Risk-free = configured rate
//! - Market = beta × (benchmark - risk-free)
//! - Alpha = CAPM alpha against the benchmark
//! - Unexplained = total - risk-free - market - alpha

use serde::{Deserialize, Serialize};
use vantage_core::BenchmarkId;

use crate::returns::AnnualizedReturns;
use crate::risk::RiskMetrics;

/// Inputs to a decomposition, all annualized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributionInput {
    /// Annualized portfolio return (%).
    pub total_return: f64,

    /// Annualized return of the chosen benchmark (%).
    pub benchmark_return: f64,

    /// Portfolio beta against that benchmark.
    pub beta: f64,

    /// CAPM alpha against that benchmark (%).
    pub alpha: f64,

    /// Annual risk-free rate (%).
    pub risk_free_rate: f64,
}

/// Total return split into its components (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributionBreakdown {
    /// Annualized portfolio return (%).
    pub total_return: f64,

    /// Risk-free rate (%).
    pub risk_free_component: f64,

    /// beta × (benchmark - risk-free) (%).
    pub market_return_component: f64,

    /// Alpha (%).
    pub alpha_component: f64,

    /// Residual = total - risk-free - market - alpha (%).
    pub unexplained_component: f64,

    /// Annualized return of the benchmark used (%).
    pub benchmark_return: f64,
}

impl AttributionBreakdown {
    /// Sum of the four components.
    #[must_use]
    pub fn components_sum(&self) -> f64 {
        self.risk_free_component
            + self.market_return_component
            + self.alpha_component
            + self.unexplained_component
    }
}

/// Splits total return into its components.
///
/// Never fails: any misfit of the model lands in the unexplained residual.
#[must_use]
pub fn decompose(input: &AttributionInput) -> AttributionBreakdown {
    let risk_free_component = input.risk_free_rate;
    let market_return_component = input.beta * (input.benchmark_return - input.risk_free_rate);
    let alpha_component = input.alpha;
    let unexplained_component =
        input.total_return - risk_free_component - market_return_component - alpha_component;

    AttributionBreakdown {
        total_return: input.total_return,
        risk_free_component,
        market_return_component,
        alpha_component,
        unexplained_component,
        benchmark_return: input.benchmark_return,
    }
}

/// Decomposes the portfolio's annualized return against one benchmark.
#[must_use]
pub fn attribution_for(
    risk: &RiskMetrics,
    annualized: &AnnualizedReturns,
    benchmark: BenchmarkId,
    risk_free_rate: f64,
) -> AttributionBreakdown {
    decompose(&AttributionInput {
        total_return: annualized.portfolio,
        benchmark_return: annualized.benchmark(benchmark),
        beta: risk.beta(benchmark),
        alpha: risk.alpha(benchmark),
        risk_free_rate,
    })
}
