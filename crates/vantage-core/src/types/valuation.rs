//! Valuation snapshots, the raw input of the analytics engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{BenchmarkId, BenchmarkLevels, Date};
use crate::error::{CoreError, CoreResult};

/// Portfolio value and benchmark levels observed on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationPoint {
    /// Observation date.
    pub date: Date,

    /// Portfolio value (e.g., NAV per share).
    pub portfolio_value: Decimal,

    /// Levels of the tracked benchmarks.
    pub benchmark_values: BenchmarkLevels,
}

impl ValuationPoint {
    /// Creates a new valuation point.
    #[must_use]
    pub fn new(date: Date, portfolio_value: Decimal, benchmark_values: BenchmarkLevels) -> Self {
        Self {
            date,
            portfolio_value,
            benchmark_values,
        }
    }

    /// Returns the level of a tracked benchmark, `None` for the derived average.
    #[must_use]
    pub fn level(&self, id: BenchmarkId) -> Option<Decimal> {
        self.benchmark_values.get(id)
    }

    /// Checks that the portfolio value and every benchmark level are positive.
    pub fn validate(&self) -> CoreResult<()> {
        if self.portfolio_value <= Decimal::ZERO {
            return Err(CoreError::non_positive(
                self.date,
                "portfolio",
                self.portfolio_value,
            ));
        }
        for (id, level) in self.benchmark_values.iter() {
            if level <= Decimal::ZERO {
                return Err(CoreError::non_positive(self.date, id.code(), level));
            }
        }
        Ok(())
    }
}

/// Checks that dates are strictly ascending (sorted, no duplicates).
pub fn validate_chronology(points: &[ValuationPoint]) -> CoreResult<()> {
    for (index, pair) in points.windows(2).enumerate() {
        if pair[0].date >= pair[1].date {
            return Err(CoreError::OutOfOrder {
                index: index + 1,
                previous: pair[0].date.to_string(),
                current: pair[1].date.to_string(),
            });
        }
    }
    Ok(())
}
