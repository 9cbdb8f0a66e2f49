//! Calendar month and year compounding.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use vantage_math::compounding::compound_percent;

use super::ReturnSeries;

/// Compounded portfolio return of one calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReturn {
    /// Calendar year.
    pub year: i32,

    /// Zero-based month (0 = January, 11 = December).
    pub month: u32,

    /// Compounded return over the month's observed periods (%).
    pub return_pct: f64,
}

/// Compounded portfolio return of one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    /// Calendar year.
    pub year: i32,

    /// Compounded return over the year's observed months (%).
    pub return_pct: f64,
}

/// Compounds portfolio returns within each observed calendar month.
///
/// Months without any period are absent from the output rather than
/// reported as 0%. Output is ordered by (year, month).
#[must_use]
pub fn monthly_returns(series: &ReturnSeries) -> Vec<MonthlyReturn> {
    let mut buckets: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for period in series.periods() {
        buckets
            .entry(period.date.year_month())
            .or_default()
            .push(period.portfolio);
    }

    buckets
        .into_iter()
        .map(|((year, month), returns)| MonthlyReturn {
            year,
            month,
            return_pct: compound_percent(returns),
        })
        .collect()
}

/// Compounds monthly returns into calendar-year returns, ordered by year.
#[must_use]
pub fn yearly_returns(monthly: &[MonthlyReturn]) -> Vec<YearlyReturn> {
    let mut buckets: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for m in monthly {
        buckets.entry(m.year).or_default().push(m.return_pct);
    }

    buckets
        .into_iter()
        .map(|(year, returns)| YearlyReturn {
            year,
            return_pct: compound_percent(returns),
        })
        .collect()
}
