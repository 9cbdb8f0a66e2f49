//! Return series derived from valuation history.
//!
//! - [`series`]: per-period simple returns for the portfolio and each benchmark
//! - [`monthly`]: compounding into calendar months and years
//! - [`annualized`]: geometric annualization of a return series

pub mod annualized;
pub mod monthly;
pub mod series;

pub use annualized::{annualized_return, annualized_returns, AnnualizedReturns};
pub use monthly::{monthly_returns, yearly_returns, MonthlyReturn, YearlyReturn};
pub use series::{PeriodReturn, ReturnSeries};
