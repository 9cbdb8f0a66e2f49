//! Return attribution.
//!
//! - [`decomposition`]: CAPM split of total return into risk-free, market,
//!   alpha and residual components
//! - [`relative`]: trailing compounded return against a benchmark

pub mod decomposition;
pub mod relative;

pub use decomposition::{attribution_for, decompose, AttributionBreakdown, AttributionInput};
pub use relative::{rolling_relative_performance, RelativePerformancePoint};
