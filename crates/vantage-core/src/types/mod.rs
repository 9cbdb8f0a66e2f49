//! Domain types for portfolio and benchmark valuations.

mod benchmark;
mod date;
mod valuation;

pub use benchmark::{BenchmarkId, BenchmarkLevels, BenchmarkMap};
pub use date::Date;
pub use valuation::{validate_chronology, ValuationPoint};
