//! # Vantage Core
//!
//! Core types for the Vantage portfolio performance analytics library.
//!
//! This crate provides the input vocabulary shared by every other Vantage crate:
//!
//! - **Dates**: A calendar `Date` newtype with month bucketing helpers
//! - **Benchmarks**: `BenchmarkId` and the fixed-cardinality `BenchmarkMap<T>`,
//!   which covers every benchmark (including the derived average) at compile time
//! - **Valuations**: `ValuationPoint`, one snapshot of portfolio value and benchmark levels
//!
//! ## Example
//!
//! ```rust
//! use vantage_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let point = ValuationPoint::new(
//!     Date::from_ymd(2024, 3, 1).unwrap(),
//!     dec!(1.0425),
//!     BenchmarkLevels::new(dec!(3027.02), dec!(9305.11), dec!(3538.40)),
//! );
//! assert_eq!(point.level(BenchmarkId::Csi300), Some(dec!(3538.40)));
//! assert_eq!(point.level(BenchmarkId::Average), None);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::{BenchmarkId, BenchmarkLevels, BenchmarkMap, Date, ValuationPoint};
}

pub use error::{CoreError, CoreResult};
pub use types::{BenchmarkId, BenchmarkLevels, BenchmarkMap, Date, ValuationPoint};
