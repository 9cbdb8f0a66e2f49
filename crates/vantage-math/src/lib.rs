//! # Vantage Math
//!
//! Statistical utilities for the Vantage portfolio performance analytics library.
//!
//! This crate provides:
//!
//! - **Statistics**: Mean, median, sample/population variance, covariance,
//!   Pearson correlation, and standardized higher moments
//! - **Rolling**: O(1)-per-step sliding-window accumulators for mean, variance,
//!   and co-moments
//! - **Compounding**: Geometric linking of percentage returns
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Welford-style updates instead of raw power sums
//! - **Explicit Degeneracy**: Near-zero variance is detected against a tolerance,
//!   never divided through silently

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

pub mod compounding;
pub mod error;
pub mod rolling;
pub mod statistics;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compounding::{compound_percent, growth_factor};
    pub use crate::error::{MathError, MathResult};
    pub use crate::rolling::{RollingCovariance, RollingMoments};
    pub use crate::statistics::{
        is_degenerate_variance, mean, median, pearson_correlation, population_variance,
        sample_covariance, sample_std_dev, sample_variance, standardized_moments,
        HigherMoments, VARIANCE_TOLERANCE,
    };
}

pub use error::{MathError, MathResult};
pub use compounding::{compound_percent, growth_factor};
pub use rolling::{RollingCovariance, RollingMoments};
