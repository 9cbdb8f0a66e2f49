//! Conditional parallel evaluation of independent components.
//!
//! Uses rayon when the `parallel` feature is enabled and the configuration
//! allows it for the series length; otherwise runs both closures in order.

use crate::config::AnalyticsConfig;

/// Evaluates two independent computations, in parallel when worthwhile.
///
/// Uses `rayon::join` when:
/// - The `parallel` feature is enabled
/// - `config.parallel` is true
/// - `len` reaches `config.parallel_threshold`
#[allow(unused_variables)]
pub fn maybe_join<A, B, RA, RB>(config: &AnalyticsConfig, len: usize, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        if config.should_parallelize(len) {
            return rayon::join(a, b);
        }
    }

    (a(), b())
}
