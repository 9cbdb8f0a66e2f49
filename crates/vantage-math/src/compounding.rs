//! Geometric linking of percentage returns.

/// Growth factor of a sequence of percentage returns: `prod(1 + r/100)`.
///
/// An empty sequence has a growth factor of 1.
pub fn growth_factor<I>(returns_pct: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    returns_pct
        .into_iter()
        .fold(1.0, |acc, r| acc * (1.0 + r / 100.0))
}

/// Compounds percentage returns into a single percentage return.
///
/// `(prod(1 + r/100) - 1) * 100`
///
/// # Example
///
/// ```rust
/// use vantage_math::compounding::compound_percent;
///
/// let total = compound_percent([10.0, -10.0]);
/// assert!((total - (-1.0)).abs() < 1e-12);
/// ```
pub fn compound_percent<I>(returns_pct: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    (growth_factor(returns_pct) - 1.0) * 100.0
}
