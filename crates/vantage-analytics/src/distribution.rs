//! Return distribution: histogram, central tendency and shape.

use serde::{Deserialize, Serialize};
use vantage_math::statistics::{median, standardized_moments};

use crate::error::{
    AnalyticsError, AnalyticsResult, DegenerateInputWarning, Diagnosed, DEGENERATE_FALLBACK,
};

/// One equal-width bucket of the return histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Display label, e.g. `"-1.25% to -1.00%"`.
    pub range_label: String,

    /// Inclusive lower bound (%).
    pub lower: f64,

    /// Exclusive upper bound (%); inclusive for the final bin.
    pub upper: f64,

    /// Bin centre (%).
    pub midpoint: f64,

    /// Number of returns in the bin.
    pub count: usize,
}

/// Distribution of portfolio period returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDistribution {
    /// Histogram bins ordered from lowest to highest return.
    pub bins: Vec<HistogramBin>,

    /// Arithmetic mean return (%).
    pub mean: f64,

    /// Median return (%).
    pub median: f64,

    /// Third standardized moment.
    pub skewness: f64,

    /// Fourth standardized moment minus 3.
    pub excess_kurtosis: f64,

    /// Number of returns analysed.
    pub observations: usize,
}

/// Analyses the distribution of a return sample.
///
/// Skewness and excess kurtosis use the population standard deviation. When
/// every return is identical both are reported as `DEGENERATE_FALLBACK` with
/// a warning.
///
/// # Errors
///
/// Returns `AnalyticsError::Data` for an empty sample, non-finite returns, or
/// a zero bin count.
pub fn return_distribution(
    returns: &[f64],
    bin_count: usize,
) -> AnalyticsResult<Diagnosed<ReturnDistribution>> {
    if returns.is_empty() {
        return Err(AnalyticsError::data("return series is empty"));
    }
    if returns.iter().any(|r| !r.is_finite()) {
        return Err(AnalyticsError::data("return series contains non-finite values"));
    }
    if bin_count == 0 {
        return Err(AnalyticsError::data("histogram needs at least one bin"));
    }

    let moments = standardized_moments(returns)?;
    let mut warnings = Vec::new();

    let (skewness, excess_kurtosis) = match (moments.skewness, moments.excess_kurtosis) {
        (Some(s), Some(k)) => (s, k),
        _ => {
            let warning = DegenerateInputWarning::new(
                "skewness/kurtosis",
                "all returns are identical, standard deviation is zero",
            );
            log::warn!("{warning}");
            warnings.push(warning);
            (DEGENERATE_FALLBACK, DEGENERATE_FALLBACK)
        }
    };

    Ok(Diagnosed::new(
        ReturnDistribution {
            bins: histogram(returns, bin_count),
            mean: moments.mean,
            median: median(returns)?,
            skewness,
            excess_kurtosis,
            observations: returns.len(),
        },
        warnings,
    ))
}

/// Partitions `[min, max]` into `bin_count` equal-width bins and counts returns.
///
/// Each bin counts `[lower, upper)`; the final bin also includes the maximum.
/// A zero-width range places every observation in the final bin.
#[must_use]
pub fn histogram(returns: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if returns.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
    let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bin_count as f64;
    let lower_of = |k: usize| min + k as f64 * width;

    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|k| {
            let lower = lower_of(k);
            let upper = if k + 1 == bin_count { max } else { lower_of(k + 1) };
            HistogramBin {
                range_label: format!("{lower:.2}% to {upper:.2}%"),
                lower,
                upper,
                midpoint: (lower + upper) / 2.0,
                count: 0,
            }
        })
        .collect();

    let last = bin_count - 1;
    for &r in returns {
        let index = if width > 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let mut k = (((r - min) / width).floor() as usize).min(last);
            // Settle rounding at bin edges against the published bounds
            while k < last && r >= bins[k + 1].lower {
                k += 1;
            }
            while k > 0 && r < bins[k].lower {
                k -= 1;
            }
            k
        } else {
            last
        };
        bins[index].count += 1;
    }

    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_counts_sum_to_observations() {
        let returns: Vec<f64> = (0..250).map(|i| ((i * 7919) % 400) as f64 / 100.0 - 2.0).collect();
        let dist = return_distribution(&returns, 20).unwrap().value;
        assert_eq!(dist.bins.len(), 20);
        assert_eq!(dist.bins.iter().map(|b| b.count).sum::<usize>(), 250);
        assert_eq!(dist.observations, 250);
    }

    #[test]
    fn test_bin_edges() {
        let returns = [0.0, 1.0, 2.0, 3.0, 4.0];
        let bins = histogram(&returns, 4);
        assert_relative_eq!(bins[0].lower, 0.0);
        assert_relative_eq!(bins[3].upper, 4.0);
        assert_relative_eq!(bins[1].midpoint, 1.5);
        // [0,1) [1,2) [2,3) [3,4]
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(bins[0].range_label, "0.00% to 1.00%");
    }

    #[test]
    fn test_mean_median_shape() {
        let returns = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let result = return_distribution(&returns, 20).unwrap();
        assert!(!result.is_degenerate());
        let dist = result.value;
        assert_relative_eq!(dist.mean, 0.0);
        assert_relative_eq!(dist.median, 0.0);
        assert_relative_eq!(dist.skewness, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dist.excess_kurtosis, -2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_returns_fall_back() {
        let returns = [0.3; 10];
        let result = return_distribution(&returns, 20).unwrap();
        assert!(result.is_degenerate());
        assert_eq!(result.value.skewness, DEGENERATE_FALLBACK);
        assert_eq!(result.value.excess_kurtosis, DEGENERATE_FALLBACK);
        assert_eq!(result.value.bins[19].count, 10);
        assert_relative_eq!(result.value.median, 0.3);
    }

    #[test]
    fn test_single_return() {
        let result = return_distribution(&[1.25], 5).unwrap();
        assert!(result.is_degenerate());
        assert_relative_eq!(result.value.mean, 1.25);
        assert_eq!(result.value.bins.iter().map(|b| b.count).sum::<usize>(), 1);
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            return_distribution(&[], 20),
            Err(AnalyticsError::Data { .. })
        ));
        assert!(return_distribution(&[1.0, f64::NAN], 20).is_err());
        assert!(return_distribution(&[1.0, 2.0], 0).is_err());
    }
}
