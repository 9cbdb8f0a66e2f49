//! Descriptive statistics over return samples.
//!
//! All functions take plain `f64` slices. Sample estimators divide by `n - 1`,
//! population estimators by `n`.

use crate::error::{MathError, MathResult};

/// Relative tolerance below which a variance is treated as zero.
///
/// Scaled by `max(1, mean^2)` so that rounding residue from summing identical
/// values never masquerades as dispersion.
pub const VARIANCE_TOLERANCE: f64 = 1e-12;

/// Returns true if `variance` is indistinguishable from zero for data centred on `mean`.
#[must_use]
pub fn is_degenerate_variance(variance: f64, mean: f64) -> bool {
    !variance.is_finite() || variance <= VARIANCE_TOLERANCE * (mean * mean).max(1.0)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; the average of the two central values for an even count.
pub fn median(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

fn sum_squared_deviations(values: &[f64], centre: f64) -> f64 {
    values.iter().map(|x| (x - centre).powi(2)).sum()
}

/// Population variance (divides by `n`).
pub fn population_variance(values: &[f64]) -> MathResult<f64> {
    let m = mean(values)?;
    Ok(sum_squared_deviations(values, m) / values.len() as f64)
}

/// Sample variance (divides by `n - 1`).
pub fn sample_variance(values: &[f64]) -> MathResult<f64> {
    if values.len() < 2 {
        return Err(MathError::insufficient_data(2, values.len()));
    }
    let m = mean(values)?;
    Ok(sum_squared_deviations(values, m) / (values.len() - 1) as f64)
}

/// Sample standard deviation.
pub fn sample_std_dev(values: &[f64]) -> MathResult<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Sample covariance of two paired series.
pub fn sample_covariance(x: &[f64], y: &[f64]) -> MathResult<f64> {
    if x.len() != y.len() {
        return Err(MathError::length_mismatch(x.len(), y.len()));
    }
    if x.len() < 2 {
        return Err(MathError::insufficient_data(2, x.len()));
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    let co: f64 = x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum();
    Ok(co / (x.len() - 1) as f64)
}

/// Pearson correlation coefficient.
///
/// Returns `Ok(None)` when either series is constant, since the coefficient
/// is undefined there.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> MathResult<Option<f64>> {
    let cov = sample_covariance(x, y)?;
    let (mx, my) = (mean(x)?, mean(y)?);
    let var_x = sample_variance(x)?;
    let var_y = sample_variance(y)?;

    if is_degenerate_variance(var_x, mx) || is_degenerate_variance(var_y, my) {
        return Ok(None);
    }
    Ok(Some((cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0)))
}

/// Mean, dispersion and shape of a sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HigherMoments {
    /// Arithmetic mean.
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Third standardized moment; `None` when the standard deviation is zero.
    pub skewness: Option<f64>,
    /// Fourth standardized moment minus 3; `None` when the standard deviation is zero.
    pub excess_kurtosis: Option<f64>,
}

/// Standardized moments using the population standard deviation.
///
/// - skewness = `(1/n) sum(((x - mean) / sd)^3)`
/// - excess kurtosis = `(1/n) sum(((x - mean) / sd)^4) - 3`
pub fn standardized_moments(values: &[f64]) -> MathResult<HigherMoments> {
    let m = mean(values)?;
    let variance = population_variance(values)?;
    let std_dev = variance.sqrt();

    if is_degenerate_variance(variance, m) {
        return Ok(HigherMoments {
            mean: m,
            std_dev: 0.0,
            skewness: None,
            excess_kurtosis: None,
        });
    }

    let n = values.len() as f64;
    let (mut m3, mut m4) = (0.0, 0.0);
    for x in values {
        let z = (x - m) / std_dev;
        let z2 = z * z;
        m3 += z2 * z;
        m4 += z2 * z2;
    }

    Ok(HigherMoments {
        mean: m,
        std_dev,
        skewness: Some(m3 / n),
        excess_kurtosis: Some(m4 / n - 3.0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_median() {
        let values = [3.0, 1.0, 4.0, 1.0, 5.0];
        assert_relative_eq!(mean(&values).unwrap(), 2.8);
        assert_relative_eq!(median(&values).unwrap(), 3.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(mean(&[]).is_err());
        assert!(median(&[]).is_err());
        assert!(standardized_moments(&[]).is_err());
        assert!(matches!(
            sample_variance(&[1.0]),
            Err(MathError::InsufficientData { required: 2, actual: 1 })
        ));
    }

    #[test]
    fn test_variances() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(population_variance(&values).unwrap(), 4.0);
        assert_relative_eq!(sample_variance(&values).unwrap(), 32.0 / 7.0);
        assert_relative_eq!(sample_std_dev(&values).unwrap(), (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_covariance_of_scaled_series() {
        let x = [1.0, -0.5, 2.0, 0.3, -1.2];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        assert_relative_eq!(
            sample_covariance(&x, &y).unwrap(),
            2.0 * sample_variance(&x).unwrap(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            pearson_correlation(&x, &y).unwrap().unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_covariance_length_mismatch() {
        assert!(matches!(
            sample_covariance(&[1.0, 2.0], &[1.0]),
            Err(MathError::LengthMismatch { left: 2, right: 1 })
        ));
    }

    #[test]
    fn test_correlation_constant_series() {
        let x = [0.1, 0.1, 0.1, 0.1];
        let y = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(pearson_correlation(&x, &y).unwrap(), None);
    }

    #[test]
    fn test_symmetric_sample_has_zero_skew() {
        let values = [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0];
        let moments = standardized_moments(&values).unwrap();
        assert_relative_eq!(moments.mean, 0.0);
        assert_relative_eq!(moments.std_dev, 1.0);
        assert_relative_eq!(moments.skewness.unwrap(), 0.0);
        // Two-point distribution: fourth moment 1, excess -2
        assert_relative_eq!(moments.excess_kurtosis.unwrap(), -2.0);
    }

    #[test]
    fn test_right_skewed_sample() {
        let mut values = vec![0.0; 9];
        values.push(10.0);
        let moments = standardized_moments(&values).unwrap();
        // mean 1, sd 3: skew = (9 * -1/27 + 27) / 10, kurt = (9/81 + 81) / 10 - 3
        assert_relative_eq!(moments.skewness.unwrap(), 8.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(moments.excess_kurtosis.unwrap(), 73.0 / 9.0 - 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_identical_values_are_degenerate() {
        let values = [0.1; 7];
        let moments = standardized_moments(&values).unwrap();
        assert_eq!(moments.std_dev, 0.0);
        assert!(moments.skewness.is_none());
        assert!(moments.excess_kurtosis.is_none());
    }

    #[test]
    fn test_degenerate_variance_tolerance() {
        assert!(is_degenerate_variance(0.0, 0.0));
        assert!(is_degenerate_variance(1e-20, 5.0));
        assert!(is_degenerate_variance(f64::NAN, 0.0));
        assert!(!is_degenerate_variance(1e-6, 0.5));
    }
}
