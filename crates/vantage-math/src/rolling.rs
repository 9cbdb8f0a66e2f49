//! Sliding-window accumulators.
//!
//! Each accumulator keeps a running mean and second (co-)moment that are
//! updated in O(1) when an observation enters or leaves the window, so a full
//! pass over `n` observations costs O(n) regardless of window length. The
//! caller owns the window contents and hands back the value that drops out.
//!
//! Updates follow Welford's recurrences; removal is the exact inverse of
//! insertion.

use crate::statistics::is_degenerate_variance;

/// Running mean and variance of a single series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RollingMoments {
    count: usize,
    mean: f64,
    m2: f64,
}

impl RollingMoments {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an observation.
    pub fn push(&mut self, x: f64) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (x - self.mean);
    }

    /// Removes an observation previously added.
    pub fn remove(&mut self, x: f64) {
        match self.count {
            0 => {}
            1 => *self = Self::default(),
            _ => {
                let mean_before = self.mean;
                self.count -= 1;
                self.mean -= (x - mean_before) / self.count as f64;
                self.m2 -= (x - self.mean) * (x - mean_before);
                self.m2 = self.m2.max(0.0);
            }
        }
    }

    /// Adds `incoming` and, once the window is full, removes `outgoing`.
    pub fn slide(&mut self, incoming: f64, outgoing: Option<f64>) {
        self.push(incoming);
        if let Some(x) = outgoing {
            self.remove(x);
        }
    }

    /// Number of observations in the window.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Mean of the window; `None` when empty.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then_some(self.mean)
    }

    /// Sample variance; `None` with fewer than two observations.
    pub fn sample_variance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.m2 / (self.count - 1) as f64)
    }

    /// Sample standard deviation, or `None` when it is zero or undefined.
    pub fn sample_std_dev(&self) -> Option<f64> {
        self.sample_variance()
            .filter(|v| !is_degenerate_variance(*v, self.mean))
            .map(f64::sqrt)
    }
}

/// Running co-moments of a pair of series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RollingCovariance {
    count: usize,
    mean_x: f64,
    mean_y: f64,
    m2_x: f64,
    m2_y: f64,
    c_xy: f64,
}

impl RollingCovariance {
    /// Creates an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a paired observation.
    pub fn push(&mut self, x: f64, y: f64) {
        self.count += 1;
        let n = self.count as f64;
        let dx = x - self.mean_x;
        let dy = y - self.mean_y;
        self.mean_x += dx / n;
        self.mean_y += dy / n;
        self.m2_x += dx * (x - self.mean_x);
        self.m2_y += dy * (y - self.mean_y);
        self.c_xy += dx * (y - self.mean_y);
    }

    /// Removes a paired observation previously added.
    pub fn remove(&mut self, x: f64, y: f64) {
        match self.count {
            0 => {}
            1 => *self = Self::default(),
            _ => {
                let (mx_before, my_before) = (self.mean_x, self.mean_y);
                self.count -= 1;
                let n = self.count as f64;
                self.mean_x -= (x - mx_before) / n;
                self.mean_y -= (y - my_before) / n;
                self.m2_x = (self.m2_x - (x - self.mean_x) * (x - mx_before)).max(0.0);
                self.m2_y = (self.m2_y - (y - self.mean_y) * (y - my_before)).max(0.0);
                self.c_xy -= (x - self.mean_x) * (y - my_before);
            }
        }
    }

    /// Adds `incoming` and, once the window is full, removes `outgoing`.
    pub fn slide(&mut self, incoming: (f64, f64), outgoing: Option<(f64, f64)>) {
        self.push(incoming.0, incoming.1);
        if let Some((x, y)) = outgoing {
            self.remove(x, y);
        }
    }

    /// Number of pairs in the window.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Sample covariance; `None` with fewer than two pairs.
    pub fn sample_covariance(&self) -> Option<f64> {
        (self.count > 1).then(|| self.c_xy / (self.count - 1) as f64)
    }

    /// Pearson correlation, or `None` when either side is constant.
    pub fn correlation(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let denom = (self.count - 1) as f64;
        let (var_x, var_y) = (self.m2_x / denom, self.m2_y / denom);
        if is_degenerate_variance(var_x, self.mean_x) || is_degenerate_variance(var_y, self.mean_y)
        {
            return None;
        }
        Some((self.c_xy / (self.m2_x * self.m2_y).sqrt()).clamp(-1.0, 1.0))
    }
}
