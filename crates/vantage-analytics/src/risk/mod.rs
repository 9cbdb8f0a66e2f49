//! Benchmark-relative risk analytics.
//!
//! - [`capm`]: beta and CAPM alpha
//! - [`capture`]: up/down market capture ratios
//! - [`rolling`]: trailing-window volatility, Sharpe ratio and correlation

pub mod capm;
pub mod capture;
pub mod rolling;

pub use capm::{beta, capm_alpha, risk_metrics, RiskMetrics};
pub use capture::{capture_ratios, down_capture, up_capture, CaptureRatios};
pub use rolling::{rolling_metrics, RollingMetricPoint, RollingWindow, WindowMetrics};
