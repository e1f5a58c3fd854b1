//! Sweep configuration.
//!
//! All parameters arrive from the outside (CLI flags today, a config file
//! tomorrow) and are validated once, before any input file is opened. A bad
//! combination is a [`DetError::Config`], never a mid-sweep surprise.

use crate::constants::{
    SWEEP_DEFAULT_LOWER, SWEEP_DEFAULT_STEP, SWEEP_DEFAULT_UPPER, SWEEP_DEFAULT_WINDOW_SHIFT,
};
use crate::error::{DetError, Result};

/// Threshold-sweep parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SweepConfig {
    /// Lower bound of the threshold range (inclusive).
    pub lower: f64,
    /// Upper bound of the threshold range; the sweep emits one extra point
    /// at `upper + step`, see [`SweepConfig::thresholds`].
    pub upper: f64,
    /// Threshold increment, strictly positive.
    pub step: f64,
    /// Refractory frame count: after a filler alarm at frame `i`, scanning
    /// resumes at `i + window_shift`. Must be at least 1.
    pub window_shift: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            lower: SWEEP_DEFAULT_LOWER,
            upper: SWEEP_DEFAULT_UPPER,
            step: SWEEP_DEFAULT_STEP,
            window_shift: SWEEP_DEFAULT_WINDOW_SHIFT,
        }
    }
}

impl SweepConfig {
    /// Validate the parameter combination.
    pub fn validate(&self) -> Result<()> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(DetError::Config(format!(
                "threshold bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            )));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(DetError::Config(format!(
                "threshold step must be > 0, got {}",
                self.step
            )));
        }
        if self.upper < self.lower {
            return Err(DetError::Config(format!(
                "threshold upper bound {} is below lower bound {}",
                self.upper, self.lower
            )));
        }
        if self.window_shift == 0 {
            // a zero shift would pin the filler scan on the first hit forever
            return Err(DetError::Config(
                "window_shift must be at least 1 frame".to_string(),
            ));
        }
        Ok(())
    }

    /// Enumerate the swept thresholds in ascending order.
    ///
    /// The count is `floor((upper - lower) / step) + 2`: a closed-interval
    /// sweep with one extra point past `upper`. Historical stats files were
    /// produced with exactly this endpoint behavior, so it is load-bearing
    /// for comparability, not an off-by-one.
    pub fn thresholds(&self) -> Vec<f64> {
        let count = ((self.upper - self.lower) / self.step).floor() as usize + 2;
        (0..count).map(|i| self.lower + i as f64 * self.step).collect()
    }
}
