//! Command line interface for the DET-curve evaluator.
//!
//! Flag names follow the historical tool so existing eval scripts keep
//! working unchanged.

use clap::Parser;
use std::path::PathBuf;

use detcurve::SweepConfig;
use detcurve::constants::{
    DEFAULT_KEYWORD_CLASS, SWEEP_DEFAULT_LOWER, SWEEP_DEFAULT_STEP, SWEEP_DEFAULT_UPPER,
    SWEEP_DEFAULT_WINDOW_SHIFT,
};

/// Compute a DET curve from keyword-spotting scores
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Label file: one JSON object per line with key, txt and duration
    #[arg(long)]
    pub test_data: PathBuf,

    /// Score file: `<id> <class> <score...>` per line
    #[arg(long)]
    pub score_file: PathBuf,

    /// Output path for the threshold/false-alarm/false-reject table
    #[arg(long)]
    pub stats_file: PathBuf,

    /// Keyword class id to evaluate
    #[arg(long, default_value_t = DEFAULT_KEYWORD_CLASS)]
    pub keyword: u32,

    /// Threshold step
    #[arg(long, default_value_t = SWEEP_DEFAULT_STEP)]
    pub step: f64,

    /// Frames to skip after a filler alarm fires (refractory window)
    #[arg(long, default_value_t = SWEEP_DEFAULT_WINDOW_SHIFT)]
    pub window_shift: usize,

    /// Lower bound of the threshold sweep
    #[arg(long, default_value_t = SWEEP_DEFAULT_LOWER)]
    pub threshold_lower: f64,

    /// Upper bound of the threshold sweep
    #[arg(long, default_value_t = SWEEP_DEFAULT_UPPER)]
    pub threshold_upper: f64,
}

impl Cli {
    /// Assemble the sweep configuration from the flag values.
    pub fn sweep_config(&self) -> SweepConfig {
        SweepConfig {
            lower: self.threshold_lower,
            upper: self.threshold_upper,
            step: self.step,
            window_shift: self.window_shift,
        }
    }
}
