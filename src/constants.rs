/// FALSE_ALARM_FLOOR is the minimum false-alarm count substituted for zero.
///
/// A literal zero count would render as `0.000000`, indistinguishable from
/// "never computed" in downstream plotting scripts, so the count is clamped
/// to this epsilon before rate normalization.
pub const FALSE_ALARM_FLOOR: f64 = 1e-6;

/// SECONDS_PER_HOUR converts accumulated filler duration into hours.
pub const SECONDS_PER_HOUR: f64 = 3600.0;

/// SWEEP_DEFAULT_LOWER is the default lower threshold bound.
pub const SWEEP_DEFAULT_LOWER: f64 = 0.0;

/// SWEEP_DEFAULT_UPPER is the default upper threshold bound.
pub const SWEEP_DEFAULT_UPPER: f64 = 1.0;

/// SWEEP_DEFAULT_STEP is the default threshold step.
pub const SWEEP_DEFAULT_STEP: f64 = 0.01;

/// SWEEP_DEFAULT_WINDOW_SHIFT is the default refractory frame count applied
/// after a filler alarm fires.
pub const SWEEP_DEFAULT_WINDOW_SHIFT: usize = 50;

/// DEFAULT_KEYWORD_CLASS is the keyword class id selected when none is given.
pub const DEFAULT_KEYWORD_CLASS: u32 = 0;
