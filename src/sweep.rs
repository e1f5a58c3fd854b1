//! The DET sweep engine.
//!
//! For every threshold in the configured range this walks the keyword table
//! (how many positives fail to peak above τ?) and the filler table (how many
//! windowed crossings fire below the label?) and normalizes both counts into
//! the two DET axes: false-reject rate and false alarms per hour of filler
//! audio.
//!
//! Two behaviors here are exact-compatibility requirements, not incidental:
//!
//! * the filler scan advances by `window_shift` frames after a hit and by 1
//!   frame otherwise, so alarms within the refractory window collapse into
//!   one count;
//! * a per-utterance peak precheck skips sequences that cannot cross τ at
//!   all. This is a pure pruning step — it must never change the count, and
//!   a property test below holds it to that.

use log::info;

use crate::config::SweepConfig;
use crate::constants::{FALSE_ALARM_FLOOR, SECONDS_PER_HOUR};
use crate::error::{DetError, Result};
use crate::labels::Partition;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One row of the DET table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdRecord {
    /// The decision threshold this row was swept at.
    pub threshold: f64,
    /// Windowed filler alarms, normalized per hour of filler audio.
    pub false_alarm_per_hour: f64,
    /// Fraction of keyword utterances whose peak stayed below the threshold.
    pub false_reject_rate: f64,
}

/// Sweep the DET curve over `part` with the given configuration.
///
/// Records come back in ascending threshold order, one per swept point.
/// With no keyword utterances the false-reject rate is reported as 0.0;
/// with no filler utterances the alarm rate is reported as 0.0.
///
/// Fails with [`DetError::Integrity`] when a non-empty filler table carries
/// a non-positive total duration, since no finite rate exists then.
pub fn evaluate(part: &Partition, cfg: &SweepConfig) -> Result<Vec<ThresholdRecord>> {
    cfg.validate()?;
    if !part.filler.is_empty() && part.filler_duration <= 0.0 {
        return Err(DetError::Integrity(format!(
            "filler duration {} s cannot normalize {} filler utterances",
            part.filler_duration,
            part.filler.len()
        )));
    }

    let keyword_peaks: Vec<f64> = part.keyword.values().copied().collect();
    // pair every filler sequence with its peak for the pruning precheck
    let filler: Vec<(f64, &[f64])> = part
        .filler
        .values()
        .map(|seq| (peak(seq), seq.as_slice()))
        .collect();
    let filler_hours = part.filler_duration / SECONDS_PER_HOUR;

    let thresholds = cfg.thresholds();
    info!(
        "sweeping {} thresholds over [{}, {}] step {}",
        thresholds.len(),
        cfg.lower,
        cfg.upper,
        cfg.step
    );

    let eval = |&tau: &f64| -> ThresholdRecord {
        sweep_one(tau, &keyword_peaks, &filler, filler_hours, cfg.window_shift)
    };

    // each threshold only reads the immutable tables, so the fan-out is
    // free of ordering hazards; collect preserves ascending order
    #[cfg(feature = "parallel")]
    let records: Vec<ThresholdRecord> = thresholds.par_iter().map(eval).collect();
    #[cfg(not(feature = "parallel"))]
    let records: Vec<ThresholdRecord> = thresholds.iter().map(eval).collect();

    Ok(records)
}

/// Evaluate a single threshold against the prepared tables.
fn sweep_one(
    tau: f64,
    keyword_peaks: &[f64],
    filler: &[(f64, &[f64])],
    filler_hours: f64,
    window_shift: usize,
) -> ThresholdRecord {
    let num_false_reject = keyword_peaks
        .iter()
        .filter(|&&p| p < tau)
        .count();
    let false_reject_rate = if keyword_peaks.is_empty() {
        0.0
    } else {
        num_false_reject as f64 / keyword_peaks.len() as f64
    };

    let num_false_alarm: usize = filler
        .iter()
        .map(|&(max, seq)| {
            if max < tau {
                0 // the whole sequence sits below τ, skip the scan
            } else {
                windowed_alarms(seq, tau, window_shift)
            }
        })
        .sum();

    let false_alarm_per_hour = if filler_hours > 0.0 {
        (num_false_alarm as f64).max(FALSE_ALARM_FLOOR) / filler_hours
    } else {
        0.0
    };

    ThresholdRecord {
        threshold: tau,
        false_alarm_per_hour,
        false_reject_rate,
    }
}

/// Count threshold crossings in one filler sequence, suppressing follow-up
/// hits inside the refractory window.
///
/// After a hit at frame `i` the scan resumes at `i + window_shift`; a miss
/// advances one frame. The window is frame-indexed, not time-indexed.
fn windowed_alarms(seq: &[f64], tau: f64, window_shift: usize) -> usize {
    let mut alarms = 0;
    let mut i = 0;
    while i < seq.len() {
        if seq[i] >= tau {
            alarms += 1;
            i += window_shift;
        } else {
            i += 1;
        }
    }
    alarms
}

fn peak(seq: &[f64]) -> f64 {
    seq.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Partition;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashMap;

    fn part(
        keyword: &[(&str, f64)],
        filler: &[(&str, &[f64])],
        filler_duration: f64,
    ) -> Partition {
        Partition {
            keyword: keyword
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect::<HashMap<_, _>>(),
            filler: filler
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
            filler_duration,
        }
    }

    #[test]
    fn windowed_scan_collapses_hits_within_the_window() {
        // 0.9 at index 1 fires, the 0.95 at index 2 falls inside the window
        let seq = [0.1, 0.9, 0.95, 0.2];
        assert_eq!(windowed_alarms(&seq, 0.5, 2), 1);
    }

    #[test]
    fn constant_sequence_obeys_the_ceiling_law() {
        // constant v >= tau of length L yields ceil(L / shift) alarms
        for len in [1usize, 5, 10, 49, 50, 51, 100] {
            for shift in [1usize, 2, 3, 50] {
                let seq = vec![0.9f64; len];
                assert_eq!(
                    windowed_alarms(&seq, 0.5, shift),
                    len.div_ceil(shift),
                    "len={len} shift={shift}"
                );
            }
        }
    }

    #[test]
    fn shift_one_counts_every_crossing() {
        let seq = [0.6, 0.6, 0.1, 0.6];
        assert_eq!(windowed_alarms(&seq, 0.5, 1), 3);
    }

    #[test]
    fn peak_precheck_never_changes_the_count() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..50 {
            let n_utts = rng.random_range(1..20);
            let sequences: Vec<Vec<f64>> = (0..n_utts)
                .map(|_| {
                    let len = rng.random_range(0..200);
                    (0..len).map(|_| rng.random::<f64>()).collect()
                })
                .collect();
            let tau = rng.random::<f64>();
            let shift = rng.random_range(1..80);

            let unpruned: usize = sequences
                .iter()
                .map(|s| windowed_alarms(s, tau, shift))
                .sum();
            let pruned: usize = sequences
                .iter()
                .map(|s| {
                    if peak(s) < tau {
                        0
                    } else {
                        windowed_alarms(s, tau, shift)
                    }
                })
                .sum();
            assert_eq!(pruned, unpruned, "tau={tau} shift={shift}");
        }
    }

    #[test]
    fn worked_example_first_threshold() {
        let part = part(
            &[("u1", 0.8), ("u2", 0.3)],
            &[("u3", &[0.1, 0.9, 0.95, 0.2])],
            3600.0,
        );
        let cfg = SweepConfig {
            lower: 0.5,
            upper: 0.9,
            step: 0.4,
            window_shift: 2,
        };
        let records = evaluate(&part, &cfg).unwrap();
        assert_eq!(records.len(), 3);

        let first = records[0];
        assert!((first.threshold - 0.5).abs() < 1e-12);
        assert!((first.false_alarm_per_hour - 1.0).abs() < 1e-9);
        assert!((first.false_reject_rate - 0.5).abs() < 1e-12);
    }

    #[test]
    fn rates_are_monotone_across_the_sweep() {
        let mut rng = StdRng::seed_from_u64(7);
        let keyword: Vec<(String, f64)> = (0..30)
            .map(|i| (format!("kw{i}"), rng.random::<f64>()))
            .collect();
        let filler: Vec<(String, Vec<f64>)> = (0..30)
            .map(|i| {
                let len = rng.random_range(1..100);
                (
                    format!("f{i}"),
                    (0..len).map(|_| rng.random::<f64>()).collect(),
                )
            })
            .collect();
        let part = Partition {
            keyword: keyword.into_iter().collect(),
            filler: filler.into_iter().collect(),
            filler_duration: 7200.0,
        };
        let cfg = SweepConfig::default();
        let records = evaluate(&part, &cfg).unwrap();

        for w in records.windows(2) {
            assert!(w[0].threshold < w[1].threshold);
            assert!(w[0].false_reject_rate <= w[1].false_reject_rate);
            assert!(w[0].false_alarm_per_hour >= w[1].false_alarm_per_hour);
            assert!((0.0..=1.0).contains(&w[0].false_reject_rate));
        }
    }

    #[test]
    fn empty_keyword_table_reports_zero_reject_rate() {
        let part = part(&[], &[("f1", &[0.4, 0.6])], 3600.0);
        let records = evaluate(&part, &SweepConfig::default()).unwrap();
        assert!(records.iter().all(|r| r.false_reject_rate == 0.0));
    }

    #[test]
    fn empty_filler_table_reports_zero_alarm_rate() {
        let part = part(&[("kw", 0.9)], &[], 0.0);
        let records = evaluate(&part, &SweepConfig::default()).unwrap();
        assert!(records.iter().all(|r| r.false_alarm_per_hour == 0.0));
    }

    #[test]
    fn zero_alarm_count_is_floored_not_zeroed() {
        // filler never crosses, so the clamp to 1e-6 is what keeps the
        // rate strictly positive
        let part = part(&[("kw", 0.9)], &[("f1", &[0.1, 0.1])], 3600.0);
        let cfg = SweepConfig {
            lower: 0.2,
            upper: 0.8,
            step: 0.1,
            window_shift: 50,
        };
        let records = evaluate(&part, &cfg).unwrap();
        for r in &records {
            assert!(r.false_alarm_per_hour > 0.0);
            assert!(r.false_alarm_per_hour <= 1e-6 + 1e-15);
        }
    }

    #[test]
    fn nonpositive_filler_duration_with_filler_is_rejected() {
        let part = part(&[("kw", 0.9)], &[("f1", &[0.4])], 0.0);
        let err = evaluate(&part, &SweepConfig::default()).unwrap_err();
        assert!(matches!(err, DetError::Integrity(_)));
    }

    #[test]
    fn evaluation_is_deterministic() {
        let part = part(
            &[("u1", 0.8), ("u2", 0.3)],
            &[("u3", &[0.1, 0.9, 0.95, 0.2])],
            3600.0,
        );
        let cfg = SweepConfig::default();
        let a = evaluate(&part, &cfg).unwrap();
        let b = evaluate(&part, &cfg).unwrap();
        assert_eq!(a, b);
    }
}
