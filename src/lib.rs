//! detcurve – public crate root
//! ============================
//! Offline **DET-curve** evaluator for keyword-spotting score streams.
//!
//! Feed it a ground-truth label file (JSON lines) and a per-frame score file,
//! and it sweeps a threshold range to produce one
//! `(threshold, false_alarm_per_hour, false_reject_rate)` row per point.
//!
//! The pipeline is three independent stages joined on utterance id:
//!
//! 1. [`score::load_scores`] — score sequences for one keyword class;
//! 2. [`labels::partition`] — keyword/filler split plus filler duration;
//! 3. [`sweep::evaluate`] — the threshold sweep, serialized by
//!    [`report::write_report`].
//!
//! Everything is batch and in-memory: the tables are fully materialized
//! before the sweep starts and the sweep only reads them. With the default
//! `parallel` feature the thresholds fan out across a rayon pool; the output
//! is byte-identical either way.

#![deny(unsafe_code)]

/* ────────────────────────  sub-modules  ─────────────────────────────── */
pub mod config;
pub mod constants;
pub mod error;
pub mod labels;
pub mod report;
pub mod score;
pub mod sweep;

/* ────────── public façade & re-exports ─────────────────────────────── */
pub use config::SweepConfig;
pub use error::{DetError, Result};
pub use labels::{LabelRecord, LabelText, Partition};
pub use report::write_report;
pub use score::{ScoreTable, load_scores};
pub use sweep::{ThresholdRecord, evaluate};
