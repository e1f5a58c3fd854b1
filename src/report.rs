//! Stats-file serialization.
//!
//! One line per swept threshold, three fixed-precision fields:
//!
//! ```text
//! <threshold> <false_alarm_per_hour> <false_reject_rate>
//! ```
//!
//! The six-decimal formatting and the field order are consumed by existing
//! plotting scripts, so they are part of the contract.

use std::io::Write;

use crate::error::Result;
use crate::sweep::ThresholdRecord;

/// Write the DET table to `writer` in sweep order and flush.
pub fn write_report<W: Write>(mut writer: W, records: &[ThresholdRecord]) -> Result<()> {
    for r in records {
        writeln!(
            writer,
            "{:.6} {:.6} {:.6}",
            r.threshold, r.false_alarm_per_hour, r.false_reject_rate
        )?;
    }
    writer.flush()?;
    Ok(())
}
