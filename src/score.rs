//! Score-file loading.
//!
//! A score file carries one line per utterance *per keyword class*:
//!
//! ```text
//! <utterance_id> <keyword_class_int> <score_1> <score_2> ... <score_n>
//! ```
//!
//! Only lines whose class field equals the requested class are kept. The
//! scores are per-frame posteriors in time order; the order matters later for
//! the windowed alarm scan, so lines are never re-sorted.

use std::collections::HashMap;
use std::io::BufRead;

use log::debug;

use crate::error::{DetError, Result};

/// Mapping utterance id → per-frame score sequence for one keyword class.
pub type ScoreTable = HashMap<String, Vec<f64>>;

/// Load the score sequences for `keyword_class` from `reader`.
///
/// Duplicate ids for the requested class keep the *first* occurrence and
/// silently drop the rest. That is insertion-order-dependent on purpose: the
/// historical tool behaved this way, and downstream numbers must not move
/// when a score file carries stray duplicates.
///
/// Blank lines are skipped. A line with fewer than two fields, a
/// non-integer class field, or a non-numeric score token fails the whole
/// load with [`DetError::Format`].
pub fn load_scores<R: BufRead>(reader: R, keyword_class: u32) -> Result<ScoreTable> {
    let mut table = ScoreTable::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        let mut fields = line.split_whitespace();

        let Some(id) = fields.next() else {
            continue; // blank line
        };
        let class_str = fields
            .next()
            .ok_or_else(|| DetError::format(lineno, "missing keyword class field"))?;
        let class: u32 = class_str.parse().map_err(|_| {
            DetError::format(lineno, format!("bad keyword class {class_str:?}"))
        })?;

        if class != keyword_class {
            continue;
        }

        let scores = fields
            .map(|tok| {
                tok.parse::<f64>()
                    .map_err(|_| DetError::format(lineno, format!("bad score token {tok:?}")))
            })
            .collect::<Result<Vec<f64>>>()?;

        // first occurrence wins on duplicate ids
        table.entry(id.to_string()).or_insert(scores);
    }

    debug!("loaded {} score sequences for class {keyword_class}", table.len());
    Ok(table)
}
