//! Ground-truth label loading and keyword/filler partitioning.
//!
//! Labels arrive as newline-delimited JSON, one object per utterance:
//!
//! ```text
//! {"key": "utt_001", "txt": 0, "duration": 1.42}
//! ```
//!
//! `txt` is the transcript label. Keyword-spotting test sets encode it as the
//! keyword class index; some exports stringify the number, so both encodings
//! are accepted. An utterance whose label matches the requested class is a
//! *keyword* sample, everything else is *filler*.
//!
//! The partition joins against an already-loaded [`ScoreTable`] and is strict
//! about it: every label must have scores and every score sequence must be
//! claimed by a label, otherwise the sweep would silently run on a partial
//! join and the rates would be meaningless.

use std::collections::{HashMap, HashSet};
use std::io::BufRead;

use log::debug;
use serde::Deserialize;

use crate::error::{DetError, Result};
use crate::score::ScoreTable;

/// One ground-truth record from the label file.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelRecord {
    /// Utterance id, the join key against the score table.
    pub key: String,
    /// Transcript label, matched against the keyword class.
    pub txt: LabelText,
    /// Utterance duration in seconds.
    pub duration: f64,
}

/// Transcript label: keyword class index, numeric or stringified.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LabelText {
    /// The usual encoding: the class index as a JSON number.
    Index(i64),
    /// Stringified class index (or a free transcript, which never matches).
    Text(String),
}

impl LabelText {
    /// Does this label name the given keyword class?
    pub fn matches(&self, keyword_class: u32) -> bool {
        match self {
            Self::Index(i) => *i == i64::from(keyword_class),
            Self::Text(s) => s.parse::<i64>() == Ok(i64::from(keyword_class)),
        }
    }
}

/// Result of joining labels against scores.
#[derive(Debug, Clone)]
pub struct Partition {
    /// Keyword utterances, reduced to their peak score. A positive sample is
    /// detected iff its peak crosses the threshold, so the full sequence is
    /// not needed for reject counting.
    pub keyword: HashMap<String, f64>,
    /// Filler utterances with their full score sequences; every spurious
    /// crossing in a filler sequence is a potential alarm.
    pub filler: ScoreTable,
    /// Summed duration of all filler utterances, in seconds.
    pub filler_duration: f64,
}

/// Read labels from `reader` and partition the score table's utterances into
/// keyword and filler sets.
///
/// Fails with [`DetError::Integrity`] if a label has no score entry or a
/// score entry is never claimed by any label; fails with
/// [`DetError::Format`] on malformed JSON or a negative duration.
pub fn partition<R: BufRead>(
    reader: R,
    keyword_class: u32,
    scores: &ScoreTable,
) -> Result<Partition> {
    let mut keyword = HashMap::new();
    let mut filler = ScoreTable::new();
    let mut filler_duration = 0.0f64;
    let mut claimed: HashSet<String> = HashSet::with_capacity(scores.len());

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let lineno = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let record: LabelRecord = serde_json::from_str(&line)
            .map_err(|e| DetError::format(lineno, e.to_string()))?;
        if record.duration < 0.0 {
            return Err(DetError::format(
                lineno,
                format!("negative duration {} for {:?}", record.duration, record.key),
            ));
        }

        let Some(seq) = scores.get(&record.key) else {
            return Err(DetError::Integrity(format!(
                "label {:?} has no score entry",
                record.key
            )));
        };

        if record.txt.matches(keyword_class) {
            keyword.insert(record.key.clone(), peak(seq));
        } else {
            filler.insert(record.key.clone(), seq.clone());
            filler_duration += record.duration;
        }
        claimed.insert(record.key);
    }

    if claimed.len() != scores.len() {
        // name one offender so the broken file is diagnosable
        let orphan = scores
            .keys()
            .find(|k| !claimed.contains(*k))
            .map(String::as_str)
            .unwrap_or("?");
        return Err(DetError::Integrity(format!(
            "score entry {orphan:?} (and possibly others) missing from label file"
        )));
    }

    debug!(
        "partitioned {} keyword / {} filler utterances, {:.1} s filler audio",
        keyword.len(),
        filler.len(),
        filler_duration
    );
    Ok(Partition {
        keyword,
        filler,
        filler_duration,
    })
}

/// Peak of a score sequence. An empty sequence peaks at `-inf`, i.e. it can
/// never cross a threshold.
fn peak(seq: &[f64]) -> f64 {
    seq.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}
