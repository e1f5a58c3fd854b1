//! Crate-wide error type.
//!
//! Every failure mode is fatal: the evaluator either emits a complete,
//! correctly-ordered stats table or aborts with one of these and writes
//! nothing. There is no partial-success path and nothing is retried.

/// Result alias used across the public API.
pub type Result<T> = std::result::Result<T, DetError>;

/// All the ways a DET evaluation can fail.
#[derive(Debug, thiserror::Error)]
pub enum DetError {
    /// Malformed label or score record: missing required field,
    /// unparsable numeric token, truncated line.
    #[error("format error at line {line}: {msg}")]
    Format { line: usize, msg: String },

    /// The label and score sources do not join cleanly on utterance id,
    /// or a derived quantity (filler duration) makes the sweep undefined.
    #[error("integrity error: {0}")]
    Integrity(String),

    /// Invalid sweep parameters, rejected before any file is read.
    #[error("config error: {0}")]
    Config(String),

    /// Source / sink I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DetError {
    /// Shorthand for a [`DetError::Format`] at a 1-based line number.
    pub(crate) fn format(line: usize, msg: impl Into<String>) -> Self {
        Self::Format {
            line,
            msg: msg.into(),
        }
    }
}
