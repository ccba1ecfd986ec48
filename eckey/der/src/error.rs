use thiserror::Error;

/**
    Structural DER violations.

    Every variant carries the byte offset (from the start of the buffer
    handed to the reader) where the problem was detected, so a malformed
    key can be diagnosed without extra instrumentation.
*/
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerError {
    // ── Header ─────────────────────────────────────────────────────────
    #[error("unsupported tag 0x{tag:02x} at offset {offset}")]
    UnsupportedTag { offset: usize, tag: u8 },
    #[error("buffer overrun at offset {offset}: need {needed} byte(s), {available} available")]
    BufferOverrun {
        offset: usize,
        needed: usize,
        available: usize,
    },

    // ── Length ─────────────────────────────────────────────────────────
    #[error(
        "truncated value at offset {offset}: length declares {declared} byte(s), {available} available"
    )]
    TruncatedLength {
        offset: usize,
        declared: usize,
        available: usize,
    },
    #[error("invalid length encoding at offset {offset}: {reason}")]
    InvalidLength { offset: usize, reason: &'static str },

    // ── Structure ──────────────────────────────────────────────────────
    #[error(
        "malformed sequence at offset {offset}: child ends at {child_end}, parent ends at {parent_end}"
    )]
    MalformedSequence {
        offset: usize,
        child_end: usize,
        parent_end: usize,
    },
    #[error("nesting deeper than {max} levels at offset {offset}")]
    NestingTooDeep { offset: usize, max: usize },
    #[error("{trailing} trailing byte(s) after top-level value ending at offset {offset}")]
    TrailingData { offset: usize, trailing: usize },

    // ── Values ─────────────────────────────────────────────────────────
    #[error("invalid object identifier at offset {offset}: {reason}")]
    InvalidObjectIdentifier { offset: usize, reason: &'static str },
    #[error("invalid NULL at offset {offset}: content length {len}, expected 0")]
    InvalidNull { offset: usize, len: usize },
}

/**
    Type alias for results that may return a [`DerError`].
*/
pub type DerResult<T> = std::result::Result<T, DerError>;
