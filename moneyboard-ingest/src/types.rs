use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How to treat a malformed entry inside an otherwise valid payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IngestMode {
    /// Drop the entry, log it and keep going.
    #[default]
    Lenient,
    /// Fail the whole payload on the first bad entry.
    Strict,
}

/// An entry that did not make it into the typed output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejected {
    /// Position in the payload array.
    pub index: usize,
    pub reason: String,
}

/// Typed records accepted from a payload, plus what was dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestReport<T> {
    pub accepted: Vec<T>,
    pub rejected: Vec<Rejected>,
}

impl<T> IngestReport<T> {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error("expected a JSON array, got {found}")]
    NotAnArray { found: &'static str },

    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
}
