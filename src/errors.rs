use thiserror::Error;

/// Error type that captures common ledger failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// One or more field checks failed on a write path. Carries the ordered
    /// human-readable reasons; no mutation has occurred.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// A delete referenced a position outside `[0, len)`.
    #[error("index {index} out of range for ledger of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    /// The backing file exists but its schema or rows cannot be parsed.
    /// Fatal at startup; there is no partial recovery.
    #[error("cannot load ledger file: {0}")]
    Load(String),
    /// The backing file could not be written. The in-memory mutation is
    /// already applied, so the ledger stays dirty until a save succeeds.
    #[error("cannot persist ledger file: {0}")]
    Persistence(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
