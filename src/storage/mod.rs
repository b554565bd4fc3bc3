pub mod csv_backend;

pub use csv_backend::CsvStore;

use crate::errors::LedgerError;
use crate::ledger::Ledger;

/// Trait that abstracts interaction with the persistence layer.
pub trait StorageBackend {
    /// Reads the backing file into a ledger. A missing file is an empty
    /// ledger, not an error; a malformed file is fatal.
    fn load(&self) -> Result<Ledger, LedgerError>;
    /// Rewrites the backing file with the full current sequence.
    fn save(&self, ledger: &Ledger) -> Result<(), LedgerError>;
}
