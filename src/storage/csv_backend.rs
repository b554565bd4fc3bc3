use std::fs;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{debug, info};

use crate::errors::LedgerError;
use crate::ledger::{Ledger, Transaction};

use super::StorageBackend;

/// Column set the backing file must carry, in order. Anything else is a
/// fatal load error.
pub const EXPECTED_HEADER: [&str; 5] =
    ["Amount", "Transaction_Type", "Date", "Category", "Comment"];

const TMP_SUFFIX: &str = "tmp";

/// CSV-backed persistence: load the whole file, mutate in memory, overwrite
/// the whole file. There is no locking; concurrent external writers to the
/// same file are unsupported.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}

impl StorageBackend for CsvStore {
    fn load(&self) -> Result<Ledger, LedgerError> {
        if !self.path.exists() {
            // Make sure a later save can land.
            self.ensure_parent()
                .map_err(|err| LedgerError::Load(err.to_string()))?;
            info!(path = %self.path.display(), "ledger file absent, starting empty");
            return Ok(Ledger::new());
        }

        let mut reader = ReaderBuilder::new()
            .from_path(&self.path)
            .map_err(|err| LedgerError::Load(err.to_string()))?;
        let headers = reader
            .headers()
            .map_err(|err| LedgerError::Load(err.to_string()))?;
        if headers.iter().ne(EXPECTED_HEADER.iter().copied()) {
            return Err(LedgerError::Load(format!(
                "unexpected column set `{}`, expected `{}`",
                headers.iter().collect::<Vec<_>>().join(","),
                EXPECTED_HEADER.join(","),
            )));
        }

        let mut rows = Vec::new();
        for result in reader.deserialize::<Transaction>() {
            let row = result.map_err(|err| LedgerError::Load(err.to_string()))?;
            rows.push(row);
        }
        debug!(path = %self.path.display(), rows = rows.len(), "ledger file loaded");
        Ok(Ledger::from_rows(rows))
    }

    fn save(&self, ledger: &Ledger) -> Result<(), LedgerError> {
        self.ensure_parent()
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;

        // Write a temporary sibling first, then rename over the target, so
        // a failed mid-write never corrupts the existing file.
        let tmp = tmp_path(&self.path);
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&tmp)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        writer
            .write_record(EXPECTED_HEADER)
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        for txn in ledger.rows() {
            writer
                .serialize(txn)
                .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        }
        writer
            .flush()
            .map_err(|err| LedgerError::Persistence(err.to_string()))?;
        drop(writer);
        fs::rename(&tmp, &self.path).map_err(|err| LedgerError::Persistence(err.to_string()))?;

        info!(path = %self.path.display(), rows = ledger.len(), "ledger saved");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
