use std::path::PathBuf;

use ledger_core::core::LedgerManager;
use ledger_core::storage::CsvStore;
use tempfile::TempDir;

/// A manager backed by a CSV file inside a fresh temp directory. Keep the
/// guard alive for the duration of the test.
pub fn temp_manager() -> (LedgerManager, PathBuf, TempDir) {
    let temp = TempDir::new().expect("temp dir");
    let path = temp.path().join("transactions.csv");
    let manager = LedgerManager::open(Box::new(CsvStore::new(path.clone()))).expect("open ledger");
    (manager, path, temp)
}

pub fn reopen(path: &std::path::Path) -> LedgerManager {
    LedgerManager::open(Box::new(CsvStore::new(path.to_path_buf()))).expect("reopen ledger")
}

#[allow(dead_code)]
pub fn add(manager: &mut LedgerManager, amount: &str, kind: &str, date: &str, category: &str) {
    manager
        .add_transaction(amount, kind, date, category, "")
        .expect("add transaction");
}
