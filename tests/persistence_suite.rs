mod common;

use std::fs;
use std::path::Path;

use common::{add, reopen, temp_manager};
use ledger_core::errors::LedgerError;
use ledger_core::ledger::Ledger;
use ledger_core::storage::{csv_backend::EXPECTED_HEADER, CsvStore, StorageBackend};
use tempfile::tempdir;

fn tmp_path_for(path: &Path) -> std::path::PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.tmp", existing),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}

#[test]
fn roundtrip_preserves_every_field() {
    let (mut manager, path, _guard) = temp_manager();
    manager
        .add_transaction("1500.25", "income", "2026-01-01", "Зарплата", "аванс за январь")
        .expect("valid add");
    manager
        .add_transaction("-12.5", "Expense", "2026-01-15", "Refunds", "returned item!")
        .expect("valid add");

    let saved = manager.get_all_transactions();
    let reopened = reopen(&path);
    assert_eq!(reopened.get_all_transactions(), saved);
}

#[test]
fn file_carries_the_canonical_header_and_canonical_casing() {
    let (mut manager, path, _guard) = temp_manager();
    add(&mut manager, "10", "iNcOmE", "2026-01-01", "Pay");

    let contents = fs::read_to_string(&path).expect("read backing file");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some(EXPECTED_HEADER.join(",").as_str()));
    let row = lines.next().expect("one data row");
    assert!(row.contains("Income"), "type is canonicalized: {row}");
    assert!(row.contains("2026-01-01"), "date is canonical: {row}");
}

#[test]
fn extra_column_is_a_fatal_load_error() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("transactions.csv");
    fs::write(
        &path,
        "Amount,Transaction_Type,Date,Category,Comment,Extra\n1,Income,2026-01-01,Pay,,x\n",
    )
    .expect("write file");

    let err = CsvStore::new(path).load().expect_err("schema mismatch");
    assert!(matches!(err, LedgerError::Load(_)), "got {err:?}");
}

#[test]
fn atomic_save_failure_preserves_original_file() {
    let (mut manager, path, _guard) = temp_manager();
    add(&mut manager, "42", "Income", "2026-01-01", "Pay");
    let original = fs::read_to_string(&path).expect("read original file");

    // Create a directory that collides with the temp file name to force the
    // writer to fail before the rename.
    let tmp_path = tmp_path_for(&path);
    fs::create_dir_all(&tmp_path).expect("block temp path");

    let result = manager.add_transaction("99", "Expense", "2026-01-02", "Food", "");
    assert!(
        result.is_err(),
        "expected save to fail when the temp path is a directory"
    );
    assert!(manager.is_dirty());

    let current = fs::read_to_string(&path).expect("read after failure");
    assert_eq!(
        current, original,
        "a failed save must not corrupt the existing file"
    );

    let _ = fs::remove_dir_all(&tmp_path);
}

#[test]
fn save_replaces_the_whole_file_on_every_mutation() {
    let (mut manager, path, _guard) = temp_manager();
    add(&mut manager, "10", "Income", "2026-01-01", "One");
    add(&mut manager, "20", "Income", "2026-01-02", "Two");
    manager.delete_transaction(0).expect("in range");

    let contents = fs::read_to_string(&path).expect("read backing file");
    let data_rows: Vec<&str> = contents.lines().skip(1).filter(|l| !l.is_empty()).collect();
    assert_eq!(data_rows.len(), 1);
    assert!(data_rows[0].contains("Two"));
}

#[test]
fn storage_backend_loads_rows_in_file_order() {
    let temp = tempdir().expect("temp dir");
    let path = temp.path().join("transactions.csv");
    fs::write(
        &path,
        "Amount,Transaction_Type,Date,Category,Comment\n\
         100.0,Income,2026-01-01,Salary,\n\
         25.5,Expense,2026-01-02,Food,lunch\n",
    )
    .expect("write file");

    let ledger: Ledger = CsvStore::new(path).load().expect("load ledger");
    let rows = ledger.snapshot();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Salary");
    assert_eq!(rows[0].seq, 0);
    assert_eq!(rows[1].category, "Food");
    assert_eq!(rows[1].seq, 1);
    assert_eq!(rows[1].comment, "lunch");
}
