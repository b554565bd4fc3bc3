use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::analytics::Analytics;
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Transaction};
use crate::storage::StorageBackend;
use crate::validation::CheckedTransaction;

/// Facade that coordinates validation, the in-memory ledger, and
/// persistence. External callers mutate only through here; the lower
/// layers deliberately do not re-validate.
///
/// The ledger is Clean when memory matches the backing file and Dirty
/// after a mutation whose save has not yet been confirmed. Every mutation
/// attempts to return to Clean before handing control back.
pub struct LedgerManager {
    ledger: Ledger,
    storage: Box<dyn StorageBackend>,
    dirty: bool,
}

impl LedgerManager {
    /// Loads the backing file, or starts empty when it is absent. A
    /// malformed file is fatal here; there is no partial recovery.
    pub fn open(storage: Box<dyn StorageBackend>) -> Result<Self, LedgerError> {
        let ledger = storage.load()?;
        Ok(Self {
            ledger,
            storage,
            dirty: false,
        })
    }

    /// Validates raw field input, appends the transaction, and persists.
    /// Returns the new transaction's stable sequence number.
    ///
    /// On validation failure nothing is mutated. On a save failure the
    /// append stays applied in memory and the ledger remains dirty; the
    /// correct recovery is [`LedgerManager::save`], not a second add.
    pub fn add_transaction(
        &mut self,
        amount: &str,
        kind: &str,
        date: &str,
        category: &str,
        comment: &str,
    ) -> Result<u64, LedgerError> {
        let checked = CheckedTransaction::new(amount, kind, date, category, comment)
            .map_err(LedgerError::Validation)?;
        let seq = self.ledger.add(checked);
        self.dirty = true;
        self.persist()?;
        info!(seq, "transaction recorded");
        Ok(seq)
    }

    /// Deletes the transaction at `index` and persists. Positions after
    /// `index` shift down by one; sequence numbers are unaffected.
    pub fn delete_transaction(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        let removed = self.ledger.delete(index)?;
        self.dirty = true;
        self.persist()?;
        info!(index, seq = removed.seq, "transaction deleted");
        Ok(removed)
    }

    /// Rewrites the backing file with the current sequence. This is the
    /// retry path that returns a dirty ledger to Clean.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        self.persist()
    }

    /// Whether in-memory state has diverged from the backing file.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Defensive copy of all transactions in insertion order.
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        self.ledger.snapshot()
    }

    /// Total income minus total expense.
    pub fn balance(&self) -> f64 {
        Analytics::balance(self.ledger.rows())
    }

    /// Transactions matching `category`, ignoring case.
    pub fn filter_by_category(&self, category: &str) -> Vec<Transaction> {
        Analytics::filter_by_category(self.ledger.rows(), category)
    }

    /// Per-category expense sums, keyed by category as stored.
    pub fn category_totals(&self) -> BTreeMap<String, f64> {
        Analytics::category_totals(self.ledger.rows())
    }

    /// Income and expense sums over the inclusive `[start, end]` window.
    pub fn period_totals(&self, start: NaiveDate, end: NaiveDate) -> (f64, f64) {
        Analytics::period_totals(self.ledger.rows(), start, end)
    }

    /// Up to `n` largest expenses, ties in insertion order.
    pub fn top_expenses(&self, n: usize) -> Vec<Transaction> {
        Analytics::top_expenses(self.ledger.rows(), n)
    }

    /// Clears every transaction in memory without touching the file. The
    /// ledger is dirty afterwards; call [`LedgerManager::save`] to persist
    /// the empty sequence.
    pub fn clear(&mut self) {
        self.ledger.reset();
        self.dirty = true;
    }

    fn persist(&mut self) -> Result<(), LedgerError> {
        match self.storage.save(&self.ledger) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(err) => {
                warn!(%err, "save failed, in-memory state diverges from disk");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CsvStore;
    use tempfile::tempdir;

    fn manager_in(dir: &std::path::Path) -> LedgerManager {
        let store = CsvStore::new(dir.join("transactions.csv"));
        LedgerManager::open(Box::new(store)).expect("open ledger")
    }

    #[test]
    fn add_validates_before_mutating() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());

        let err = manager
            .add_transaction("12,000", "Income", "2026-01-01", "Salary", "")
            .expect_err("thousands separators are rejected");
        match err {
            LedgerError::Validation(messages) => {
                assert_eq!(messages, vec!["invalid amount".to_string()]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(manager.is_empty(), "rejected input must not mutate");
        assert!(!manager.is_dirty());
    }

    #[test]
    fn add_persists_and_reports_clean() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());

        manager
            .add_transaction("250", "income", "2026-01-01", "Salary", "advance")
            .expect("valid add");
        assert_eq!(manager.len(), 1);
        assert_eq!(manager.balance(), 250.0);
        assert!(!manager.is_dirty());

        // A fresh manager over the same file sees the persisted row.
        let reopened = manager_in(temp.path());
        assert_eq!(reopened.len(), 1);
        assert_eq!(reopened.get_all_transactions()[0].kind.to_string(), "Income");
    }

    #[test]
    fn delete_propagates_out_of_range() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        let err = manager.delete_transaction(0).expect_err("empty ledger");
        assert!(matches!(err, LedgerError::IndexOutOfRange { .. }));
    }

    #[test]
    fn clear_marks_the_ledger_dirty() {
        let temp = tempdir().unwrap();
        let mut manager = manager_in(temp.path());
        manager
            .add_transaction("10", "Expense", "2026-01-01", "Food", "")
            .expect("valid add");
        manager.clear();
        assert!(manager.is_empty());
        assert!(manager.is_dirty());
        manager.save().expect("persist the empty sequence");
        assert!(!manager.is_dirty());
    }
}
