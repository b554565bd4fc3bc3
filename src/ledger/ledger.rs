use crate::errors::LedgerError;
use crate::validation::CheckedTransaction;

use super::Transaction;

/// The in-memory transaction table: an ordered sequence addressed by
/// 0-based position (insertion order). The ledger is the single source of
/// truth; persistence belongs to the storage backend and validation to the
/// facade, which is the only place a [`CheckedTransaction`] can come from.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_seq: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from already-persisted rows, assigning fresh
    /// sequence numbers in file order.
    pub(crate) fn from_rows(rows: Vec<Transaction>) -> Self {
        let mut ledger = Ledger::new();
        for mut row in rows {
            row.seq = ledger.next_seq;
            ledger.next_seq += 1;
            ledger.transactions.push(row);
        }
        ledger
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Defensive copy of the full sequence; callers may mutate or discard
    /// it freely without affecting the ledger.
    pub fn snapshot(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub(crate) fn rows(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Appends a validated transaction and returns its sequence number.
    /// Does not persist.
    pub fn add(&mut self, checked: CheckedTransaction) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.transactions.push(checked.into_transaction(seq));
        seq
    }

    /// Removes and returns the transaction at `index`. Every later
    /// transaction shifts one position down. Does not persist.
    pub fn delete(&mut self, index: usize) -> Result<Transaction, LedgerError> {
        if index >= self.transactions.len() {
            return Err(LedgerError::IndexOutOfRange {
                index,
                len: self.transactions.len(),
            });
        }
        Ok(self.transactions.remove(index))
    }

    /// Current position of the transaction carrying `seq`, if it still
    /// exists. Positions are a derived view; sequence numbers are stable.
    pub fn position_of(&self, seq: u64) -> Option<usize> {
        self.transactions.iter().position(|txn| txn.seq == seq)
    }

    /// Drops every transaction, in memory only. Sequence numbers are never
    /// reused.
    pub fn reset(&mut self) {
        self.transactions.clear();
    }
}
