//! Read-only aggregation over ledger snapshots.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::{Transaction, TransactionType};

/// Pure summary queries over a transaction sequence. Nothing here mutates
/// or re-validates its input; the sequence is assumed to hold already
/// checked data.
pub struct Analytics;

impl Analytics {
    /// Transactions whose category equals `category` ignoring case.
    pub fn filter_by_category(rows: &[Transaction], category: &str) -> Vec<Transaction> {
        rows.iter()
            .filter(|txn| txn.matches_category(category))
            .cloned()
            .collect()
    }

    /// Expense sums grouped by category exactly as stored. Grouping keys
    /// are case-sensitive; callers wanting case-insensitive grouping must
    /// normalize beforehand.
    pub fn category_totals(rows: &[Transaction]) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for txn in rows.iter().filter(|txn| txn.kind.is_expense()) {
            *totals.entry(txn.category.clone()).or_insert(0.0) += txn.amount;
        }
        totals
    }

    /// Income and expense sums over the inclusive `[start, end]` window.
    pub fn period_totals(rows: &[Transaction], start: NaiveDate, end: NaiveDate) -> (f64, f64) {
        let mut income = 0.0;
        let mut expense = 0.0;
        for txn in rows.iter().filter(|txn| txn.date >= start && txn.date <= end) {
            match txn.kind {
                TransactionType::Income => income += txn.amount,
                TransactionType::Expense => expense += txn.amount,
            }
        }
        (income, expense)
    }

    /// Up to `n` expenses ordered by amount descending. The sort is stable,
    /// so ties keep their insertion order.
    pub fn top_expenses(rows: &[Transaction], n: usize) -> Vec<Transaction> {
        let mut expenses: Vec<Transaction> = rows
            .iter()
            .filter(|txn| txn.kind.is_expense())
            .cloned()
            .collect();
        expenses.sort_by(|a, b| b.amount.total_cmp(&a.amount));
        expenses.truncate(n);
        expenses
    }

    /// Total income minus total expense over the whole sequence.
    pub fn balance(rows: &[Transaction]) -> f64 {
        rows.iter()
            .map(|txn| match txn.kind {
                TransactionType::Income => txn.amount,
                TransactionType::Expense => -txn.amount,
            })
            .fold(0.0, |acc, signed| acc + signed)
    }
}
