//! Field validation and cleaning for raw transaction input.
//!
//! Validators answer whether a raw string is admissible; cleaners strip
//! characters that must not reach the backing file. [`CheckedTransaction`]
//! runs both in one deterministic pass (clean, then validate), so the value
//! that was validated is exactly the value that gets stored.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::ledger::{Transaction, TransactionType};

/// Maximum comment length, in characters.
pub const MAX_COMMENT_LEN: usize = 100;
/// Canonical textual date form.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// Optionally signed digits with at most one decimal point. No exponent,
// no thousands separators, no currency symbols.
static RE_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[+-]?\d+(\.\d+)?$").unwrap());
static RE_DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
// Latin and Cyrillic letters (including both yo variants) plus whitespace.
static RE_CATEGORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Zа-яА-ЯёЁ\s]+$").unwrap());
static RE_CLEAN_CATEGORY: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());
static RE_CLEAN_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s.,?!]").unwrap());

/// True iff `raw` is a well-formed optionally-signed decimal amount.
pub fn validate_amount(raw: &str) -> bool {
    RE_AMOUNT.is_match(raw)
}

/// True iff `raw` is a `YYYY-MM-DD` date that exists on the calendar.
pub fn validate_date(raw: &str) -> bool {
    RE_DATE_SHAPE.is_match(raw) && NaiveDate::parse_from_str(raw, DATE_FORMAT).is_ok()
}

/// True iff `raw` is non-empty and contains only letters and whitespace.
pub fn validate_category(raw: &str) -> bool {
    RE_CATEGORY.is_match(raw)
}

/// True iff `raw` is at most [`MAX_COMMENT_LEN`] characters.
pub fn validate_comment(raw: &str) -> bool {
    raw.chars().count() <= MAX_COMMENT_LEN
}

/// Strips everything outside alphanumerics, underscore, and whitespace,
/// then trims.
pub fn clean_category(raw: &str) -> String {
    RE_CLEAN_CATEGORY
        .replace_all(raw.trim(), "")
        .trim()
        .to_string()
}

/// Strips everything outside alphanumerics, underscore, whitespace, and
/// `. , ? !`, then trims.
pub fn clean_comment(raw: &str) -> String {
    RE_CLEAN_COMMENT.replace_all(raw, "").trim().to_string()
}

/// Runs every field check in the fixed order amount, type, date, category,
/// comment. Returns one message per failed check; empty iff all pass.
pub fn validate_transaction(
    amount: &str,
    kind: &str,
    date: &str,
    category: &str,
    comment: &str,
) -> Vec<String> {
    let mut errors = Vec::new();
    if !validate_amount(amount) {
        errors.push("invalid amount".to_string());
    }
    if kind.parse::<TransactionType>().is_err() {
        errors.push("transaction type must be Income or Expense".to_string());
    }
    if !validate_date(date) {
        errors.push("invalid date, expected the YYYY-MM-DD format".to_string());
    }
    if !validate_category(category) {
        errors.push("invalid category, only letters and spaces are allowed".to_string());
    }
    if !validate_comment(comment) {
        errors.push("comment is too long (over 100 characters)".to_string());
    }
    errors
}

/// Proof that raw input survived cleaning and validation.
///
/// The fields are private and the only constructor is
/// [`CheckedTransaction::new`], so nothing can reach [`crate::ledger::Ledger::add`]
/// without going through the checks.
#[derive(Debug, Clone)]
pub struct CheckedTransaction {
    amount: f64,
    kind: TransactionType,
    date: NaiveDate,
    category: String,
    comment: String,
}

impl CheckedTransaction {
    /// Cleans category and comment, then validates the cleaned values in
    /// the fixed field order. On failure returns the ordered message list.
    pub fn new(
        amount: &str,
        kind: &str,
        date: &str,
        category: &str,
        comment: &str,
    ) -> Result<Self, Vec<String>> {
        let category = clean_category(category);
        let comment = clean_comment(comment);
        let errors = validate_transaction(amount, kind, date, &category, &comment);
        if !errors.is_empty() {
            return Err(errors);
        }
        // The checks above guarantee these parses succeed.
        let amount = amount
            .parse::<f64>()
            .map_err(|_| vec!["invalid amount".to_string()])?;
        let kind = kind
            .parse::<TransactionType>()
            .map_err(|err| vec![err.to_string()])?;
        let date = NaiveDate::parse_from_str(date, DATE_FORMAT)
            .map_err(|_| vec!["invalid date, expected the YYYY-MM-DD format".to_string()])?;
        Ok(Self {
            amount,
            kind,
            date,
            category,
            comment,
        })
    }

    pub(crate) fn into_transaction(self, seq: u64) -> Transaction {
        Transaction {
            seq,
            amount: self.amount,
            kind: self.kind,
            date: self.date,
            category: self.category,
            comment: self.comment,
        }
    }
}
