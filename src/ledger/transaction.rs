use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One recorded monetary event.
///
/// The serde renames pin the exact column set of the backing CSV file:
/// `Amount,Transaction_Type,Date,Category,Comment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Stable surrogate key, assigned monotonically by the store at
    /// insertion. Never persisted (the file schema is positional) and
    /// reassigned in file order on load.
    #[serde(skip)]
    pub seq: u64,
    #[serde(rename = "Amount")]
    pub amount: f64,
    #[serde(rename = "Transaction_Type")]
    pub kind: TransactionType,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Comment")]
    pub comment: String,
}

impl Transaction {
    /// Category with its first letter uppercased, for display.
    pub fn category_display(&self) -> String {
        let mut chars = self.category.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }

    /// Case-insensitive exact category match.
    pub fn matches_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Closed set of transaction kinds. Parsing is case-insensitive; display
/// and serialization use this exact casing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn is_income(self) -> bool {
        matches!(self, TransactionType::Income)
    }

    pub fn is_expense(self) -> bool {
        matches!(self, TransactionType::Expense)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown transaction type `{0}`")]
pub struct UnknownTransactionType(pub String);

impl FromStr for TransactionType {
    type Err = UnknownTransactionType;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(UnknownTransactionType(raw.to_string())),
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "Income"),
            TransactionType::Expense => write!(f, "Expense"),
        }
    }
}
