pub mod ledger;
pub mod transaction;

pub use ledger::Ledger;
pub use transaction::{Transaction, TransactionType, UnknownTransactionType};
