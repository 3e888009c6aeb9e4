//! Record types of the accounting core: chart accounts, journals, entries,
//! exercises, balances, treasury transactions, and budget lines.

pub mod account;
pub mod balance;
pub mod entry;
pub mod exercise;
pub mod journal;
pub mod period;
pub mod transaction;

pub use account::{Account, AccountClass, AccountKind};
pub use balance::{Balance, TrialBalance, TrialBalanceLine};
pub use entry::{Entry, EntryDirection, PieceKind};
pub use exercise::Exercise;
pub use journal::{Journal, JournalKind};
pub use period::Period;
pub use transaction::{
    BudgetLine, Transaction, TransactionCategory, TransactionKind, TransactionStatus,
    TreasuryAccount, TreasuryKind,
};
