use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Treasury account classifications (comptes financiers).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TreasuryKind {
    Bank,
    Cash,
    Savings,
    Credit,
}

/// A bank, cash, or savings account money actually moves through.
///
/// Distinct from chart accounts: each treasury account is mirrored in the
/// ledger by a class 5 chart account named by `linked_account_code`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreasuryAccount {
    pub number: String,
    pub name: String,
    pub kind: TreasuryKind,
    pub currency: String,
    pub balance: Decimal,
    pub linked_account_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swift: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
    Transfer,
    Adjustment,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TransactionCategory {
    ProductSales,
    InputPurchases,
    Salaries,
    Maintenance,
    Transport,
    Services,
    Taxes,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Validated,
    Rejected,
    Cancelled,
}

/// A financial movement between treasury accounts, or to/from the outside
/// world when one side is `None`.
///
/// Transactions are created pending and generate their balanced ledger entry
/// pair when validated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: Decimal,
    pub currency: String,
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supporting_document: Option<String>,
}

impl Transaction {
    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }
}

/// Planned versus realized spend for one (year, month, category) cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetLine {
    pub year: i32,
    pub month: u32,
    pub category: TransactionCategory,
    pub planned: Decimal,
    pub realized: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
