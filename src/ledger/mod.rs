//! The `GeneralLedger` aggregate: the single owner of all accounting state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    Account, Balance, BudgetLine, Entry, Exercise, Journal, Period, Transaction, TransactionCategory,
    TreasuryAccount,
};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Root aggregate holding the chart of accounts, journals, exercises, the
/// append-only entry stream, treasury transactions, budget lines, and the
/// balances frozen at exercise close.
///
/// Services mutate the ledger through `&mut` access, so every operation is
/// single-writer and all-or-nothing: validation happens before the first
/// field is touched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralLedger {
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub journals: Vec<Journal>,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
    #[serde(default)]
    pub entries: Vec<Entry>,
    #[serde(default)]
    pub treasury_accounts: Vec<TreasuryAccount>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub budget_lines: Vec<BudgetLine>,
    /// Balances frozen by exercise close, keyed by their own fields.
    #[serde(default)]
    pub frozen_balances: Vec<Balance>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "GeneralLedger::schema_version_default")]
    pub schema_version: u8,
}

impl GeneralLedger {
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            currency: currency.into(),
            accounts: Vec::new(),
            journals: Vec::new(),
            exercises: Vec::new(),
            entries: Vec::new(),
            treasury_accounts: Vec::new(),
            transactions: Vec::new(),
            budget_lines: Vec::new(),
            frozen_balances: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn account(&self, code: &str) -> Option<&Account> {
        self.accounts.iter().find(|account| account.code == code)
    }

    pub fn account_mut(&mut self, code: &str) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.code == code)
    }

    pub fn journal(&self, code: &str) -> Option<&Journal> {
        self.journals.iter().find(|journal| journal.code == code)
    }

    pub fn exercise(&self, year: i32) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.year == year)
    }

    pub fn exercise_mut(&mut self, year: i32) -> Option<&mut Exercise> {
        self.exercises
            .iter_mut()
            .find(|exercise| exercise.year == year)
    }

    /// The exercise whose date range contains the period's first day.
    pub fn exercise_covering(&self, period: Period) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|exercise| exercise.covers(period))
    }

    pub fn entry(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn entry_mut(&mut self, id: Uuid) -> Option<&mut Entry> {
        self.entries.iter_mut().find(|entry| entry.id == id)
    }

    pub fn treasury_account(&self, number: &str) -> Option<&TreasuryAccount> {
        self.treasury_accounts
            .iter()
            .find(|account| account.number == number)
    }

    pub fn treasury_account_mut(&mut self, number: &str) -> Option<&mut TreasuryAccount> {
        self.treasury_accounts
            .iter_mut()
            .find(|account| account.number == number)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions
            .iter()
            .find(|transaction| transaction.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions
            .iter_mut()
            .find(|transaction| transaction.id == id)
    }

    pub fn budget_line_mut(
        &mut self,
        year: i32,
        month: u32,
        category: TransactionCategory,
    ) -> Option<&mut BudgetLine> {
        self.budget_lines.iter_mut().find(|line| {
            line.year == year && line.month == month && line.category == category
        })
    }

    /// Entries posted against the given account, any period.
    pub fn entries_for_account<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(move |entry| entry.account_code == code)
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
