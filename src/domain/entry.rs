use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::period::Period;

/// Side of the ledger an amount lands on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum EntryDirection {
    Debit,
    Credit,
}

/// Source document backing an entry (pièce comptable).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PieceKind {
    Invoice,
    CreditNote,
    Receipt,
    Transfer,
    Voucher,
    Other,
}

/// One debit or credit line against an account (écriture comptable).
///
/// Entries are append-only once posted. Corrections go through reversal
/// entries; the only field that may change afterwards is `attachment`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Entry {
    pub id: Uuid,
    pub date: NaiveDate,
    pub piece_number: String,
    pub piece_kind: PieceKind,
    pub journal_code: String,
    pub account_code: String,
    pub label: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub period: Period,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    /// Entry this one reverses, when posted as a correction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverses: Option<Uuid>,
}

impl Entry {
    /// The posted amount, regardless of side.
    pub fn amount(&self) -> Decimal {
        if self.debit.is_zero() {
            self.credit
        } else {
            self.debit
        }
    }

    pub fn direction(&self) -> EntryDirection {
        if self.debit.is_zero() {
            EntryDirection::Credit
        } else {
            EntryDirection::Debit
        }
    }
}
