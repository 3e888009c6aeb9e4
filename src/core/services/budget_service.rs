//! Planned-versus-realized budget tracking per category and month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BudgetLine, TransactionCategory};
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// One category's planned/realized position in a monthly report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetReportLine {
    pub category: TransactionCategory,
    pub planned: Decimal,
    pub realized: Decimal,
    pub remaining: Decimal,
    pub variance: Decimal,
}

impl BudgetReportLine {
    fn from_line(line: &BudgetLine) -> Self {
        Self {
            category: line.category,
            planned: line.planned,
            realized: line.realized,
            remaining: line.planned - line.realized,
            variance: line.realized - line.planned,
        }
    }
}

/// Maintains [`BudgetLine`] cells. Planned amounts are set by hand; realized
/// amounts accumulate from validated transactions.
pub struct BudgetService;

impl BudgetService {
    /// Sets (or replaces) the planned amount of one (year, month, category)
    /// cell, creating it on first use.
    pub fn set_budget(
        ledger: &mut GeneralLedger,
        year: i32,
        month: u32,
        category: TransactionCategory,
        planned: Decimal,
    ) -> Result<()> {
        if !(1..=12).contains(&month) {
            return Err(LedgerError::Validation(format!(
                "month {} is out of range 1-12",
                month
            )));
        }
        if planned < Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "planned amount must not be negative, got {}",
                planned
            )));
        }
        match ledger.budget_line_mut(year, month, category) {
            Some(line) => line.planned = planned,
            None => ledger.budget_lines.push(BudgetLine {
                year,
                month,
                category,
                planned,
                realized: Decimal::ZERO,
                notes: None,
            }),
        }
        ledger.touch();
        Ok(())
    }

    /// Accumulates a validated transaction amount into its budget cell,
    /// creating an unplanned cell when none exists yet.
    pub(crate) fn record_realized(
        ledger: &mut GeneralLedger,
        year: i32,
        month: u32,
        category: TransactionCategory,
        amount: Decimal,
    ) {
        match ledger.budget_line_mut(year, month, category) {
            Some(line) => line.realized += amount,
            None => ledger.budget_lines.push(BudgetLine {
                year,
                month,
                category,
                planned: Decimal::ZERO,
                realized: amount,
                notes: None,
            }),
        }
    }

    /// Snapshot of every category tracked for one month.
    pub fn budget_report(ledger: &GeneralLedger, year: i32, month: u32) -> Vec<BudgetReportLine> {
        ledger
            .budget_lines
            .iter()
            .filter(|line| line.year == year && line.month == month)
            .map(BudgetReportLine::from_line)
            .collect()
    }
}
