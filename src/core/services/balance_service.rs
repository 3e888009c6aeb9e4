//! Balance aggregation: a pure, recomputable view of the entry stream.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::domain::{Balance, Period, TrialBalance, TrialBalanceLine};
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// Recomputes [`Balance`] rows from the entry stream.
///
/// The aggregator is a pure function of the entries: running it twice over an
/// unchanged ledger yields identical rows, and a full recomputation matches
/// what incremental recomputation after each post would have produced.
pub struct BalanceService;

impl BalanceService {
    /// Computes the balance rows of one exercise, every account touched in
    /// the year, periods in chronological order.
    ///
    /// Each period's opening chains from the previous computed period's
    /// cumulative; the first period of the exercise opens at zero.
    pub fn compute_balances(ledger: &GeneralLedger, year: i32) -> Result<Vec<Balance>> {
        let exercise = ledger
            .exercise(year)
            .ok_or_else(|| LedgerError::NotFound(format!("exercise {}", year)))?;

        // (account, period) -> (movement_debit, movement_credit), ordered on
        // both keys so rows come out sorted and openings chain correctly.
        let mut movements: BTreeMap<String, BTreeMap<Period, (Decimal, Decimal)>> = BTreeMap::new();
        for entry in &ledger.entries {
            if !exercise.covers(entry.period) {
                continue;
            }
            let per_period = movements.entry(entry.account_code.clone()).or_default();
            let (debit, credit) = per_period.entry(entry.period).or_default();
            *debit += entry.debit;
            *credit += entry.credit;
        }

        let mut balances = Vec::new();
        for (account_code, per_period) in movements {
            let mut opening_debit = Decimal::ZERO;
            let mut opening_credit = Decimal::ZERO;
            for (period, (movement_debit, movement_credit)) in per_period {
                let row = Balance::from_parts(
                    year,
                    account_code.clone(),
                    period,
                    opening_debit,
                    opening_credit,
                    movement_debit,
                    movement_credit,
                );
                opening_debit = row.cumulative_debit;
                opening_credit = row.cumulative_credit;
                balances.push(row);
            }
        }
        Ok(balances)
    }

    /// The balance row of one (account, period) within an exercise, if the
    /// account moved in that period.
    pub fn balance_for(
        ledger: &GeneralLedger,
        year: i32,
        account_code: &str,
        period: Period,
    ) -> Result<Option<Balance>> {
        let balances = Self::compute_balances(ledger, year)?;
        Ok(balances
            .into_iter()
            .find(|row| row.account_code == account_code && row.period == period))
    }

    /// Net debit-minus-credit position of an account across all entries.
    pub fn account_net(ledger: &GeneralLedger, account_code: &str) -> Decimal {
        ledger
            .entries_for_account(account_code)
            .map(|entry| entry.debit - entry.credit)
            .sum()
    }

    /// Per-account totals over an exercise with the balanced-books check.
    pub fn trial_balance(ledger: &GeneralLedger, year: i32) -> Result<TrialBalance> {
        let exercise = ledger
            .exercise(year)
            .ok_or_else(|| LedgerError::NotFound(format!("exercise {}", year)))?;

        let mut totals: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();
        for entry in &ledger.entries {
            if !exercise.covers(entry.period) {
                continue;
            }
            let (debit, credit) = totals.entry(entry.account_code.clone()).or_default();
            *debit += entry.debit;
            *credit += entry.credit;
        }

        let mut total_debit = Decimal::ZERO;
        let mut total_credit = Decimal::ZERO;
        let lines = totals
            .into_iter()
            .map(|(account_code, (debit, credit))| {
                total_debit += debit;
                total_credit += credit;
                let account_name = ledger
                    .account(&account_code)
                    .map(|account| account.name.clone())
                    .unwrap_or_default();
                TrialBalanceLine {
                    account_code,
                    account_name,
                    total_debit: debit,
                    total_credit: credit,
                }
            })
            .collect();
        Ok(TrialBalance {
            exercise_year: year,
            lines,
            total_debit,
            total_credit,
            is_balanced: total_debit == total_credit,
        })
    }
}
