//! Posting and reversing journal entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Entry, EntryDirection, Period, PieceKind};
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// Appends entries to the ledger under double-entry discipline.
///
/// Exactly one side of an entry carries an amount; callers state the side via
/// [`EntryDirection`], so an entry with both sides set cannot be built.
pub struct EntryService;

impl EntryService {
    /// Posts a single debit or credit line.
    ///
    /// The journal and account must exist and be active, the amount must be
    /// strictly positive, and the exercise covering `period` must be open.
    /// Validation completes before the ledger is touched, so a failed post
    /// leaves no trace.
    #[allow(clippy::too_many_arguments)]
    pub fn post_entry(
        ledger: &mut GeneralLedger,
        journal_code: &str,
        account_code: &str,
        date: NaiveDate,
        amount: Decimal,
        direction: EntryDirection,
        period: Period,
        piece_kind: PieceKind,
        piece_number: impl Into<String>,
        label: impl Into<String>,
    ) -> Result<Entry> {
        Self::check_postable(ledger, journal_code, account_code, amount, period)?;
        let entry = Self::build_entry(
            journal_code,
            account_code,
            date,
            amount,
            direction,
            period,
            piece_kind,
            piece_number.into(),
            label.into(),
            None,
            None,
        );
        ledger.entries.push(entry.clone());
        ledger.touch();
        tracing::info!(
            journal = journal_code,
            account = account_code,
            %amount,
            period = %period,
            "entry posted"
        );
        Ok(entry)
    }

    /// Posts the correction of an earlier entry into its own period.
    ///
    /// The original is never mutated or deleted; the reversal carries the
    /// same amount on the opposite side and links back to it, so the pair
    /// nets to zero in the account's balance.
    pub fn reverse_entry(ledger: &mut GeneralLedger, entry_id: Uuid) -> Result<Entry> {
        let original = ledger
            .entry(entry_id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry {}", entry_id)))?
            .clone();
        Self::reverse_into(ledger, original, None)
    }

    /// Posts the correction of an earlier entry into a different, open
    /// period. Used when the original period has since been closed: history
    /// stays immutable and the correction lands in the current period.
    pub fn reverse_entry_into(
        ledger: &mut GeneralLedger,
        entry_id: Uuid,
        period: Period,
    ) -> Result<Entry> {
        let original = ledger
            .entry(entry_id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry {}", entry_id)))?
            .clone();
        Self::reverse_into(ledger, original, Some(period))
    }

    /// Attaches or replaces the supporting-document path of a posted entry.
    /// The single permitted post-hoc mutation.
    pub fn attach_document(
        ledger: &mut GeneralLedger,
        entry_id: Uuid,
        path: impl Into<String>,
    ) -> Result<()> {
        let entry = ledger
            .entry_mut(entry_id)
            .ok_or_else(|| LedgerError::NotFound(format!("entry {}", entry_id)))?;
        entry.attachment = Some(path.into());
        ledger.touch();
        Ok(())
    }

    fn reverse_into(
        ledger: &mut GeneralLedger,
        original: Entry,
        target: Option<Period>,
    ) -> Result<Entry> {
        let period = target.unwrap_or(original.period);
        let reversed_direction = match original.direction() {
            EntryDirection::Debit => EntryDirection::Credit,
            EntryDirection::Credit => EntryDirection::Debit,
        };
        Self::check_postable(
            ledger,
            &original.journal_code,
            &original.account_code,
            original.amount(),
            period,
        )?;
        let entry = Self::build_entry(
            &original.journal_code,
            &original.account_code,
            period.first_day(),
            original.amount(),
            reversed_direction,
            period,
            original.piece_kind,
            original.piece_number.clone(),
            format!("Extourne: {}", original.label),
            original.transaction_id,
            Some(original.id),
        );
        ledger.entries.push(entry.clone());
        ledger.touch();
        tracing::info!(original = %original.id, reversal = %entry.id, "entry reversed");
        Ok(entry)
    }

    fn check_postable(
        ledger: &GeneralLedger,
        journal_code: &str,
        account_code: &str,
        amount: Decimal,
        period: Period,
    ) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must be strictly positive, got {}",
                amount
            )));
        }
        let journal = ledger
            .journal(journal_code)
            .ok_or_else(|| LedgerError::NotFound(format!("journal `{}`", journal_code)))?;
        if !journal.active {
            return Err(LedgerError::Validation(format!(
                "journal `{}` is inactive",
                journal_code
            )));
        }
        let account = ledger
            .account(account_code)
            .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", account_code)))?;
        if !account.active {
            return Err(LedgerError::Validation(format!(
                "account `{}` is inactive",
                account_code
            )));
        }
        let exercise = ledger.exercise_covering(period).ok_or_else(|| {
            LedgerError::NotFound(format!("no exercise covers period {}", period))
        })?;
        if exercise.closed {
            return Err(LedgerError::PeriodClosed(format!(
                "exercise {} is closed, period {} rejects postings",
                exercise.year, period
            )));
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_entry(
        journal_code: &str,
        account_code: &str,
        date: NaiveDate,
        amount: Decimal,
        direction: EntryDirection,
        period: Period,
        piece_kind: PieceKind,
        piece_number: String,
        label: String,
        transaction_id: Option<Uuid>,
        reverses: Option<Uuid>,
    ) -> Entry {
        let (debit, credit) = match direction {
            EntryDirection::Debit => (amount, Decimal::ZERO),
            EntryDirection::Credit => (Decimal::ZERO, amount),
        };
        Entry {
            id: Uuid::new_v4(),
            date,
            piece_number,
            piece_kind,
            journal_code: journal_code.to_owned(),
            account_code: account_code.to_owned(),
            label,
            debit,
            credit,
            period,
            transaction_id,
            attachment: None,
            reverses,
        }
    }

    /// Posts a balanced debit/credit pair linked to one transaction.
    /// Both legs are validated before either is recorded.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn post_linked_pair(
        ledger: &mut GeneralLedger,
        journal_code: &str,
        debit_account: &str,
        credit_account: &str,
        date: NaiveDate,
        amount: Decimal,
        period: Period,
        piece_kind: PieceKind,
        piece_number: &str,
        label: &str,
        transaction_id: Uuid,
    ) -> Result<(Entry, Entry)> {
        Self::check_postable(ledger, journal_code, debit_account, amount, period)?;
        Self::check_postable(ledger, journal_code, credit_account, amount, period)?;
        let debit = Self::build_entry(
            journal_code,
            debit_account,
            date,
            amount,
            EntryDirection::Debit,
            period,
            piece_kind,
            piece_number.to_owned(),
            label.to_owned(),
            Some(transaction_id),
            None,
        );
        let credit = Self::build_entry(
            journal_code,
            credit_account,
            date,
            amount,
            EntryDirection::Credit,
            period,
            piece_kind,
            piece_number.to_owned(),
            label.to_owned(),
            Some(transaction_id),
            None,
        );
        ledger.entries.push(debit.clone());
        ledger.entries.push(credit.clone());
        ledger.touch();
        Ok((debit, credit))
    }
}
