//! Treasury accounts and the transaction validation workflow.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::core::services::{BudgetService, EntryService};
use crate::domain::{
    AccountClass, Period, PieceKind, Transaction, TransactionCategory, TransactionKind,
    TransactionStatus, TreasuryAccount, TreasuryKind,
};
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// Manages treasury accounts and the Pending → Validated / Rejected /
/// Cancelled lifecycle of financial transactions.
///
/// Validation is the step that reaches the ledger: it posts the balanced
/// debit/credit pair, moves the treasury running balances, and feeds the
/// matching budget line, atomically.
pub struct TransactionService;

impl TransactionService {
    /// Registers a bank/cash/savings account and its class 5 mirror in the
    /// chart of accounts.
    pub fn register_treasury_account(
        ledger: &mut GeneralLedger,
        number: impl Into<String>,
        name: impl Into<String>,
        kind: TreasuryKind,
        currency: impl Into<String>,
        linked_account_code: &str,
    ) -> Result<TreasuryAccount> {
        let number = number.into();
        if ledger.treasury_account(&number).is_some() {
            return Err(LedgerError::Validation(format!(
                "treasury account `{}` already exists",
                number
            )));
        }
        let linked = ledger
            .account(linked_account_code)
            .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", linked_account_code)))?;
        if linked.class != AccountClass::Class5 {
            return Err(LedgerError::Validation(format!(
                "linked account `{}` must belong to OHADA class 5",
                linked_account_code
            )));
        }
        if !linked.active {
            return Err(LedgerError::Validation(format!(
                "linked account `{}` is inactive",
                linked_account_code
            )));
        }
        let account = TreasuryAccount {
            number: number.clone(),
            name: name.into(),
            kind,
            currency: currency.into(),
            balance: Decimal::ZERO,
            linked_account_code: linked_account_code.to_owned(),
            bank: None,
            iban: None,
            swift: None,
            active: true,
        };
        ledger.treasury_accounts.push(account.clone());
        ledger.touch();
        tracing::info!(number = %number, "treasury account registered");
        Ok(account)
    }

    /// Records a pending transaction after checking its amount, reference
    /// uniqueness, and the treasury accounts its kind requires.
    #[allow(clippy::too_many_arguments)]
    pub fn create_transaction(
        ledger: &mut GeneralLedger,
        date: NaiveDate,
        kind: TransactionKind,
        category: TransactionCategory,
        amount: Decimal,
        reference: impl Into<String>,
        description: Option<String>,
        source_account: Option<&str>,
        destination_account: Option<&str>,
    ) -> Result<Transaction> {
        let reference = reference.into();
        if amount <= Decimal::ZERO {
            return Err(LedgerError::Validation(format!(
                "amount must be strictly positive, got {}",
                amount
            )));
        }
        if reference.trim().is_empty() {
            return Err(LedgerError::Validation("reference must not be empty".into()));
        }
        if ledger
            .transactions
            .iter()
            .any(|transaction| transaction.reference == reference)
        {
            return Err(LedgerError::Validation(format!(
                "reference `{}` is already used",
                reference
            )));
        }
        Self::check_account_shape(kind, source_account, destination_account)?;
        for number in [source_account, destination_account].into_iter().flatten() {
            let account = ledger
                .treasury_account(number)
                .ok_or_else(|| LedgerError::NotFound(format!("treasury account `{}`", number)))?;
            if !account.active {
                return Err(LedgerError::Validation(format!(
                    "treasury account `{}` is inactive",
                    number
                )));
            }
        }
        let transaction = Transaction {
            id: Uuid::new_v4(),
            date,
            kind,
            category,
            amount,
            currency: ledger.currency.clone(),
            reference,
            description,
            status: TransactionStatus::Pending,
            source_account: source_account.map(str::to_owned),
            destination_account: destination_account.map(str::to_owned),
            supporting_document: None,
        };
        ledger.transactions.push(transaction.clone());
        ledger.touch();
        Ok(transaction)
    }

    /// Validates a pending transaction: posts its balanced entry pair into
    /// `journal_code`/`period`, moves the treasury balances, feeds the budget
    /// line, and marks the transaction validated.
    ///
    /// `counterpart_account_code` names the charge/product chart account the
    /// non-treasury leg lands on; transfers move between two treasury mirrors
    /// and take no counterpart.
    pub fn validate_transaction(
        ledger: &mut GeneralLedger,
        transaction_id: Uuid,
        journal_code: &str,
        period: Period,
        counterpart_account_code: Option<&str>,
    ) -> Result<Transaction> {
        let transaction = ledger
            .transaction(transaction_id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", transaction_id)))?
            .clone();
        if !transaction.is_pending() {
            return Err(LedgerError::Conflict(format!(
                "transaction `{}` is {:?}, only pending transactions can be validated",
                transaction.reference, transaction.status
            )));
        }

        let (debit_account, credit_account) =
            Self::entry_pair_accounts(ledger, &transaction, counterpart_account_code)?;
        let label = transaction
            .description
            .clone()
            .unwrap_or_else(|| format!("{:?} {:?}", transaction.kind, transaction.category));
        EntryService::post_linked_pair(
            ledger,
            journal_code,
            &debit_account,
            &credit_account,
            transaction.date,
            transaction.amount,
            period,
            Self::piece_kind(transaction.kind),
            &transaction.reference,
            &label,
            transaction.id,
        )?;

        Self::apply_treasury_movements(ledger, &transaction);
        BudgetService::record_realized(
            ledger,
            transaction.date.year(),
            transaction.date.month(),
            transaction.category,
            transaction.amount,
        );
        let stored = ledger
            .transaction_mut(transaction_id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", transaction_id)))?;
        stored.status = TransactionStatus::Validated;
        let snapshot = stored.clone();
        ledger.touch();
        tracing::info!(reference = %snapshot.reference, "transaction validated");
        Ok(snapshot)
    }

    /// Marks a pending transaction rejected. Terminal.
    pub fn reject_transaction(ledger: &mut GeneralLedger, transaction_id: Uuid) -> Result<()> {
        Self::finish_pending(ledger, transaction_id, TransactionStatus::Rejected)
    }

    /// Marks a pending transaction cancelled. Terminal.
    pub fn cancel_transaction(ledger: &mut GeneralLedger, transaction_id: Uuid) -> Result<()> {
        Self::finish_pending(ledger, transaction_id, TransactionStatus::Cancelled)
    }

    fn finish_pending(
        ledger: &mut GeneralLedger,
        transaction_id: Uuid,
        status: TransactionStatus,
    ) -> Result<()> {
        let transaction = ledger
            .transaction_mut(transaction_id)
            .ok_or_else(|| LedgerError::NotFound(format!("transaction {}", transaction_id)))?;
        if !transaction.is_pending() {
            return Err(LedgerError::Conflict(format!(
                "transaction `{}` is {:?} and can no longer change",
                transaction.reference, transaction.status
            )));
        }
        transaction.status = status;
        ledger.touch();
        Ok(())
    }

    fn check_account_shape(
        kind: TransactionKind,
        source: Option<&str>,
        destination: Option<&str>,
    ) -> Result<()> {
        let shape_error = |message: &str| LedgerError::Validation(message.to_owned());
        match kind {
            TransactionKind::Income => match (source, destination) {
                (None, Some(_)) => Ok(()),
                _ => Err(shape_error(
                    "income requires a destination account and no source",
                )),
            },
            TransactionKind::Expense => match (source, destination) {
                (Some(_), None) => Ok(()),
                _ => Err(shape_error(
                    "expense requires a source account and no destination",
                )),
            },
            TransactionKind::Transfer => match (source, destination) {
                (Some(from), Some(to)) if from != to => Ok(()),
                (Some(_), Some(_)) => {
                    Err(shape_error("transfer source and destination must differ"))
                }
                _ => Err(shape_error("transfer requires source and destination accounts")),
            },
            TransactionKind::Adjustment => match (source, destination) {
                (Some(_), None) | (None, Some(_)) => Ok(()),
                _ => Err(shape_error(
                    "adjustment requires exactly one of source or destination",
                )),
            },
        }
    }

    /// Resolves the (debit, credit) chart accounts of the entry pair.
    fn entry_pair_accounts(
        ledger: &GeneralLedger,
        transaction: &Transaction,
        counterpart: Option<&str>,
    ) -> Result<(String, String)> {
        let linked = |number: &str| -> Result<String> {
            let treasury = ledger
                .treasury_account(number)
                .ok_or_else(|| LedgerError::NotFound(format!("treasury account `{}`", number)))?;
            Ok(treasury.linked_account_code.clone())
        };
        let counterpart_of = |expected: Option<AccountClass>| -> Result<String> {
            let code = counterpart.ok_or_else(|| {
                LedgerError::Validation(format!(
                    "{:?} transactions require a counterpart account",
                    transaction.kind
                ))
            })?;
            let account = ledger
                .account(code)
                .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", code)))?;
            if let Some(class) = expected {
                if account.class != class {
                    return Err(LedgerError::Validation(format!(
                        "counterpart `{}` must belong to OHADA class {}",
                        code,
                        class.digit()
                    )));
                }
            }
            Ok(account.code.clone())
        };

        let side = |account: &Option<String>, name: &str| -> Result<String> {
            account.clone().ok_or_else(|| {
                LedgerError::Validation(format!(
                    "{:?} transaction `{}` is missing its {} account",
                    transaction.kind, transaction.reference, name
                ))
            })
        };

        match transaction.kind {
            TransactionKind::Income => Ok((
                linked(&side(&transaction.destination_account, "destination")?)?,
                counterpart_of(Some(AccountClass::Class7))?,
            )),
            TransactionKind::Expense => Ok((
                counterpart_of(Some(AccountClass::Class6))?,
                linked(&side(&transaction.source_account, "source")?)?,
            )),
            TransactionKind::Transfer => Ok((
                linked(&side(&transaction.destination_account, "destination")?)?,
                linked(&side(&transaction.source_account, "source")?)?,
            )),
            TransactionKind::Adjustment => match transaction.destination_account.as_deref() {
                Some(destination) => Ok((linked(destination)?, counterpart_of(None)?)),
                None => Ok((
                    counterpart_of(None)?,
                    linked(&side(&transaction.source_account, "source")?)?,
                )),
            },
        }
    }

    fn apply_treasury_movements(ledger: &mut GeneralLedger, transaction: &Transaction) {
        let amount = transaction.amount;
        if let Some(source) = transaction.source_account.as_deref() {
            if let Some(account) = ledger.treasury_account_mut(source) {
                account.balance -= amount;
            }
        }
        if let Some(destination) = transaction.destination_account.as_deref() {
            if let Some(account) = ledger.treasury_account_mut(destination) {
                account.balance += amount;
            }
        }
    }

    fn piece_kind(kind: TransactionKind) -> PieceKind {
        match kind {
            TransactionKind::Income => PieceKind::Receipt,
            TransactionKind::Expense => PieceKind::Invoice,
            TransactionKind::Transfer => PieceKind::Transfer,
            TransactionKind::Adjustment => PieceKind::Voucher,
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core::services::{BalanceService, ChartService, ExerciseService};
    use crate::domain::{AccountKind, Journal, JournalKind};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn farm_ledger() -> GeneralLedger {
        let mut ledger = GeneralLedger::new("FOFAL", "XAF");
        for (code, name, kind) in [
            ("521000", "Banque BICEC", AccountKind::Asset),
            ("571000", "Caisse", AccountKind::Asset),
            ("601000", "Achats d'intrants", AccountKind::Expense),
            ("701000", "Ventes de produits", AccountKind::Revenue),
        ] {
            ChartService::create_account(&mut ledger, code, name, kind, None).unwrap();
        }
        ledger
            .journals
            .push(Journal::new("BNK", "Banque", JournalKind::Bank));
        ExerciseService::open_exercise(&mut ledger, 2024, date(2024, 1, 1), date(2024, 12, 31))
            .unwrap();
        TransactionService::register_treasury_account(
            &mut ledger,
            "BC-001",
            "Compte courant",
            TreasuryKind::Bank,
            "XAF",
            "521000",
        )
        .unwrap();
        TransactionService::register_treasury_account(
            &mut ledger,
            "CS-001",
            "Caisse ferme",
            TreasuryKind::Cash,
            "XAF",
            "571000",
        )
        .unwrap();
        ledger
    }

    #[test]
    fn register_rejects_non_class5_link() {
        let mut ledger = farm_ledger();
        let err = TransactionService::register_treasury_account(
            &mut ledger,
            "BC-002",
            "Mauvais lien",
            TreasuryKind::Bank,
            "XAF",
            "601000",
        )
        .expect_err("class 6 link must fail");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn create_enforces_per_kind_account_shape() {
        let mut ledger = farm_ledger();
        let err = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 5),
            TransactionKind::Transfer,
            TransactionCategory::Other,
            dec!(100),
            "TRF-001",
            None,
            Some("BC-001"),
            None,
        )
        .expect_err("transfer without destination");
        assert!(matches!(err, LedgerError::Validation(_)));

        let err = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 5),
            TransactionKind::Transfer,
            TransactionCategory::Other,
            dec!(100),
            "TRF-002",
            None,
            Some("BC-001"),
            Some("BC-001"),
        )
        .expect_err("transfer onto itself");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn create_rejects_duplicate_reference() {
        let mut ledger = farm_ledger();
        TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 5),
            TransactionKind::Expense,
            TransactionCategory::InputPurchases,
            dec!(100),
            "DEP-001",
            None,
            Some("BC-001"),
            None,
        )
        .unwrap();
        let err = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 6),
            TransactionKind::Expense,
            TransactionCategory::InputPurchases,
            dec!(200),
            "DEP-001",
            None,
            Some("BC-001"),
            None,
        )
        .expect_err("duplicate reference");
        assert!(matches!(err, LedgerError::Validation(_)));
    }

    #[test]
    fn validated_expense_posts_balanced_pair_and_moves_balances() {
        let mut ledger = farm_ledger();
        let transaction = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 10),
            TransactionKind::Expense,
            TransactionCategory::InputPurchases,
            dec!(1_000_000),
            "DEP-010",
            Some("Engrais NPK".into()),
            Some("BC-001"),
            None,
        )
        .unwrap();

        let validated = TransactionService::validate_transaction(
            &mut ledger,
            transaction.id,
            "BNK",
            "2024-03".parse().unwrap(),
            Some("601000"),
        )
        .expect("validation succeeds");
        assert_eq!(validated.status, TransactionStatus::Validated);

        // Balanced pair: debit 601000, credit 521000.
        let linked: Vec<_> = ledger
            .entries
            .iter()
            .filter(|entry| entry.transaction_id == Some(transaction.id))
            .collect();
        assert_eq!(linked.len(), 2);
        let debit = linked.iter().find(|entry| !entry.debit.is_zero()).unwrap();
        let credit = linked.iter().find(|entry| !entry.credit.is_zero()).unwrap();
        assert_eq!(debit.account_code, "601000");
        assert_eq!(credit.account_code, "521000");
        assert_eq!(debit.debit, dec!(1_000_000));
        assert_eq!(credit.credit, dec!(1_000_000));

        assert_eq!(
            ledger.treasury_account("BC-001").unwrap().balance,
            dec!(-1_000_000)
        );
        let report = BalanceService::trial_balance(&ledger, 2024).unwrap();
        assert!(report.is_balanced);
    }

    #[test]
    fn validated_transfer_moves_between_mirrors() {
        let mut ledger = farm_ledger();
        let transaction = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 4, 2),
            TransactionKind::Transfer,
            TransactionCategory::Other,
            dec!(250_000),
            "TRF-010",
            None,
            Some("BC-001"),
            Some("CS-001"),
        )
        .unwrap();
        TransactionService::validate_transaction(
            &mut ledger,
            transaction.id,
            "BNK",
            "2024-04".parse().unwrap(),
            None,
        )
        .unwrap();

        assert_eq!(
            ledger.treasury_account("BC-001").unwrap().balance,
            dec!(-250_000)
        );
        assert_eq!(
            ledger.treasury_account("CS-001").unwrap().balance,
            dec!(250_000)
        );
    }

    #[test]
    fn validate_requires_matching_counterpart_class() {
        let mut ledger = farm_ledger();
        let transaction = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 10),
            TransactionKind::Income,
            TransactionCategory::ProductSales,
            dec!(500),
            "REC-001",
            None,
            None,
            Some("BC-001"),
        )
        .unwrap();
        let err = TransactionService::validate_transaction(
            &mut ledger,
            transaction.id,
            "BNK",
            "2024-03".parse().unwrap(),
            Some("601000"),
        )
        .expect_err("class 6 counterpart on income");
        assert!(matches!(err, LedgerError::Validation(_)));
        // Nothing was recorded.
        assert_eq!(ledger.entry_count(), 0);
        assert!(ledger.transaction(transaction.id).unwrap().is_pending());
    }

    #[test]
    fn validated_transaction_cannot_be_validated_again() {
        let mut ledger = farm_ledger();
        let transaction = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 10),
            TransactionKind::Income,
            TransactionCategory::ProductSales,
            dec!(500),
            "REC-002",
            None,
            None,
            Some("BC-001"),
        )
        .unwrap();
        TransactionService::validate_transaction(
            &mut ledger,
            transaction.id,
            "BNK",
            "2024-03".parse().unwrap(),
            Some("701000"),
        )
        .unwrap();
        let err = TransactionService::validate_transaction(
            &mut ledger,
            transaction.id,
            "BNK",
            "2024-03".parse().unwrap(),
            Some("701000"),
        )
        .expect_err("double validation");
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[test]
    fn reject_and_cancel_are_pending_only() {
        let mut ledger = farm_ledger();
        let transaction = TransactionService::create_transaction(
            &mut ledger,
            date(2024, 3, 10),
            TransactionKind::Expense,
            TransactionCategory::Maintenance,
            dec!(80),
            "DEP-020",
            None,
            Some("CS-001"),
            None,
        )
        .unwrap();
        TransactionService::reject_transaction(&mut ledger, transaction.id).unwrap();
        let err = TransactionService::cancel_transaction(&mut ledger, transaction.id)
            .expect_err("already rejected");
        assert!(matches!(err, LedgerError::Conflict(_)));
    }
}
