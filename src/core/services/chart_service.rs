//! Chart-of-accounts registry: validated mutations of the account tree.

use crate::core::services::BalanceService;
use crate::domain::{Account, AccountClass, AccountKind, TransactionStatus};
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// Provides validated mutations for [`Account`] nodes of the OHADA tree.
pub struct ChartService;

impl ChartService {
    /// Adds an account after validating its code, class, and parent linkage.
    ///
    /// The class is inferred from the code's leading digit. When a parent is
    /// given it must exist, share the class, and prefix the child's code; the
    /// resulting parent chain is re-walked so the tree stays acyclic.
    pub fn create_account(
        ledger: &mut GeneralLedger,
        code: impl Into<String>,
        name: impl Into<String>,
        kind: AccountKind,
        parent_code: Option<&str>,
    ) -> Result<Account> {
        let code = code.into();
        let name = name.into();
        if code.is_empty() || !code.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(LedgerError::Validation(format!(
                "account code `{}` must be a non-empty numeric string",
                code
            )));
        }
        if ledger.account(&code).is_some() {
            return Err(LedgerError::Validation(format!(
                "account `{}` already exists",
                code
            )));
        }
        let class = AccountClass::from_code(&code)?;
        if !class.compatible_kinds().contains(&kind) {
            return Err(LedgerError::Validation(format!(
                "kind {:?} is not valid for OHADA class {}",
                kind,
                class.digit()
            )));
        }
        let level = match parent_code {
            Some(parent_code) => {
                let parent = ledger.account(parent_code).ok_or_else(|| {
                    LedgerError::Validation(format!("parent account `{}` does not exist", parent_code))
                })?;
                if parent.class != class {
                    return Err(LedgerError::Validation(format!(
                        "parent `{}` is class {} but `{}` is class {}",
                        parent.code,
                        parent.class.digit(),
                        code,
                        class.digit()
                    )));
                }
                if !code.starts_with(&parent.code) || code == parent.code {
                    return Err(LedgerError::Validation(format!(
                        "child code `{}` must extend parent code `{}`",
                        code, parent.code
                    )));
                }
                Self::ensure_acyclic_chain(ledger, &parent.code)?;
                parent.level + 1
            }
            None => 1,
        };
        let account = Account {
            code: code.clone(),
            name,
            class,
            kind,
            level,
            parent_code: parent_code.map(str::to_owned),
            active: true,
        };
        ledger.accounts.push(account.clone());
        ledger.touch();
        tracing::info!(code = %code, class = %class.digit(), "account created");
        Ok(account)
    }

    /// Deactivates an account that carries no balance and no pending work.
    pub fn deactivate_account(ledger: &mut GeneralLedger, code: &str) -> Result<()> {
        let account = ledger
            .account(code)
            .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", code)))?;
        if !account.active {
            return Err(LedgerError::Conflict(format!(
                "account `{}` is already inactive",
                code
            )));
        }
        if !BalanceService::account_net(ledger, code).is_zero() {
            return Err(LedgerError::Conflict(format!(
                "account `{}` has a non-zero balance",
                code
            )));
        }
        let referenced_by_pending = ledger.transactions.iter().any(|transaction| {
            transaction.status == TransactionStatus::Pending
                && ledger.treasury_accounts.iter().any(|treasury| {
                    treasury.linked_account_code == code
                        && (transaction.source_account.as_deref() == Some(&treasury.number)
                            || transaction.destination_account.as_deref() == Some(&treasury.number))
                })
        });
        if referenced_by_pending {
            return Err(LedgerError::Conflict(format!(
                "account `{}` is referenced by pending transactions",
                code
            )));
        }
        if let Some(account) = ledger.account_mut(code) {
            account.active = false;
        }
        ledger.touch();
        tracing::info!(code = %code, "account deactivated");
        Ok(())
    }

    /// Looks up an account by code.
    pub fn resolve<'a>(ledger: &'a GeneralLedger, code: &str) -> Result<&'a Account> {
        ledger
            .account(code)
            .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", code)))
    }

    /// Walks the parent chain from `code` and confirms it terminates at a
    /// class root without revisiting a node.
    pub fn ensure_acyclic_chain(ledger: &GeneralLedger, code: &str) -> Result<()> {
        let mut visited = vec![code.to_owned()];
        let mut current = code.to_owned();
        loop {
            let account = ledger
                .account(&current)
                .ok_or_else(|| LedgerError::NotFound(format!("account `{}`", current)))?;
            match &account.parent_code {
                None => return Ok(()),
                Some(parent) => {
                    if visited.iter().any(|seen| seen == parent) {
                        return Err(LedgerError::Validation(format!(
                            "account `{}` has a cyclic parent chain",
                            code
                        )));
                    }
                    visited.push(parent.clone());
                    current = parent.clone();
                }
            }
        }
    }
}
