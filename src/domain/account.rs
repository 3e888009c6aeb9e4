use serde::{Deserialize, Serialize};

use crate::errors::LedgerError;

/// OHADA chart-of-accounts classes 1 through 7.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AccountClass {
    /// Comptes de ressources durables.
    Class1,
    /// Comptes d'actif immobilisé.
    Class2,
    /// Comptes de stocks.
    Class3,
    /// Comptes de tiers.
    Class4,
    /// Comptes de trésorerie.
    Class5,
    /// Comptes de charges.
    Class6,
    /// Comptes de produits.
    Class7,
}

impl AccountClass {
    /// Derives the class from an account code's leading digit.
    pub fn from_code(code: &str) -> Result<Self, LedgerError> {
        match code.chars().next() {
            Some('1') => Ok(AccountClass::Class1),
            Some('2') => Ok(AccountClass::Class2),
            Some('3') => Ok(AccountClass::Class3),
            Some('4') => Ok(AccountClass::Class4),
            Some('5') => Ok(AccountClass::Class5),
            Some('6') => Ok(AccountClass::Class6),
            Some('7') => Ok(AccountClass::Class7),
            _ => Err(LedgerError::Validation(format!(
                "account code `{}` does not start with an OHADA class digit 1-7",
                code
            ))),
        }
    }

    pub fn digit(&self) -> char {
        match self {
            AccountClass::Class1 => '1',
            AccountClass::Class2 => '2',
            AccountClass::Class3 => '3',
            AccountClass::Class4 => '4',
            AccountClass::Class5 => '5',
            AccountClass::Class6 => '6',
            AccountClass::Class7 => '7',
        }
    }

    /// Account kinds an account of this class may carry.
    pub fn compatible_kinds(&self) -> &'static [AccountKind] {
        match self {
            AccountClass::Class1 => &[AccountKind::Liability],
            AccountClass::Class2 | AccountClass::Class3 | AccountClass::Class5 => {
                &[AccountKind::Asset]
            }
            AccountClass::Class4 => &[AccountKind::Asset, AccountKind::Liability],
            AccountClass::Class6 => &[AccountKind::Expense],
            AccountClass::Class7 => &[AccountKind::Revenue],
        }
    }
}

/// Enumerates the supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Asset,
    Liability,
    Expense,
    Revenue,
}

/// A node of the OHADA chart of accounts.
///
/// Accounts form a tree: every non-root account names its parent by code, and
/// the chain terminates at a one-digit class root. The registry service is the
/// only writer and keeps the tree acyclic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub code: String,
    pub name: String,
    pub class: AccountClass,
    pub kind: AccountKind,
    pub level: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
    pub active: bool,
}

impl Account {
    pub fn is_root(&self) -> bool {
        self.parent_code.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_inferred_from_leading_digit() {
        assert_eq!(AccountClass::from_code("601000").unwrap(), AccountClass::Class6);
        assert_eq!(AccountClass::from_code("52").unwrap(), AccountClass::Class5);
        assert!(AccountClass::from_code("801").is_err());
        assert!(AccountClass::from_code("").is_err());
    }

    #[test]
    fn class_kind_compatibility() {
        assert!(AccountClass::Class6
            .compatible_kinds()
            .contains(&AccountKind::Expense));
        assert!(!AccountClass::Class6
            .compatible_kinds()
            .contains(&AccountKind::Revenue));
        assert!(AccountClass::Class4
            .compatible_kinds()
            .contains(&AccountKind::Liability));
    }
}
