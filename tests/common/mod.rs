use chrono::NaiveDate;
use uuid::Uuid;

use fofal_ledger::core::services::{
    ChartService, ExerciseService, InMemoryDirectory, ReferenceDomain, ReferenceValidator,
};
use fofal_ledger::domain::{AccountKind, Journal, JournalKind};
use fofal_ledger::ledger::GeneralLedger;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A ledger seeded with the accounts, journals, and the 2024 exercise the
/// suites post against.
pub fn farm_ledger() -> GeneralLedger {
    let mut ledger = GeneralLedger::new("FOFAL", "XAF");
    for (code, name, kind) in [
        ("521000", "Banque BICEC", AccountKind::Asset),
        ("571000", "Caisse", AccountKind::Asset),
        ("601000", "Achats d'intrants", AccountKind::Expense),
        ("616000", "Transport", AccountKind::Expense),
        ("701000", "Ventes de produits", AccountKind::Revenue),
    ] {
        ChartService::create_account(&mut ledger, code, name, kind, None).unwrap();
    }
    ledger
        .journals
        .push(Journal::new("ACH", "Achats", JournalKind::Purchases));
    ledger
        .journals
        .push(Journal::new("BNK", "Banque", JournalKind::Bank));
    ExerciseService::open_exercise(&mut ledger, 2024, date(2024, 1, 1), date(2024, 12, 31))
        .unwrap();
    ledger
}

pub fn refs_with_employee(actor: Uuid) -> ReferenceValidator {
    let mut employees = InMemoryDirectory::default();
    employees.insert(actor, true);
    ReferenceValidator::new().with_directory(ReferenceDomain::Employee, Box::new(employees))
}
