mod common;

use common::{date, farm_ledger};
use rust_decimal_macros::dec;
use tempfile::tempdir;

use fofal_ledger::core::services::{BalanceService, EntryService, TransactionService};
use fofal_ledger::domain::{
    EntryDirection, PieceKind, TransactionCategory, TransactionKind, TreasuryKind,
};
use fofal_ledger::storage::{JsonStorage, StorageBackend};

#[test]
fn populated_ledger_survives_a_save_load_cycle() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();

    let mut ledger = farm_ledger();
    EntryService::post_entry(
        &mut ledger,
        "ACH",
        "601000",
        date(2024, 3, 12),
        dec!(1_000_000),
        EntryDirection::Debit,
        "2024-03".parse().unwrap(),
        PieceKind::Invoice,
        "F-2024-031",
        "Achat d'engrais",
    )
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
    let transaction = TransactionService::create_transaction(
        &mut ledger,
        date(2024, 4, 2),
        TransactionKind::Income,
        TransactionCategory::ProductSales,
        dec!(2_500_000),
        "REC-2024-040",
        Some("Vente huile de palme".into()),
        None,
        Some("BC-001"),
    )
    .unwrap();
    TransactionService::validate_transaction(
        &mut ledger,
        transaction.id,
        "BNK",
        "2024-04".parse().unwrap(),
        Some("701000"),
    )
    .unwrap();

    storage.save(&ledger, "fofal-2024").unwrap();
    let reloaded = storage.load("fofal-2024").unwrap();

    assert_eq!(reloaded.entry_count(), ledger.entry_count());
    assert_eq!(reloaded.transactions, ledger.transactions);
    assert_eq!(reloaded.treasury_accounts, ledger.treasury_accounts);
    assert_eq!(reloaded.accounts, ledger.accounts);

    // Balances recompute identically from the reloaded entry stream.
    let before = BalanceService::compute_balances(&ledger, 2024).unwrap();
    let after = BalanceService::compute_balances(&reloaded, 2024).unwrap();
    assert_eq!(before, after);
}

#[test]
fn save_is_atomic_under_rename() {
    let temp = tempdir().unwrap();
    let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
    let ledger = farm_ledger();

    storage.save(&ledger, "fofal-2024").unwrap();
    storage.save(&ledger, "fofal-2024").unwrap();

    // No temp files left behind after repeated saves.
    let leftovers: Vec<_> = std::fs::read_dir(temp.path().join("ledgers"))
        .unwrap()
        .filter_map(|entry| entry.ok())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| ext == "tmp")
                .unwrap_or(false)
        })
        .collect();
    assert!(leftovers.is_empty());
    assert_eq!(storage.list().unwrap(), vec!["fofal_2024".to_string()]);
}
