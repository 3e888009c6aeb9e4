pub mod json_backend;

use std::path::Path;

use crate::errors::Result;
use crate::ledger::GeneralLedger;

/// Abstraction over persistence backends capable of storing ledgers.
///
/// The ledger core only needs whole-aggregate save/load with all-or-nothing
/// semantics; backends decide where and how bytes land.
pub trait StorageBackend: Send + Sync {
    fn save(&self, ledger: &GeneralLedger, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<GeneralLedger>;
    fn list(&self) -> Result<Vec<String>>;

    /// Ad-hoc file operations. Default implementations forward to the JSON
    /// codec so backends only override them when they store elsewhere.
    fn save_to_path(&self, ledger: &GeneralLedger, path: &Path) -> Result<()> {
        json_backend::save_ledger_to_path(ledger, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<GeneralLedger> {
        json_backend::load_ledger_from_path(path)
    }
}

pub use json_backend::JsonStorage;
