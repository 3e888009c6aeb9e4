use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::{LedgerError, Result};
use crate::ledger::{GeneralLedger, CURRENT_SCHEMA_VERSION};

use super::StorageBackend;

const LEDGER_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-file persistence: one file per ledger under a root directory.
///
/// Writes go to a temp file and are renamed into place, so a crashed save
/// never leaves a half-written ledger behind.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    ledgers_dir: PathBuf,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>) -> Result<Self> {
        let root = root.unwrap_or_else(default_root);
        let ledgers_dir = root.join("ledgers");
        ensure_dir(&ledgers_dir)?;
        Ok(Self { ledgers_dir })
    }

    pub fn ledger_path(&self, name: &str) -> PathBuf {
        self.ledgers_dir
            .join(format!("{}.{}", canonical_name(name), LEDGER_EXTENSION))
    }
}

impl StorageBackend for JsonStorage {
    fn save(&self, ledger: &GeneralLedger, name: &str) -> Result<()> {
        save_ledger_to_path(ledger, &self.ledger_path(name))
    }

    fn load(&self, name: &str) -> Result<GeneralLedger> {
        let path = self.ledger_path(name);
        if !path.exists() {
            return Err(LedgerError::Storage(format!(
                "ledger `{}` not found at {}",
                name,
                path.display()
            )));
        }
        load_ledger_from_path(&path)
    }

    fn list(&self) -> Result<Vec<String>> {
        if !self.ledgers_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.ledgers_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(LEDGER_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

pub fn save_ledger_to_path(ledger: &GeneralLedger, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(ledger)?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

pub fn load_ledger_from_path(path: &Path) -> Result<GeneralLedger> {
    let data = fs::read_to_string(path)?;
    let ledger: GeneralLedger = serde_json::from_str(&data)?;
    if ledger.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::Storage(format!(
            "ledger schema v{} is newer than supported v{}",
            ledger.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }
    Ok(ledger)
}

fn default_root() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fofal_ledger")
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_ascii_lowercase()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn save_and_load_roundtrip() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let ledger = GeneralLedger::new("FOFAL 2024", "XAF");
        storage.save(&ledger, "fofal-2024").unwrap();

        let loaded = storage.load("fofal-2024").unwrap();
        assert_eq!(loaded.name, "FOFAL 2024");
        assert_eq!(loaded.currency, "XAF");
        assert_eq!(storage.list().unwrap(), vec!["fofal_2024".to_string()]);
    }

    #[test]
    fn load_rejects_future_schema() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let mut ledger = GeneralLedger::new("Future", "XAF");
        ledger.schema_version = CURRENT_SCHEMA_VERSION + 3;
        storage.save(&ledger, "future").unwrap();

        let err = storage.load("future").expect_err("future schema");
        assert!(matches!(err, LedgerError::Storage(message) if message.contains("newer")));
    }

    #[test]
    fn missing_ledger_is_a_storage_error() {
        let temp = tempdir().unwrap();
        let storage = JsonStorage::new(Some(temp.path().to_path_buf())).unwrap();
        let err = storage.load("absent").expect_err("missing file");
        assert!(matches!(err, LedgerError::Storage(_)));
    }
}
