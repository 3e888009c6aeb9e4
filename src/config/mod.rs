use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DEFAULT_CURRENCY: &str = "XAF";
const DEFAULT_ACCOUNTING_STANDARD: &str = "OHADA";
const DEFAULT_FISCAL_YEAR_START_MONTH: u32 = 1;
const DEFAULT_TOKEN_EXPIRY_MINUTES: u64 = 60 * 24;

/// Process-wide settings, read once at startup and passed by value to the
/// components that need them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub secret_key: String,
    pub token_expiry_minutes: u64,
    pub cors_origins: Vec<String>,
    pub currency: String,
    pub accounting_standard: String,
    pub fiscal_year_start_month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "postgres://postgres@localhost:5432/fofal_erp".into(),
            secret_key: String::new(),
            token_expiry_minutes: DEFAULT_TOKEN_EXPIRY_MINUTES,
            cors_origins: Vec::new(),
            currency: DEFAULT_CURRENCY.into(),
            accounting_standard: DEFAULT_ACCOUNTING_STANDARD.into(),
            fiscal_year_start_month: DEFAULT_FISCAL_YEAR_START_MONTH,
            storage_root: None,
        }
    }
}

impl Settings {
    /// Builds settings from the process environment, falling back to the
    /// defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Settings::default();
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            secret_key: env::var("SECRET_KEY").unwrap_or(defaults.secret_key),
            token_expiry_minutes: env::var("TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(defaults.token_expiry_minutes),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
            currency: env::var("CURRENCY").unwrap_or(defaults.currency),
            accounting_standard: env::var("ACCOUNTING_STANDARD")
                .unwrap_or(defaults.accounting_standard),
            fiscal_year_start_month: env::var("FISCAL_YEAR_START_MONTH")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .filter(|month| (1..=12).contains(month))
                .unwrap_or(defaults.fiscal_year_start_month),
            storage_root: env::var("STORAGE_ROOT").ok().map(PathBuf::from),
        }
    }
}
