#![doc(test(attr(deny(warnings))))]

//! Fofal Ledger provides the OHADA chart-of-accounts, journal-entry, fiscal
//! exercise, and balance-aggregation primitives that power the FOFAL farm
//! ERP's accounting backbone.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Fofal Ledger tracing initialized.");
    });
}
