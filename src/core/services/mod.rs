//! Stateless services that apply validated operations to a
//! [`GeneralLedger`](crate::ledger::GeneralLedger).

pub mod balance_service;
pub mod budget_service;
pub mod chart_service;
pub mod entry_service;
pub mod exercise_service;
pub mod reference_service;
pub mod transaction_service;

pub use balance_service::BalanceService;
pub use budget_service::{BudgetReportLine, BudgetService};
pub use chart_service::ChartService;
pub use entry_service::EntryService;
pub use exercise_service::ExerciseService;
pub use reference_service::{
    DomainDirectory, InMemoryDirectory, ReferenceDomain, ReferenceValidator,
};
pub use transaction_service::TransactionService;
