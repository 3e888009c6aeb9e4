//! Fiscal exercise lifecycle: open once, close once.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::core::services::{BalanceService, ReferenceDomain, ReferenceValidator};
use crate::domain::Exercise;
use crate::errors::{LedgerError, Result};
use crate::ledger::GeneralLedger;

/// Manages fiscal years. An exercise is created open and transitions to
/// closed exactly once; closing freezes the year's balances.
pub struct ExerciseService;

impl ExerciseService {
    /// Opens a new fiscal year. The year must be unused and the date range
    /// must not overlap any existing exercise.
    pub fn open_exercise(
        ledger: &mut GeneralLedger,
        year: i32,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Exercise> {
        if end <= start {
            return Err(LedgerError::Validation(format!(
                "exercise {} end date must be after its start date",
                year
            )));
        }
        if ledger.exercise(year).is_some() {
            return Err(LedgerError::Conflict(format!(
                "exercise {} already exists",
                year
            )));
        }
        if let Some(existing) = ledger
            .exercises
            .iter()
            .find(|exercise| exercise.overlaps(start, end))
        {
            return Err(LedgerError::Conflict(format!(
                "date range overlaps exercise {}",
                existing.year
            )));
        }
        let exercise = Exercise::new(year, start, end);
        ledger.exercises.push(exercise.clone());
        ledger.touch();
        tracing::info!(year, %start, %end, "exercise opened");
        Ok(exercise)
    }

    /// Closes a fiscal year: recomputes and freezes the year's balances,
    /// stamps the closing timestamp and actor, and rejects every later post
    /// into the year.
    ///
    /// The closing actor must be a known, active employee.
    pub fn close_exercise(
        ledger: &mut GeneralLedger,
        year: i32,
        closing_actor: Uuid,
        refs: &ReferenceValidator,
    ) -> Result<Exercise> {
        let exercise = ledger
            .exercise(year)
            .ok_or_else(|| LedgerError::NotFound(format!("exercise {}", year)))?;
        if exercise.closed {
            return Err(LedgerError::Conflict(format!(
                "exercise {} is already closed",
                year
            )));
        }
        refs.ensure_active(ReferenceDomain::Employee, closing_actor)?;

        let final_balances = BalanceService::compute_balances(ledger, year)?;

        ledger
            .frozen_balances
            .retain(|balance| balance.exercise_year != year);
        ledger.frozen_balances.extend(final_balances);
        let closed_at = Utc::now();
        let exercise = ledger
            .exercise_mut(year)
            .ok_or_else(|| LedgerError::NotFound(format!("exercise {}", year)))?;
        exercise.closed = true;
        exercise.closed_at = Some(closed_at);
        exercise.closed_by = Some(closing_actor);
        let snapshot = exercise.clone();
        ledger.touch();
        tracing::info!(year, actor = %closing_actor, "exercise closed");
        Ok(snapshot)
    }
}
