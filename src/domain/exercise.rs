use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::period::Period;

/// A fiscal year (exercice comptable).
///
/// Created open; transitions to closed exactly once. Closing stamps the
/// timestamp and actor and freezes the year's balances.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub year: i32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub closed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_by: Option<Uuid>,
}

impl Exercise {
    pub fn new(year: i32, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            year,
            start,
            end,
            closed: false,
            closed_at: None,
            closed_by: None,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.closed
    }

    /// Whether the period's first day falls inside this exercise.
    pub fn covers(&self, period: Period) -> bool {
        let day = period.first_day();
        day >= self.start && day <= self.end
    }

    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end && end >= self.start
    }
}
