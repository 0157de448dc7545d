//! Daily study-hour capacity model.
//!
//! Maps each calendar day in the planning horizon to its available study
//! hours: Saturday/Sunday use the weekend budget, all other days the
//! weekday budget. Negative configured hours are clamped to 0.
//!
//! The map is the single source of truth for remaining capacity and is
//! consumed destructively, first by pre-exam buffer reservation and then
//! by dispatch. Callers needing the original totals must clone first.

use std::collections::BTreeMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::StudyConstraints;
use crate::util::round2;

/// Remaining study hours per calendar day.
///
/// Backed by a `BTreeMap` so iteration order over dates is deterministic.
#[derive(Debug, Clone, Default)]
pub struct DayCapacity {
    hours: BTreeMap<NaiveDate, f64>,
}

impl DayCapacity {
    /// Builds capacity for every day in `[start, end]`.
    pub fn build(start: NaiveDate, end: NaiveDate, constraints: &StudyConstraints) -> Self {
        let mut hours = BTreeMap::new();
        let mut current = start;
        while current <= end {
            let available = match current.weekday() {
                Weekday::Sat | Weekday::Sun => constraints.hours_per_weekend,
                _ => constraints.hours_per_weekday,
            };
            hours.insert(current, available.max(0.0));
            current += Duration::days(1);
        }
        Self { hours }
    }

    /// Remaining hours on a date (0 outside the horizon).
    pub fn get(&self, date: NaiveDate) -> f64 {
        self.hours.get(&date).copied().unwrap_or(0.0)
    }

    /// Consumes hours on a date. Has no effect outside the horizon;
    /// remaining hours never go below 0.
    pub fn consume(&mut self, date: NaiveDate, amount: f64) {
        if let Some(remaining) = self.hours.get_mut(&date) {
            *remaining = (*remaining - amount).max(0.0);
        }
    }

    /// Sum of remaining hours across the horizon, rounded to 2 decimals.
    pub fn total_hours(&self) -> f64 {
        round2(self.hours.values().sum())
    }

    /// Number of days in the horizon.
    pub fn day_count(&self) -> usize {
        self.hours.len()
    }

    /// Whether the horizon is empty.
    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}
