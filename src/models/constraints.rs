//! User study constraints.
//!
//! Per-course maps are sparse; accessor methods apply defaults and clamp
//! out-of-range signals so the engine never sees raw user input.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_WEEKDAY_HOURS: f64 = 3.0;
const DEFAULT_WEEKEND_HOURS: f64 = 6.0;
const DEFAULT_PRIORITY: f64 = 1.0;
const MIN_PRIORITY: f64 = 0.25;
const DEFAULT_LIKERT: f64 = 3.0;

/// Daily time budget and per-course preference signals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConstraints {
    /// First day of the planning horizon.
    pub start_date: NaiveDate,
    /// Study hours available Monday through Friday.
    pub hours_per_weekday: f64,
    /// Study hours available Saturday and Sunday.
    pub hours_per_weekend: f64,
    /// Relative course importance (default 1.0, floor 0.25).
    pub priority_weights: HashMap<String, f64>,
    /// Self-rated familiarity per course, 1-5 (default 3).
    pub familiarity_by_course: HashMap<String, f64>,
    /// Self-rated weakness per course, 1-5 (default 3).
    pub weakness_by_course: HashMap<String, f64>,
    /// Percentage of material already covered, 0-100 (default 0).
    /// Consumed by external effort estimators, not by the planner.
    pub coverage_by_course: HashMap<String, f64>,
}

impl StudyConstraints {
    /// Creates constraints with default daily hours and empty course maps.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            hours_per_weekday: DEFAULT_WEEKDAY_HOURS,
            hours_per_weekend: DEFAULT_WEEKEND_HOURS,
            priority_weights: HashMap::new(),
            familiarity_by_course: HashMap::new(),
            weakness_by_course: HashMap::new(),
            coverage_by_course: HashMap::new(),
        }
    }

    /// Sets weekday hours.
    pub fn with_weekday_hours(mut self, hours: f64) -> Self {
        self.hours_per_weekday = hours;
        self
    }

    /// Sets weekend hours.
    pub fn with_weekend_hours(mut self, hours: f64) -> Self {
        self.hours_per_weekend = hours;
        self
    }

    /// Sets a course's priority weight.
    pub fn with_priority(mut self, course_code: impl Into<String>, weight: f64) -> Self {
        self.priority_weights.insert(course_code.into(), weight);
        self
    }

    /// Sets a course's familiarity score (1-5).
    pub fn with_familiarity(mut self, course_code: impl Into<String>, score: f64) -> Self {
        self.familiarity_by_course.insert(course_code.into(), score);
        self
    }

    /// Sets a course's weakness score (1-5).
    pub fn with_weakness(mut self, course_code: impl Into<String>, score: f64) -> Self {
        self.weakness_by_course.insert(course_code.into(), score);
        self
    }

    /// Sets a course's coverage percentage (0-100).
    pub fn with_coverage(mut self, course_code: impl Into<String>, percent: f64) -> Self {
        self.coverage_by_course.insert(course_code.into(), percent);
        self
    }

    /// Priority weight for a course, defaulted and floored at 0.25.
    pub fn priority_weight(&self, course_code: &str) -> f64 {
        self.priority_weights
            .get(course_code)
            .copied()
            .unwrap_or(DEFAULT_PRIORITY)
            .max(MIN_PRIORITY)
    }

    /// Familiarity for a course, defaulted to 3 and clamped to [1, 5].
    pub fn familiarity(&self, course_code: &str) -> f64 {
        self.familiarity_by_course
            .get(course_code)
            .copied()
            .unwrap_or(DEFAULT_LIKERT)
            .clamp(1.0, 5.0)
    }

    /// Weakness for a course, defaulted to 3 and clamped to [1, 5].
    pub fn weakness(&self, course_code: &str) -> f64 {
        self.weakness_by_course
            .get(course_code)
            .copied()
            .unwrap_or(DEFAULT_LIKERT)
            .clamp(1.0, 5.0)
    }

    /// Coverage for a course, defaulted to 0 and clamped to [0, 100].
    pub fn coverage(&self, course_code: &str) -> f64 {
        self.coverage_by_course
            .get(course_code)
            .copied()
            .unwrap_or(0.0)
            .clamp(0.0, 100.0)
    }
}
