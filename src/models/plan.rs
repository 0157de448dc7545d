//! Plan output types.
//!
//! A finished plan is an ordered list of schedule rows plus one summary.
//! Rows are sorted by (date, course_code, topic_id) regardless of the
//! order in which the planner generated them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of work a schedule row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    /// First-pass study of new material.
    Study,
    /// Spaced review or the pre-exam consolidation buffer.
    Review,
}

impl TaskType {
    /// Wire/display name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TaskType::Study => "study",
            TaskType::Review => "review",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scheduled block: a course topic on a date for a number of hours.
///
/// Only emitted when `hours > 0`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Calendar day of the block.
    pub date: NaiveDate,
    /// Course the block belongs to.
    pub course_code: String,
    /// Study or review.
    pub task_type: TaskType,
    /// Topic identifier ("final_review" for pre-exam buffers).
    pub topic_id: String,
    /// Human-readable topic label.
    pub topic_label: String,
    /// Hours assigned (rounded to 2 decimals, > 0).
    pub hours: f64,
    /// Optional annotation (e.g., "Spaced review block.").
    pub notes: String,
}

impl ScheduleRow {
    /// Canonical output ordering key: (date, course_code, topic_id).
    pub fn sort_key(&self) -> (NaiveDate, &str, &str) {
        (self.date, &self.course_code, &self.topic_id)
    }
}

/// Aggregate outcome of one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Total hours across all rows.
    pub total_hours: f64,
    /// Hours per course, sorted by course code.
    pub hours_by_course: BTreeMap<String, f64>,
    /// Whether all estimated effort fit within capacity.
    pub feasible: bool,
    /// Empty when feasible; exactly three mitigation messages when the
    /// plan is infeasible (one advisory message for empty input).
    pub warnings: Vec<String>,
}

/// A complete plan: ordered rows plus summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyPlan {
    /// Schedule rows sorted by (date, course_code, topic_id).
    pub rows: Vec<ScheduleRow>,
    /// Plan-level summary.
    pub summary: PlanSummary,
}

impl StudyPlan {
    /// Total hours scheduled for one course across all rows.
    pub fn hours_for_course(&self, course_code: &str) -> f64 {
        self.rows
            .iter()
            .filter(|row| row.course_code == course_code)
            .map(|row| row.hours)
            .sum()
    }

    /// Total hours scheduled on one date across all rows.
    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        self.rows
            .iter()
            .filter(|row| row.date == date)
            .map(|row| row.hours)
            .sum()
    }
}
