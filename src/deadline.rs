//! Effective exam-date resolution.
//!
//! Each course resolves to its stated exam date, or `start + 14 days`
//! when none is known. The latest resolved date bounds the planning
//! horizon; with no courses at all the horizon is also `start + 14 days`.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::models::CourseSchedule;

/// Fallback horizon length for courses without a stated exam date.
pub const DEFAULT_HORIZON_DAYS: i64 = 14;

/// Resolves an effective exam date for every course.
pub fn resolve_exam_dates(
    courses: &BTreeMap<String, CourseSchedule>,
    start: NaiveDate,
) -> BTreeMap<String, NaiveDate> {
    courses
        .iter()
        .map(|(code, course)| {
            let exam = course
                .exam_date
                .unwrap_or(start + Duration::days(DEFAULT_HORIZON_DAYS));
            (code.clone(), exam)
        })
        .collect()
}

/// Last day of the planning horizon: the latest effective exam date,
/// or `start + 14 days` when there are no courses.
pub fn horizon_end(exam_dates: &BTreeMap<String, NaiveDate>, start: NaiveDate) -> NaiveDate {
    exam_dates
        .values()
        .max()
        .copied()
        .unwrap_or(start + Duration::days(DEFAULT_HORIZON_DAYS))
}
