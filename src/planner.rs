//! Study plan assembly.
//!
//! One `build_plan` call is a pure function of its inputs:
//!
//! 1. Resolve exam dates and the horizon, build day capacity.
//! 2. Reserve a final-review buffer on the day before each exam.
//! 3. Compute soft per-course targets from post-buffer capacity.
//! 4. Walk the horizon day by day, dispatching bounded chunks to the
//!    best-scoring course until the day or the work runs out.
//! 5. Derive feasibility and, if needed, the three shortfall warnings.
//!
//! The computation is single-threaded, performs no I/O, and always
//! terminates: the horizon is bounded by the latest exam date.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::allocator::target_hours_by_course;
use crate::capacity::DayCapacity;
use crate::deadline::{horizon_end, resolve_exam_dates};
use crate::dispatch::{pick_topic, select_course, MAX_CHUNK_HOURS, MIN_CHUNK_HOURS, REVIEW_CADENCE};
use crate::feasibility::{is_feasible, shortfall_warnings, EMPTY_INPUT_WARNING};
use crate::models::{
    CourseSchedule, PlanSummary, ScheduleRow, StudyConstraints, StudyPlan, TaskType, TopicEffort,
};
use crate::util::{round2, round4};

/// Hours reserved on the day before each exam.
const EXAM_BUFFER_HOURS: f64 = 1.0;
const FINAL_REVIEW_TOPIC_ID: &str = "final_review";
const FINAL_REVIEW_LABEL: &str = "Final Review";
const FINAL_REVIEW_NOTE: &str = "Reserved pre-exam buffer.";
const SPACED_REVIEW_NOTE: &str = "Spaced review block.";

/// The allocation and scheduling engine.
///
/// Stateless; all per-invocation state (day capacity, assigned hours,
/// contact counters) is scoped to one `build_plan` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct StudyPlanner;

impl StudyPlanner {
    /// Creates a planner.
    pub fn new() -> Self {
        Self
    }

    /// Builds a day-by-day plan from estimates, constraints, and courses.
    ///
    /// Rows come back sorted by (date, course_code, topic_id). An empty
    /// estimate list yields no rows, `feasible = false`, and a single
    /// advisory warning.
    pub fn build_plan(
        &self,
        estimates: &[TopicEffort],
        constraints: &StudyConstraints,
        courses: &BTreeMap<String, CourseSchedule>,
    ) -> StudyPlan {
        if estimates.is_empty() {
            return StudyPlan {
                rows: Vec::new(),
                summary: PlanSummary {
                    total_hours: 0.0,
                    hours_by_course: BTreeMap::new(),
                    feasible: false,
                    warnings: vec![EMPTY_INPUT_WARNING.to_string()],
                },
            };
        }

        let start = constraints.start_date;
        let exam_dates = resolve_exam_dates(courses, start);
        let end = horizon_end(&exam_dates, start);

        let base_capacity = DayCapacity::build(start, end, constraints);
        let mut day_capacity = base_capacity.clone();
        let mut rows: Vec<ScheduleRow> = Vec::new();

        reserve_exam_buffers(&exam_dates, start, &mut day_capacity, &mut rows);

        let capacity_total = day_capacity.total_hours();
        let required_by_course = required_hours_by_course(estimates);
        let targets = target_hours_by_course(
            &required_by_course,
            &exam_dates,
            constraints,
            start,
            capacity_total,
        );

        let topic_order = topic_order(courses);
        let topic_labels = topic_label_lookup(courses);
        let mut remaining: BTreeMap<(String, String), f64> = estimates
            .iter()
            .map(|e| ((e.course_code.clone(), e.topic_id.clone()), e.estimated_hours))
            .collect();
        let mut contact_count: BTreeMap<String, usize> = BTreeMap::new();
        let mut assigned: BTreeMap<String, f64> = BTreeMap::new();

        let mut current = start;
        while current <= end {
            let mut capacity = day_capacity.get(current);
            while capacity >= MIN_CHUNK_HOURS {
                let Some(course_code) = select_course(
                    current,
                    &remaining,
                    &exam_dates,
                    constraints,
                    &targets,
                    &assigned,
                ) else {
                    break;
                };
                let Some(topic_id) =
                    pick_topic(&course_code, &remaining, &topic_order).map(str::to_owned)
                else {
                    break;
                };

                let key = (course_code.clone(), topic_id.clone());
                let topic_remaining = remaining.get(&key).copied().unwrap_or(0.0);
                if topic_remaining <= 0.0 {
                    break;
                }

                let chunk = MAX_CHUNK_HOURS.min(capacity).min(topic_remaining);
                if round2(chunk) <= 0.0 {
                    // Residue below reporting precision: retire the topic
                    // rather than emit a zero-hour row.
                    remaining.insert(key, 0.0);
                    continue;
                }
                let contacts = contact_count.entry(course_code.clone()).or_insert(0);
                let task_type = if *contacts % REVIEW_CADENCE == REVIEW_CADENCE - 1 {
                    TaskType::Review
                } else {
                    TaskType::Study
                };
                let notes = match task_type {
                    TaskType::Review => SPACED_REVIEW_NOTE.to_string(),
                    TaskType::Study => String::new(),
                };
                let topic_label = topic_labels
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| topic_id.clone());

                rows.push(ScheduleRow {
                    date: current,
                    course_code: course_code.clone(),
                    task_type,
                    topic_id,
                    topic_label,
                    hours: round2(chunk),
                    notes,
                });

                remaining.insert(key, round4((topic_remaining - chunk).max(0.0)));
                capacity = round4(capacity - chunk);
                *contacts += 1;
                let assigned_entry = assigned.entry(course_code).or_insert(0.0);
                *assigned_entry = round4(*assigned_entry + chunk);
            }
            current += Duration::days(1);
        }

        let remaining_total = round2(remaining.values().filter(|&&h| h > 0.0).sum());
        let required_total = round2(estimates.iter().map(|e| e.estimated_hours).sum());
        let hours_by_course = hours_by_course(&rows);

        let feasible = is_feasible(remaining_total, required_total, capacity_total);
        let warnings = if feasible {
            Vec::new()
        } else {
            shortfall_warnings(
                remaining_total.max(round2(required_total - capacity_total)),
                &required_by_course,
                &assigned,
                base_capacity.day_count(),
            )
        };

        rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        let total_hours = round2(hours_by_course.values().sum());

        StudyPlan {
            rows,
            summary: PlanSummary {
                total_hours,
                hours_by_course,
                feasible,
                warnings,
            },
        }
    }
}

/// Reserves up to 1.0h on the day before each exam, capped by that day's
/// remaining capacity. Skips silently when the day precedes the horizon
/// start or has no capacity left.
fn reserve_exam_buffers(
    exam_dates: &BTreeMap<String, NaiveDate>,
    start: NaiveDate,
    day_capacity: &mut DayCapacity,
    rows: &mut Vec<ScheduleRow>,
) {
    for (course_code, &exam_day) in exam_dates {
        let buffer_day = exam_day - Duration::days(1);
        if buffer_day < start {
            continue;
        }
        let reserve = EXAM_BUFFER_HOURS.min(day_capacity.get(buffer_day));
        if reserve <= 0.0 {
            continue;
        }
        day_capacity.consume(buffer_day, reserve);
        rows.push(ScheduleRow {
            date: buffer_day,
            course_code: course_code.clone(),
            task_type: TaskType::Review,
            topic_id: FINAL_REVIEW_TOPIC_ID.to_string(),
            topic_label: FINAL_REVIEW_LABEL.to_string(),
            hours: round2(reserve),
            notes: FINAL_REVIEW_NOTE.to_string(),
        });
    }
}

fn required_hours_by_course(estimates: &[TopicEffort]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for estimate in estimates {
        *totals.entry(estimate.course_code.clone()).or_insert(0.0) += estimate.estimated_hours;
    }
    totals.into_iter().map(|(c, h)| (c, round2(h))).collect()
}

fn hours_by_course(rows: &[ScheduleRow]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for row in rows {
        *totals.entry(row.course_code.clone()).or_insert(0.0) += row.hours;
    }
    totals.into_iter().map(|(c, h)| (c, round2(h))).collect()
}

fn topic_order(courses: &BTreeMap<String, CourseSchedule>) -> BTreeMap<String, Vec<String>> {
    courses
        .iter()
        .map(|(code, course)| {
            let order = course.topics.iter().map(|t| t.topic_id.clone()).collect();
            (code.clone(), order)
        })
        .collect()
}

fn topic_label_lookup(
    courses: &BTreeMap<String, CourseSchedule>,
) -> BTreeMap<(String, String), String> {
    let mut lookup = BTreeMap::new();
    for (code, course) in courses {
        for topic in &course.topics {
            lookup.insert((code.clone(), topic.topic_id.clone()), topic.label.clone());
        }
    }
    lookup
}
