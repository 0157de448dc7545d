//! Feasibility determination and shortfall guidance.
//!
//! A plan is feasible iff nearly all per-topic effort was placed
//! (leftover <= 0.5h in total) and total demand fit within capacity.
//! Scarcity is not an error: an infeasible plan is still returned, with
//! exactly three prioritized mitigation messages.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Total leftover topic hours tolerated in a feasible plan.
pub const REMAINING_TOLERANCE_HOURS: f64 = 0.5;
/// Slack allowed when comparing demand against capacity.
pub const CAPACITY_TOLERANCE_HOURS: f64 = 0.01;

/// Advisory attached to a plan built from zero topic estimates.
pub const EMPTY_INPUT_WARNING: &str =
    "No topic estimates were provided; nothing to schedule. \
     Add at least one course topic with estimated hours and plan again.";

/// Number of courses named in the uncovered-load warning.
const TOP_GAP_COUNT: usize = 2;
/// Gaps at or below this are treated as covered.
const GAP_EPS: f64 = 0.01;

/// Whether the plan realized all required effort within capacity.
pub fn is_feasible(remaining_total: f64, required_total: f64, capacity_total: f64) -> bool {
    remaining_total <= REMAINING_TOLERANCE_HOURS
        && required_total <= capacity_total + CAPACITY_TOLERANCE_HOURS
}

/// Builds the three ordered infeasibility warnings:
/// shortfall magnitude, the two largest per-course gaps, and a fixed
/// scope-reduction suggestion.
pub fn shortfall_warnings(
    shortfall: f64,
    required_by_course: &BTreeMap<String, f64>,
    assigned_by_course: &BTreeMap<String, f64>,
    planning_days: usize,
) -> Vec<String> {
    let effective_shortfall = shortfall.max(0.0);
    let extra_per_day = effective_shortfall / planning_days.max(1) as f64;

    let mut uncovered: Vec<(&str, f64)> = required_by_course
        .iter()
        .map(|(course_code, &required)| {
            let assigned = assigned_by_course.get(course_code).copied().unwrap_or(0.0);
            (course_code.as_str(), (required - assigned).max(0.0))
        })
        .collect();
    uncovered.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let top_gaps: Vec<String> = uncovered
        .iter()
        .filter(|(_, gap)| *gap > GAP_EPS)
        .take(TOP_GAP_COUNT)
        .map(|(course_code, gap)| format!("{course_code} ({gap:.1}h)"))
        .collect();
    let gap_text = if top_gaps.is_empty() {
        "none".to_string()
    } else {
        top_gaps.join(", ")
    };

    vec![
        format!(
            "Current scope exceeds available study time by about {effective_shortfall:.1} hours; \
             add roughly {extra_per_day:.1} hours/day to fully cover all topics."
        ),
        format!("Largest uncovered load: {gap_text}. Prioritize these first in your next iteration."),
        "If time cannot increase, trim low-priority chapters and use a compressed mix: \
         60% practice, 25% review, 15% reading."
            .to_string(),
    ]
}
