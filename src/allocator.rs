//! Water-filling target allocation under scarcity.
//!
//! When total demand fits within capacity, every course's target is simply
//! its full required hours. Under scarcity, capacity is split fairly:
//! each course first receives a small guaranteed floor, then the remainder
//! is distributed over up to six refinement rounds, proportionally to a
//! weight combining demand size, exam urgency, and user priority. Targets
//! are soft — the dispatcher uses them as a scoring signal, never a cap.
//!
//! The allocation is a pure function of its inputs. The 1e-6 minimum-
//! progress cutoff terminates the rounds once float residue is all that
//! remains, which keeps the result deterministic.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::deadline::DEFAULT_HORIZON_DAYS;
use crate::models::StudyConstraints;
use crate::util::round2;

/// Demand within this margin of capacity still counts as "no scarcity".
const SCARCITY_TOLERANCE: f64 = 0.01;
/// Smallest per-course floor (hours).
const FLOOR_MIN_HOURS: f64 = 0.75;
/// Largest per-course floor (hours).
const FLOOR_MAX_HOURS: f64 = 3.0;
/// Fraction of total capacity split evenly into floors.
const FLOOR_CAPACITY_SHARE: f64 = 0.12;
/// Maximum refinement rounds.
const REFINEMENT_ROUNDS: usize = 6;
/// A round adding less than this terminates the fill early.
const MIN_ROUND_PROGRESS: f64 = 1e-6;
/// Sub-linear exponent damping the demand-size factor.
const DEMAND_EXPONENT: f64 = 0.7;
/// Gain on the 1/(days+1) urgency factor.
const URGENCY_GAIN: f64 = 8.0;

/// Computes a per-course hour target given total remaining capacity.
///
/// Returns the full demand per course when it fits; otherwise a fair
/// partial allocation, rounded to 2 decimals.
pub fn target_hours_by_course(
    required_by_course: &BTreeMap<String, f64>,
    exam_dates: &BTreeMap<String, NaiveDate>,
    constraints: &StudyConstraints,
    start: NaiveDate,
    capacity_total: f64,
) -> BTreeMap<String, f64> {
    if required_by_course.is_empty() {
        return BTreeMap::new();
    }

    let course_codes: Vec<&str> = required_by_course
        .iter()
        .filter(|(_, &hours)| hours > 0.0)
        .map(|(code, _)| code.as_str())
        .collect();
    if course_codes.is_empty() {
        return BTreeMap::new();
    }

    let total_required: f64 = required_by_course.values().sum();
    if total_required <= capacity_total + SCARCITY_TOLERANCE {
        return required_by_course.clone();
    }

    let allocatable = capacity_total.max(0.0);
    let mut targets: BTreeMap<&str, f64> = course_codes.iter().map(|&c| (c, 0.0)).collect();

    let min_share = (allocatable * FLOOR_CAPACITY_SHARE / course_codes.len().max(1) as f64)
        .max(FLOOR_MIN_HOURS)
        .min(FLOOR_MAX_HOURS);
    for &code in &course_codes {
        targets.insert(code, required_by_course[code].min(min_share));
    }

    let mut floor_total: f64 = targets.values().sum();
    if floor_total > allocatable && floor_total > 0.0 {
        let scale = allocatable / floor_total;
        for target in targets.values_mut() {
            *target *= scale;
        }
        floor_total = targets.values().sum();
    }

    let mut remaining_capacity = (allocatable - floor_total).max(0.0);

    let weights: BTreeMap<&str, f64> = course_codes
        .iter()
        .map(|&code| {
            let exam = exam_dates
                .get(code)
                .copied()
                .unwrap_or(start + Duration::days(DEFAULT_HORIZON_DAYS));
            let days_to_exam = (exam - start).num_days().max(1);
            let urgency_factor = 1.0 + URGENCY_GAIN / (days_to_exam as f64 + 1.0);
            let demand_factor = required_by_course[code].max(0.5).powf(DEMAND_EXPONENT);
            let priority_factor = constraints.priority_weight(code);
            (code, demand_factor * urgency_factor * priority_factor)
        })
        .collect();

    for _ in 0..REFINEMENT_ROUNDS {
        if remaining_capacity <= SCARCITY_TOLERANCE {
            break;
        }

        let room: BTreeMap<&str, f64> = course_codes
            .iter()
            .map(|&code| (code, (required_by_course[code] - targets[code]).max(0.0)))
            .collect();
        let weighted_room_total: f64 = course_codes
            .iter()
            .filter(|&&code| room[code] > 0.0)
            .map(|&code| weights[code] * room[code])
            .sum();
        if weighted_room_total <= 0.0 {
            break;
        }

        let mut added = 0.0;
        for &code in &course_codes {
            if room[code] <= 0.0 {
                continue;
            }
            let proportional = remaining_capacity * (weights[code] * room[code]) / weighted_room_total;
            let increment = room[code].min(proportional);
            if let Some(target) = targets.get_mut(code) {
                *target += increment;
            }
            added += increment;
        }
        if added <= MIN_ROUND_PROGRESS {
            break;
        }
        remaining_capacity = (remaining_capacity - added).max(0.0);
    }

    targets
        .into_iter()
        .map(|(code, hours)| (code.to_string(), round2(hours)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn start() -> NaiveDate {
        date(2026, 2, 10)
    }

    fn demand(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(c, h)| (c.to_string(), *h)).collect()
    }

    fn exams(pairs: &[(&str, NaiveDate)]) -> BTreeMap<String, NaiveDate> {
        pairs.iter().map(|(c, d)| (c.to_string(), *d)).collect()
    }

    #[test]
    fn test_no_scarcity_passes_demand_through() {
        let required = demand(&[("A", 8.0), ("B", 6.0)]);
        let exam_dates = exams(&[("A", date(2026, 2, 24)), ("B", date(2026, 2, 26))]);
        let constraints = StudyConstraints::new(start());
        let targets =
            target_hours_by_course(&required, &exam_dates, &constraints, start(), 50.0);
        assert_eq!(targets["A"], 8.0);
        assert_eq!(targets["B"], 6.0);
    }

    #[test]
    fn test_scarcity_targets_fit_capacity() {
        let required = demand(&[("A", 20.0), ("B", 30.0), ("C", 10.0)]);
        let exam_dates = exams(&[
            ("A", date(2026, 2, 20)),
            ("B", date(2026, 2, 24)),
            ("C", date(2026, 2, 26)),
        ]);
        let constraints = StudyConstraints::new(start());
        let capacity = 25.0;
        let targets =
            target_hours_by_course(&required, &exam_dates, &constraints, start(), capacity);

        let total: f64 = targets.values().sum();
        assert!(total <= capacity + 0.05, "total {total} exceeds capacity");
        // No course starved, none over-filled.
        for (code, &target) in &targets {
            assert!(target > 0.0, "course {code} starved");
            assert!(target <= required[code] + 0.01);
        }
    }

    #[test]
    fn test_urgent_course_gets_larger_share() {
        // Same demand and priority; A's exam is much closer.
        let required = demand(&[("A", 20.0), ("B", 20.0)]);
        let exam_dates = exams(&[("A", date(2026, 2, 13)), ("B", date(2026, 3, 10))]);
        let constraints = StudyConstraints::new(start());
        let targets =
            target_hours_by_course(&required, &exam_dates, &constraints, start(), 15.0);
        assert!(targets["A"] > targets["B"]);
    }

    #[test]
    fn test_priority_weight_shifts_allocation() {
        let required = demand(&[("A", 20.0), ("B", 20.0)]);
        let exam_dates = exams(&[("A", date(2026, 2, 24)), ("B", date(2026, 2, 24))]);
        let constraints = StudyConstraints::new(start()).with_priority("B", 2.0);
        let targets =
            target_hours_by_course(&required, &exam_dates, &constraints, start(), 15.0);
        assert!(targets["B"] > targets["A"]);
    }

    #[test]
    fn test_floors_scaled_down_when_capacity_tiny() {
        let required = demand(&[("A", 10.0), ("B", 10.0), ("C", 10.0)]);
        let exam_dates = exams(&[
            ("A", date(2026, 2, 24)),
            ("B", date(2026, 2, 24)),
            ("C", date(2026, 2, 24)),
        ]);
        let constraints = StudyConstraints::new(start());
        // Capacity below the floor total (3 x 0.75 = 2.25).
        let targets = target_hours_by_course(&required, &exam_dates, &constraints, start(), 1.5);
        let total: f64 = targets.values().sum();
        assert!(total <= 1.5 + 0.01);
    }

    #[test]
    fn test_zero_demand_courses_excluded() {
        let required = demand(&[("A", 0.0), ("B", 12.0)]);
        let exam_dates = exams(&[("A", date(2026, 2, 24)), ("B", date(2026, 2, 24))]);
        let constraints = StudyConstraints::new(start());
        let targets = target_hours_by_course(&required, &exam_dates, &constraints, start(), 5.0);
        assert!(!targets.contains_key("A"));
        assert!(targets["B"] > 0.0);
    }

    #[test]
    fn test_empty_demand() {
        let constraints = StudyConstraints::new(start());
        let targets = target_hours_by_course(
            &BTreeMap::new(),
            &BTreeMap::new(),
            &constraints,
            start(),
            10.0,
        );
        assert!(targets.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let required = demand(&[("A", 17.0), ("B", 9.0), ("C", 22.5)]);
        let exam_dates = exams(&[
            ("A", date(2026, 2, 18)),
            ("B", date(2026, 2, 22)),
            ("C", date(2026, 3, 1)),
        ]);
        let constraints = StudyConstraints::new(start()).with_priority("A", 1.2);
        let first = target_hours_by_course(&required, &exam_dates, &constraints, start(), 20.0);
        let second = target_hours_by_course(&required, &exam_dates, &constraints, start(), 20.0);
        assert_eq!(first, second);
    }
}
