//! Course and topic selection for day-by-day dispatch.
//!
//! Each inner dispatch iteration scores every course with remaining work
//! and picks the best one, then takes that course's first unfinished topic
//! in declared order. Signals are recomputed fresh before every chunk —
//! assigned and remaining hours change after each one, so cached scores
//! would go stale.
//!
//! # Score convention
//! Higher score = dispatched first. A course whose exam is today or
//! earlier is ineligible. Ties break toward the lexicographically
//! smallest course code (courses are visited in sorted order and a
//! later course must strictly beat the incumbent).

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::deadline::DEFAULT_HORIZON_DAYS;
use crate::models::StudyConstraints;

/// Smallest schedulable slice of a day (hours).
pub const MIN_CHUNK_HOURS: f64 = 0.25;
/// Largest single block assigned to one topic on one day (hours).
pub const MAX_CHUNK_HOURS: f64 = 1.5;
/// Every `REVIEW_CADENCE`-th contact with a course becomes a review block.
pub const REVIEW_CADENCE: usize = 3;

const W_PACE_PRESSURE: f64 = 2.8;
const W_COMPLETION_GAP: f64 = 1.4;
const W_URGENCY: f64 = 1.2;
const W_PRIORITY: f64 = 0.25;
const W_REMAINING: f64 = 0.03;
const FAMILIARITY_STEP: f64 = 0.12;
const WEAKNESS_STEP: f64 = 0.16;
/// Penalty for courses already on target while another still lags.
const ON_TARGET_PENALTY: f64 = 1.5;
/// Shortfall below this counts as "on target".
const ACTIVE_SHORTFALL_EPS: f64 = 0.01;
/// A course must score above this to be dispatched at all.
const SCORE_FLOOR: f64 = -1.0;

/// Per-course scoring inputs, recomputed before every chunk.
#[derive(Debug, Clone, Copy)]
pub struct CourseSignals {
    /// Unassigned topic hours summed across the course.
    pub remaining_hours: f64,
    /// Days until the effective exam date (> 0 for eligible courses).
    pub days_to_exam: i64,
    /// Priority weight (>= 0.25).
    pub priority: f64,
    /// Familiarity score in [1, 5].
    pub familiarity: f64,
    /// Weakness score in [1, 5].
    pub weakness: f64,
    /// Allocation target, floored at 0.5h.
    pub target: f64,
    /// Unmet portion of the target (>= 0).
    pub shortfall: f64,
}

impl CourseSignals {
    /// Multi-factor dispatch score.
    ///
    /// When `penalize_on_target` is set (some course still lags its
    /// target), courses with no shortfall of their own are pushed down so
    /// the lagging course catches up.
    pub fn score(&self, penalize_on_target: bool) -> f64 {
        let days = self.days_to_exam as f64;
        let urgency = 1.0 / (days + 1.0);
        let pace_pressure = self.shortfall / days.max(1.0);
        let completion_gap = self.shortfall / self.target;
        let familiarity_boost = (3.0 - self.familiarity).max(0.0) * FAMILIARITY_STEP;
        let weakness_boost = (self.weakness - 3.0).max(0.0) * WEAKNESS_STEP;

        let mut score = W_PACE_PRESSURE * pace_pressure
            + W_COMPLETION_GAP * completion_gap
            + W_URGENCY * urgency
            + W_PRIORITY * self.priority
            + W_REMAINING * self.remaining_hours
            + familiarity_boost
            + weakness_boost;
        if penalize_on_target && self.shortfall <= ACTIVE_SHORTFALL_EPS {
            score -= ON_TARGET_PENALTY;
        }
        score
    }
}

/// Picks the best course to work on today, or `None` when no course has
/// eligible remaining work.
pub fn select_course(
    today: NaiveDate,
    remaining: &BTreeMap<(String, String), f64>,
    exam_dates: &BTreeMap<String, NaiveDate>,
    constraints: &StudyConstraints,
    targets: &BTreeMap<String, f64>,
    assigned: &BTreeMap<String, f64>,
) -> Option<String> {
    let mut remaining_by_course: BTreeMap<&str, f64> = BTreeMap::new();
    for ((course_code, _topic_id), &hours) in remaining {
        if hours > 0.0 {
            *remaining_by_course.entry(course_code.as_str()).or_insert(0.0) += hours;
        }
    }

    let shortfall_of = |code: &str| -> f64 {
        let target = targets.get(code).copied().unwrap_or(0.0);
        let done = assigned.get(code).copied().unwrap_or(0.0);
        (target - done).max(0.0)
    };
    let has_active_shortfall = remaining_by_course
        .keys()
        .any(|code| shortfall_of(code) > ACTIVE_SHORTFALL_EPS);

    let mut best_score = SCORE_FLOOR;
    let mut best_course: Option<&str> = None;
    for (&course_code, &remaining_hours) in &remaining_by_course {
        let exam = exam_dates
            .get(course_code)
            .copied()
            .unwrap_or(today + Duration::days(DEFAULT_HORIZON_DAYS));
        let days_to_exam = (exam - today).num_days();
        if days_to_exam <= 0 {
            continue;
        }

        let signals = CourseSignals {
            remaining_hours,
            days_to_exam,
            priority: constraints.priority_weight(course_code),
            familiarity: constraints.familiarity(course_code),
            weakness: constraints.weakness(course_code),
            target: targets
                .get(course_code)
                .copied()
                .unwrap_or(remaining_hours)
                .max(0.5),
            shortfall: shortfall_of(course_code),
        };
        let score = signals.score(has_active_shortfall);
        if score > best_score {
            best_score = score;
            best_course = Some(course_code);
        }
    }
    best_course.map(str::to_owned)
}

/// First topic of the course, in declared order, with remaining hours.
pub fn pick_topic<'a>(
    course_code: &str,
    remaining: &BTreeMap<(String, String), f64>,
    topic_order: &'a BTreeMap<String, Vec<String>>,
) -> Option<&'a str> {
    topic_order.get(course_code)?.iter().find_map(|topic_id| {
        let key = (course_code.to_string(), topic_id.clone());
        (remaining.get(&key).copied().unwrap_or(0.0) > 0.0).then_some(topic_id.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn signals() -> CourseSignals {
        CourseSignals {
            remaining_hours: 10.0,
            days_to_exam: 10,
            priority: 1.0,
            familiarity: 3.0,
            weakness: 3.0,
            target: 10.0,
            shortfall: 10.0,
        }
    }

    fn remaining(entries: &[(&str, &str, f64)]) -> BTreeMap<(String, String), f64> {
        entries
            .iter()
            .map(|(c, t, h)| ((c.to_string(), t.to_string()), *h))
            .collect()
    }

    #[test]
    fn test_closer_exam_scores_higher() {
        let near = CourseSignals {
            days_to_exam: 2,
            ..signals()
        };
        let far = CourseSignals {
            days_to_exam: 20,
            ..signals()
        };
        assert!(near.score(false) > far.score(false));
    }

    #[test]
    fn test_unfamiliar_and_weak_boosted() {
        let base = signals();
        let unfamiliar = CourseSignals {
            familiarity: 1.0,
            ..base
        };
        let weak = CourseSignals {
            weakness: 5.0,
            ..base
        };
        assert!(unfamiliar.score(false) > base.score(false));
        assert!(weak.score(false) > base.score(false));
    }

    #[test]
    fn test_on_target_penalty_applies_only_under_active_shortfall() {
        let on_target = CourseSignals {
            shortfall: 0.0,
            ..signals()
        };
        assert!(on_target.score(true) < on_target.score(false));
        assert!((on_target.score(false) - on_target.score(true) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_select_skips_past_exams() {
        let today = date(2026, 2, 10);
        let remaining = remaining(&[("PAST", "ch1", 5.0), ("OPEN", "ch1", 5.0)]);
        let mut exam_dates = BTreeMap::new();
        exam_dates.insert("PAST".to_string(), date(2026, 2, 10));
        exam_dates.insert("OPEN".to_string(), date(2026, 2, 20));
        let constraints = StudyConstraints::new(today);
        let picked = select_course(
            today,
            &remaining,
            &exam_dates,
            &constraints,
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert_eq!(picked.as_deref(), Some("OPEN"));
    }

    #[test]
    fn test_select_none_when_no_work_left() {
        let today = date(2026, 2, 10);
        let remaining = remaining(&[("A", "ch1", 0.0)]);
        let constraints = StudyConstraints::new(today);
        let picked = select_course(
            today,
            &remaining,
            &BTreeMap::new(),
            &constraints,
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert!(picked.is_none());
    }

    #[test]
    fn test_tie_breaks_to_lowest_course_code() {
        let today = date(2026, 2, 10);
        let remaining = remaining(&[("BBB", "ch1", 5.0), ("AAA", "ch1", 5.0)]);
        let mut exam_dates = BTreeMap::new();
        exam_dates.insert("AAA".to_string(), date(2026, 2, 20));
        exam_dates.insert("BBB".to_string(), date(2026, 2, 20));
        let constraints = StudyConstraints::new(today);
        // Identical signals in every respect: AAA wins on course code.
        let picked = select_course(
            today,
            &remaining,
            &exam_dates,
            &constraints,
            &BTreeMap::new(),
            &BTreeMap::new(),
        );
        assert_eq!(picked.as_deref(), Some("AAA"));
    }

    #[test]
    fn test_lagging_course_beats_on_target_course() {
        let today = date(2026, 2, 10);
        let remaining = remaining(&[("AHEAD", "ch1", 5.0), ("BEHIND", "ch1", 5.0)]);
        let mut exam_dates = BTreeMap::new();
        exam_dates.insert("AHEAD".to_string(), date(2026, 2, 20));
        exam_dates.insert("BEHIND".to_string(), date(2026, 2, 20));
        let mut targets = BTreeMap::new();
        targets.insert("AHEAD".to_string(), 4.0);
        targets.insert("BEHIND".to_string(), 4.0);
        let mut assigned = BTreeMap::new();
        assigned.insert("AHEAD".to_string(), 4.0);
        let constraints = StudyConstraints::new(today);
        let picked = select_course(
            today,
            &remaining,
            &exam_dates,
            &constraints,
            &targets,
            &assigned,
        );
        assert_eq!(picked.as_deref(), Some("BEHIND"));
    }

    #[test]
    fn test_pick_topic_respects_declared_order() {
        let remaining = remaining(&[("A", "ch1", 0.0), ("A", "ch2", 3.0), ("A", "ch3", 3.0)]);
        let mut order = BTreeMap::new();
        order.insert(
            "A".to_string(),
            vec!["ch1".to_string(), "ch2".to_string(), "ch3".to_string()],
        );
        assert_eq!(pick_topic("A", &remaining, &order), Some("ch2"));
    }

    #[test]
    fn test_pick_topic_unknown_course() {
        let remaining = remaining(&[("A", "ch1", 3.0)]);
        let order = BTreeMap::new();
        assert_eq!(pick_topic("A", &remaining, &order), None);
    }
}
