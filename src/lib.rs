//! Deadline-aware study planning engine.
//!
//! Computes a day-by-day allocation of limited daily study time across
//! competing courses, each with estimated per-topic effort, an exam date,
//! and user priority/skill signals. When demand exceeds capacity, a
//! water-filling allocator computes fair per-course targets and the plan
//! comes back infeasible with actionable shortfall guidance instead of
//! failing.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TopicEffort`, `CourseSchedule`,
//!   `StudyConstraints`, `ScheduleRow`, `PlanSummary`, `StudyPlan`
//! - **`capacity`**: Weekday/weekend daily hour budgets (`DayCapacity`)
//! - **`deadline`**: Effective exam dates and the planning horizon
//! - **`allocator`**: Proportional (water-filling) targets under scarcity
//! - **`dispatch`**: Multi-factor course scoring and topic selection
//! - **`planner`**: The `StudyPlanner` entry point tying it all together
//! - **`feasibility`**: Feasibility check and the three shortfall warnings
//! - **`validation`**: Input integrity checks at the data-model boundary
//! - **`export`**: CSV and Markdown rendering of a finished plan
//!
//! # Design
//!
//! The engine is a greedy, deterministic heuristic with explicit
//! tie-break rules — not an optimal solver. One invocation is a pure
//! function of its inputs: no I/O, no shared state, bounded by the
//! horizon length.
//!
//! # Example
//!
//! ```
//! use std::collections::BTreeMap;
//! use chrono::NaiveDate;
//! use cramplan::models::{CourseSchedule, StudyConstraints, TopicEffort};
//! use cramplan::planner::StudyPlanner;
//!
//! let start = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
//! let exam = NaiveDate::from_ymd_opt(2026, 2, 24).unwrap();
//!
//! let mut courses = BTreeMap::new();
//! courses.insert(
//!     "PHYS234".to_string(),
//!     CourseSchedule::new("PHYS234")
//!         .with_exam_date(exam)
//!         .with_topic("ch1", "Oscillations"),
//! );
//! let estimates = vec![TopicEffort::new("PHYS234", "ch1", 6.0)];
//! let constraints = StudyConstraints::new(start);
//!
//! let plan = StudyPlanner::new().build_plan(&estimates, &constraints, &courses);
//! assert!(plan.summary.feasible);
//! ```

pub mod allocator;
pub mod capacity;
pub mod deadline;
pub mod dispatch;
pub mod export;
pub mod feasibility;
pub mod models;
pub mod planner;
pub mod validation;

mod util;

pub use models::{
    Confidence, CourseSchedule, PlanSummary, ScheduleRow, StudyConstraints, StudyPlan, TaskType,
    TopicEffort, TopicSpec,
};
pub use planner::StudyPlanner;
