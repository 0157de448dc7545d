//! Study-planning domain models.
//!
//! Inputs (`TopicEffort`, `CourseSchedule`, `StudyConstraints`) are built
//! fresh per planning invocation by the calling layer; outputs
//! (`ScheduleRow`, `PlanSummary`, `StudyPlan`) are pure values. The engine
//! holds no state between invocations.

mod constraints;
mod course;
mod estimate;
mod plan;

pub use constraints::StudyConstraints;
pub use course::{CourseSchedule, TopicSpec};
pub use estimate::{Confidence, TopicEffort};
pub use plan::{PlanSummary, ScheduleRow, StudyPlan, TaskType};
