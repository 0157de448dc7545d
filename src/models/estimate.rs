//! Topic effort estimates.
//!
//! An estimate is produced by an external estimator (page counts,
//! difficulty multipliers, user profile) and is immutable once built.
//! The planner consumes estimates as-is and never re-derives hours.

use serde::{Deserialize, Serialize};

/// How trustworthy an effort estimate is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Grounded in explicit syllabus/chapter data.
    High,
    /// Partially inferred.
    Medium,
    /// Mostly defaulted.
    #[default]
    Low,
}

/// Estimated study effort for one topic of one course.
///
/// Identity is `(course_code, topic_id)` and must be unique among the
/// estimates passed to the planner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEffort {
    /// Course this topic belongs to (e.g., "PHYS234").
    pub course_code: String,
    /// Topic identifier within the course (e.g., "ch3").
    pub topic_id: String,
    /// Estimated hours of study needed (>= 0).
    pub estimated_hours: f64,
    /// Confidence in the estimate.
    pub confidence: Confidence,
    /// Free-text description of how the estimate was derived.
    pub basis: String,
}

impl TopicEffort {
    /// Creates an estimate with low confidence and no basis text.
    pub fn new(
        course_code: impl Into<String>,
        topic_id: impl Into<String>,
        estimated_hours: f64,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            topic_id: topic_id.into(),
            estimated_hours,
            confidence: Confidence::Low,
            basis: String::new(),
        }
    }

    /// Sets the confidence level.
    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Sets the basis text.
    pub fn with_basis(mut self, basis: impl Into<String>) -> Self {
        self.basis = basis.into();
        self
    }
}
