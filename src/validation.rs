//! Input validation for planning problems.
//!
//! Checks structural integrity of estimates, constraints, and course
//! specs before planning. Detects:
//! - Duplicate (course, topic) identities
//! - Non-finite or negative hour values
//! - Estimates referencing unknown courses
//!
//! The planner itself assumes validated input and does not re-validate;
//! run these checks at the data-model boundary.

use std::collections::{BTreeMap, HashSet};

use crate::models::{CourseSchedule, StudyConstraints, TopicEffort};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two estimates (or two course topics) share an identity.
    DuplicateTopic,
    /// An hour value is NaN or infinite.
    NonFiniteHours,
    /// An estimated effort is negative.
    NegativeHours,
    /// An estimate references a course missing from the course map.
    UnknownCourse,
    /// A constraint value is NaN or infinite.
    NonFiniteConstraint,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates planner input.
///
/// Checks:
/// 1. No duplicate (course_code, topic_id) among estimates
/// 2. No duplicate topic IDs within a course spec
/// 3. All estimated hours are finite and non-negative
/// 4. Every estimate's course exists in the course map
/// 5. All constraint hour values and per-course signals are finite
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    estimates: &[TopicEffort],
    constraints: &StudyConstraints,
    courses: &BTreeMap<String, CourseSchedule>,
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut seen = HashSet::new();
    for estimate in estimates {
        let key = (estimate.course_code.as_str(), estimate.topic_id.as_str());
        if !seen.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTopic,
                format!(
                    "Duplicate estimate for ({}, {})",
                    estimate.course_code, estimate.topic_id
                ),
            ));
        }
        if !estimate.estimated_hours.is_finite() {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonFiniteHours,
                format!(
                    "Estimated hours for ({}, {}) is not finite",
                    estimate.course_code, estimate.topic_id
                ),
            ));
        } else if estimate.estimated_hours < 0.0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeHours,
                format!(
                    "Estimated hours for ({}, {}) is negative: {}",
                    estimate.course_code, estimate.topic_id, estimate.estimated_hours
                ),
            ));
        }
        if !courses.contains_key(&estimate.course_code) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownCourse,
                format!("Estimate references unknown course: {}", estimate.course_code),
            ));
        }
    }

    for (code, course) in courses {
        let mut topic_ids = HashSet::new();
        for topic in &course.topics {
            if !topic_ids.insert(topic.topic_id.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateTopic,
                    format!("Duplicate topic ID in course {}: {}", code, topic.topic_id),
                ));
            }
        }
    }

    if !constraints.hours_per_weekday.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFiniteConstraint,
            "hours_per_weekday is not finite",
        ));
    }
    if !constraints.hours_per_weekend.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFiniteConstraint,
            "hours_per_weekend is not finite",
        ));
    }
    let signal_maps = [
        ("priority_weights", &constraints.priority_weights),
        ("familiarity_by_course", &constraints.familiarity_by_course),
        ("weakness_by_course", &constraints.weakness_by_course),
        ("coverage_by_course", &constraints.coverage_by_course),
    ];
    for (map_name, map) in signal_maps {
        for (course_code, value) in map {
            if !value.is_finite() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::NonFiniteConstraint,
                    format!("{map_name}[{course_code}] is not finite"),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
