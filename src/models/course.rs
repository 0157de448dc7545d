//! Course and topic specifications.
//!
//! A course carries an optional exam date and an ordered topic list.
//! Topic order is significant: the dispatcher always serves the earliest
//! unfinished topic of a course first.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One schedulable unit within a course (e.g., a chapter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicSpec {
    /// Topic identifier, unique within the course.
    pub topic_id: String,
    /// Human-readable label (e.g., "Chapter 3: Oscillations").
    pub label: String,
}

impl TopicSpec {
    /// Creates a topic spec.
    pub fn new(topic_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            topic_id: topic_id.into(),
            label: label.into(),
        }
    }
}

/// A course with its exam date and ordered topics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSchedule {
    /// Course code (e.g., "PHYS234").
    pub course_code: String,
    /// Exam date, if known. `None` falls back to start + 14 days.
    pub exam_date: Option<NaiveDate>,
    /// Topics in intra-course dispatch order.
    pub topics: Vec<TopicSpec>,
}

impl CourseSchedule {
    /// Creates a course with no exam date and no topics.
    pub fn new(course_code: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            exam_date: None,
            topics: Vec::new(),
        }
    }

    /// Sets the exam date.
    pub fn with_exam_date(mut self, exam_date: NaiveDate) -> Self {
        self.exam_date = Some(exam_date);
        self
    }

    /// Appends a topic to the course's dispatch order.
    pub fn with_topic(mut self, topic_id: impl Into<String>, label: impl Into<String>) -> Self {
        self.topics.push(TopicSpec::new(topic_id, label));
        self
    }

    /// Looks up a topic's label by ID.
    pub fn topic_label(&self, topic_id: &str) -> Option<&str> {
        self.topics
            .iter()
            .find(|t| t.topic_id == topic_id)
            .map(|t| t.label.as_str())
    }
}
