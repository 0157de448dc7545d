//! Plan export: CSV table and Markdown report.
//!
//! The CSV carries the fixed column order
//! `date, course_code, task_type, topic_id, topic_label, hours, notes`;
//! the Markdown report puts its "Summary" section before the
//! "Day-by-Day Plan" table. Rows are written in
//! (date, course_code, topic_id, task_type) order.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::{PlanSummary, ScheduleRow};

/// CSV column order, matching `ScheduleRow` field order.
pub const CSV_HEADERS: [&str; 7] = [
    "date",
    "course_code",
    "task_type",
    "topic_id",
    "topic_label",
    "hours",
    "notes",
];

const CSV_FILENAME: &str = "study_plan.csv";
const MARKDOWN_FILENAME: &str = "study_plan.md";

/// Export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Output directory or file could not be written.
    #[error("failed to write plan file: {0}")]
    Io(#[from] io::Error),
    /// CSV encoding failed.
    #[error("failed to encode plan CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Paths of the written artifacts.
#[derive(Debug, Clone)]
pub struct ExportPaths {
    /// Path of `study_plan.csv`.
    pub csv_path: PathBuf,
    /// Path of `study_plan.md`.
    pub markdown_path: PathBuf,
}

/// Writes `study_plan.csv` and `study_plan.md` into `output_dir`,
/// creating the directory if needed.
pub fn export_plan(
    rows: &[ScheduleRow],
    summary: &PlanSummary,
    output_dir: &Path,
) -> Result<ExportPaths, ExportError> {
    fs::create_dir_all(output_dir)?;
    let csv_path = output_dir.join(CSV_FILENAME);
    let markdown_path = output_dir.join(MARKDOWN_FILENAME);

    write_csv(rows, &csv_path)?;
    fs::write(&markdown_path, render_markdown(rows, summary))?;

    Ok(ExportPaths {
        csv_path,
        markdown_path,
    })
}

/// Writes the plan as CSV with the fixed header row.
pub fn write_csv(rows: &[ScheduleRow], path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(CSV_HEADERS)?;
    for row in export_order(rows) {
        writer.write_record([
            row.date.to_string(),
            row.course_code.clone(),
            row.task_type.to_string(),
            row.topic_id.clone(),
            row.topic_label.clone(),
            format!("{:.2}", row.hours),
            row.notes.clone(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Renders the Markdown report: summary first, then the day-by-day table.
pub fn render_markdown(rows: &[ScheduleRow], summary: &PlanSummary) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Study Plan");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Total planned hours: {:.2}", summary.total_hours);
    let _ = writeln!(
        output,
        "- Feasible: {}",
        if summary.feasible { "Yes" } else { "No" }
    );
    for (course_code, hours) in &summary.hours_by_course {
        let _ = writeln!(output, "- {course_code}: {hours:.2} hours");
    }
    if !summary.warnings.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Warnings");
        for warning in &summary.warnings {
            let _ = writeln!(output, "- {warning}");
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Day-by-Day Plan");
    let _ = writeln!(output);
    let _ = writeln!(output, "| Date | Course | Task | Topic | Hours | Notes |");
    let _ = writeln!(output, "|---|---|---|---|---:|---|");
    for row in export_order(rows) {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {:.2} | {} |",
            row.date, row.course_code, row.task_type, row.topic_label, row.hours, row.notes
        );
    }
    output
}

fn export_order(rows: &[ScheduleRow]) -> Vec<&ScheduleRow> {
    let mut ordered: Vec<&ScheduleRow> = rows.iter().collect();
    ordered.sort_by(|a, b| {
        (a.date, &a.course_code, &a.topic_id, a.task_type.as_str()).cmp(&(
            b.date,
            &b.course_code,
            &b.topic_id,
            b.task_type.as_str(),
        ))
    });
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskType;
    use chrono::NaiveDate;

    fn sample_rows() -> Vec<ScheduleRow> {
        vec![
            ScheduleRow {
                date: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
                course_code: "PHYS234".to_string(),
                task_type: TaskType::Review,
                topic_id: "final_review".to_string(),
                topic_label: "Final Review".to_string(),
                hours: 1.0,
                notes: "Reserved pre-exam buffer.".to_string(),
            },
            ScheduleRow {
                date: NaiveDate::from_ymd_opt(2026, 2, 10).unwrap(),
                course_code: "PHYS234".to_string(),
                task_type: TaskType::Study,
                topic_id: "ch1".to_string(),
                topic_label: "Chapter 1".to_string(),
                hours: 1.5,
                notes: String::new(),
            },
        ]
    }

    fn sample_summary() -> PlanSummary {
        let mut hours_by_course = std::collections::BTreeMap::new();
        hours_by_course.insert("PHYS234".to_string(), 2.5);
        PlanSummary {
            total_hours: 2.5,
            hours_by_course,
            feasible: true,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn test_csv_header_and_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.csv");
        write_csv(&sample_rows(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "date,course_code,task_type,topic_id,topic_label,hours,notes"
        );
        // Earlier date first despite input order.
        assert!(lines.next().unwrap().starts_with("2026-02-10,PHYS234,study,ch1"));
        assert!(lines.next().unwrap().starts_with("2026-02-11,PHYS234,review,final_review"));
    }

    #[test]
    fn test_export_order_breaks_ties_review_before_study() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 10).unwrap();
        let mut rows = sample_rows();
        for row in &mut rows {
            row.date = date;
            row.topic_id = "ch1".to_string();
        }
        let ordered = export_order(&rows);
        assert_eq!(ordered[0].task_type, TaskType::Review);
        assert_eq!(ordered[1].task_type, TaskType::Study);
    }

    #[test]
    fn test_markdown_summary_precedes_plan() {
        let report = render_markdown(&sample_rows(), &sample_summary());
        let summary_at = report.find("## Summary").unwrap();
        let plan_at = report.find("## Day-by-Day Plan").unwrap();
        assert!(summary_at < plan_at);
        assert!(report.contains("- Total planned hours: 2.50"));
        assert!(report.contains("- Feasible: Yes"));
        assert!(report.contains("| 2026-02-10 | PHYS234 | study | Chapter 1 | 1.50 |  |"));
    }

    #[test]
    fn test_markdown_includes_warnings_when_infeasible() {
        let mut summary = sample_summary();
        summary.feasible = false;
        summary.warnings = vec!["w1".into(), "w2".into(), "w3".into()];
        let report = render_markdown(&[], &summary);
        assert!(report.contains("## Warnings"));
        assert!(report.contains("- w2"));
        assert!(report.contains("- Feasible: No"));
    }

    #[test]
    fn test_export_plan_writes_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let paths = export_plan(&sample_rows(), &sample_summary(), dir.path()).unwrap();
        assert!(paths.csv_path.exists());
        assert!(paths.markdown_path.exists());
    }
}
