//! Attendance report: one record, or one Markdown section, per training.

use crate::render::{md_text, Report};
use coopcomply_ledger::AttendanceReport;
use std::fmt::{self, Write};

impl Report for AttendanceReport {
    fn title(&self) -> &'static str {
        "Attendance Report"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["training_id", "title", "date", "status", "capacity", "present", "absent", "attendees"]
    }

    fn records(&self) -> Vec<Vec<String>> {
        self.trainings
            .iter()
            .map(|t| {
                vec![
                    t.training_id.to_string(),
                    t.title.clone(),
                    t.date.to_string(),
                    t.status.as_str().to_string(),
                    t.capacity.to_string(),
                    t.total_attendees.to_string(),
                    t.absent.to_string(),
                    t.attendees_list(),
                ]
            })
            .collect()
    }

    fn totals(&self) -> Vec<(&'static str, usize)> {
        vec![
            ("Trainings", self.trainings.len()),
            ("Officers present", self.total_attendees()),
        ]
    }

    fn write_markdown(&self, out: &mut String) -> fmt::Result {
        if self.is_empty() {
            return writeln!(out, "No trainings scheduled.");
        }
        for t in &self.trainings {
            writeln!(out, "## {} ({})", md_text(&t.title), t.training_id)?;
            writeln!(out)?;
            writeln!(out, "- Date: {}", t.date)?;
            writeln!(out, "- Status: {}", t.status)?;
            writeln!(out, "- Capacity: {}", t.capacity)?;
            writeln!(out, "- Absent: {}", t.absent)?;
            writeln!(out)?;
            if t.attendees.is_empty() {
                writeln!(out, "No attendees")?;
            } else {
                writeln!(out, "Present ({}):", t.total_attendees)?;
                writeln!(out)?;
                for name in &t.attendees {
                    writeln!(out, "1. {}", md_text(name))?;
                }
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{render, ReportFormat};
    use chrono::NaiveDate;
    use coopcomply_core::TrainingDraft;
    use coopcomply_ledger::{seed, AttendanceReport};

    #[test]
    fn test_csv_has_one_record_per_training() {
        let report = seed::demo().unwrap().generate_attendance_report();
        let csv = render(&report, ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "training_id,title,date,status,capacity,present,absent,attendees");
        assert_eq!(
            lines[4],
            "t4,Cooperative Law Updates,2025-04-10,Completed,75,2,0,\"Juan Dela Cruz, Maria Clara\""
        );
    }

    #[test]
    fn test_markdown_section_per_training() {
        let report = seed::demo().unwrap().generate_attendance_report();
        let md = render(&report, ReportFormat::Markdown).unwrap();

        assert!(md.starts_with("# Attendance Report\n"));
        assert!(md.contains("- **Trainings**: 4"));
        assert!(md.contains("## Cooperative Law Updates (t4)"));
        assert!(md.contains("Present (2):\n\n1. Juan Dela Cruz\n1. Maria Clara\n"));
        assert_eq!(md.matches("\n## ").count(), 4);
    }

    #[test]
    fn test_training_without_attendees() {
        let mut ledger = seed::demo().unwrap();
        ledger
            .add_training(TrainingDraft::new(
                "Ethics 101",
                NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                "CDO Training Room",
                "Mr. John Dela Cruz",
                "Ethical Leadership",
                10,
            ))
            .unwrap();

        let md = render(&ledger.generate_attendance_report(), ReportFormat::Markdown).unwrap();
        assert!(md.contains("## Ethics 101 (t5)\n"));
        assert!(md.contains("No attendees"));
    }

    #[test]
    fn test_empty_report() {
        let report = AttendanceReport { trainings: Vec::new() };
        let md = render(&report, ReportFormat::Markdown).unwrap();
        assert!(md.contains("No trainings scheduled."));
        assert_eq!(render(&report, ReportFormat::Csv).unwrap().lines().count(), 1);
    }

    #[test]
    fn test_json_keeps_report_shape() {
        let report = seed::demo().unwrap().generate_attendance_report();
        let json = render(&report, ReportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["title"], "Attendance Report");
        assert_eq!(value["totals"]["Trainings"], 4);
        assert_eq!(value["report"]["trainings"][3]["training_id"], "t4");
        assert_eq!(value["report"]["trainings"][3]["attendees"][1], "Maria Clara");
    }
}
