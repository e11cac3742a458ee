//! Read-side report projections.
//!
//! Both reports are computed fresh from the current state on every call and
//! never mutate the ledger.

use crate::ledger::Ledger;
use chrono::NaiveDate;
use coopcomply_core::{ComplianceStatus, OfficerId, TrainingId, TrainingStatus};
use serde::Serialize;

/// Attendance for one training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub training_id: TrainingId,
    pub title: String,
    pub date: NaiveDate,
    pub status: TrainingStatus,
    pub capacity: u32,
    /// Names of officers marked present, in check-in record order.
    pub attendees: Vec<String>,
    pub total_attendees: usize,
    pub absent: usize,
}

impl AttendanceSummary {
    /// Comma-separated attendee names, or "No attendees".
    pub fn attendees_list(&self) -> String {
        if self.attendees.is_empty() {
            "No attendees".to_string()
        } else {
            self.attendees.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttendanceReport {
    pub trainings: Vec<AttendanceSummary>,
}

impl AttendanceReport {
    pub fn total_attendees(&self) -> usize {
        self.trainings.iter().map(|t| t.total_attendees).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.trainings.is_empty()
    }
}

/// Compliance state of one officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceSnapshot {
    pub officer_id: OfficerId,
    pub name: String,
    pub cooperative: String,
    pub position: String,
    pub status: ComplianceStatus,
    pub missing_requirements: Vec<String>,
    pub trainings_completed: usize,
    pub certificates: usize,
}

impl ComplianceSnapshot {
    /// Comma-separated outstanding requirements, or "None".
    pub fn missing_list(&self) -> String {
        if self.missing_requirements.is_empty() {
            "None".to_string()
        } else {
            self.missing_requirements.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub officers: Vec<ComplianceSnapshot>,
}

impl ComplianceReport {
    pub fn compliant_count(&self) -> usize {
        self.officers
            .iter()
            .filter(|o| o.status.is_compliant())
            .count()
    }

    pub fn non_compliant_count(&self) -> usize {
        self.officers.len() - self.compliant_count()
    }

    pub fn is_empty(&self) -> bool {
        self.officers.is_empty()
    }
}

impl Ledger {
    /// Per-training attendee names and counts, in training insertion order.
    pub fn generate_attendance_report(&self) -> AttendanceReport {
        let trainings = self
            .trainings
            .values()
            .map(|training| {
                let records = self.attendance_for_training(training.id());
                let attendees: Vec<String> = records
                    .clone()
                    .filter(|r| r.is_present)
                    .map(|r| match self.officers.get(&r.officer_id) {
                        Some(officer) => officer.name().to_string(),
                        None => "Unknown Officer".to_string(),
                    })
                    .collect();
                let absent = records.filter(|r| !r.is_present).count();

                AttendanceSummary {
                    training_id: training.id().clone(),
                    title: training.title().to_string(),
                    date: training.date(),
                    status: training.status(),
                    capacity: training.capacity(),
                    total_attendees: attendees.len(),
                    attendees,
                    absent,
                }
            })
            .collect();

        AttendanceReport { trainings }
    }

    /// Per-officer compliance state, in officer insertion order.
    pub fn generate_compliance_report(&self) -> ComplianceReport {
        let officers = self
            .officers
            .values()
            .map(|officer| ComplianceSnapshot {
                officer_id: officer.id().clone(),
                name: officer.name().to_string(),
                cooperative: officer.cooperative().to_string(),
                position: officer.position().to_string(),
                status: officer.compliance_status(),
                missing_requirements: officer.missing_requirements().iter().cloned().collect(),
                trainings_completed: officer.trainings_attended().len(),
                certificates: officer.certificates().len(),
            })
            .collect();

        ComplianceReport { officers }
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;

    #[test]
    fn test_attendance_report_on_demo_data() {
        let ledger = seed::demo().unwrap();
        let report = ledger.generate_attendance_report();

        assert_eq!(report.trainings.len(), 4);
        let t4 = report
            .trainings
            .iter()
            .find(|t| t.training_id.as_str() == "t4")
            .unwrap();
        assert_eq!(t4.total_attendees, 2);
        assert_eq!(t4.attendees_list(), "Juan Dela Cruz, Maria Clara");
        assert_eq!(t4.absent, 0);
    }

    #[test]
    fn test_attendance_report_empty_training() {
        let mut ledger = seed::demo().unwrap();
        let t = ledger
            .add_training(coopcomply_core::TrainingDraft::new(
                "Ethics 101",
                chrono::NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                "CDO Training Room",
                "Mr. John Dela Cruz",
                "Ethical Leadership",
                10,
            ))
            .unwrap();

        let report = ledger.generate_attendance_report();
        let summary = report.trainings.last().unwrap();
        assert_eq!(&summary.training_id, t.id());
        assert_eq!(summary.total_attendees, 0);
        assert_eq!(summary.attendees_list(), "No attendees");
    }

    #[test]
    fn test_compliance_report_on_demo_data() {
        let ledger = seed::demo().unwrap();
        let report = ledger.generate_compliance_report();

        assert_eq!(report.officers.len(), 3);
        assert_eq!(report.compliant_count(), 2);
        assert_eq!(report.non_compliant_count(), 1);

        let maria = &report.officers[1];
        assert_eq!(maria.name, "Maria Clara");
        assert_eq!(maria.missing_list(), "Financial Literacy Training");
        assert_eq!(maria.trainings_completed, 1);
        assert_eq!(report.officers[0].missing_list(), "None");
    }

    #[test]
    fn test_reports_are_deterministic() {
        let ledger = seed::demo().unwrap();
        assert_eq!(
            ledger.generate_attendance_report(),
            ledger.generate_attendance_report()
        );
        assert_eq!(
            ledger.generate_compliance_report(),
            ledger.generate_compliance_report()
        );
    }
}
