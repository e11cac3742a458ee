//! # Commands
//!
//! Every ledger mutation as a serializable value, so a presentation layer (or
//! a batch file) can queue mutations and feed them through a single writer.
//!
//! ```json
//! [
//!   { "op": "add_training", "title": "Ethics 101", "date": "2025-08-01",
//!     "venue": "CDO Training Room", "speaker": "Mr. John Dela Cruz",
//!     "topic": "Ethical Leadership", "capacity": 10 },
//!   { "op": "record_attendance", "training_id": "t5",
//!     "officer_id": "officer-456", "checkin_time": "2025-08-01T09:00:00" }
//! ]
//! ```

use crate::error::LoadResult;
use crate::ledger::{CascadeSummary, Ledger};
use chrono::{NaiveDate, NaiveDateTime};
use coopcomply_core::{
    AttendanceRecord, Certificate, ComplianceStatus, CoreResult, Officer, OfficerId,
    OfficerProfile, OfficerProfileUpdate, Training, TrainingDraft, TrainingId, TrainingUpdate,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    AddTraining(TrainingDraft),
    UpdateTraining {
        id: TrainingId,
        changes: TrainingUpdate,
    },
    DeleteTraining {
        id: TrainingId,
    },
    RegisterOfficer(OfficerProfile),
    UpdateOfficerProfile {
        id: OfficerId,
        changes: OfficerProfileUpdate,
    },
    RecordAttendance {
        training_id: TrainingId,
        officer_id: OfficerId,
        checkin_time: NaiveDateTime,
    },
    RecordAbsence {
        training_id: TrainingId,
        officer_id: OfficerId,
        checkin_time: NaiveDateTime,
    },
    UpdateOfficerCompliance {
        officer_id: OfficerId,
        #[serde(default)]
        missing_requirements: Vec<String>,
    },
    IssueCertificate {
        officer_id: OfficerId,
        training_id: TrainingId,
        issue_date: NaiveDate,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::AddTraining(_) => "add_training",
            Command::UpdateTraining { .. } => "update_training",
            Command::DeleteTraining { .. } => "delete_training",
            Command::RegisterOfficer(_) => "register_officer",
            Command::UpdateOfficerProfile { .. } => "update_officer_profile",
            Command::RecordAttendance { .. } => "record_attendance",
            Command::RecordAbsence { .. } => "record_absence",
            Command::UpdateOfficerCompliance { .. } => "update_officer_compliance",
            Command::IssueCertificate { .. } => "issue_certificate",
        }
    }

    /// Parse a JSON array of commands.
    pub fn batch_from_json(json: &str) -> LoadResult<Vec<Command>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of a successfully applied command.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    TrainingAdded(Training),
    TrainingUpdated(Training),
    TrainingDeleted(CascadeSummary),
    OfficerRegistered(Officer),
    OfficerUpdated(Officer),
    AttendanceRecorded(AttendanceRecord),
    ComplianceUpdated {
        officer_id: OfficerId,
        status: ComplianceStatus,
    },
    CertificateIssued {
        officer_id: OfficerId,
        certificate: Certificate,
    },
}

impl Ledger {
    /// Apply one command. Same atomicity as calling the operation directly.
    pub fn apply(&mut self, command: Command) -> CoreResult<Outcome> {
        tracing::debug!(op = command.name(), "Applying command");
        match command {
            Command::AddTraining(draft) => self.add_training(draft).map(Outcome::TrainingAdded),
            Command::UpdateTraining { id, changes } => self
                .update_training(&id, &changes)
                .map(Outcome::TrainingUpdated),
            Command::DeleteTraining { id } => {
                self.delete_training(&id).map(Outcome::TrainingDeleted)
            }
            Command::RegisterOfficer(profile) => self
                .register_officer(profile)
                .map(Outcome::OfficerRegistered),
            Command::UpdateOfficerProfile { id, changes } => self
                .update_officer_profile(&id, &changes)
                .map(Outcome::OfficerUpdated),
            Command::RecordAttendance {
                training_id,
                officer_id,
                checkin_time,
            } => self
                .record_attendance(&training_id, &officer_id, checkin_time)
                .map(Outcome::AttendanceRecorded),
            Command::RecordAbsence {
                training_id,
                officer_id,
                checkin_time,
            } => self
                .record_absence(&training_id, &officer_id, checkin_time)
                .map(Outcome::AttendanceRecorded),
            Command::UpdateOfficerCompliance {
                officer_id,
                missing_requirements,
            } => {
                let status = self.update_officer_compliance(&officer_id, &missing_requirements)?;
                Ok(Outcome::ComplianceUpdated { officer_id, status })
            }
            Command::IssueCertificate {
                officer_id,
                training_id,
                issue_date,
            } => {
                let certificate = self.issue_certificate(&officer_id, &training_id, issue_date)?;
                Ok(Outcome::CertificateIssued {
                    officer_id,
                    certificate,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    const BATCH: &str = r#"[
        { "op": "add_training", "title": "Ethics 101", "date": "2025-08-01",
          "venue": "CDO Training Room", "speaker": "Mr. John Dela Cruz",
          "topic": "Ethical Leadership", "capacity": 10 },
        { "op": "record_attendance", "training_id": "t5",
          "officer_id": "officer-789", "checkin_time": "2025-08-01T09:00:00" },
        { "op": "update_officer_compliance", "officer_id": "officer-789" },
        { "op": "issue_certificate", "officer_id": "officer-789",
          "training_id": "t5", "issue_date": "2025-08-02" }
    ]"#;

    #[test]
    fn test_batch_parses() {
        let commands = Command::batch_from_json(BATCH).unwrap();
        let names: Vec<_> = commands.iter().map(Command::name).collect();
        assert_eq!(
            names,
            vec![
                "add_training",
                "record_attendance",
                "update_officer_compliance",
                "issue_certificate"
            ]
        );
    }

    #[test]
    fn test_apply_batch() {
        let mut ledger = seed::demo().unwrap();
        let outcomes: Vec<Outcome> = Command::batch_from_json(BATCH)
            .unwrap()
            .into_iter()
            .map(|c| ledger.apply(c).unwrap())
            .collect();

        assert!(matches!(&outcomes[0], Outcome::TrainingAdded(t) if t.id().as_str() == "t5"));
        assert!(matches!(
            &outcomes[2],
            Outcome::ComplianceUpdated { status: ComplianceStatus::Compliant, .. }
        ));
        assert!(matches!(
            &outcomes[3],
            Outcome::CertificateIssued { certificate, .. } if certificate.certificate_no.as_str() == "CERT-2025-003"
        ));
        assert!(ledger.verify_integrity().is_empty());
    }

    #[test]
    fn test_apply_propagates_errors() {
        let mut ledger = seed::demo().unwrap();
        let err = ledger
            .apply(Command::DeleteTraining {
                id: TrainingId::from("t99"),
            })
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = Outcome::ComplianceUpdated {
            officer_id: OfficerId::from("officer-789"),
            status: ComplianceStatus::NonCompliant,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "compliance_updated");
        assert_eq!(json["status"], "Non-compliant");
    }
}
