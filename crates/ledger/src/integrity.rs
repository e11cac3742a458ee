//! Consistency audit over the current ledger state.

use crate::ledger::Ledger;
use coopcomply_core::{AttendanceKey, CertificateNo, ComplianceStatus, OfficerId, TrainingId};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A single broken consistency rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum IntegrityIssue {
    DuplicateAttendance {
        key: AttendanceKey,
    },
    MisfiledAttendance {
        key: AttendanceKey,
    },
    UnknownTraining {
        key: AttendanceKey,
    },
    UnknownOfficer {
        key: AttendanceKey,
    },
    AttendedDrift {
        officer_id: OfficerId,
        stored: BTreeSet<TrainingId>,
        derived: BTreeSet<TrainingId>,
    },
    StatusDrift {
        officer_id: OfficerId,
        status: ComplianceStatus,
    },
    DuplicateCertificateNo {
        certificate_no: CertificateNo,
    },
    CertificateWithoutAttendance {
        officer_id: OfficerId,
        training_id: TrainingId,
    },
    CertificateIndexDrift,
}

impl fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAttendance { key } => write!(f, "more than one attendance record for {}", key),
            Self::MisfiledAttendance { key } => write!(f, "attendance record stored under {} belongs elsewhere", key),
            Self::UnknownTraining { key } => write!(f, "attendance {} references an unknown training", key),
            Self::UnknownOfficer { key } => write!(f, "attendance {} references an unknown officer", key),
            Self::AttendedDrift { officer_id, stored, derived } => write!(
                f,
                "officer {} lists {} trainings attended but attendance shows {}",
                officer_id,
                stored.len(),
                derived.len()
            ),
            Self::StatusDrift { officer_id, status } => write!(
                f,
                "officer {} is {} but their requirements say otherwise",
                officer_id, status
            ),
            Self::DuplicateCertificateNo { certificate_no } => {
                write!(f, "certificate number {} is issued more than once", certificate_no)
            }
            Self::CertificateWithoutAttendance { officer_id, training_id } => write!(
                f,
                "officer {} holds a certificate for {} without recorded attendance",
                officer_id, training_id
            ),
            Self::CertificateIndexDrift => write!(f, "certificate number index is out of date"),
        }
    }
}

impl Ledger {
    /// Check every consistency rule. Empty when the ledger is healthy.
    pub fn verify_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        let mut keys: HashMap<AttendanceKey, usize> = HashMap::new();
        for (stored_key, record) in self.attendance.iter() {
            let key = record.key();
            if stored_key != &key {
                issues.push(IntegrityIssue::MisfiledAttendance {
                    key: stored_key.clone(),
                });
            }
            *keys.entry(key.clone()).or_default() += 1;
            if self.trainings.get(&record.training_id).is_none() {
                issues.push(IntegrityIssue::UnknownTraining { key: key.clone() });
            }
            if self.officers.get(&record.officer_id).is_none() {
                issues.push(IntegrityIssue::UnknownOfficer { key });
            }
        }
        let mut duplicated: Vec<AttendanceKey> = keys
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(key, _)| key)
            .collect();
        duplicated.sort();
        issues.extend(
            duplicated
                .into_iter()
                .map(|key| IntegrityIssue::DuplicateAttendance { key }),
        );

        let mut seen_numbers: HashSet<&CertificateNo> = HashSet::new();
        for officer in self.officers.values() {
            let derived = self.attended_by(officer.id());
            if officer.trainings_attended() != &derived {
                issues.push(IntegrityIssue::AttendedDrift {
                    officer_id: officer.id().clone(),
                    stored: officer.trainings_attended().clone(),
                    derived: derived.clone(),
                });
            }

            let expected = ComplianceStatus::from_requirements(officer.missing_requirements());
            if officer.compliance_status() != expected {
                issues.push(IntegrityIssue::StatusDrift {
                    officer_id: officer.id().clone(),
                    status: officer.compliance_status(),
                });
            }

            for cert in officer.certificates() {
                if !seen_numbers.insert(&cert.certificate_no) {
                    issues.push(IntegrityIssue::DuplicateCertificateNo {
                        certificate_no: cert.certificate_no.clone(),
                    });
                }
                if !derived.contains(&cert.training_id) {
                    issues.push(IntegrityIssue::CertificateWithoutAttendance {
                        officer_id: officer.id().clone(),
                        training_id: cert.training_id.clone(),
                    });
                }
            }
        }

        let indexed: HashSet<&CertificateNo> = self.certificate_numbers.iter().collect();
        if indexed != seen_numbers {
            issues.push(IntegrityIssue::CertificateIndexDrift);
        }

        if !issues.is_empty() {
            tracing::warn!(issues = issues.len(), "Integrity check found problems");
        }
        issues
    }
}
