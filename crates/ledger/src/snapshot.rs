//! # Snapshots
//!
//! A plain serializable image of the ledger's four collections, keyed by
//! identifier. Loading a snapshot is the one place where externally produced
//! state enters the ledger, so every uniqueness and reference rule is
//! checked here and the derived officer fields are recomputed rather than
//! trusted.

use crate::config::LedgerConfig;
use crate::error::LoadResult;
use crate::ledger::Ledger;
use coopcomply_core::officer::normalize_requirements;
use coopcomply_core::{
    AttendanceRecord, Certificate, ComplianceStatus, CoreError, CoreResult, Officer,
    OfficerProfile, Training, TrainingId,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub trainings: Vec<Training>,
    #[serde(default)]
    pub officers: Vec<OfficerRecord>,
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

/// Stored form of an officer.
///
/// `compliance_status` and `trainings_attended` are accepted for
/// compatibility with exported data but are recomputed on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerRecord {
    #[serde(flatten)]
    pub profile: OfficerProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_status: Option<ComplianceStatus>,
    #[serde(default)]
    pub missing_requirements: Vec<String>,
    #[serde(default)]
    pub trainings_attended: Vec<TrainingId>,
    #[serde(default)]
    pub certificates: Vec<Certificate>,
}

impl OfficerRecord {
    pub fn new(profile: OfficerProfile) -> Self {
        Self {
            profile,
            compliance_status: None,
            missing_requirements: Vec::new(),
            trainings_attended: Vec::new(),
            certificates: Vec::new(),
        }
    }

    fn from_officer(officer: &Officer) -> Self {
        Self {
            profile: officer.profile().clone(),
            compliance_status: Some(officer.compliance_status()),
            missing_requirements: officer.missing_requirements().iter().cloned().collect(),
            trainings_attended: officer.trainings_attended().iter().cloned().collect(),
            certificates: officer.certificates().to_vec(),
        }
    }
}

impl Snapshot {
    pub fn from_json(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> LoadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Ledger {
    /// Rebuild a ledger from a snapshot.
    ///
    /// Stored requirement sets are kept as they are; the configured policy is
    /// only consulted on later attendance changes. Fails with the matching
    /// error kind on duplicate identifiers or certificate numbers, dangling
    /// references, or certificates without a present attendance record.
    pub fn from_snapshot(config: LedgerConfig, snapshot: Snapshot) -> CoreResult<Ledger> {
        let mut ledger = Ledger::new(config);

        for training in snapshot.trainings {
            training.validate()?;
            if training.id().is_blank() {
                return Err(CoreError::validation("training id must not be empty"));
            }
            let id = training.id().clone();
            if !ledger.trainings.insert(id.clone(), training) {
                return Err(CoreError::duplicate(format!("training {} appears twice", id)));
            }
        }

        let mut pending_certificates = Vec::new();
        for record in snapshot.officers {
            let mut officer = Officer::new(record.profile)?;
            let id = officer.id().clone();
            if ledger.officers.contains(&id) {
                return Err(CoreError::duplicate(format!("officer {} appears twice", id)));
            }

            let missing = normalize_requirements(&record.missing_requirements)?;
            let derived = officer.set_missing_requirements(missing);
            if let Some(stored) = record.compliance_status {
                if stored != derived {
                    tracing::warn!(
                        officer_id = %id,
                        stored = %stored,
                        derived = %derived,
                        "Stored compliance status disagreed with requirements, using derived"
                    );
                }
            }

            pending_certificates.push((id.clone(), record.trainings_attended, record.certificates));
            ledger.officers.insert(id, officer);
        }

        for record in snapshot.attendance {
            ledger.training(&record.training_id)?;
            ledger.officer(&record.officer_id)?;
            let key = record.key();
            if !ledger.attendance.insert(key.clone(), record) {
                return Err(CoreError::duplicate(format!(
                    "attendance for {} appears twice",
                    key
                )));
            }
        }

        for (officer_id, stored_attended, certificates) in pending_certificates {
            let attended = ledger.attended_by(&officer_id);
            let stored: BTreeSet<TrainingId> = stored_attended.into_iter().collect();
            if stored != attended {
                tracing::warn!(
                    officer_id = %officer_id,
                    stored = stored.len(),
                    derived = attended.len(),
                    "Stored trainings attended drifted from attendance, using derived"
                );
            }

            for certificate in &certificates {
                ledger.training(&certificate.training_id)?;
                if !attended.contains(&certificate.training_id) {
                    return Err(CoreError::precondition(format!(
                        "certificate {} for officer {} has no recorded attendance for training {}",
                        certificate.certificate_no, officer_id, certificate.training_id
                    )));
                }
                if !ledger.certificate_ids.insert(certificate.id.clone()) {
                    return Err(CoreError::duplicate(format!(
                        "certificate id {} appears twice",
                        certificate.id
                    )));
                }
                if !ledger
                    .certificate_numbers
                    .insert(certificate.certificate_no.clone())
                {
                    return Err(CoreError::duplicate(format!(
                        "certificate number {} appears twice",
                        certificate.certificate_no
                    )));
                }
            }

            let officer = ledger
                .officers
                .get_mut(&officer_id)
                .ok_or_else(|| CoreError::officer_not_found(&officer_id))?;
            for certificate in certificates {
                if officer.certificate_for(&certificate.training_id).is_some() {
                    return Err(CoreError::duplicate(format!(
                        "officer {} holds two certificates for training {}",
                        officer_id, certificate.training_id
                    )));
                }
                officer.push_certificate(certificate);
            }
            officer.set_trainings_attended(attended);
        }

        ledger.next_training_seq = next_after(
            ledger
                .trainings
                .values()
                .filter_map(|t| numeric_suffix(t.id().as_str(), &ledger.config().training_id_prefix)),
        );
        let cert_no_prefix = ledger.config().certificate_no_prefix.clone();
        let cert_id_prefix = ledger.config().certificate_id_prefix.clone();
        let highest_cert = ledger
            .certificate_numbers
            .iter()
            .filter_map(|no| no.sequence(&cert_no_prefix))
            .chain(
                ledger
                    .certificate_ids
                    .iter()
                    .filter_map(|id| numeric_suffix(id.as_str(), &cert_id_prefix)),
            );
        ledger.next_certificate_seq = next_after(highest_cert);

        tracing::info!(
            trainings = ledger.training_count(),
            officers = ledger.officer_count(),
            attendance = ledger.attendance_count(),
            "Ledger loaded from snapshot"
        );
        Ok(ledger)
    }

    /// Export the current state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            trainings: self.trainings.values().cloned().collect(),
            officers: self.officers.values().map(OfficerRecord::from_officer).collect(),
            attendance: self.attendance.values().cloned().collect(),
        }
    }
}

fn numeric_suffix(id: &str, prefix: &str) -> Option<u64> {
    id.strip_prefix(prefix)?.parse().ok()
}

fn next_after(values: impl Iterator<Item = u64>) -> u64 {
    values.max().map_or(1, |max| max.saturating_add(1))
}
