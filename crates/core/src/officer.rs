//! # Officer Module
//!
//! Cooperative officers and their derived compliance standing.
//!
//! `compliance_status` is never stored: it is computed from
//! `missing_requirements` on every read, so the two cannot disagree.

use crate::certificate::Certificate;
use crate::error::{CoreError, CoreResult};
use crate::ids::{OfficerId, TrainingId};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

/// Compliance standing of an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    Compliant,
    #[serde(rename = "Non-compliant")]
    NonCompliant,
}

impl ComplianceStatus {
    /// Compliant iff nothing is outstanding.
    pub fn from_requirements(missing: &BTreeSet<String>) -> Self {
        if missing.is_empty() {
            ComplianceStatus::Compliant
        } else {
            ComplianceStatus::NonCompliant
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "Compliant",
            ComplianceStatus::NonCompliant => "Non-compliant",
        }
    }

    pub fn is_compliant(&self) -> bool {
        matches!(self, ComplianceStatus::Compliant)
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Externally supplied identity of an officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerProfile {
    pub id: OfficerId,
    pub name: String,
    pub cooperative: String,
    pub position: String,
}

impl OfficerProfile {
    pub fn new(id: &str, name: &str, cooperative: &str, position: &str) -> Self {
        Self {
            id: OfficerId::new(id),
            name: name.to_string(),
            cooperative: cooperative.to_string(),
            position: position.to_string(),
        }
    }

    /// Trim every field and reject blanks.
    pub fn validated(self) -> CoreResult<Self> {
        Ok(Self {
            id: OfficerId::parse(self.id.as_str())?,
            name: require_text("name", &self.name)?,
            cooperative: require_text("cooperative", &self.cooperative)?,
            position: require_text("position", &self.position)?,
        })
    }
}

/// Partial update of an officer's descriptive fields. The id is not editable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooperative: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// An officer tracked by the ledger.
///
/// `trainings_attended` mirrors the officer's present attendance records and
/// is rewritten by the ledger whenever those records change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Officer {
    profile: OfficerProfile,
    missing_requirements: BTreeSet<String>,
    trainings_attended: BTreeSet<TrainingId>,
    certificates: Vec<Certificate>,
}

impl Officer {
    /// New officer with nothing outstanding and no history.
    pub fn new(profile: OfficerProfile) -> CoreResult<Self> {
        Ok(Self {
            profile: profile.validated()?,
            missing_requirements: BTreeSet::new(),
            trainings_attended: BTreeSet::new(),
            certificates: Vec::new(),
        })
    }

    pub fn id(&self) -> &OfficerId {
        &self.profile.id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }

    pub fn cooperative(&self) -> &str {
        &self.profile.cooperative
    }

    pub fn position(&self) -> &str {
        &self.profile.position
    }

    pub fn profile(&self) -> &OfficerProfile {
        &self.profile
    }

    pub fn compliance_status(&self) -> ComplianceStatus {
        ComplianceStatus::from_requirements(&self.missing_requirements)
    }

    pub fn missing_requirements(&self) -> &BTreeSet<String> {
        &self.missing_requirements
    }

    pub fn trainings_attended(&self) -> &BTreeSet<TrainingId> {
        &self.trainings_attended
    }

    pub fn has_attended(&self, training_id: &TrainingId) -> bool {
        self.trainings_attended.contains(training_id)
    }

    pub fn certificates(&self) -> &[Certificate] {
        &self.certificates
    }

    pub fn certificate_for(&self, training_id: &TrainingId) -> Option<&Certificate> {
        self.certificates
            .iter()
            .find(|c| &c.training_id == training_id)
    }

    /// Apply a profile update, keeping the id. `self` is untouched on error.
    pub fn apply_profile_update(&mut self, update: &OfficerProfileUpdate) -> CoreResult<()> {
        let mut next = self.profile.clone();
        if let Some(name) = &update.name {
            next.name = name.clone();
        }
        if let Some(cooperative) = &update.cooperative {
            next.cooperative = cooperative.clone();
        }
        if let Some(position) = &update.position {
            next.position = position.clone();
        }
        self.profile = next.validated()?;
        Ok(())
    }

    /// Replace the outstanding requirements and return the derived status.
    pub fn set_missing_requirements(&mut self, missing: BTreeSet<String>) -> ComplianceStatus {
        self.missing_requirements = missing;
        self.compliance_status()
    }

    pub fn set_trainings_attended(&mut self, attended: BTreeSet<TrainingId>) {
        self.trainings_attended = attended;
    }

    pub fn push_certificate(&mut self, certificate: Certificate) {
        self.certificates.push(certificate);
    }

    /// Drop every certificate for the training; returns how many were removed.
    pub fn remove_certificates_for(&mut self, training_id: &TrainingId) -> usize {
        let before = self.certificates.len();
        self.certificates.retain(|c| &c.training_id != training_id);
        before - self.certificates.len()
    }
}

impl Serialize for Officer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Officer", 8)?;
        state.serialize_field("id", &self.profile.id)?;
        state.serialize_field("name", &self.profile.name)?;
        state.serialize_field("cooperative", &self.profile.cooperative)?;
        state.serialize_field("position", &self.profile.position)?;
        state.serialize_field("compliance_status", &self.compliance_status())?;
        state.serialize_field("missing_requirements", &self.missing_requirements)?;
        state.serialize_field("trainings_attended", &self.trainings_attended)?;
        state.serialize_field("certificates", &self.certificates)?;
        state.end()
    }
}

impl fmt::Display for Officer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} - {}, {})",
            self.profile.name, self.profile.id, self.profile.position, self.profile.cooperative
        )
    }
}

/// Normalize requirement labels: trim, reject blanks, collapse duplicates.
pub fn normalize_requirements<I, S>(labels: I) -> CoreResult<BTreeSet<String>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    labels
        .into_iter()
        .map(|label| require_text("requirement label", label.as_ref()))
        .collect()
}

fn require_text(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}
