//! Officer self-service view.

use crate::ledger::Ledger;
use coopcomply_core::{Certificate, ComplianceStatus, CoreResult, OfficerId, Training};
use serde::Serialize;

/// A certificate with the title of the training it was issued for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertificateView {
    #[serde(flatten)]
    pub certificate: Certificate,
    pub training_title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct OfficerDashboard {
    pub officer_id: OfficerId,
    pub name: String,
    pub cooperative: String,
    pub position: String,
    pub compliance_status: ComplianceStatus,
    pub missing_requirements: Vec<String>,
    /// Every Upcoming training, sorted by date.
    pub upcoming: Vec<Training>,
    /// Trainings the officer was present at.
    pub completed: Vec<Training>,
    pub certificates: Vec<CertificateView>,
}

impl Ledger {
    pub fn officer_dashboard(&self, officer_id: &OfficerId) -> CoreResult<OfficerDashboard> {
        let officer = self.officer(officer_id)?;

        let mut upcoming: Vec<Training> = self
            .trainings
            .values()
            .filter(|t| t.is_upcoming())
            .cloned()
            .collect();
        upcoming.sort_by_key(|t| t.date());

        let completed = self
            .trainings
            .values()
            .filter(|t| officer.has_attended(t.id()))
            .cloned()
            .collect();

        let certificates = officer
            .certificates()
            .iter()
            .map(|cert| CertificateView {
                certificate: cert.clone(),
                training_title: self
                    .trainings
                    .get(&cert.training_id)
                    .map(|t| t.title().to_string())
                    .unwrap_or_else(|| "Unknown Training".to_string()),
            })
            .collect();

        Ok(OfficerDashboard {
            officer_id: officer.id().clone(),
            name: officer.name().to_string(),
            cooperative: officer.cooperative().to_string(),
            position: officer.position().to_string(),
            compliance_status: officer.compliance_status(),
            missing_requirements: officer.missing_requirements().iter().cloned().collect(),
            upcoming,
            completed,
            certificates,
        })
    }
}
