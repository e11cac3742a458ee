//! # Compliance Ledger
//!
//! Owns the training, officer, attendance and certificate collections and is
//! the only mutation path over them. Every operation validates everything it
//! needs before touching state, so a failed call leaves the ledger exactly as
//! it was and a successful one applies its whole cascade.

use crate::collection::KeyedCollection;
use crate::config::LedgerConfig;
use crate::policy::RequirementPolicy;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use coopcomply_core::officer::normalize_requirements;
use coopcomply_core::{
    AttendanceKey, AttendanceRecord, Certificate, CertificateId, CertificateNo, ComplianceStatus,
    CoreError, CoreResult, Officer, OfficerId, OfficerProfile, OfficerProfileUpdate, Training,
    TrainingDraft, TrainingFilter, TrainingId, TrainingUpdate,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// What a training deletion removed along with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeSummary {
    pub training_id: TrainingId,
    pub attendance_removed: usize,
    pub certificates_removed: usize,
    pub officers_refreshed: Vec<OfficerId>,
}

pub struct Ledger {
    config: LedgerConfig,
    policy: Box<dyn RequirementPolicy>,
    pub(crate) trainings: KeyedCollection<TrainingId, Training>,
    pub(crate) officers: KeyedCollection<OfficerId, Officer>,
    pub(crate) attendance: KeyedCollection<AttendanceKey, AttendanceRecord>,
    pub(crate) certificate_ids: HashSet<CertificateId>,
    pub(crate) certificate_numbers: HashSet<CertificateNo>,
    pub(crate) next_training_seq: u64,
    pub(crate) next_certificate_seq: u64,
}

impl fmt::Debug for Ledger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ledger")
            .field("policy", &self.policy.name())
            .field("trainings", &self.trainings.len())
            .field("officers", &self.officers.len())
            .field("attendance", &self.attendance.len())
            .field("certificates", &self.certificate_numbers.len())
            .finish()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl Ledger {
    /// Empty ledger using the policy named in the configuration.
    pub fn new(config: LedgerConfig) -> Self {
        let policy = config.policy.build();
        Self::with_policy(config, policy)
    }

    /// Empty ledger with an explicit policy, overriding `config.policy`.
    pub fn with_policy(config: LedgerConfig, policy: Box<dyn RequirementPolicy>) -> Self {
        Self {
            config,
            policy,
            trainings: KeyedCollection::new(),
            officers: KeyedCollection::new(),
            attendance: KeyedCollection::new(),
            certificate_ids: HashSet::new(),
            certificate_numbers: HashSet::new(),
            next_training_seq: 1,
            next_certificate_seq: 1,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn policy(&self) -> &dyn RequirementPolicy {
        self.policy.as_ref()
    }

    // === Reads ===

    /// Trainings in insertion order, optionally filtered by status.
    ///
    /// The iterator borrows the ledger and can be cloned to restart.
    pub fn list_trainings(
        &self,
        filter: TrainingFilter,
    ) -> impl Iterator<Item = &Training> + Clone + '_ {
        self.trainings.values().filter(move |t| filter.matches(t))
    }

    /// Like [`Ledger::list_trainings`], sorted by date. Ties keep insertion order.
    pub fn trainings_sorted_by_date(&self, filter: TrainingFilter) -> Vec<&Training> {
        let mut trainings: Vec<&Training> = self.list_trainings(filter).collect();
        trainings.sort_by_key(|t| t.date());
        trainings
    }

    pub fn training(&self, id: &TrainingId) -> CoreResult<&Training> {
        self.trainings
            .get(id)
            .ok_or_else(|| CoreError::training_not_found(id))
    }

    pub fn training_count(&self) -> usize {
        self.trainings.len()
    }

    pub fn officer(&self, id: &OfficerId) -> CoreResult<&Officer> {
        self.officers
            .get(id)
            .ok_or_else(|| CoreError::officer_not_found(id))
    }

    pub fn officers(&self) -> impl Iterator<Item = &Officer> + Clone + '_ {
        self.officers.values()
    }

    pub fn officer_count(&self) -> usize {
        self.officers.len()
    }

    pub fn attendance(&self) -> impl Iterator<Item = &AttendanceRecord> + Clone + '_ {
        self.attendance.values()
    }

    pub fn attendance_for_training<'a>(
        &'a self,
        training_id: &'a TrainingId,
    ) -> impl Iterator<Item = &'a AttendanceRecord> + Clone + 'a {
        self.attendance
            .values()
            .filter(move |r| &r.training_id == training_id)
    }

    pub fn attendance_record(
        &self,
        training_id: &TrainingId,
        officer_id: &OfficerId,
    ) -> Option<&AttendanceRecord> {
        self.attendance
            .get(&AttendanceKey::new(training_id, officer_id))
    }

    pub fn attendance_count(&self) -> usize {
        self.attendance.len()
    }

    /// Every certificate with the officer holding it, in officer order.
    pub fn certificates(&self) -> impl Iterator<Item = (&OfficerId, &Certificate)> + '_ {
        self.officers
            .values()
            .flat_map(|o| o.certificates().iter().map(move |c| (o.id(), c)))
    }

    // === Trainings ===

    /// Create a training with a fresh identifier. Status defaults to Upcoming.
    pub fn add_training(&mut self, draft: TrainingDraft) -> CoreResult<Training> {
        let (id, next_seq) = self.peek_training_id()?;
        let training = Training::from_draft(id.clone(), draft)?;

        self.next_training_seq = next_seq;
        self.trainings.insert(id, training.clone());

        tracing::info!(training_id = %training.id(), title = training.title(), "Training added");
        Ok(training)
    }

    /// Replace a training's mutable fields. The identifier never changes.
    pub fn update_training(&mut self, id: &TrainingId, update: &TrainingUpdate) -> CoreResult<Training> {
        let updated = self.training(id)?.with_update(update)?;
        self.trainings.replace(id, updated.clone());

        tracing::info!(training_id = %id, "Training updated");
        Ok(updated)
    }

    /// Delete a training together with its attendance records and
    /// certificates, then refresh every officer that referenced it.
    pub fn delete_training(&mut self, id: &TrainingId) -> CoreResult<CascadeSummary> {
        self.training(id)?;

        self.trainings.remove(id);
        let removed_records = self.attendance.drain_where(|r| &r.training_id == id);

        let mut affected: BTreeSet<OfficerId> =
            removed_records.iter().map(|r| r.officer_id.clone()).collect();

        let mut certificates_removed = 0;
        let mut dropped: Vec<(CertificateId, CertificateNo)> = Vec::new();
        for officer in self.officers.values_mut() {
            for cert in officer.certificates().iter().filter(|c| &c.training_id == id) {
                dropped.push((cert.id.clone(), cert.certificate_no.clone()));
            }
            let n = officer.remove_certificates_for(id);
            if n > 0 {
                certificates_removed += n;
                affected.insert(officer.id().clone());
            }
        }
        for (cert_id, cert_no) in dropped {
            self.certificate_ids.remove(&cert_id);
            self.certificate_numbers.remove(&cert_no);
        }

        for officer_id in &affected {
            self.refresh_officer(officer_id, None);
        }

        let summary = CascadeSummary {
            training_id: id.clone(),
            attendance_removed: removed_records.len(),
            certificates_removed,
            officers_refreshed: affected.into_iter().collect(),
        };
        tracing::info!(
            training_id = %id,
            attendance_removed = summary.attendance_removed,
            certificates_removed = summary.certificates_removed,
            "Training deleted"
        );
        Ok(summary)
    }

    // === Officers ===

    /// Add an officer whose identifier was assigned at account creation.
    pub fn register_officer(&mut self, profile: OfficerProfile) -> CoreResult<Officer> {
        let mut officer = Officer::new(profile)?;
        if self.officers.contains(officer.id()) {
            return Err(CoreError::duplicate(format!(
                "officer {} already exists",
                officer.id()
            )));
        }

        if let Some(missing) = self.policy.evaluate(&officer, &[]) {
            officer.set_missing_requirements(missing);
        }

        self.officers.insert(officer.id().clone(), officer.clone());
        tracing::info!(
            officer_id = %officer.id(),
            status = %officer.compliance_status(),
            "Officer registered"
        );
        Ok(officer)
    }

    pub fn update_officer_profile(
        &mut self,
        id: &OfficerId,
        update: &OfficerProfileUpdate,
    ) -> CoreResult<Officer> {
        let mut officer = self.officer(id)?.clone();
        officer.apply_profile_update(update)?;
        self.officers.replace(id, officer.clone());

        tracing::info!(officer_id = %id, "Officer profile updated");
        Ok(officer)
    }

    /// Set an officer's outstanding requirements. The compliance status is
    /// derived from them and cannot be set any other way.
    pub fn update_officer_compliance<I, S>(
        &mut self,
        officer_id: &OfficerId,
        missing_requirements: I,
    ) -> CoreResult<ComplianceStatus>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.officer(officer_id)?;
        let missing = normalize_requirements(missing_requirements)?;

        let officer = self
            .officers
            .get_mut(officer_id)
            .ok_or_else(|| CoreError::officer_not_found(officer_id))?;
        let status = officer.set_missing_requirements(missing);

        tracing::info!(officer_id = %officer_id, status = %status, "Officer compliance updated");
        Ok(status)
    }

    // === Attendance ===

    /// Record that an officer was present, re-evaluating their compliance
    /// with the configured policy.
    pub fn record_attendance(
        &mut self,
        training_id: &TrainingId,
        officer_id: &OfficerId,
        checkin_time: NaiveDateTime,
    ) -> CoreResult<AttendanceRecord> {
        let record = AttendanceRecord::present(training_id, officer_id, checkin_time);
        self.insert_attendance(record, None)
    }

    /// Same as [`Ledger::record_attendance`] but evaluates compliance with a
    /// caller-supplied policy.
    pub fn record_attendance_with_policy(
        &mut self,
        training_id: &TrainingId,
        officer_id: &OfficerId,
        checkin_time: NaiveDateTime,
        policy: &dyn RequirementPolicy,
    ) -> CoreResult<AttendanceRecord> {
        let record = AttendanceRecord::present(training_id, officer_id, checkin_time);
        self.insert_attendance(record, Some(policy))
    }

    /// Record that an officer was expected but absent. Counts toward the
    /// one-record-per-pair rule, not toward trainings attended.
    pub fn record_absence(
        &mut self,
        training_id: &TrainingId,
        officer_id: &OfficerId,
        checkin_time: NaiveDateTime,
    ) -> CoreResult<AttendanceRecord> {
        let record = AttendanceRecord::absent(training_id, officer_id, checkin_time);
        self.insert_attendance(record, None)
    }

    fn insert_attendance(
        &mut self,
        record: AttendanceRecord,
        policy: Option<&dyn RequirementPolicy>,
    ) -> CoreResult<AttendanceRecord> {
        let training = self.training(&record.training_id)?;
        self.officer(&record.officer_id)?;

        let key = record.key();
        if self.attendance.contains(&key) {
            return Err(CoreError::duplicate(format!(
                "attendance already recorded for {}",
                key
            )));
        }

        if record.is_present && self.config.enforce_capacity {
            let present = self
                .attendance_for_training(&record.training_id)
                .filter(|r| r.is_present)
                .count();
            if present >= training.capacity() as usize {
                return Err(CoreError::precondition(format!(
                    "training {} is at capacity ({})",
                    record.training_id,
                    training.capacity()
                )));
            }
        }

        self.attendance.insert(key, record.clone());
        if record.is_present {
            self.refresh_officer(&record.officer_id, policy);
        }

        tracing::info!(
            training_id = %record.training_id,
            officer_id = %record.officer_id,
            present = record.is_present,
            "Attendance recorded"
        );
        Ok(record)
    }

    // === Certificates ===

    /// Issue a certificate for a training the officer was present at.
    pub fn issue_certificate(
        &mut self,
        officer_id: &OfficerId,
        training_id: &TrainingId,
        issue_date: NaiveDate,
    ) -> CoreResult<Certificate> {
        let officer = self.officer(officer_id)?;
        self.training(training_id)?;

        let attended = self
            .attendance_record(training_id, officer_id)
            .is_some_and(|r| r.is_present);
        if !attended {
            return Err(CoreError::precondition(format!(
                "officer {} has no recorded attendance for training {}",
                officer_id, training_id
            )));
        }
        if let Some(existing) = officer.certificate_for(training_id) {
            return Err(CoreError::duplicate(format!(
                "officer {} already holds certificate {} for training {}",
                officer_id, existing.certificate_no, training_id
            )));
        }

        let (id, certificate_no, next_seq) = self.peek_certificate(issue_date.year())?;
        let certificate = Certificate {
            id,
            training_id: training_id.clone(),
            issue_date,
            certificate_no,
        };

        self.next_certificate_seq = next_seq;
        self.certificate_ids.insert(certificate.id.clone());
        self.certificate_numbers
            .insert(certificate.certificate_no.clone());
        self.officers
            .get_mut(officer_id)
            .ok_or_else(|| CoreError::officer_not_found(officer_id))?
            .push_certificate(certificate.clone());

        tracing::info!(
            officer_id = %officer_id,
            training_id = %training_id,
            certificate_no = %certificate.certificate_no,
            "Certificate issued"
        );
        Ok(certificate)
    }

    // === Internals ===

    /// Rewrite an officer's attended set from the attendance records and, if
    /// the policy has an opinion, their outstanding requirements.
    pub(crate) fn refresh_officer(
        &mut self,
        officer_id: &OfficerId,
        policy: Option<&dyn RequirementPolicy>,
    ) {
        let policy: &dyn RequirementPolicy = match policy {
            Some(policy) => policy,
            None => self.policy.as_ref(),
        };
        let Some(officer) = self.officers.get(officer_id) else {
            return;
        };

        let attended = self.attended_by(officer_id);
        let attended_trainings: Vec<&Training> = attended
            .iter()
            .filter_map(|id| self.trainings.get(id))
            .collect();
        let missing = policy.evaluate(officer, &attended_trainings);

        tracing::debug!(
            officer_id = %officer_id,
            policy = policy.name(),
            attended = attended.len(),
            "Officer refreshed"
        );

        if let Some(officer) = self.officers.get_mut(officer_id) {
            officer.set_trainings_attended(attended);
            if let Some(missing) = missing {
                officer.set_missing_requirements(missing);
            }
        }
    }

    /// Trainings the officer has a present record for.
    pub(crate) fn attended_by(&self, officer_id: &OfficerId) -> BTreeSet<TrainingId> {
        self.attendance
            .values()
            .filter(|r| &r.officer_id == officer_id && r.is_present)
            .map(|r| r.training_id.clone())
            .collect()
    }

    fn peek_training_id(&self) -> CoreResult<(TrainingId, u64)> {
        let mut seq = self.next_training_seq;
        loop {
            let id = TrainingId::new(format!("{}{}", self.config.training_id_prefix, seq));
            seq = next_seq(seq, "training")?;
            if !self.trainings.contains(&id) {
                return Ok((id, seq));
            }
        }
    }

    /// Next unused certificate id and number. Both come from one sequence
    /// that only moves forward, so neither is reused after a deletion.
    fn peek_certificate(&self, year: i32) -> CoreResult<(CertificateId, CertificateNo, u64)> {
        let mut seq = self.next_certificate_seq;
        loop {
            let id = CertificateId::new(format!("{}{}", self.config.certificate_id_prefix, seq));
            let no = CertificateNo::format(&self.config.certificate_no_prefix, year, seq);
            seq = next_seq(seq, "certificate")?;
            if !self.certificate_ids.contains(&id) && !self.certificate_numbers.contains(&no) {
                return Ok((id, no, seq));
            }
        }
    }
}

/// The sequence value after `seq`. The last value is never handed out.
fn next_seq(seq: u64, kind: &str) -> CoreResult<u64> {
    seq.checked_add(1)
        .ok_or_else(|| CoreError::precondition(format!("{} identifiers are exhausted", kind)))
}
