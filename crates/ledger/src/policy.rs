//! Requirement policies.
//!
//! A policy decides which requirements an officer still has outstanding,
//! given the trainings they were present at. The ledger consults it after
//! every change to an officer's attendance and derives the compliance status
//! from the result.

use coopcomply_core::{Officer, Training, TrainingId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Evaluates an officer's outstanding requirements.
pub trait RequirementPolicy: Send + Sync + fmt::Debug {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Outstanding requirement labels, or `None` to keep the officer's
    /// current set unchanged.
    fn evaluate(&self, officer: &Officer, attended: &[&Training]) -> Option<BTreeSet<String>>;
}

/// Requirements are only ever set explicitly through
/// `update_officer_compliance`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualPolicy;

impl RequirementPolicy for ManualPolicy {
    fn name(&self) -> &'static str {
        "manual"
    }

    fn evaluate(&self, _officer: &Officer, _attended: &[&Training]) -> Option<BTreeSet<String>> {
        None
    }
}

/// What attended training discharges a requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Satisfier {
    /// One specific training.
    Training(TrainingId),
    /// Any training on this topic (case-insensitive).
    Topic(String),
    /// Any training whose title contains this text (case-insensitive).
    TitleContains(String),
}

impl Satisfier {
    pub fn is_met_by(&self, training: &Training) -> bool {
        match self {
            Satisfier::Training(id) => training.id() == id,
            Satisfier::Topic(topic) => training.topic().eq_ignore_ascii_case(topic.trim()),
            Satisfier::TitleContains(fragment) => training
                .title()
                .to_lowercase()
                .contains(&fragment.trim().to_lowercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRule {
    pub label: String,
    pub satisfied_by: Satisfier,
}

impl RequirementRule {
    pub fn new(label: &str, satisfied_by: Satisfier) -> Self {
        Self {
            label: label.to_string(),
            satisfied_by,
        }
    }
}

/// Every officer must satisfy every rule in the catalog.
///
/// The outstanding set is recomputed from scratch on each evaluation, so it
/// replaces anything set manually before.
#[derive(Debug, Clone, Default)]
pub struct CatalogPolicy {
    rules: Vec<RequirementRule>,
}

impl CatalogPolicy {
    pub fn new(rules: Vec<RequirementRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RequirementRule] {
        &self.rules
    }
}

impl RequirementPolicy for CatalogPolicy {
    fn name(&self) -> &'static str {
        "catalog"
    }

    fn evaluate(&self, _officer: &Officer, attended: &[&Training]) -> Option<BTreeSet<String>> {
        let outstanding = self
            .rules
            .iter()
            .filter(|rule| !attended.iter().any(|t| rule.satisfied_by.is_met_by(t)))
            .map(|rule| rule.label.trim().to_string())
            .filter(|label| !label.is_empty())
            .collect();
        Some(outstanding)
    }
}
