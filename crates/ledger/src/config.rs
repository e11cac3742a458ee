//! Ledger configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. A few fields can also be overridden from the environment.

use crate::error::{LoadError, LoadResult};
use crate::policy::{CatalogPolicy, ManualPolicy, RequirementPolicy, RequirementRule};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_CERT_PREFIX: &str = "COOPCOMPLY_CERT_PREFIX";
pub const ENV_ENFORCE_CAPACITY: &str = "COOPCOMPLY_ENFORCE_CAPACITY";
pub const ENV_LOG_LEVEL: &str = "COOPCOMPLY_LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Prefix of generated training ids (`t` gives `t1`, `t2`, ...)
    #[serde(default = "default_training_id_prefix")]
    pub training_id_prefix: String,

    /// Prefix of generated certificate ids
    #[serde(default = "default_certificate_id_prefix")]
    pub certificate_id_prefix: String,

    /// Prefix of certificate numbers (`CERT` gives `CERT-2025-001`)
    #[serde(default = "default_certificate_no_prefix")]
    pub certificate_no_prefix: String,

    /// Refuse present check-ins once a training is at capacity
    #[serde(default)]
    pub enforce_capacity: bool,

    /// Requirement policy applied after attendance changes
    #[serde(default)]
    pub policy: PolicyConfig,

    /// Default tracing filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Which requirement policy the ledger is built with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PolicyConfig {
    #[default]
    Manual,
    Catalog { requirements: Vec<RequirementRule> },
}

impl PolicyConfig {
    pub fn build(&self) -> Box<dyn RequirementPolicy> {
        match self {
            PolicyConfig::Manual => Box::new(ManualPolicy),
            PolicyConfig::Catalog { requirements } => {
                Box::new(CatalogPolicy::new(requirements.clone()))
            }
        }
    }
}

fn default_training_id_prefix() -> String {
    "t".to_string()
}

fn default_certificate_id_prefix() -> String {
    "cert".to_string()
}

fn default_certificate_no_prefix() -> String {
    "CERT".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            training_id_prefix: default_training_id_prefix(),
            certificate_id_prefix: default_certificate_id_prefix(),
            certificate_no_prefix: default_certificate_no_prefix(),
            enforce_capacity: false,
            policy: PolicyConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl LedgerConfig {
    /// Load configuration from JSON file
    pub fn from_file(path: &Path) -> LoadResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// File (or defaults when no path is given), then environment overrides.
    pub fn load(path: Option<&Path>) -> LoadResult<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_env_overrides()
    }

    pub fn with_env_overrides(self) -> LoadResult<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> LoadResult<Self> {
        if let Some(prefix) = lookup(ENV_CERT_PREFIX) {
            self.certificate_no_prefix = prefix;
        }
        if let Some(flag) = lookup(ENV_ENFORCE_CAPACITY) {
            self.enforce_capacity = parse_flag(&flag).ok_or_else(|| {
                LoadError::Config(format!("{} must be true or false, got {:?}", ENV_ENFORCE_CAPACITY, flag))
            })?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> LoadResult<()> {
        for (name, value) in [
            ("training_id_prefix", &self.training_id_prefix),
            ("certificate_id_prefix", &self.certificate_id_prefix),
            ("certificate_no_prefix", &self.certificate_no_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(LoadError::Config(format!("{} must not be empty", name)));
            }
        }
        if let PolicyConfig::Catalog { requirements } = &self.policy {
            if requirements.iter().any(|r| r.label.trim().is_empty()) {
                return Err(LoadError::Config("requirement labels must not be empty".to_string()));
            }
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
