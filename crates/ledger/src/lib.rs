//! # Coopcomply Ledger
//!
//! The Compliance Ledger: owns trainings, officers, attendance records and
//! certificates, and is the only sanctioned way to change them.
//!
//! ## Guarantees
//!
//! After every operation:
//! - at most one attendance record exists per (training, officer) pair
//! - attendance only references trainings and officers that exist
//! - each officer's trainings attended equals their present attendance
//! - an officer is Compliant exactly when nothing is outstanding
//! - training and officer identifiers never change
//! - certificate numbers are globally unique
//!
//! A failed operation changes nothing.
//!
//! ## Example
//!
//! ```rust,ignore
//! use coopcomply_core::TrainingStatus;
//! use coopcomply_ledger::{seed, TrainingFilter};
//!
//! let mut ledger = seed::demo()?;
//! let upcoming = ledger.list_trainings(TrainingFilter::status(TrainingStatus::Upcoming));
//! let report = ledger.generate_compliance_report();
//! ```

mod collection;

pub mod command;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod integrity;
pub mod ledger;
pub mod policy;
pub mod report;
pub mod seed;
pub mod shared;
pub mod snapshot;

pub use command::{Command, Outcome};
pub use config::{LedgerConfig, PolicyConfig};
pub use dashboard::{CertificateView, OfficerDashboard};
pub use error::{LoadError, LoadResult};
pub use integrity::IntegrityIssue;
pub use ledger::{CascadeSummary, Ledger};
pub use policy::{CatalogPolicy, ManualPolicy, RequirementPolicy, RequirementRule, Satisfier};
pub use report::{AttendanceReport, AttendanceSummary, ComplianceReport, ComplianceSnapshot};
pub use shared::SharedLedger;
pub use snapshot::{OfficerRecord, Snapshot};

pub use coopcomply_core::TrainingFilter;
