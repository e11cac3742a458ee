//! # Coopcomply Core
//!
//! Core domain types for cooperative-officer training compliance.
//!
//! - [`Training`]: a scheduled or past compliance-education event
//! - [`Officer`]: a cooperative officer subject to compliance tracking
//! - [`AttendanceRecord`]: evidence that an officer attended a training
//! - [`Certificate`]: proof of completion for an attended training
//!
//! Entities are built from validated drafts, so malformed data is rejected
//! at the boundary. Mutation of a whole collection is owned by the ledger
//! crate; the types here only guard their own fields.

pub mod attendance;
pub mod auth;
pub mod certificate;
pub mod error;
pub mod ids;
pub mod officer;
pub mod training;

pub use attendance::{AttendanceKey, AttendanceRecord};
pub use auth::{Authenticator, Role, Session, StaticAuthenticator};
pub use certificate::{Certificate, CertificateNo};
pub use error::{CoreError, CoreResult, EntityKind};
pub use ids::{CertificateId, OfficerId, TrainingId};
pub use officer::{
    normalize_requirements, ComplianceStatus, Officer, OfficerProfile, OfficerProfileUpdate,
};
pub use training::{Training, TrainingDraft, TrainingFilter, TrainingStatus, TrainingUpdate};
