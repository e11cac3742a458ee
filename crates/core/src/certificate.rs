//! Certificates of completion.

use crate::ids::{CertificateId, TrainingId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable certificate number, e.g. `CERT-2025-001`. Globally unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CertificateNo(String);

impl CertificateNo {
    pub fn new(no: impl Into<String>) -> Self {
        Self(no.into())
    }

    /// `{prefix}-{year}-{sequence:03}`
    pub fn format(prefix: &str, year: i32, sequence: u64) -> Self {
        Self(format!("{}-{}-{:03}", prefix, year, sequence))
    }

    /// Sequence part of a number in `{prefix}-{year}-{sequence}` form.
    pub fn sequence(&self, prefix: &str) -> Option<u64> {
        let rest = self.0.strip_prefix(prefix)?.strip_prefix('-')?;
        let (_year, seq) = rest.split_once('-')?;
        seq.parse().ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CertificateNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A certificate, owned by the officer it was issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Certificate {
    pub id: CertificateId,
    pub training_id: TrainingId,
    pub issue_date: NaiveDate,
    pub certificate_no: CertificateNo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_and_sequence() {
        let no = CertificateNo::format("CERT", 2025, 7);
        assert_eq!(no.as_str(), "CERT-2025-007");
        assert_eq!(no.sequence("CERT"), Some(7));
        assert_eq!(CertificateNo::new("CERT-2025-1234").sequence("CERT"), Some(1234));
        assert_eq!(no.sequence("CRT"), None);
        assert_eq!(CertificateNo::new("free-form").sequence("CERT"), None);
    }
}
