//! Identifier newtypes.
//!
//! Identifiers are opaque strings (`t1`, `officer-456`, `cert1`). They are
//! never mutated after creation; entities only expose them by reference.

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier without checking it.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an identifier coming from outside, rejecting blank input.
            pub fn parse(raw: &str) -> CoreResult<Self> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err(CoreError::validation(concat!($label, " id must not be empty")));
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a training (`t1`, `t2`, ...).
    TrainingId,
    "Training"
);

string_id!(
    /// Identifier of an officer, assigned externally at account creation.
    OfficerId,
    "Officer"
);

string_id!(
    /// Identifier of a certificate (`cert1`, `cert2`, ...).
    CertificateId,
    "Certificate"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(OfficerId::parse("  officer-456 ").unwrap().as_str(), "officer-456");
        assert!(TrainingId::parse("   ").unwrap_err().is_validation());
    }

    #[test]
    fn test_serde_transparent() {
        let id = TrainingId::from("t3");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"t3\"");
        let back: TrainingId = serde_json::from_str("\"t3\"").unwrap();
        assert_eq!(back, id);
    }
}
