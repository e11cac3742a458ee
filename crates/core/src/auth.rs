//! Authentication collaborator interface.
//!
//! The ledger never checks credentials. Presentation code resolves a
//! [`Session`] through an [`Authenticator`] and scopes what it shows by role.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Officer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Officer => "officer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role plus an opaque user identifier. For officers the identifier is
/// their officer id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub role: Role,
    pub user_id: String,
}

impl Session {
    pub fn new(role: Role, user_id: &str) -> Self {
        Self {
            role,
            user_id: user_id.to_string(),
        }
    }
}

/// Maps credentials to a session, or `None` for invalid credentials.
pub trait Authenticator {
    fn login(&self, username: &str, password: &str) -> Option<Session>;
}

/// Fixed credential table.
#[derive(Debug, Clone, Default)]
pub struct StaticAuthenticator {
    accounts: HashMap<String, (String, Session)>,
}

impl StaticAuthenticator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_account(mut self, username: &str, password: &str, session: Session) -> Self {
        self.accounts
            .insert(username.to_string(), (password.to_string(), session));
        self
    }

    /// The demo accounts used by the mobile prototype.
    pub fn demo() -> Self {
        Self::new()
            .with_account("admin", "admin123", Session::new(Role::Admin, "admin-123"))
            .with_account("officer", "officer123", Session::new(Role::Officer, "officer-456"))
    }
}

impl Authenticator for StaticAuthenticator {
    fn login(&self, username: &str, password: &str) -> Option<Session> {
        self.accounts
            .get(username)
            .filter(|(expected, _)| expected == password)
            .map(|(_, session)| session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_accounts() {
        let auth = StaticAuthenticator::demo();

        let admin = auth.login("admin", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.user_id, "admin-123");

        let officer = auth.login("officer", "officer123").unwrap();
        assert_eq!(officer.role, Role::Officer);
        assert_eq!(officer.user_id, "officer-456");
    }

    #[test]
    fn test_invalid_credentials() {
        let auth = StaticAuthenticator::demo();
        assert!(auth.login("admin", "wrong").is_none());
        assert!(auth.login("nobody", "admin123").is_none());
    }
}
