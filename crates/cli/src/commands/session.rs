//! Login against the demo credential table

use anyhow::{bail, Result};
use coopcomply_core::{Authenticator, Role, StaticAuthenticator};

pub fn login(username: &str, password: &str) -> Result<()> {
    let auth = StaticAuthenticator::demo();
    let Some(session) = auth.login(username, password) else {
        tracing::warn!(username, "Login rejected");
        bail!("Invalid username or password");
    };

    tracing::info!(username, role = %session.role, "Login accepted");
    println!("✅ Logged in as {} ({})", session.user_id, session.role);
    match session.role {
        Role::Admin => println!("   Try: coopcomply trainings, coopcomply report compliance"),
        Role::Officer => println!("   Try: coopcomply dashboard {}", session.user_id),
    }

    Ok(())
}
