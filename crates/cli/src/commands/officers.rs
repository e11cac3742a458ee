//! Training listings and officer views

use anyhow::{Context, Result};
use coopcomply_core::{OfficerId, Training, TrainingFilter};
use coopcomply_ledger::Ledger;

use crate::StatusArg;

pub fn list_trainings(ledger: &Ledger, status: Option<StatusArg>, sort_by_date: bool) {
    let filter = match status {
        Some(status) => TrainingFilter::status(status.to_core_status()),
        None => TrainingFilter::all(),
    };
    let trainings: Vec<&Training> = if sort_by_date {
        ledger.trainings_sorted_by_date(filter)
    } else {
        ledger.list_trainings(filter).collect()
    };

    if trainings.is_empty() {
        println!("No trainings found.");
        return;
    }

    println!(
        "{:<6} {:<40} {:<10} {:<10} {:>8}",
        "ID", "TITLE", "DATE", "STATUS", "CAPACITY"
    );
    println!("{}", "-".repeat(78));
    for t in trainings {
        println!(
            "{:<6} {:<40} {:<10} {:<10} {:>8}",
            t.id().as_str(),
            truncate(t.title(), 40),
            t.date().to_string(),
            t.status().as_str(),
            t.capacity()
        );
    }
}

pub fn list_officers(ledger: &Ledger) {
    println!(
        "{:<14} {:<20} {:<24} {:<14} {:>8}",
        "ID", "NAME", "COOPERATIVE", "STATUS", "ATTENDED"
    );
    println!("{}", "-".repeat(84));
    for o in ledger.officers() {
        println!(
            "{:<14} {:<20} {:<24} {:<14} {:>8}",
            o.id().as_str(),
            truncate(o.name(), 20),
            truncate(o.cooperative(), 24),
            o.compliance_status().as_str(),
            o.trainings_attended().len()
        );
    }
}

pub fn dashboard(ledger: &Ledger, officer_id: &str) -> Result<()> {
    let id = OfficerId::parse(officer_id)?;
    let dash = ledger
        .officer_dashboard(&id)
        .with_context(|| format!("Cannot open dashboard for {}", officer_id))?;

    println!("👤 {} - {}, {}", dash.name, dash.position, dash.cooperative);
    println!("   Compliance: {}", dash.compliance_status);
    println!();

    println!("Upcoming Trainings");
    if dash.upcoming.is_empty() {
        println!("   No upcoming trainings.");
    }
    for t in &dash.upcoming {
        println!("   {} {} @ {} ({})", t.date(), t.title(), t.venue(), t.speaker());
    }
    println!();

    println!("Missing Requirements");
    if dash.missing_requirements.is_empty() {
        println!("   All requirements met.");
    }
    for req in &dash.missing_requirements {
        println!("   - {}", req);
    }
    println!();

    println!("Certificates");
    if dash.certificates.is_empty() {
        println!("   No certificates yet.");
    }
    for cert in &dash.certificates {
        println!(
            "   {} {} (issued {})",
            cert.certificate.certificate_no, cert.training_title, cert.certificate.issue_date
        );
    }
    println!();

    println!("Completed Trainings");
    if dash.completed.is_empty() {
        println!("   No trainings attended yet.");
    }
    for t in &dash.completed {
        println!("   {} {}", t.date(), t.title());
    }

    Ok(())
}

/// Truncate string for display
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Ethics", 10), "Ethics");
        assert_eq!(truncate("Financial Literacy for Cooperatives", 12), "Financial...");
    }
}
