//! Demo data set: four trainings, three officers and their attendance and
//! certificates, as shipped with the mobile application.

use crate::config::LedgerConfig;
use crate::error::LoadResult;
use crate::ledger::Ledger;
use crate::snapshot::{OfficerRecord, Snapshot};
use chrono::{NaiveDate, NaiveDateTime};
use coopcomply_core::{
    AttendanceRecord, Certificate, CertificateId, CertificateNo, CoreError, CoreResult, OfficerId,
    OfficerProfile, Training, TrainingDraft, TrainingId, TrainingStatus,
};

struct SeedTraining {
    id: &'static str,
    title: &'static str,
    date: &'static str,
    venue: &'static str,
    speaker: &'static str,
    topic: &'static str,
    capacity: i64,
    status: TrainingStatus,
}

const TRAININGS: &[SeedTraining] = &[
    SeedTraining {
        id: "t1",
        title: "Financial Literacy for Cooperatives",
        date: "2025-06-15",
        venue: "Naga City Convention Center",
        speaker: "Atty. Maria Santos",
        topic: "Basic Accounting",
        capacity: 100,
        status: TrainingStatus::Upcoming,
    },
    SeedTraining {
        id: "t2",
        title: "Good Governance in Cooperatives",
        date: "2025-07-01",
        venue: "CDO Training Room",
        speaker: "Mr. John Dela Cruz",
        topic: "Ethical Leadership",
        capacity: 50,
        status: TrainingStatus::Upcoming,
    },
    SeedTraining {
        id: "t3",
        title: "Digital Transformation for SMEs",
        date: "2025-05-20",
        venue: "Online Webinar",
        speaker: "Ms. Sarah Lee",
        topic: "E-commerce Strategies",
        capacity: 200,
        status: TrainingStatus::Completed,
    },
    SeedTraining {
        id: "t4",
        title: "Cooperative Law Updates",
        date: "2025-04-10",
        venue: "City Hall Auditorium",
        speaker: "Atty. David Reyes",
        topic: "Recent Legislation",
        capacity: 75,
        status: TrainingStatus::Completed,
    },
];

/// (id, name, cooperative, position, missing requirements)
const OFFICERS: &[(&str, &str, &str, &str, &[&str])] = &[
    ("officer-456", "Juan Dela Cruz", "Naga Farmers Coop", "Treasurer", &[]),
    (
        "officer-789",
        "Maria Clara",
        "Naga Fisherfolk Coop",
        "Secretary",
        &["Financial Literacy Training"],
    ),
    ("officer-101", "Pedro Penduko", "Naga Transport Coop", "Board Member", &[]),
];

/// (officer, certificate id, training, issue date, certificate number)
const CERTIFICATES: &[(&str, &str, &str, &str, &str)] = &[
    ("officer-456", "cert1", "t3", "2025-05-25", "CERT-2025-001"),
    ("officer-101", "cert2", "t1", "2025-06-16", "CERT-2025-002"),
];

/// (training, officer, check-in time)
const ATTENDANCE: &[(&str, &str, &str)] = &[
    ("t3", "officer-456", "2025-05-20T09:00:00"),
    ("t4", "officer-456", "2025-04-10T09:15:00"),
    ("t4", "officer-789", "2025-04-10T09:20:00"),
    // The mobile data listed these as attended without check-ins.
    ("t1", "officer-101", "2025-06-15T09:00:00"),
    ("t2", "officer-101", "2025-07-01T09:00:00"),
    ("t3", "officer-101", "2025-05-20T09:00:00"),
];

/// Demo ledger with the default configuration.
pub fn demo() -> LoadResult<Ledger> {
    demo_with_config(LedgerConfig::default())
}

/// Demo ledger with a caller-supplied configuration. Fails if the
/// configuration makes the demo data inconsistent.
pub fn demo_with_config(config: LedgerConfig) -> LoadResult<Ledger> {
    let ledger = Ledger::from_snapshot(config, demo_snapshot()?)?;
    tracing::debug!("Demo data loaded");
    Ok(ledger)
}

pub fn demo_snapshot() -> CoreResult<Snapshot> {
    let trainings = TRAININGS
        .iter()
        .map(|t| {
            let draft = TrainingDraft::new(
                t.title,
                parse_date(t.date)?,
                t.venue,
                t.speaker,
                t.topic,
                t.capacity,
            )
            .with_status(t.status);
            Training::from_draft(TrainingId::from(t.id), draft)
        })
        .collect::<CoreResult<Vec<_>>>()?;

    let mut officers = Vec::with_capacity(OFFICERS.len());
    for (id, name, cooperative, position, missing) in OFFICERS {
        let mut record = OfficerRecord::new(OfficerProfile::new(*id, *name, *cooperative, *position));
        record.missing_requirements = missing.iter().map(|m| m.to_string()).collect();
        for (holder, cert_id, training_id, issued, no) in CERTIFICATES {
            if holder == id {
                record.certificates.push(Certificate {
                    id: CertificateId::from(*cert_id),
                    training_id: TrainingId::from(*training_id),
                    issue_date: parse_date(issued)?,
                    certificate_no: CertificateNo::new(*no),
                });
            }
        }
        officers.push(record);
    }

    let attendance = ATTENDANCE
        .iter()
        .map(|(training_id, officer_id, checkin)| -> CoreResult<AttendanceRecord> {
            Ok(AttendanceRecord::present(
                &TrainingId::from(*training_id),
                &OfficerId::from(*officer_id),
                parse_time(checkin)?,
            ))
        })
        .collect::<CoreResult<Vec<_>>>()?;

    Ok(Snapshot {
        trainings,
        officers,
        attendance,
    })
}

fn parse_date(raw: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| CoreError::validation(format!("bad demo date {:?}: {}", raw, e)))
}

fn parse_time(raw: &str) -> CoreResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| CoreError::validation(format!("bad demo check-in {:?}: {}", raw, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coopcomply_core::ComplianceStatus;

    #[test]
    fn test_demo_counts() {
        let ledger = demo().unwrap();
        assert_eq!(ledger.training_count(), 4);
        assert_eq!(ledger.officer_count(), 3);
        assert_eq!(ledger.attendance_count(), 6);
        assert_eq!(ledger.certificates().count(), 2);
        assert!(ledger.verify_integrity().is_empty());
    }

    #[test]
    fn test_bad_demo_values_are_errors() {
        assert!(parse_date("2025-02-30").unwrap_err().is_validation());
        assert!(parse_time("2025-06-15 09:00").unwrap_err().is_validation());
        assert_eq!(demo_snapshot().unwrap().trainings.len(), TRAININGS.len());
    }

    #[test]
    fn test_demo_officers() {
        let ledger = demo().unwrap();
        let pedro = ledger.officer(&OfficerId::from("officer-101")).unwrap();
        assert_eq!(pedro.trainings_attended().len(), 3);
        assert_eq!(pedro.compliance_status(), ComplianceStatus::Compliant);

        let maria = ledger.officer(&OfficerId::from("officer-789")).unwrap();
        assert_eq!(maria.compliance_status(), ComplianceStatus::NonCompliant);
    }

    #[test]
    fn test_demo_with_custom_certificate_prefix() {
        let config = LedgerConfig {
            certificate_no_prefix: "COOP".to_string(),
            ..LedgerConfig::default()
        };
        let mut ledger = demo_with_config(config).unwrap();
        assert_eq!(ledger.training_count(), 4);

        let juan = OfficerId::from("officer-456");
        let t2 = TrainingId::from("t2");
        ledger
            .record_attendance(&t2, &juan, parse_time("2025-07-01T09:00:00").unwrap())
            .unwrap();
        let cert = ledger
            .issue_certificate(&juan, &t2, parse_date("2025-07-02").unwrap())
            .unwrap();
        assert_eq!(cert.certificate_no.as_str(), "COOP-2025-003");
    }
}
