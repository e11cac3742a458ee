//! Property tests: any random sequence of ledger operations keeps the ledger
//! consistent after every step, and failed operations change nothing.

use chrono::{Duration, NaiveDate};
use coopcomply_core::{
    OfficerId, OfficerProfile, OfficerProfileUpdate, TrainingDraft, TrainingId, TrainingUpdate,
};
use coopcomply_ledger::{seed, Command, Ledger, LedgerConfig};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// Small id spaces so operations collide often.
fn arb_training_id() -> impl Strategy<Value = TrainingId> {
    (1u32..9).prop_map(|n| TrainingId::new(format!("t{}", n)))
}

fn arb_officer_id() -> impl Strategy<Value = OfficerId> {
    prop_oneof![
        Just(OfficerId::from("officer-456")),
        Just(OfficerId::from("officer-789")),
        Just(OfficerId::from("officer-101")),
        (1u32..4).prop_map(|n| OfficerId::new(format!("officer-new-{}", n))),
    ]
}

fn arb_requirements() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("Financial Literacy Training".to_string()),
            Just("Governance Seminar".to_string()),
            Just(" ".to_string()),
        ],
        0..3,
    )
}

fn arb_command() -> impl Strategy<Value = Command> {
    prop_oneof![
        (-2i64..20, 0i64..365).prop_map(|(capacity, offset)| {
            Command::AddTraining(TrainingDraft::new(
                "Random Training",
                base_date() + Duration::days(offset),
                "Venue",
                "Speaker",
                "Topic",
                capacity,
            ))
        }),
        (arb_training_id(), -1i64..20).prop_map(|(id, capacity)| Command::UpdateTraining {
            id,
            changes: TrainingUpdate::new().capacity(capacity),
        }),
        arb_training_id().prop_map(|id| Command::DeleteTraining { id }),
        arb_officer_id().prop_map(|id| {
            Command::RegisterOfficer(OfficerProfile::new(id.as_str(), "Name", "Coop", "Member"))
        }),
        (arb_officer_id(), prop_oneof![Just(""), Just("Treasurer")]).prop_map(|(id, position)| {
            Command::UpdateOfficerProfile {
                id,
                changes: OfficerProfileUpdate {
                    position: Some(position.to_string()),
                    ..OfficerProfileUpdate::default()
                },
            }
        }),
        (arb_training_id(), arb_officer_id(), 0i64..48).prop_map(|(training_id, officer_id, h)| {
            Command::RecordAttendance {
                training_id,
                officer_id,
                checkin_time: base_date().and_hms_opt(0, 0, 0).unwrap() + Duration::hours(h),
            }
        }),
        (arb_training_id(), arb_officer_id()).prop_map(|(training_id, officer_id)| {
            Command::RecordAbsence {
                training_id,
                officer_id,
                checkin_time: base_date().and_hms_opt(8, 0, 0).unwrap(),
            }
        }),
        (arb_officer_id(), arb_requirements()).prop_map(|(officer_id, missing_requirements)| {
            Command::UpdateOfficerCompliance {
                officer_id,
                missing_requirements,
            }
        }),
        (arb_officer_id(), arb_training_id(), 0i64..400).prop_map(
            |(officer_id, training_id, offset)| Command::IssueCertificate {
                officer_id,
                training_id,
                issue_date: base_date() + Duration::days(offset),
            }
        ),
    ]
}

fn capacity_config(enforce_capacity: bool) -> LedgerConfig {
    LedgerConfig {
        enforce_capacity,
        ..LedgerConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property Tests
// ---------------------------------------------------------------------------

proptest! {
    /// Every step of a random command sequence leaves no integrity issue.
    #[test]
    fn random_sequences_keep_ledger_consistent(
        commands in prop::collection::vec(arb_command(), 1..60),
        enforce_capacity in any::<bool>(),
    ) {
        let mut ledger = seed::demo_with_config(capacity_config(enforce_capacity)).unwrap();
        for command in commands {
            let name = command.name();
            let _ = ledger.apply(command);
            let issues = ledger.verify_integrity();
            prop_assert!(issues.is_empty(), "after {}: {:?}", name, issues);
        }
    }

    /// A rejected command leaves the ledger exactly as it was.
    #[test]
    fn failed_commands_change_nothing(
        commands in prop::collection::vec(arb_command(), 1..40),
    ) {
        let mut ledger = seed::demo().unwrap();
        for command in commands {
            let before = ledger.snapshot();
            if ledger.apply(command).is_err() {
                prop_assert_eq!(ledger.snapshot(), before);
            }
        }
    }

    /// Certificate numbers stay unique across any mix of issue and delete.
    #[test]
    fn certificate_numbers_stay_unique(
        commands in prop::collection::vec(arb_command(), 1..60),
    ) {
        let mut ledger = Ledger::default();
        for command in commands {
            let _ = ledger.apply(command);
        }
        let mut numbers: Vec<String> = ledger
            .certificates()
            .map(|(_, c)| c.certificate_no.as_str().to_string())
            .collect();
        let total = numbers.len();
        numbers.sort();
        numbers.dedup();
        prop_assert_eq!(numbers.len(), total);
    }

    /// Recording the same pair twice yields exactly one record.
    #[test]
    fn duplicate_attendance_is_rejected(
        training_id in arb_training_id(),
        officer_id in arb_officer_id(),
    ) {
        let mut ledger = seed::demo().unwrap();
        let checkin = base_date().and_hms_opt(9, 0, 0).unwrap();
        let first = ledger.record_attendance(&training_id, &officer_id, checkin);
        let second = ledger.record_attendance(&training_id, &officer_id, checkin);

        prop_assert!(second.is_err());
        if first.is_ok() {
            prop_assert!(second.unwrap_err().is_duplicate());
        }
        prop_assert!(ledger.attendance_record(&training_id, &officer_id).into_iter().count() <= 1);
    }
}
