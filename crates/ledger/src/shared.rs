//! Single-writer handle for sharing one ledger between threads.
//!
//! Readers share the lock; a mutation holds the write lock for its whole
//! cascade, so no reader observes a half-applied delete.

use crate::command::{Command, Outcome};
use crate::ledger::Ledger;
use coopcomply_core::CoreResult;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    /// Ledger operations never leave partial state behind, so a poisoned
    /// lock still guards a consistent ledger and is recovered.
    pub fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a command under the write lock.
    pub fn apply(&self, command: Command) -> CoreResult<Outcome> {
        self.write().apply(command)
    }

    /// Run a read-only closure under the read lock.
    pub fn with<R>(&self, f: impl FnOnce(&Ledger) -> R) -> R {
        let guard = self.read();
        f(&*guard)
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use chrono::NaiveDate;
    use coopcomply_core::{OfficerId, OfficerProfile, TrainingId};
    use std::thread;

    #[test]
    fn test_concurrent_writers_never_duplicate_attendance() {
        let shared = SharedLedger::new(seed::demo().unwrap());
        let checkin = NaiveDate::from_ymd_opt(2025, 7, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    shared
                        .apply(Command::RecordAttendance {
                            training_id: TrainingId::from("t2"),
                            officer_id: OfficerId::from("officer-789"),
                            checkin_time: checkin,
                        })
                        .is_ok()
                })
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|ok| *ok)
            .count();
        assert_eq!(successes, 1);
        assert!(shared.with(|l| l.verify_integrity().is_empty()));
    }

    #[test]
    fn test_readers_see_whole_mutations() {
        let shared = SharedLedger::new(seed::demo().unwrap());
        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                for i in 0..20 {
                    let id = format!("officer-x{}", i);
                    shared
                        .apply(Command::RegisterOfficer(OfficerProfile::new(
                            &id, "Temp", "Coop", "Member",
                        )))
                        .unwrap();
                }
                shared
                    .apply(Command::DeleteTraining {
                        id: TrainingId::from("t4"),
                    })
                    .unwrap();
            })
        };

        for _ in 0..50 {
            assert!(shared.with(|l| l.verify_integrity().is_empty()));
        }
        writer.join().unwrap();

        let ledger = shared.read();
        assert_eq!(ledger.officer_count(), 23);
        assert!(ledger.training(&TrainingId::from("t4")).is_err());
    }
}
