//! Attendance records.

use crate::ids::{OfficerId, TrainingId};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite key of an attendance record. At most one record per key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendanceKey {
    pub training_id: TrainingId,
    pub officer_id: OfficerId,
}

impl AttendanceKey {
    pub fn new(training_id: &TrainingId, officer_id: &OfficerId) -> Self {
        Self {
            training_id: training_id.clone(),
            officer_id: officer_id.clone(),
        }
    }
}

impl fmt::Display for AttendanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.training_id, self.officer_id)
    }
}

/// Evidence that an officer checked in (or was marked absent) for a training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub training_id: TrainingId,
    pub officer_id: OfficerId,
    pub checkin_time: NaiveDateTime,
    pub is_present: bool,
}

impl AttendanceRecord {
    pub fn present(
        training_id: &TrainingId,
        officer_id: &OfficerId,
        checkin_time: NaiveDateTime,
    ) -> Self {
        Self {
            training_id: training_id.clone(),
            officer_id: officer_id.clone(),
            checkin_time,
            is_present: true,
        }
    }

    pub fn absent(
        training_id: &TrainingId,
        officer_id: &OfficerId,
        checkin_time: NaiveDateTime,
    ) -> Self {
        Self {
            is_present: false,
            ..Self::present(training_id, officer_id, checkin_time)
        }
    }

    pub fn key(&self) -> AttendanceKey {
        AttendanceKey::new(&self.training_id, &self.officer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_json_shape() {
        let at = NaiveDate::from_ymd_opt(2025, 5, 20)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let record =
            AttendanceRecord::present(&TrainingId::from("t3"), &OfficerId::from("officer-456"), at);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["checkin_time"], "2025-05-20T09:00:00");
        assert_eq!(json["is_present"], true);

        let absent = AttendanceRecord::absent(&record.training_id, &record.officer_id, at);
        assert!(!absent.is_present);
        assert_eq!(absent.key(), record.key());
        assert_eq!(record.key().to_string(), "t3/officer-456");
    }
}
