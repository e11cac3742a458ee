//! # Training Module
//!
//! Training sessions, the drafts they are created from, and partial updates.

use crate::error::{CoreError, CoreResult};
use crate::ids::TrainingId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a training.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainingStatus {
    #[default]
    Upcoming,
    Completed,
}

impl TrainingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingStatus::Upcoming => "Upcoming",
            TrainingStatus::Completed => "Completed",
        }
    }

    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "upcoming" => Some(TrainingStatus::Upcoming),
            "completed" => Some(TrainingStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for TrainingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A compliance-education event.
///
/// Fields are private: a `Training` can only be produced from a validated
/// [`TrainingDraft`] or by applying a validated [`TrainingUpdate`], and its
/// identifier never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Training {
    id: TrainingId,
    title: String,
    date: NaiveDate,
    venue: String,
    speaker: String,
    topic: String,
    capacity: u32,
    status: TrainingStatus,
}

impl Training {
    /// Build a training from a draft, assigning the given identifier.
    pub fn from_draft(id: TrainingId, draft: TrainingDraft) -> CoreResult<Self> {
        if id.is_blank() {
            return Err(CoreError::validation("training id must not be empty"));
        }
        Ok(Self {
            id,
            title: require_text("title", &draft.title)?,
            date: draft.date,
            venue: require_text("venue", &draft.venue)?,
            speaker: require_text("speaker", &draft.speaker)?,
            topic: require_text("topic", &draft.topic)?,
            capacity: require_capacity(draft.capacity)?,
            status: draft.status.unwrap_or_default(),
        })
    }

    /// Return a copy with the update applied. `self` is untouched on error.
    pub fn with_update(&self, update: &TrainingUpdate) -> CoreResult<Self> {
        let mut next = self.clone();
        if let Some(title) = &update.title {
            next.title = require_text("title", title)?;
        }
        if let Some(date) = update.date {
            next.date = date;
        }
        if let Some(venue) = &update.venue {
            next.venue = require_text("venue", venue)?;
        }
        if let Some(speaker) = &update.speaker {
            next.speaker = require_text("speaker", speaker)?;
        }
        if let Some(topic) = &update.topic {
            next.topic = require_text("topic", topic)?;
        }
        if let Some(capacity) = update.capacity {
            next.capacity = require_capacity(capacity)?;
        }
        if let Some(status) = update.status {
            next.status = status;
        }
        Ok(next)
    }

    /// Re-check the field rules on a training that did not come from a draft
    /// (for example one read back from a snapshot).
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.is_blank() {
            return Err(CoreError::validation("training id must not be empty"));
        }
        require_text("title", &self.title)?;
        require_text("venue", &self.venue)?;
        require_text("speaker", &self.speaker)?;
        require_text("topic", &self.topic)?;
        if self.capacity == 0 {
            return Err(CoreError::validation(format!(
                "training {}: capacity must be positive",
                self.id
            )));
        }
        Ok(())
    }

    pub fn id(&self) -> &TrainingId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn speaker(&self) -> &str {
        &self.speaker
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn status(&self) -> TrainingStatus {
        self.status
    }

    pub fn is_upcoming(&self) -> bool {
        self.status == TrainingStatus::Upcoming
    }
}

impl fmt::Display for Training {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {} - {} ({})",
            self.id, self.status, self.title, self.date, self.venue
        )
    }
}

/// Fields for a new training. The identifier is assigned by the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDraft {
    pub title: String,
    pub date: NaiveDate,
    pub venue: String,
    pub speaker: String,
    pub topic: String,
    /// Signed so that zero and negative input can be reported, not truncated.
    pub capacity: i64,
    /// Defaults to `Upcoming` when absent.
    #[serde(default)]
    pub status: Option<TrainingStatus>,
}

impl TrainingDraft {
    pub fn new(
        title: &str,
        date: NaiveDate,
        venue: &str,
        speaker: &str,
        topic: &str,
        capacity: i64,
    ) -> Self {
        Self {
            title: title.to_string(),
            date,
            venue: venue.to_string(),
            speaker: speaker.to_string(),
            topic: topic.to_string(),
            capacity,
            status: None,
        }
    }

    pub fn with_status(mut self, status: TrainingStatus) -> Self {
        self.status = Some(status);
        self
    }
}

/// Partial update of a training's mutable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TrainingStatus>,
}

impl TrainingUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn venue(mut self, venue: &str) -> Self {
        self.venue = Some(venue.to_string());
        self
    }

    pub fn speaker(mut self, speaker: &str) -> Self {
        self.speaker = Some(speaker.to_string());
        self
    }

    pub fn topic(mut self, topic: &str) -> Self {
        self.topic = Some(topic.to_string());
        self
    }

    pub fn capacity(mut self, capacity: i64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn status(mut self, status: TrainingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Filter for training listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingFilter {
    #[serde(default)]
    pub status: Option<TrainingStatus>,
}

impl TrainingFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn status(status: TrainingStatus) -> Self {
        Self {
            status: Some(status),
        }
    }

    pub fn matches(&self, training: &Training) -> bool {
        self.status.map_or(true, |s| training.status == s)
    }
}

fn require_text(field: &str, value: &str) -> CoreResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation(format!("{} must not be empty", field)));
    }
    Ok(trimmed.to_string())
}

fn require_capacity(capacity: i64) -> CoreResult<u32> {
    if capacity <= 0 {
        return Err(CoreError::validation(format!(
            "capacity must be positive, got {}",
            capacity
        )));
    }
    u32::try_from(capacity)
        .map_err(|_| CoreError::validation(format!("capacity too large: {}", capacity)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TrainingDraft {
        TrainingDraft::new(
            "Ethics 101",
            NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            "CDO Training Room",
            "Mr. John Dela Cruz",
            "Ethical Leadership",
            10,
        )
    }

    #[test]
    fn test_status_defaults_to_upcoming() {
        let training = Training::from_draft(TrainingId::from("t5"), draft()).unwrap();
        assert_eq!(training.status(), TrainingStatus::Upcoming);
        assert_eq!(training.capacity(), 10);
        assert_eq!(training.id().as_str(), "t5");
    }

    #[test]
    fn test_rejects_non_positive_capacity() {
        let mut d = draft();
        d.capacity = 0;
        assert!(Training::from_draft(TrainingId::from("t5"), d.clone())
            .unwrap_err()
            .is_validation());
        d.capacity = -3;
        assert!(Training::from_draft(TrainingId::from("t5"), d)
            .unwrap_err()
            .is_validation());
    }

    #[test]
    fn test_rejects_blank_text_fields() {
        let mut d = draft();
        d.speaker = "   ".to_string();
        let err = Training::from_draft(TrainingId::from("t5"), d).unwrap_err();
        assert_eq!(err.to_string(), "Validation error: speaker must not be empty");
    }

    #[test]
    fn test_update_keeps_id_and_leaves_training_on_error() {
        let training = Training::from_draft(TrainingId::from("t5"), draft()).unwrap();

        let updated = training
            .with_update(&TrainingUpdate::new().title("Ethics 201").status(TrainingStatus::Completed))
            .unwrap();
        assert_eq!(updated.id(), training.id());
        assert_eq!(updated.title(), "Ethics 201");
        assert_eq!(updated.status(), TrainingStatus::Completed);

        assert!(training
            .with_update(&TrainingUpdate::new().capacity(-1))
            .is_err());
        assert_eq!(training.capacity(), 10);
    }

    #[test]
    fn test_status_parse_and_filter() {
        assert_eq!(TrainingStatus::parse("COMPLETED"), Some(TrainingStatus::Completed));
        assert_eq!(TrainingStatus::parse("cancelled"), None);

        let training = Training::from_draft(TrainingId::from("t5"), draft()).unwrap();
        assert!(TrainingFilter::all().matches(&training));
        assert!(TrainingFilter::status(TrainingStatus::Upcoming).matches(&training));
        assert!(!TrainingFilter::status(TrainingStatus::Completed).matches(&training));
    }

    #[test]
    fn test_draft_from_json_without_status() {
        let json = r#"{
            "title": "Cooperative Law Updates",
            "date": "2025-04-10",
            "venue": "City Hall Auditorium",
            "speaker": "Atty. David Reyes",
            "topic": "Recent Legislation",
            "capacity": 75
        }"#;
        let d: TrainingDraft = serde_json::from_str(json).unwrap();
        assert_eq!(d.status, None);
        assert_eq!(d.date, NaiveDate::from_ymd_opt(2025, 4, 10).unwrap());
    }
}
