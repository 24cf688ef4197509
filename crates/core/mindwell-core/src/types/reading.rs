//! Mood readings and their validated construction

use crate::{MindwellError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use uuid::Uuid;

/// Inclusive range for mood, energy and stress scores
pub const SCORE_RANGE: RangeInclusive<i64> = 1..=10;

/// Candidate mood submission as received from a caller
///
/// Every field is optional at this stage so that malformed payloads reach
/// [`MoodSubmission::validate`] and fail with a validation error instead of a
/// deserialization error. Unknown fields are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MoodSubmission {
    /// Reading id (assigned at ingest when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Submitting user
    pub user_id: Option<String>,

    /// Mood score, 1-10
    pub mood_score: Option<i64>,

    /// Free-text emotion labels, in the order given
    #[serde(default)]
    pub emotions: Vec<String>,

    /// Energy level, 1-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<i64>,

    /// Stress level, 1-10
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<i64>,

    /// Hours slept, non-negative
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,

    /// Free-text trigger labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,

    /// Free-text notes, scanned for crisis keywords
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Observation time (set at ingest when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl MoodSubmission {
    /// Start a submission with the two required fields
    pub fn new(user_id: impl Into<String>, mood_score: i64) -> Self {
        Self {
            user_id: Some(user_id.into()),
            mood_score: Some(mood_score),
            ..Default::default()
        }
    }

    /// Set emotion labels
    pub fn with_emotions<I, S>(mut self, emotions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotions = emotions.into_iter().map(Into::into).collect();
        self
    }

    /// Set energy level
    pub fn with_energy(mut self, level: i64) -> Self {
        self.energy_level = Some(level);
        self
    }

    /// Set stress level
    pub fn with_stress(mut self, level: i64) -> Self {
        self.stress_level = Some(level);
        self
    }

    /// Set hours slept
    pub fn with_sleep(mut self, hours: f64) -> Self {
        self.sleep_hours = Some(hours);
        self
    }

    /// Set trigger labels
    pub fn with_triggers<I, S>(mut self, triggers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.triggers = Some(triggers.into_iter().map(Into::into).collect());
        self
    }

    /// Set notes
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the observation time
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Validate into an immutable reading, stamping missing times with now
    pub fn validate(self) -> Result<MoodReading> {
        self.validate_at(Utc::now())
    }

    /// Validate into an immutable reading, stamping missing times with `now`
    pub fn validate_at(self, now: DateTime<Utc>) -> Result<MoodReading> {
        let user_id = self.user_id.ok_or_else(|| {
            MindwellError::missing_field(
                "user_id",
                "mood submission",
                "Every reading must name the submitting user.",
            )
        })?;
        if user_id.trim().is_empty() {
            return Err(MindwellError::validation("user_id must not be blank"));
        }

        let mood_score = self.mood_score.ok_or_else(|| {
            MindwellError::missing_field(
                "mood_score",
                "mood submission",
                "Provide a score between 1 and 10.",
            )
        })?;
        let mood_score = bounded_score("mood_score", mood_score)?;
        let energy_level = self
            .energy_level
            .map(|v| bounded_score("energy_level", v))
            .transpose()?;
        let stress_level = self
            .stress_level
            .map(|v| bounded_score("stress_level", v))
            .transpose()?;

        if let Some(hours) = self.sleep_hours {
            if !hours.is_finite() {
                return Err(MindwellError::validation(
                    "sleep_hours must be a finite number",
                ));
            }
            if hours < 0.0 {
                return Err(MindwellError::validation(format!(
                    "sleep_hours must be non-negative, got {}",
                    hours
                )));
            }
        }

        Ok(MoodReading {
            id: self.id.unwrap_or_else(Uuid::new_v4),
            user_id,
            mood_score,
            emotions: self.emotions,
            energy_level,
            stress_level,
            sleep_hours: self.sleep_hours,
            triggers: self.triggers,
            notes: self.notes,
            timestamp: self.timestamp.unwrap_or(now),
        })
    }
}

fn bounded_score(field: &str, value: i64) -> Result<u8> {
    if !SCORE_RANGE.contains(&value) {
        return Err(MindwellError::out_of_range(
            field,
            value,
            SCORE_RANGE.start(),
            SCORE_RANGE.end(),
        ));
    }
    Ok(value as u8)
}

/// One validated, timestamped self-report
///
/// Only obtainable through [`MoodSubmission::validate`] (or deserialization,
/// which runs the same checks), and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MoodSubmission")]
pub struct MoodReading {
    id: Uuid,
    user_id: String,
    mood_score: u8,
    emotions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    energy_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stress_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    sleep_hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    triggers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    timestamp: DateTime<Utc>,
}

impl TryFrom<MoodSubmission> for MoodReading {
    type Error = MindwellError;

    fn try_from(submission: MoodSubmission) -> Result<Self> {
        submission.validate()
    }
}

impl MoodReading {
    /// Reading id
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submitting user
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Mood score, 1-10
    pub fn mood_score(&self) -> u8 {
        self.mood_score
    }

    /// Emotion labels
    pub fn emotions(&self) -> &[String] {
        &self.emotions
    }

    /// Energy level, 1-10
    pub fn energy_level(&self) -> Option<u8> {
        self.energy_level
    }

    /// Stress level, 1-10
    pub fn stress_level(&self) -> Option<u8> {
        self.stress_level
    }

    /// Hours slept
    pub fn sleep_hours(&self) -> Option<f64> {
        self.sleep_hours
    }

    /// Trigger labels
    pub fn triggers(&self) -> Option<&[String]> {
        self.triggers.as_deref()
    }

    /// Free-text notes
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Observation time
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
