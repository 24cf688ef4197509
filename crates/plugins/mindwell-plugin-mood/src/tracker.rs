//! Mood tracker
//!
//! Entry points for submitting readings and analyzing a user's history.
//! History is read and written only through the injected [`HistoryStore`].

use crate::config::TrackerConfig;
use crate::evaluator::RuleEvaluator;
use chrono::{DateTime, Utc};
use mindwell_core::{
    AlertCode, AlertThresholds, HistoryStore, Logger, MindwellError, MoodAnalysis,
    MoodSubmission, Result,
};
use mindwell_storage_memory::InMemoryHistoryStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Acknowledgement returned for an accepted reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionAck {
    /// Id of the stored reading
    pub reading_id: Uuid,
    /// Owner of the reading
    pub user_id: String,
    /// Score as stored
    pub mood_score: u8,
    /// History length after the append
    pub history_len: usize,
    /// Whether the oldest entry was evicted to make room
    pub evicted: bool,
    /// Analysis of the default window including the new reading
    pub analysis: MoodAnalysis,
}

/// Validates submissions, stores them and evaluates history
pub struct MoodTracker {
    store: Arc<dyn HistoryStore>,
    evaluator: RuleEvaluator,
    config: TrackerConfig,
    logger: Logger,
}

impl MoodTracker {
    /// Create a tracker over an existing store
    pub fn new(
        store: Arc<dyn HistoryStore>,
        thresholds: Arc<AlertThresholds>,
        config: TrackerConfig,
    ) -> Self {
        Self {
            store,
            evaluator: RuleEvaluator::new(thresholds),
            config,
            logger: Logger::new("mood"),
        }
    }

    /// Create a tracker backed by an in-memory store sized from `config`
    pub fn in_memory(thresholds: Arc<AlertThresholds>, config: TrackerConfig) -> Result<Self> {
        let store = InMemoryHistoryStore::new(config.history_capacity)?;
        Ok(Self::new(Arc::new(store), thresholds, config))
    }

    /// In-memory tracker configured from `MINDWELL_*` environment variables
    pub fn from_env() -> Result<Self> {
        let thresholds = AlertThresholds::from_env()?;
        Self::in_memory(Arc::new(thresholds), TrackerConfig::from_env()?)
    }

    /// Tracker settings
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Evaluator used for analysis
    pub fn evaluator(&self) -> &RuleEvaluator {
        &self.evaluator
    }

    /// Validate and store a reading, then analyze the default window
    pub async fn submit_reading(&self, submission: MoodSubmission) -> Result<SubmissionAck> {
        self.submit_reading_at(submission, Utc::now()).await
    }

    /// [`Self::submit_reading`] with an explicit clock
    ///
    /// A rejected submission leaves the history untouched.
    pub async fn submit_reading_at(
        &self,
        submission: MoodSubmission,
        now: DateTime<Utc>,
    ) -> Result<SubmissionAck> {
        let reading = submission.validate_at(now).inspect_err(|e| {
            self.logger.debug(&format!("Rejected mood submission: {}", e));
        })?;

        let reading_id = reading.id();
        let user_id = reading.user_id().to_string();
        let mood_score = reading.mood_score();

        let outcome = self.store.append(reading).await?;
        self.logger.info(&format!(
            "Stored mood reading {} for user {} (score {}, history {})",
            reading_id, user_id, mood_score, outcome.len
        ));

        let history = self.store.history(&user_id).await?;
        let analysis = self
            .evaluator
            .evaluate(&history, self.config.default_window_days, now);
        self.report(&user_id, &analysis);

        Ok(SubmissionAck {
            reading_id,
            user_id,
            mood_score,
            history_len: outcome.len,
            evicted: outcome.evicted.is_some(),
            analysis,
        })
    }

    /// Analyze a user's history over `window_days` (default window when `None`)
    pub async fn analyze(&self, user_id: &str, window_days: Option<u32>) -> Result<MoodAnalysis> {
        self.analyze_at(user_id, window_days, Utc::now()).await
    }

    /// [`Self::analyze`] with an explicit clock
    pub async fn analyze_at(
        &self,
        user_id: &str,
        window_days: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<MoodAnalysis> {
        if user_id.trim().is_empty() {
            return Err(MindwellError::validation("user_id must not be empty"));
        }
        if self.config.strict_user_lookup && !self.store.contains_user(user_id).await? {
            return Err(MindwellError::not_found(format!("user {}", user_id)));
        }

        let window_days = window_days.unwrap_or(self.config.default_window_days);
        let history = self.store.history(user_id).await?;
        let analysis = self.evaluator.evaluate(&history, window_days, now);
        self.logger.debug(&format!(
            "Analyzed {} readings for user {} over {} days: trend {}",
            analysis.reading_count, user_id, window_days, analysis.mood_trend
        ));
        Ok(analysis)
    }

    /// Drop a user's stored history
    pub async fn clear_history(&self, user_id: &str) -> Result<usize> {
        let removed = self.store.clear(user_id).await?;
        self.logger
            .info(&format!("Cleared {} readings for user {}", removed, user_id));
        Ok(removed)
    }

    fn report(&self, user_id: &str, analysis: &MoodAnalysis) {
        if analysis.has_alert(AlertCode::CrisisDetected) {
            self.logger.error(&format!(
                "Crisis indicators detected for user {} ({} matches)",
                user_id,
                analysis.crisis_indicators.len()
            ));
        } else if analysis.needs_intervention {
            let codes: Vec<&str> = analysis.alerts.iter().map(|a| a.as_str()).collect();
            self.logger.warn(&format!(
                "User {} needs intervention: {}",
                user_id,
                codes.join(", ")
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use mindwell_core::{AppendOutcome, MoodReading, MoodTrend, Recommendation};
    use mockall::mock;

    mock! {
        pub Store {}

        #[async_trait]
        impl HistoryStore for Store {
            async fn append(&self, reading: MoodReading) -> Result<AppendOutcome>;
            async fn history(&self, user_id: &str) -> Result<Vec<MoodReading>>;
            async fn contains_user(&self, user_id: &str) -> Result<bool>;
            async fn clear(&self, user_id: &str) -> Result<usize>;
            fn capacity(&self) -> usize;
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 15, 21, 30, 0).unwrap()
    }

    fn tracker() -> MoodTracker {
        MoodTracker::in_memory(Arc::new(AlertThresholds::default()), TrackerConfig::default())
            .unwrap()
    }

    #[tokio::test]
    async fn test_invalid_submission_never_reaches_store() {
        let mut store = MockStore::new();
        store.expect_append().never();
        let tracker = MoodTracker::new(
            Arc::new(store),
            Arc::new(AlertThresholds::default()),
            TrackerConfig::default(),
        );

        let err = tracker
            .submit_reading_at(MoodSubmission::new("u1", 11), now())
            .await
            .unwrap_err();
        assert!(err.is_validation());

        let err = tracker
            .submit_reading_at(MoodSubmission::new("u1", 5).with_stress(0), now())
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockStore::new();
        store
            .expect_append()
            .times(1)
            .returning(|_| Err(MindwellError::store("disk on fire")));
        store.expect_history().never();
        let tracker = MoodTracker::new(
            Arc::new(store),
            Arc::new(AlertThresholds::default()),
            TrackerConfig::default(),
        );

        let err = tracker
            .submit_reading_at(MoodSubmission::new("u1", 5), now())
            .await
            .unwrap_err();
        assert!(matches!(err, MindwellError::Store(_)));
    }

    #[tokio::test]
    async fn test_strict_lookup_reports_unknown_user() {
        let mut store = MockStore::new();
        store
            .expect_contains_user()
            .withf(|user| user == "ghost")
            .returning(|_| Ok(false));
        store.expect_history().never();
        let tracker = MoodTracker::new(
            Arc::new(store),
            Arc::new(AlertThresholds::default()),
            TrackerConfig::default().strict(),
        );

        let err = tracker.analyze_at("ghost", None, now()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_lenient_lookup_returns_neutral() {
        let analysis = tracker().analyze_at("ghost", Some(7), now()).await.unwrap();
        assert_eq!(analysis.mood_trend, MoodTrend::Stable);
        assert!(analysis.alerts.is_empty());
        assert_eq!(analysis.recommendations, vec![Recommendation::StartMoodTracking]);
    }

    #[tokio::test]
    async fn test_blank_user_rejected_on_analyze() {
        let err = tracker().analyze_at("  ", None, now()).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_submit_returns_ack_with_analysis() {
        let tracker = tracker();
        for (i, score) in [2, 2].iter().enumerate() {
            tracker
                .submit_reading_at(
                    MoodSubmission::new("u1", *score).at(now() - Duration::days(2 - i as i64)),
                    now(),
                )
                .await
                .unwrap();
        }

        let ack = tracker
            .submit_reading_at(MoodSubmission::new("u1", 2).with_notes("rough"), now())
            .await
            .unwrap();
        assert_eq!(ack.user_id, "u1");
        assert_eq!(ack.mood_score, 2);
        assert_eq!(ack.history_len, 3);
        assert!(!ack.evicted);
        assert!(ack.analysis.has_alert(AlertCode::ConsecutiveLowMood));
        assert!(ack.analysis.needs_intervention);
    }

    #[tokio::test]
    async fn test_window_argument_overrides_default() {
        let tracker = tracker();
        tracker
            .submit_reading_at(
                MoodSubmission::new("u1", 4).at(now() - Duration::days(20)),
                now(),
            )
            .await
            .unwrap();
        tracker
            .submit_reading_at(MoodSubmission::new("u1", 8), now())
            .await
            .unwrap();

        let week = tracker.analyze_at("u1", None, now()).await.unwrap();
        assert_eq!(week.reading_count, 1);
        assert_eq!(week.window_days, 7);

        let month = tracker.analyze_at("u1", Some(30), now()).await.unwrap();
        assert_eq!(month.reading_count, 2);
        assert_eq!(month.average_mood, Some(6.0));
    }

    #[tokio::test]
    async fn test_clear_history() {
        let tracker = tracker();
        tracker
            .submit_reading_at(MoodSubmission::new("u1", 5), now())
            .await
            .unwrap();
        assert_eq!(tracker.clear_history("u1").await.unwrap(), 1);
        let analysis = tracker.analyze_at("u1", None, now()).await.unwrap();
        assert_eq!(analysis.reading_count, 0);
    }

    #[test]
    fn test_zero_capacity_config_rejected() {
        let config = TrackerConfig {
            history_capacity: 0,
            ..Default::default()
        };
        assert!(MoodTracker::in_memory(Arc::new(AlertThresholds::default()), config).is_err());
    }
}
