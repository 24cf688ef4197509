//! Rule evaluator
//!
//! Pure function of (history, window, now, thresholds) to [`MoodAnalysis`].
//! Never fails on validated readings.

use crate::patterns::detect_patterns;
use crate::recommendations::derive_recommendations;
use crate::rules::{standard_rules, Findings, Rule, RuleContext};
use crate::window::{average_mood, classify_trend, select_window};
use chrono::{DateTime, Utc};
use mindwell_core::{AlertThresholds, MoodAnalysis, MoodReading};
use std::sync::Arc;

/// Applies the standard rule set to a user's history
pub struct RuleEvaluator {
    thresholds: Arc<AlertThresholds>,
    keywords: Vec<String>,
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEvaluator {
    /// Create an evaluator over shared thresholds
    pub fn new(thresholds: Arc<AlertThresholds>) -> Self {
        let keywords = thresholds.normalized_keywords();
        Self {
            thresholds,
            keywords,
            rules: standard_rules(),
        }
    }

    /// Active thresholds
    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Names of the rules in evaluation order
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Analyze `history` (oldest first) over the trailing `window_days`
    pub fn evaluate(
        &self,
        history: &[MoodReading],
        window_days: u32,
        now: DateTime<Utc>,
    ) -> MoodAnalysis {
        let window = select_window(history, window_days, now);
        if window.is_empty() {
            return MoodAnalysis::neutral(window_days);
        }

        let average = average_mood(&window);
        let trend = classify_trend(&window, &self.thresholds.trend);
        let ctx = RuleContext {
            window: &window,
            thresholds: &self.thresholds,
            keywords: &self.keywords,
            trend,
            average,
        };

        let mut findings = Findings::default();
        for rule in &self.rules {
            rule.evaluate(&ctx, &mut findings);
        }

        let needs_intervention = findings.needs_intervention();
        let recommendations = derive_recommendations(&findings.alerts);
        let patterns = detect_patterns(
            &window,
            trend,
            average,
            &findings.alerts,
            &self.thresholds,
        );

        MoodAnalysis {
            mood_trend: trend,
            average_mood: average,
            needs_intervention,
            alerts: findings.alerts,
            recommendations,
            patterns,
            crisis_indicators: findings.crisis_indicators,
            reading_count: window.len(),
            window_days,
        }
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new(Arc::new(AlertThresholds::default()))
    }
}
