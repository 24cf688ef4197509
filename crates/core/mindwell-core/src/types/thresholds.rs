//! Alert thresholds: process-wide, read-only rule configuration

use crate::config::{parse_bool_setting, parse_setting, split_list};
use crate::{MindwellError, Result};
use serde::{Deserialize, Serialize};

/// Default crisis keywords (case-insensitive substring match)
pub const DEFAULT_CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "kill myself",
    "end it all",
    "hopeless",
    "worthless",
    "can't go on",
    "no point",
    "give up",
    "hurt myself",
];

/// Constants for trend classification
///
/// The window is cut into `segments` equal parts (rounded up, at least one
/// reading each); the mean of the first part is compared with the mean of
/// the last part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Minimum difference between segment means to call a direction
    pub delta: f64,

    /// Number of segments the window is cut into (3 = thirds)
    pub segments: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            delta: 1.0,
            segments: 3,
        }
    }
}

/// Rule thresholds for the mood evaluator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    /// Scores at or below this count as low mood
    pub low_mood_threshold: u8,

    /// Contiguous low readings needed for a `consecutive_low_mood` alert
    pub consecutive_low_days: usize,

    /// Latest stress at or above this raises `high_stress`
    pub stress_threshold: u8,

    /// Latest energy at or below this raises `low_energy`
    pub energy_threshold: u8,

    /// Crisis keywords, matched case-insensitively as substrings
    pub crisis_keywords: Vec<String>,

    /// Window average below this raises `persistent_low_mood`
    pub persistent_low_average: f64,

    /// Mean sleep below this (with low mood) is reported as a pattern
    pub short_sleep_hours: f64,

    /// Also scan emotion labels for crisis keywords
    pub scan_emotions: bool,

    /// Trend classification constants
    pub trend: TrendConfig,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_mood_threshold: 3,
            consecutive_low_days: 3,
            stress_threshold: 7,
            energy_threshold: 2,
            crisis_keywords: DEFAULT_CRISIS_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
            persistent_low_average: 3.0,
            short_sleep_hours: 6.0,
            scan_emotions: true,
            trend: TrendConfig::default(),
        }
    }
}

impl AlertThresholds {
    /// Load thresholds from `MINDWELL_*` environment variables
    ///
    /// Unset variables keep their defaults. The result is validated.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build thresholds from any `MINDWELL_*` key lookup
    ///
    /// Used with host-supplied plugin config layered over the environment.
    /// Missing keys keep their defaults, unparsable values are rejected and
    /// the result is validated.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let thresholds = Self {
            low_mood_threshold: parse_setting(
                "MINDWELL_LOW_MOOD_THRESHOLD",
                lookup("MINDWELL_LOW_MOOD_THRESHOLD"),
                defaults.low_mood_threshold,
            )?,
            consecutive_low_days: parse_setting(
                "MINDWELL_CONSECUTIVE_LOW_DAYS",
                lookup("MINDWELL_CONSECUTIVE_LOW_DAYS"),
                defaults.consecutive_low_days,
            )?,
            stress_threshold: parse_setting(
                "MINDWELL_STRESS_THRESHOLD",
                lookup("MINDWELL_STRESS_THRESHOLD"),
                defaults.stress_threshold,
            )?,
            energy_threshold: parse_setting(
                "MINDWELL_ENERGY_THRESHOLD",
                lookup("MINDWELL_ENERGY_THRESHOLD"),
                defaults.energy_threshold,
            )?,
            crisis_keywords: lookup("MINDWELL_CRISIS_KEYWORDS")
                .map(|v| split_list(&v))
                .unwrap_or(defaults.crisis_keywords),
            persistent_low_average: parse_setting(
                "MINDWELL_PERSISTENT_LOW_AVERAGE",
                lookup("MINDWELL_PERSISTENT_LOW_AVERAGE"),
                defaults.persistent_low_average,
            )?,
            short_sleep_hours: parse_setting(
                "MINDWELL_SHORT_SLEEP_HOURS",
                lookup("MINDWELL_SHORT_SLEEP_HOURS"),
                defaults.short_sleep_hours,
            )?,
            scan_emotions: parse_bool_setting(
                "MINDWELL_SCAN_EMOTIONS",
                lookup("MINDWELL_SCAN_EMOTIONS"),
                defaults.scan_emotions,
            )?,
            trend: TrendConfig {
                delta: parse_setting(
                    "MINDWELL_TREND_DELTA",
                    lookup("MINDWELL_TREND_DELTA"),
                    defaults.trend.delta,
                )?,
                segments: parse_setting(
                    "MINDWELL_TREND_SEGMENTS",
                    lookup("MINDWELL_TREND_SEGMENTS"),
                    defaults.trend.segments,
                )?,
            },
        };
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Parse thresholds from a JSON document; missing keys keep defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let thresholds: Self = serde_json::from_str(json)?;
        thresholds.validate()?;
        Ok(thresholds)
    }

    /// Reject configurations the evaluator cannot interpret
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("low_mood_threshold", self.low_mood_threshold),
            ("stress_threshold", self.stress_threshold),
            ("energy_threshold", self.energy_threshold),
        ] {
            if !(1..=10).contains(&value) {
                return Err(MindwellError::config(format!(
                    "{} must be between 1 and 10, got {}",
                    name, value
                )));
            }
        }
        if self.consecutive_low_days == 0 {
            return Err(MindwellError::config(
                "consecutive_low_days must be at least 1",
            ));
        }
        if !self.persistent_low_average.is_finite() || !self.short_sleep_hours.is_finite() {
            return Err(MindwellError::config(
                "persistent_low_average and short_sleep_hours must be finite",
            ));
        }
        if !self.trend.delta.is_finite() || self.trend.delta < 0.0 {
            return Err(MindwellError::config(format!(
                "trend delta must be a non-negative number, got {}",
                self.trend.delta
            )));
        }
        if self.trend.segments == 0 {
            return Err(MindwellError::config("trend segments must be at least 1"));
        }
        if self.crisis_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(MindwellError::config(
                "crisis keywords must not contain blank entries",
            ));
        }
        Ok(())
    }

    /// Crisis keywords lowercased for matching
    pub fn normalized_keywords(&self) -> Vec<String> {
        self.crisis_keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults_are_valid() {
        let t = AlertThresholds::default();
        assert!(t.validate().is_ok());
        assert_eq!(t.low_mood_threshold, 3);
        assert_eq!(t.consecutive_low_days, 3);
        assert!(t.crisis_keywords.iter().any(|k| k == "hopeless"));
        assert_eq!(t.trend.segments, 3);
    }

    #[test]
    fn test_json_partial_override() {
        let t = AlertThresholds::from_json_str(
            r#"{"low_mood_threshold": 4, "crisis_keywords": ["Hopeless"], "trend": {"delta": 0.5}}"#,
        )
        .unwrap();
        assert_eq!(t.low_mood_threshold, 4);
        assert_eq!(t.stress_threshold, 7);
        assert_eq!(t.trend.delta, 0.5);
        assert_eq!(t.trend.segments, 3);
        assert_eq!(t.normalized_keywords(), vec!["hopeless".to_string()]);
    }

    #[test]
    fn test_invalid_configs_rejected() {
        assert!(AlertThresholds::from_json_str(r#"{"consecutive_low_days": 0}"#).is_err());
        assert!(AlertThresholds::from_json_str(r#"{"low_mood_threshold": 0}"#).is_err());
        assert!(AlertThresholds::from_json_str(r#"{"trend": {"segments": 0}}"#).is_err());
        assert!(AlertThresholds::from_json_str(r#"{"trend": {"delta": -1.0}}"#).is_err());
        assert!(AlertThresholds::from_json_str(r#"{"crisis_keywords": ["ok", " "]}"#).is_err());
    }

    #[test]
    fn test_from_env() {
        env::set_var("MINDWELL_CONSECUTIVE_LOW_DAYS", "5");
        env::set_var("MINDWELL_CRISIS_KEYWORDS", "desperate, trapped");
        let t = AlertThresholds::from_env().unwrap();
        assert_eq!(t.consecutive_low_days, 5);
        assert_eq!(
            t.crisis_keywords,
            vec!["desperate".to_string(), "trapped".to_string()]
        );
        env::remove_var("MINDWELL_CONSECUTIVE_LOW_DAYS");
        env::remove_var("MINDWELL_CRISIS_KEYWORDS");
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let lookup = |key: &str| match key {
            "MINDWELL_LOW_MOOD_THRESHOLD" => Some("42".to_string()),
            _ => None,
        };
        assert!(AlertThresholds::from_lookup(lookup).is_err());

        let unparsable = |key: &str| (key == "MINDWELL_TREND_DELTA").then(|| "steep".to_string());
        assert!(AlertThresholds::from_lookup(unparsable).is_err());

        let ok = |key: &str| (key == "MINDWELL_STRESS_THRESHOLD").then(|| "6".to_string());
        let t = AlertThresholds::from_lookup(ok).unwrap();
        assert_eq!(t.stress_threshold, 6);
        assert_eq!(t.low_mood_threshold, 3);
    }
}
