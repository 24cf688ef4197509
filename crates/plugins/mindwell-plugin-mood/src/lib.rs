//! Mood tracking plugin
//!
//! Rule-based analysis of a user's recent mood readings:
//!
//! - Window selection, average and trend classification
//! - Crisis keyword, low-mood streak, stress and energy alerts
//! - Deterministic recommendations and descriptive patterns
//! - Response shapes for callers
//!
//! ```no_run
//! use mindwell_plugin_mood::{assemble_analysis, MoodTracker};
//! use mindwell_core::MoodSubmission;
//!
//! # async fn run() -> mindwell_core::Result<()> {
//! let tracker = MoodTracker::from_env()?;
//! tracker
//!     .submit_reading(MoodSubmission::new("user-1", 4).with_notes("long week"))
//!     .await?;
//! let analysis = tracker.analyze("user-1", None).await?;
//! println!("{}", serde_json::to_string(&assemble_analysis("user-1", &analysis))?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assembler;
pub mod config;
pub mod evaluator;
pub mod patterns;
pub mod recommendations;
pub mod rules;
pub mod tracker;
pub mod window;

pub use assembler::{
    assemble_analysis, assemble_entry, CrisisIndicatorResponse, MoodAnalysisResponse,
    MoodEntryResponse,
};
pub use config::{TrackerConfig, DEFAULT_WINDOW_DAYS};
pub use evaluator::RuleEvaluator;
pub use rules::{standard_rules, Rule};
pub use tracker::{MoodTracker, SubmissionAck};

use async_trait::async_trait;
use mindwell_core::{
    render_settings_banner, resolve_setting_rows, AlertThresholds, MindwellError, Plugin,
    Result, DEFAULT_CRISIS_KEYWORDS, DEFAULT_HISTORY_CAPACITY,
};
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

/// Mood tracking plugin
pub struct MoodPlugin;

#[async_trait]
impl Plugin for MoodPlugin {
    fn name(&self) -> &str {
        "mood"
    }

    fn description(&self) -> &str {
        "Mood trend, alert and recommendation engine"
    }

    async fn init(&self, config: HashMap<String, String>) -> Result<()> {
        let rows = resolve_setting_rows(self.config_schema().as_ref(), &config);
        println!(
            "{}",
            render_settings_banner(
                "mindwell mood",
                "Trends  ! Low-mood streaks  ! Crisis keywords",
                &rows
            )
        );

        // host config wins over the environment
        let lookup = |key: &str| config.get(key).cloned().or_else(|| std::env::var(key).ok());
        let thresholds = AlertThresholds::from_lookup(lookup)?;
        let tracker_config = TrackerConfig::from_lookup(lookup)?;
        if tracker_config.history_capacity == 0 {
            return Err(MindwellError::config(
                "MINDWELL_HISTORY_CAPACITY must be at least 1",
            ));
        }
        info!(
            "Mood plugin ready: low<={} for {} readings, stress>={}, energy<={}, {} crisis keywords",
            thresholds.low_mood_threshold,
            thresholds.consecutive_low_days,
            thresholds.stress_threshold,
            thresholds.energy_threshold,
            thresholds.crisis_keywords.len()
        );
        info!(
            "Mood history: {} readings per user, {}-day default window",
            tracker_config.history_capacity, tracker_config.default_window_days
        );
        Ok(())
    }

    fn config_schema(&self) -> Option<serde_json::Value> {
        let defaults = AlertThresholds::default();
        Some(json!({
            "MINDWELL_LOW_MOOD_THRESHOLD": {
                "type": "integer",
                "default": defaults.low_mood_threshold,
                "description": "Scores at or below this count as low"
            },
            "MINDWELL_CONSECUTIVE_LOW_DAYS": {
                "type": "integer",
                "default": defaults.consecutive_low_days,
                "description": "Newest low readings needed to raise consecutive_low_mood"
            },
            "MINDWELL_STRESS_THRESHOLD": {
                "type": "integer",
                "default": defaults.stress_threshold,
                "description": "Latest stress at or above this raises high_stress"
            },
            "MINDWELL_ENERGY_THRESHOLD": {
                "type": "integer",
                "default": defaults.energy_threshold,
                "description": "Latest energy at or below this raises low_energy"
            },
            "MINDWELL_CRISIS_KEYWORDS": {
                "type": "string",
                "default": DEFAULT_CRISIS_KEYWORDS.join(","),
                "description": "Comma-separated crisis keywords"
            },
            "MINDWELL_PERSISTENT_LOW_AVERAGE": {
                "type": "number",
                "default": defaults.persistent_low_average,
                "description": "Window average below this raises persistent_low_mood"
            },
            "MINDWELL_TREND_DELTA": {
                "type": "number",
                "default": defaults.trend.delta,
                "description": "Segment mean difference needed for a non-stable trend"
            },
            "MINDWELL_TREND_SEGMENTS": {
                "type": "integer",
                "default": defaults.trend.segments,
                "description": "Window is split into this many segments for trend"
            },
            "MINDWELL_HISTORY_CAPACITY": {
                "type": "integer",
                "default": DEFAULT_HISTORY_CAPACITY,
                "description": "Readings retained per user"
            },
            "MINDWELL_DEFAULT_WINDOW_DAYS": {
                "type": "integer",
                "default": DEFAULT_WINDOW_DAYS,
                "description": "Analysis window when none is given"
            }
        }))
    }
}
