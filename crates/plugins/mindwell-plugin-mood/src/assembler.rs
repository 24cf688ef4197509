//! Caller-facing response shapes
//!
//! Plain field mapping from [`MoodAnalysis`] and [`SubmissionAck`]; codes
//! become strings and the average is rounded to two decimals.

use crate::tracker::SubmissionAck;
use mindwell_core::{CrisisIndicator, MoodAnalysis};
use serde::{Deserialize, Serialize};

/// Crisis keyword hit as returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisIndicatorResponse {
    /// Reading the keyword was found in
    pub reading_id: String,
    /// Matched keyword
    pub keyword: String,
}

impl From<&CrisisIndicator> for CrisisIndicatorResponse {
    fn from(indicator: &CrisisIndicator) -> Self {
        Self {
            reading_id: indicator.reading_id.to_string(),
            keyword: indicator.keyword.clone(),
        }
    }
}

/// Analysis record returned by `analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysisResponse {
    /// User the analysis belongs to
    pub user_id: String,
    /// `improving`, `stable` or `declining`
    pub mood_trend: String,
    /// `null` when the window was empty
    pub average_mood: Option<f64>,
    /// Escalation flag for the caller
    pub needs_intervention: bool,
    /// Alert codes in evaluation order
    pub alerts: Vec<String>,
    /// Recommendation codes, de-duplicated
    pub recommendations: Vec<String>,
    /// Human-readable pattern descriptions
    pub patterns: Vec<String>,
    /// Keyword hits behind `crisis_detected`
    pub crisis_indicators: Vec<CrisisIndicatorResponse>,
    /// Readings inside the window
    pub reading_count: usize,
    /// Window length used
    pub window_days: u32,
}

/// Record returned for an accepted submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntryResponse {
    /// Always `success`; rejected submissions surface as errors
    pub status: String,
    /// Id of the stored reading
    pub reading_id: String,
    /// Score as stored
    pub mood_score: u8,
    /// User history length after the append
    pub history_len: usize,
    /// Whether the oldest reading was dropped to make room
    pub evicted: bool,
    /// Analysis of the default window after the append
    pub analysis: MoodAnalysisResponse,
    /// Same as `analysis.recommendations`
    pub recommendations: Vec<String>,
    /// Same as `analysis.alerts`
    pub alerts: Vec<String>,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Map an analysis to its response shape
pub fn assemble_analysis(user_id: &str, analysis: &MoodAnalysis) -> MoodAnalysisResponse {
    MoodAnalysisResponse {
        user_id: user_id.to_string(),
        mood_trend: analysis.mood_trend.as_str().to_string(),
        average_mood: analysis.average_mood.map(round2),
        needs_intervention: analysis.needs_intervention,
        alerts: analysis.alerts.iter().map(|a| a.as_str().to_string()).collect(),
        recommendations: analysis
            .recommendations
            .iter()
            .map(|r| r.as_str().to_string())
            .collect(),
        patterns: analysis
            .patterns
            .iter()
            .map(|p| p.description().to_string())
            .collect(),
        crisis_indicators: analysis.crisis_indicators.iter().map(Into::into).collect(),
        reading_count: analysis.reading_count,
        window_days: analysis.window_days,
    }
}

/// Map a submission acknowledgement to its response shape
pub fn assemble_entry(ack: &SubmissionAck) -> MoodEntryResponse {
    let analysis = assemble_analysis(&ack.user_id, &ack.analysis);
    MoodEntryResponse {
        status: "success".to_string(),
        reading_id: ack.reading_id.to_string(),
        mood_score: ack.mood_score,
        history_len: ack.history_len,
        evicted: ack.evicted,
        recommendations: analysis.recommendations.clone(),
        alerts: analysis.alerts.clone(),
        analysis,
    }
}
