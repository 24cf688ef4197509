//! Derived analysis types

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Direction of mood over a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodTrend {
    /// Later readings are higher than earlier ones by more than the delta
    Improving,
    /// No meaningful change
    #[default]
    Stable,
    /// Later readings are lower than earlier ones by more than the delta
    Declining,
}

impl MoodTrend {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodTrend::Improving => "improving",
            MoodTrend::Stable => "stable",
            MoodTrend::Declining => "declining",
        }
    }
}

impl fmt::Display for MoodTrend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious an alert is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Descriptive only
    Info,
    /// Worth surfacing, does not escalate
    Warning,
    /// Sets `needs_intervention`
    Intervention,
    /// Sets `needs_intervention`, highest priority
    Crisis,
}

/// Discrete flag raised by a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCode {
    /// A crisis keyword appeared in a reading
    CrisisDetected,
    /// The newest readings are all low
    ConsecutiveLowMood,
    /// The window average is very low
    PersistentLowMood,
    /// The window trend is declining
    DecliningMoodTrend,
    /// Latest stress is high
    HighStress,
    /// Latest energy is low
    LowEnergy,
}

impl AlertCode {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCode::CrisisDetected => "crisis_detected",
            AlertCode::ConsecutiveLowMood => "consecutive_low_mood",
            AlertCode::PersistentLowMood => "persistent_low_mood",
            AlertCode::DecliningMoodTrend => "declining_mood_trend",
            AlertCode::HighStress => "high_stress",
            AlertCode::LowEnergy => "low_energy",
        }
    }

    /// Severity of this alert
    pub fn severity(&self) -> AlertSeverity {
        match self {
            AlertCode::CrisisDetected => AlertSeverity::Crisis,
            AlertCode::ConsecutiveLowMood | AlertCode::PersistentLowMood => {
                AlertSeverity::Intervention
            }
            AlertCode::HighStress | AlertCode::LowEnergy => AlertSeverity::Warning,
            AlertCode::DecliningMoodTrend => AlertSeverity::Info,
        }
    }

    /// Whether this alert on its own requires intervention
    pub fn requires_intervention(&self) -> bool {
        self.severity() >= AlertSeverity::Intervention
    }
}

impl fmt::Display for AlertCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommendation code surfaced to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Reach a professional now
    ImmediateProfessionalSupport,
    /// Contact a crisis hotline
    CrisisHotlineContact,
    /// Book a professional consultation
    ProfessionalConsultation,
    /// Consider immediate support
    ImmediateSupportConsideration,
    /// Revisit coping strategies
    CopingStrategiesReview,
    /// Keep logging moods
    MoodTrackingContinuation,
    /// Activities that lift mood
    MoodBoostingActivities,
    /// Reach out to people
    SocialConnection,
    /// Breathing exercises
    BreathingExercises,
    /// Stress reduction techniques
    StressReductionTechniques,
    /// Mindfulness practice
    MindfulnessPractice,
    /// Relaxation exercises
    RelaxationExercises,
    /// Activities that raise energy
    EnergyBoostingActivities,
    /// Check sleep habits
    SleepHygieneCheck,
    /// Review nutrition
    NutritionReview,
    /// No data yet
    StartMoodTracking,
}

impl Recommendation {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::ImmediateProfessionalSupport => "immediate_professional_support",
            Recommendation::CrisisHotlineContact => "crisis_hotline_contact",
            Recommendation::ProfessionalConsultation => "professional_consultation",
            Recommendation::ImmediateSupportConsideration => "immediate_support_consideration",
            Recommendation::CopingStrategiesReview => "coping_strategies_review",
            Recommendation::MoodTrackingContinuation => "mood_tracking_continuation",
            Recommendation::MoodBoostingActivities => "mood_boosting_activities",
            Recommendation::SocialConnection => "social_connection",
            Recommendation::BreathingExercises => "breathing_exercises",
            Recommendation::StressReductionTechniques => "stress_reduction_techniques",
            Recommendation::MindfulnessPractice => "mindfulness_practice",
            Recommendation::RelaxationExercises => "relaxation_exercises",
            Recommendation::EnergyBoostingActivities => "energy_boosting_activities",
            Recommendation::SleepHygieneCheck => "sleep_hygiene_check",
            Recommendation::NutritionReview => "nutrition_review",
            Recommendation::StartMoodTracking => "start_mood_tracking",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive pattern found in a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodPattern {
    /// Many readings at or below the low threshold
    FrequentLowMoods,
    /// Most readings score 8 or higher
    GenerallyPositive,
    /// Declining trend together with high stress
    DecliningWithElevatedStress,
    /// Declining trend together with low energy
    DecliningWithLowEnergy,
    /// Improving trend although stress is high
    ImprovingDespiteStress,
    /// Short sleep alongside low mood
    ShortSleepWithLowMood,
}

impl MoodPattern {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            MoodPattern::FrequentLowMoods => "frequent_low_moods",
            MoodPattern::GenerallyPositive => "generally_positive",
            MoodPattern::DecliningWithElevatedStress => "declining_with_elevated_stress",
            MoodPattern::DecliningWithLowEnergy => "declining_with_low_energy",
            MoodPattern::ImprovingDespiteStress => "improving_despite_stress",
            MoodPattern::ShortSleepWithLowMood => "short_sleep_with_low_mood",
        }
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            MoodPattern::FrequentLowMoods => "frequent low moods",
            MoodPattern::GenerallyPositive => "generally positive mood",
            MoodPattern::DecliningWithElevatedStress => "declining mood with elevated stress",
            MoodPattern::DecliningWithLowEnergy => "declining mood with low energy",
            MoodPattern::ImprovingDespiteStress => "improving mood despite elevated stress",
            MoodPattern::ShortSleepWithLowMood => "short sleep alongside low mood",
        }
    }
}

impl fmt::Display for MoodPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A crisis keyword found in a specific reading
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrisisIndicator {
    /// Reading the keyword was found in
    pub reading_id: Uuid,
    /// Matched keyword (normalized)
    pub keyword: String,
}

/// Result of evaluating a user's history window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    /// Trend over the window
    pub mood_trend: MoodTrend,

    /// Mean mood score; `None` for an empty window
    pub average_mood: Option<f64>,

    /// Escalation flag
    pub needs_intervention: bool,

    /// Alerts in rule order, without duplicates
    pub alerts: Vec<AlertCode>,

    /// Recommendations derived from the alerts, without duplicates
    pub recommendations: Vec<Recommendation>,

    /// Descriptive patterns
    pub patterns: Vec<MoodPattern>,

    /// Crisis keyword hits backing a `crisis_detected` alert
    pub crisis_indicators: Vec<CrisisIndicator>,

    /// Readings inside the window
    pub reading_count: usize,

    /// Window size in days
    pub window_days: u32,
}

impl MoodAnalysis {
    /// Neutral analysis for a window with no readings
    pub fn neutral(window_days: u32) -> Self {
        Self {
            mood_trend: MoodTrend::Stable,
            average_mood: None,
            needs_intervention: false,
            alerts: Vec::new(),
            recommendations: vec![Recommendation::StartMoodTracking],
            patterns: Vec::new(),
            crisis_indicators: Vec::new(),
            reading_count: 0,
            window_days,
        }
    }

    /// Whether a given alert fired
    pub fn has_alert(&self, code: AlertCode) -> bool {
        self.alerts.contains(&code)
    }

    /// Highest severity among fired alerts
    pub fn max_severity(&self) -> Option<AlertSeverity> {
        self.alerts.iter().map(|a| a.severity()).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(AlertCode::CrisisDetected.requires_intervention());
        assert!(AlertCode::ConsecutiveLowMood.requires_intervention());
        assert!(!AlertCode::HighStress.requires_intervention());
        assert!(!AlertCode::DecliningMoodTrend.requires_intervention());
        assert!(AlertSeverity::Crisis > AlertSeverity::Warning);
    }

    #[test]
    fn test_wire_names_match_serde() {
        for code in [
            AlertCode::CrisisDetected,
            AlertCode::ConsecutiveLowMood,
            AlertCode::LowEnergy,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
        let json = serde_json::to_string(&Recommendation::CrisisHotlineContact).unwrap();
        assert_eq!(json, "\"crisis_hotline_contact\"");
        let json = serde_json::to_string(&MoodPattern::DecliningWithElevatedStress).unwrap();
        assert_eq!(json, "\"declining_with_elevated_stress\"");
    }

    #[test]
    fn test_neutral_analysis() {
        let a = MoodAnalysis::neutral(7);
        assert_eq!(a.mood_trend, MoodTrend::Stable);
        assert!(a.average_mood.is_none());
        assert!(a.alerts.is_empty());
        assert!(!a.needs_intervention);
        assert_eq!(a.max_severity(), None);
    }

    #[test]
    fn test_pattern_description() {
        assert_eq!(
            MoodPattern::DecliningWithElevatedStress.to_string(),
            "declining mood with elevated stress"
        );
    }
}
