//! Alert to recommendation mapping

use mindwell_core::{AlertCode, Recommendation};

/// Fixed recommendations for one alert
pub fn recommendations_for(alert: AlertCode) -> &'static [Recommendation] {
    use Recommendation::*;
    match alert {
        AlertCode::CrisisDetected => &[ImmediateProfessionalSupport, CrisisHotlineContact],
        AlertCode::ConsecutiveLowMood => &[
            ProfessionalConsultation,
            BreathingExercises,
            MoodBoostingActivities,
            SocialConnection,
        ],
        AlertCode::PersistentLowMood => &[ImmediateSupportConsideration, CopingStrategiesReview],
        AlertCode::DecliningMoodTrend => &[MoodTrackingContinuation, CopingStrategiesReview],
        AlertCode::HighStress => &[
            StressReductionTechniques,
            MindfulnessPractice,
            RelaxationExercises,
        ],
        AlertCode::LowEnergy => &[EnergyBoostingActivities, SleepHygieneCheck, NutritionReview],
    }
}

/// Recommendations for a sequence of alerts, first occurrence wins
pub fn derive_recommendations(alerts: &[AlertCode]) -> Vec<Recommendation> {
    let mut out: Vec<Recommendation> = Vec::new();
    for rec in alerts.iter().flat_map(|a| recommendations_for(*a)) {
        if !out.contains(rec) {
            out.push(*rec);
        }
    }
    out
}
