//! Crisis assessment of stored mood readings

use mindwell_core::MoodSubmission;
use mindwell_plugin_crisis::{CrisisDetector, CrisisLevel, EscalationType, RiskFactor};

#[test]
fn test_reading_with_self_harm_note_escalates() {
    let reading = MoodSubmission::new("user-7", 2)
        .with_emotions(["numb"])
        .with_notes("I want to hurt myself again")
        .validate()
        .unwrap();

    let detector = CrisisDetector::new();
    let assessment = detector.assess_reading(&reading);
    assert_eq!(assessment.crisis_level, CrisisLevel::High);
    assert!(assessment.has_factor(RiskFactor::SelfHarm));
    assert!(assessment.escalation_needed);

    let plan = detector.escalation_plan(&assessment, EscalationType::Professional);
    assert!(plan.escalated);
    assert_eq!(plan.crisis_level, CrisisLevel::High);
}

#[test]
fn test_reading_without_text_is_none() {
    let reading = MoodSubmission::new("user-7", 8).validate().unwrap();
    let assessment = CrisisDetector::new().assess_reading(&reading);
    assert_eq!(assessment.crisis_level, CrisisLevel::None);
    assert_eq!(assessment.trigger_content, "");
    assert_eq!(assessment.confidence, 0.5);
}

#[test]
fn test_negated_phrase_scores_lower() {
    let detector = CrisisDetector::new();
    let plain = detector.assess_reading(
        &MoodSubmission::new("u", 4)
            .with_notes("I feel hopeless")
            .validate()
            .unwrap(),
    );
    let negated = detector.assess_reading(
        &MoodSubmission::new("u", 4)
            .with_notes("I do not feel hopeless")
            .validate()
            .unwrap(),
    );
    assert!(negated.risk_score < plain.risk_score);
    assert!(negated.risk_score > 0.0);
}

#[test]
fn test_assessment_serializes_snake_case() {
    let reading = MoodSubmission::new("u", 3)
        .with_notes("all alone and triggered by flashbacks")
        .validate()
        .unwrap();
    let assessment = CrisisDetector::new().assess_reading(&reading);
    let json = serde_json::to_value(&assessment).unwrap();
    assert_eq!(json["trigger_source"], "mood");
    let factors: Vec<&str> = json["detected_factors"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(factors, vec!["isolation", "trauma"]);
    assert_eq!(json["crisis_level"], "medium");
}
