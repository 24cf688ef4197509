//! Crisis risk assessment
//!
//! Scores free text against weighted keyword patterns, classifies the
//! result into a [`CrisisLevel`] and attaches interventions and resources.
//! Assessment is pure: nothing is persisted or sent.

use crate::patterns::{default_patterns, CrisisKeywordPattern};
use crate::resources::ResourceCatalog;
use crate::types::{
    CrisisLevel, EscalationPlan, EscalationType, RiskAssessment, RiskFactor, TriggerSource,
};
use chrono::{DateTime, Utc};
use mindwell_core::{get_env_or, Logger, MindwellError, MoodReading, Result};

/// Interventions returned per assessment
pub const MAX_INTERVENTIONS: usize = 5;
/// Factor-specific interventions kept ahead of truncation
const MAX_FACTOR_INTERVENTIONS: usize = 2;

/// Risk above which a pattern flagged for immediate action triggers it
pub const IMMEDIATE_ACTION_SCORE: f64 = 0.7;
/// Risk above which escalation is needed regardless of level
pub const ESCALATION_SCORE: f64 = 0.8;

const CLEAR_INTENT: &[&str] = &["i want to", "i am going to", "i plan to", "i will"];

const CRITICAL_ACTIONS: &[&str] = &[
    "Crisis team notified immediately",
    "Emergency contact attempted",
    "Professional intervention initiated",
    "User flagged for immediate follow-up",
];
const CRITICAL_NEXT_STEPS: &[&str] = &[
    "Emergency services may be contacted",
    "Immediate professional assessment scheduled",
    "Family/emergency contacts will be notified",
];
const HIGH_ACTIONS: &[&str] = &[
    "Mental health professional notified",
    "Crisis counselor assigned",
    "Enhanced monitoring activated",
];
const HIGH_NEXT_STEPS: &[&str] = &[
    "Professional will contact within 2 hours",
    "Safety plan development scheduled",
    "Follow-up appointment arranged",
];
const NO_STEPS: &[&str] = &[];

/// Classify a combined risk score
pub fn classify_level(risk_score: f64, factors: &[RiskFactor]) -> CrisisLevel {
    let has = |f: RiskFactor| factors.contains(&f);

    if has(RiskFactor::SuicidalIdeation) && risk_score > 0.8 {
        CrisisLevel::Critical
    } else if risk_score > 0.7
        || has(RiskFactor::SuicidalIdeation)
        || has(RiskFactor::SelfHarm)
        || (has(RiskFactor::Hopelessness) && risk_score > 0.6)
    {
        CrisisLevel::High
    } else if risk_score > 0.4 || factors.len() >= 2 || has(RiskFactor::Hopelessness) {
        CrisisLevel::Medium
    } else if risk_score > 0.2 || !factors.is_empty() {
        CrisisLevel::Low
    } else {
        CrisisLevel::None
    }
}

/// Confidence in an assessment, in `[0, 1]`
pub fn confidence(content: &str, factors: &[RiskFactor], risk_score: f64) -> f64 {
    let length = content.trim().chars().count();
    let mut confidence = 0.5;
    if length > 50 {
        confidence += 0.1;
    }
    if length > 100 {
        confidence += 0.1;
    }
    confidence += (factors.len() as f64 * 0.15).min(0.3);
    confidence += risk_score * 0.2;

    let lower = content.to_lowercase();
    if CLEAR_INTENT.iter().any(|i| lower.contains(i)) {
        confidence += 0.2;
    }
    confidence.min(1.0)
}

fn level_interventions(level: CrisisLevel) -> &'static [&'static str] {
    match level {
        CrisisLevel::Critical => &[
            "Immediate professional intervention required",
            "Contact emergency services (911) if in immediate danger",
            "Call 988 Suicide & Crisis Lifeline immediately",
            "Do not leave person alone",
            "Remove any means of self-harm",
        ],
        CrisisLevel::High => &[
            "Contact crisis support immediately: 988",
            "Reach out to a trusted person",
            "Consider emergency room if feeling unsafe",
            "Remove access to means of harm",
            "Create safety plan",
        ],
        CrisisLevel::Medium => &[
            "Connect with mental health professional",
            "Use crisis text line: Text HOME to 741741",
            "Practice grounding techniques",
            "Reach out to support network",
            "Schedule therapy appointment",
        ],
        CrisisLevel::Low => &[
            "Monitor mood closely",
            "Practice self-care activities",
            "Consider counseling",
            "Use stress reduction techniques",
            "Stay connected with others",
        ],
        CrisisLevel::None => &[],
    }
}

fn factor_intervention(factor: RiskFactor) -> Option<&'static str> {
    match factor {
        RiskFactor::Isolation => Some("Focus on social connection and support"),
        RiskFactor::SubstanceAbuse => Some("Consider addiction treatment resources"),
        RiskFactor::Trauma => Some("Seek trauma-informed therapy"),
        _ => None,
    }
}

/// Interventions for a level and its factors, at most [`MAX_INTERVENTIONS`]
///
/// Level guidance comes first; up to two factor-specific items take the
/// remaining slots.
pub fn interventions(level: CrisisLevel, factors: &[RiskFactor]) -> Vec<String> {
    let specific: Vec<&str> = factors
        .iter()
        .filter_map(|f| factor_intervention(*f))
        .take(MAX_FACTOR_INTERVENTIONS)
        .collect();
    let room = MAX_INTERVENTIONS - specific.len();

    level_interventions(level)
        .iter()
        .take(room)
        .chain(specific.iter())
        .map(|s| s.to_string())
        .collect()
}

/// Weighted keyword crisis detector
pub struct CrisisDetector {
    patterns: Vec<CrisisKeywordPattern>,
    catalog: ResourceCatalog,
    logger: Logger,
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self {
            patterns: default_patterns(),
            catalog: ResourceCatalog::default(),
            logger: Logger::new("crisis"),
        }
    }
}

impl CrisisDetector {
    /// Detector with the built-in patterns and resources
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in detector, preferring resources for `MINDWELL_CRISIS_REGION` when set
    pub fn from_env() -> Self {
        let region = get_env_or("MINDWELL_CRISIS_REGION", "");
        let region = region.trim();
        if region.is_empty() {
            Self::default()
        } else {
            Self::default().with_catalog(ResourceCatalog::default().with_region(region))
        }
    }

    /// Replace the pattern set
    ///
    /// Weights must lie in `[0, 1]` and every pattern needs a keyword.
    /// Keywords and modifiers are lowercased.
    pub fn with_patterns(mut self, patterns: Vec<CrisisKeywordPattern>) -> Result<Self> {
        let mut normalized = Vec::with_capacity(patterns.len());
        for mut pattern in patterns {
            if !(0.0..=1.0).contains(&pattern.severity_weight) {
                return Err(MindwellError::config(format!(
                    "severity weight for {} must be within 0..=1, got {}",
                    pattern.risk_factor, pattern.severity_weight
                )));
            }
            pattern.keywords = pattern
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            if pattern.keywords.is_empty() {
                return Err(MindwellError::config(format!(
                    "pattern for {} has no keywords",
                    pattern.risk_factor
                )));
            }
            pattern.context_modifiers = pattern
                .context_modifiers
                .iter()
                .map(|m| m.trim().to_lowercase())
                .filter(|m| !m.is_empty())
                .collect();
            normalized.push(pattern);
        }
        self.patterns = normalized;
        Ok(self)
    }

    /// Replace the resource catalog
    pub fn with_catalog(mut self, catalog: ResourceCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Active patterns
    pub fn patterns(&self) -> &[CrisisKeywordPattern] {
        &self.patterns
    }

    /// Resource catalog
    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    /// Assess free text
    pub fn assess(&self, user_id: &str, content: &str, source: TriggerSource) -> RiskAssessment {
        self.assess_at(user_id, content, source, Utc::now())
    }

    /// [`Self::assess`] with an explicit clock
    pub fn assess_at(
        &self,
        user_id: &str,
        content: &str,
        source: TriggerSource,
        now: DateTime<Utc>,
    ) -> RiskAssessment {
        let lower = content.to_lowercase();
        let mut factors = Vec::new();
        let mut risk_score: f64 = 0.0;
        let mut immediate = false;

        for pattern in &self.patterns {
            let score = pattern.score(&lower);
            if score > 0.0 {
                factors.push(pattern.risk_factor);
                risk_score += score;
                if pattern.requires_immediate_action && score > IMMEDIATE_ACTION_SCORE {
                    immediate = true;
                }
            }
        }
        let risk_score = risk_score.min(1.0);

        let crisis_level = classify_level(risk_score, &factors);
        let escalation_needed =
            crisis_level >= CrisisLevel::High || immediate || risk_score > ESCALATION_SCORE;

        let assessment = RiskAssessment {
            user_id: user_id.to_string(),
            trigger_source: source,
            reading_id: None,
            trigger_content: content.to_string(),
            crisis_level,
            risk_score,
            confidence: confidence(content, &factors, risk_score),
            immediate_action_required: immediate,
            recommended_interventions: interventions(crisis_level, &factors),
            safety_resources: self.catalog.relevant(crisis_level),
            escalation_needed,
            detected_factors: factors,
            assessed_at: now,
        };
        self.report(&assessment);
        assessment
    }

    /// Assess the notes and emotion labels of a mood reading
    pub fn assess_reading(&self, reading: &MoodReading) -> RiskAssessment {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(notes) = reading.notes() {
            parts.push(notes);
        }
        parts.extend(reading.emotions().iter().map(String::as_str));
        let content = parts.join(". ");

        let mut assessment = self.assess(reading.user_id(), &content, TriggerSource::Mood);
        assessment.reading_id = Some(reading.id());
        assessment
    }

    /// Actions and next steps for escalating an assessment
    ///
    /// Only high and critical assessments produce an escalated plan.
    pub fn escalation_plan(
        &self,
        assessment: &RiskAssessment,
        escalation_type: EscalationType,
    ) -> EscalationPlan {
        self.escalation_plan_at(assessment, escalation_type, Utc::now())
    }

    /// [`Self::escalation_plan`] with an explicit clock
    pub fn escalation_plan_at(
        &self,
        assessment: &RiskAssessment,
        escalation_type: EscalationType,
        now: DateTime<Utc>,
    ) -> EscalationPlan {
        let (actions, next_steps) = match assessment.crisis_level {
            CrisisLevel::Critical => (CRITICAL_ACTIONS, CRITICAL_NEXT_STEPS),
            CrisisLevel::High => (HIGH_ACTIONS, HIGH_NEXT_STEPS),
            _ => (NO_STEPS, NO_STEPS),
        };

        let escalated = !actions.is_empty();
        if escalated {
            self.logger.warn(&format!(
                "Crisis escalated for user {}: {} ({})",
                assessment.user_id,
                escalation_type.as_str(),
                assessment.crisis_level
            ));
        }

        EscalationPlan {
            escalated,
            escalation_type,
            crisis_level: assessment.crisis_level,
            actions: actions.iter().map(|s| s.to_string()).collect(),
            next_steps: next_steps.iter().map(|s| s.to_string()).collect(),
            created_at: now,
        }
    }

    fn report(&self, assessment: &RiskAssessment) {
        let factors: Vec<&str> = assessment
            .detected_factors
            .iter()
            .map(|f| f.as_str())
            .collect();
        let message = format!(
            "Assessed {} content for user {}: level {}, risk {:.2}, factors [{}]",
            assessment.trigger_source.as_str(),
            assessment.user_id,
            assessment.crisis_level,
            assessment.risk_score,
            factors.join(", ")
        );
        if assessment.escalation_needed {
            self.logger.warn(&message);
        } else if assessment.crisis_level > CrisisLevel::None {
            self.logger.info(&message);
        } else {
            self.logger.debug(&message);
        }
    }
}
