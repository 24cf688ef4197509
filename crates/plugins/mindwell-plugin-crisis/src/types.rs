//! Crisis assessment types

use crate::resources::SafetyResource;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Crisis severity, ordered from none to critical
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisLevel {
    /// No risk indicators
    None,
    /// Mild indicators, monitor
    Low,
    /// Professional contact advised
    Medium,
    /// Crisis support needed now
    High,
    /// Immediate danger
    Critical,
}

impl CrisisLevel {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            CrisisLevel::None => "none",
            CrisisLevel::Low => "low",
            CrisisLevel::Medium => "medium",
            CrisisLevel::High => "high",
            CrisisLevel::Critical => "critical",
        }
    }

    /// Whether emergency lines should be surfaced
    pub fn is_urgent(&self) -> bool {
        *self >= CrisisLevel::Medium
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk factor a keyword pattern points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFactor {
    /// Thoughts of ending one's life
    SuicidalIdeation,
    /// Intent or history of self-injury
    SelfHarm,
    /// Drinking or drug use as coping
    SubstanceAbuse,
    /// Loneliness, no one to turn to
    Isolation,
    /// No sense of a future
    Hopelessness,
    /// Persistent low mood or emptiness
    Depression,
    /// Panic, worry, overwhelm
    Anxiety,
    /// Flashbacks, abuse, triggers
    Trauma,
    /// Breakups, conflict, loss
    RelationshipIssues,
    /// Debt, job loss, money worries
    FinancialStress,
}

impl RiskFactor {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskFactor::SuicidalIdeation => "suicidal_ideation",
            RiskFactor::SelfHarm => "self_harm",
            RiskFactor::SubstanceAbuse => "substance_abuse",
            RiskFactor::Isolation => "isolation",
            RiskFactor::Hopelessness => "hopelessness",
            RiskFactor::Depression => "depression",
            RiskFactor::Anxiety => "anxiety",
            RiskFactor::Trauma => "trauma",
            RiskFactor::RelationshipIssues => "relationship_issues",
            RiskFactor::FinancialStress => "financial_stress",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where assessed content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerSource {
    /// Conversation message
    #[default]
    Chat,
    /// Notes and emotions of a mood reading
    Mood,
    /// Journal entry
    Journal,
}

impl TriggerSource {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerSource::Chat => "chat",
            TriggerSource::Mood => "mood",
            TriggerSource::Journal => "journal",
        }
    }
}

/// Outcome of assessing one piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Assessed user
    pub user_id: String,
    /// Where the content came from
    pub trigger_source: TriggerSource,
    /// Mood reading the content came from, if any
    pub reading_id: Option<Uuid>,
    /// Content as assessed
    pub trigger_content: String,
    /// Graded severity
    pub crisis_level: CrisisLevel,
    /// Combined pattern score in `[0, 1]`
    pub risk_score: f64,
    /// Matched factors in pattern order
    pub detected_factors: Vec<RiskFactor>,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
    /// A pattern that demands it scored above the immediate-action line
    pub immediate_action_required: bool,
    /// At most five suggested interventions
    pub recommended_interventions: Vec<String>,
    /// Resources relevant to the level
    pub safety_resources: Vec<SafetyResource>,
    /// Whether an escalation plan should be drawn up
    pub escalation_needed: bool,
    /// Assessment time
    pub assessed_at: DateTime<Utc>,
}

impl RiskAssessment {
    /// Whether a factor was detected
    pub fn has_factor(&self, factor: RiskFactor) -> bool {
        self.detected_factors.contains(&factor)
    }
}

/// Who an escalation is routed to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationType {
    /// Care team or counsellor
    #[default]
    Professional,
    /// Emergency services
    Emergency,
    /// Trusted contacts
    Family,
}

impl EscalationType {
    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationType::Professional => "professional",
            EscalationType::Emergency => "emergency",
            EscalationType::Family => "family",
        }
    }
}

/// Actions and follow-ups for an escalated assessment
///
/// Describes what should happen; nothing is delivered from here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationPlan {
    /// False when the level does not warrant escalation
    pub escalated: bool,
    /// Requested routing
    pub escalation_type: EscalationType,
    /// Level of the assessment the plan was drawn from
    pub crisis_level: CrisisLevel,
    /// Actions to take now
    pub actions: Vec<String>,
    /// Follow-ups
    pub next_steps: Vec<String>,
    /// Plan time
    pub created_at: DateTime<Utc>,
}
