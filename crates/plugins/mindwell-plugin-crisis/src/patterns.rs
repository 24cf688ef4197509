//! Weighted crisis keyword patterns and their scoring

use crate::types::RiskFactor;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Base score contributed by each matched keyword, times the weight
pub const KEYWORD_SCORE: f64 = 0.3;
/// Bonus for more than one keyword of the same pattern, times the weight
pub const MULTI_MATCH_BONUS: f64 = 0.2;
/// Bonus per context modifier present
pub const CONTEXT_MODIFIER_BONUS: f64 = 0.1;
/// Cap on the total context bonus, times the weight
pub const CONTEXT_BONUS_CAP: f64 = 0.3;
/// Multiplier applied when the content contains a negation
pub const NEGATION_DAMPING: f64 = 0.7;

static NEGATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:not|don't|won't|never|wouldn't)\b").expect("negation pattern is valid")
});

/// Keywords pointing at one risk factor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrisisKeywordPattern {
    /// Lowercase phrases matched as substrings
    pub keywords: Vec<String>,
    /// Factor reported when a keyword matches
    pub risk_factor: RiskFactor,
    /// Weight in `[0, 1]`
    pub severity_weight: f64,
    /// A strong match on this pattern requires immediate action
    pub requires_immediate_action: bool,
    /// Words that make a match more concerning
    #[serde(default)]
    pub context_modifiers: Vec<String>,
}

impl CrisisKeywordPattern {
    /// Pattern without context modifiers
    pub fn new(risk_factor: RiskFactor, severity_weight: f64, keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            risk_factor,
            severity_weight,
            requires_immediate_action: false,
            context_modifiers: Vec::new(),
        }
    }

    /// Builder: mark the pattern as requiring immediate action
    pub fn immediate(mut self) -> Self {
        self.requires_immediate_action = true;
        self
    }

    /// Builder: set context modifiers
    pub fn with_modifiers(mut self, modifiers: &[&str]) -> Self {
        self.context_modifiers = modifiers.iter().map(|m| m.to_string()).collect();
        self
    }

    /// Score lowercased `content` against this pattern, in `[0, 1]`
    ///
    /// Zero when no keyword matches, regardless of modifiers.
    pub fn score(&self, content: &str) -> f64 {
        let matches = self
            .keywords
            .iter()
            .filter(|k| content.contains(k.as_str()))
            .count();
        if matches == 0 {
            return 0.0;
        }

        let weight = self.severity_weight;
        let mut score = matches as f64 * weight * KEYWORD_SCORE;
        if matches > 1 {
            score += weight * MULTI_MATCH_BONUS;
        }

        let modifiers = self
            .context_modifiers
            .iter()
            .filter(|m| content.contains(m.as_str()))
            .count();
        score += (modifiers as f64 * CONTEXT_MODIFIER_BONUS).min(weight * CONTEXT_BONUS_CAP);

        if contains_negation(content) {
            score *= NEGATION_DAMPING;
        }
        score.min(1.0)
    }
}

/// Whether the content contains a whole-word negation
pub fn contains_negation(content: &str) -> bool {
    NEGATION.is_match(content)
}

/// The built-in pattern set
pub fn default_patterns() -> Vec<CrisisKeywordPattern> {
    vec![
        CrisisKeywordPattern::new(
            RiskFactor::SuicidalIdeation,
            1.0,
            &[
                "suicide",
                "kill myself",
                "end my life",
                "want to die",
                "better off dead",
                "not worth living",
                "take my own life",
                "end it all",
                "don't want to be here",
                "world without me",
            ],
        )
        .immediate()
        .with_modifiers(&["plan", "method", "when", "how", "tonight", "today"]),
        CrisisKeywordPattern::new(
            RiskFactor::SelfHarm,
            0.9,
            &[
                "hurt myself",
                "cut myself",
                "self harm",
                "self-harm",
                "cutting",
                "burning",
                "hitting myself",
                "punish myself",
                "deserve pain",
                "make it stop",
            ],
        )
        .immediate(),
        CrisisKeywordPattern::new(
            RiskFactor::Hopelessness,
            0.8,
            &[
                "hopeless",
                "no point",
                "pointless",
                "give up",
                "can't go on",
                "no future",
                "nothing matters",
                "why bother",
                "no way out",
                "trapped",
                "stuck forever",
            ],
        )
        .with_modifiers(&["always", "never", "forever", "everyone", "nothing"]),
        CrisisKeywordPattern::new(
            RiskFactor::Depression,
            0.7,
            &[
                "want to disappear",
                "invisible",
                "burden to everyone",
                "everyone hates me",
                "worthless",
                "useless",
                "failure",
                "can't do anything right",
                "ruined everything",
            ],
        ),
        CrisisKeywordPattern::new(
            RiskFactor::SubstanceAbuse,
            0.6,
            &[
                "drinking too much",
                "can't stop drinking",
                "need drugs",
                "overdose",
                "too many pills",
                "using again",
                "relapsed",
                "out of control",
                "addiction",
            ],
        ),
        CrisisKeywordPattern::new(
            RiskFactor::Isolation,
            0.5,
            &[
                "nobody cares",
                "all alone",
                "no friends",
                "isolated",
                "pushing everyone away",
                "can't talk to anyone",
                "no one understands",
                "abandoned",
            ],
        ),
        CrisisKeywordPattern::new(
            RiskFactor::Trauma,
            0.6,
            &[
                "flashbacks",
                "nightmares",
                "can't forget",
                "reliving",
                "traumatized",
                "ptsd",
                "triggered",
                "memories won't stop",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CrisisKeywordPattern {
        CrisisKeywordPattern::new(RiskFactor::Depression, 0.8, &["test_keyword", "another_test"])
            .with_modifiers(&["always", "never"])
    }

    #[test]
    fn test_single_match() {
        let score = sample().score("i have test_keyword feelings");
        assert!((score - 0.24).abs() < 1e-9);
    }

    #[test]
    fn test_scoring_adjustments() {
        let pattern = sample();
        let single = pattern.score("i have test_keyword feelings");

        assert!(pattern.score("test_keyword and another_test") > single);
        assert!(pattern.score("i always have test_keyword") > single);
        assert!(pattern.score("i don't have test_keyword") < single);
        assert_eq!(pattern.score("no matching words here"), 0.0);
    }

    #[test]
    fn test_modifiers_alone_score_nothing() {
        assert_eq!(sample().score("always and never"), 0.0);
    }

    #[test]
    fn test_context_bonus_capped() {
        let pattern = CrisisKeywordPattern::new(RiskFactor::Isolation, 0.5, &["alone"])
            .with_modifiers(&["a1", "a2", "a3", "a4"]);
        let score = pattern.score("alone a1 a2 a3 a4");
        assert!((score - (0.15 + 0.15)).abs() < 1e-9);
    }

    #[test]
    fn test_negation_is_whole_word() {
        assert!(contains_negation("i do not feel safe"));
        assert!(contains_negation("i don't care"));
        assert!(!contains_negation("nothing happened"));
        assert!(!contains_negation("i noticed a knot"));
    }

    #[test]
    fn test_score_capped_at_one() {
        let suicidal = &default_patterns()[0];
        let score = suicidal.score("suicide, kill myself, end my life, want to die tonight");
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_default_patterns_cover_critical_factors() {
        let factors: Vec<RiskFactor> = default_patterns().iter().map(|p| p.risk_factor).collect();
        assert!(factors.contains(&RiskFactor::SuicidalIdeation));
        assert!(factors.contains(&RiskFactor::SelfHarm));
        assert!(factors.contains(&RiskFactor::Hopelessness));
        for pattern in default_patterns() {
            assert!((0.0..=1.0).contains(&pattern.severity_weight));
            assert!(pattern.keywords.iter().all(|k| k == &k.to_lowercase()));
        }
    }
}
