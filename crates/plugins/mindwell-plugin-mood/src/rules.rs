//! Alert rules
//!
//! Each rule inspects the analysis window and raises zero or more alerts.
//! Rules run in a fixed order; that order is the order alerts are reported in.

use mindwell_core::{AlertCode, AlertThresholds, CrisisIndicator, MoodReading, MoodTrend};

/// Everything a rule may look at
pub struct RuleContext<'a> {
    /// Window readings, oldest first
    pub window: &'a [&'a MoodReading],
    /// Active thresholds
    pub thresholds: &'a AlertThresholds,
    /// Lowercased crisis keywords
    pub keywords: &'a [String],
    /// Window trend
    pub trend: MoodTrend,
    /// Window average
    pub average: Option<f64>,
}

impl<'a> RuleContext<'a> {
    /// Most recent reading in the window
    pub fn latest(&self) -> Option<&'a MoodReading> {
        self.window.last().copied()
    }
}

/// Alerts and evidence accumulated while rules run
#[derive(Debug, Default, Clone)]
pub struct Findings {
    /// Raised alerts, first occurrence order
    pub alerts: Vec<AlertCode>,
    /// Crisis keyword hits
    pub crisis_indicators: Vec<CrisisIndicator>,
}

impl Findings {
    /// Raise an alert once
    pub fn raise(&mut self, code: AlertCode) {
        if !self.alerts.contains(&code) {
            self.alerts.push(code);
        }
    }

    /// Whether any raised alert requires intervention
    pub fn needs_intervention(&self) -> bool {
        self.alerts.iter().any(|a| a.requires_intervention())
    }
}

/// A single threshold or keyword rule
pub trait Rule: Send + Sync {
    /// Rule name
    fn name(&self) -> &str;

    /// What the rule checks
    fn description(&self) -> &str;

    /// Inspect the window and record findings
    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings);
}

/// Crisis keywords in notes (and optionally emotion labels) of any reading
pub struct CrisisKeywordRule;

impl Rule for CrisisKeywordRule {
    fn name(&self) -> &str {
        "crisis_keywords"
    }

    fn description(&self) -> &str {
        "Case-insensitive substring match of crisis keywords in notes and emotions"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        let mut hit = false;
        for reading in ctx.window {
            let mut texts: Vec<String> = Vec::new();
            if let Some(notes) = reading.notes() {
                texts.push(notes.to_lowercase());
            }
            if ctx.thresholds.scan_emotions {
                texts.extend(reading.emotions().iter().map(|e| e.to_lowercase()));
            }

            for keyword in ctx.keywords {
                if texts.iter().any(|t| t.contains(keyword.as_str())) {
                    hit = true;
                    findings.crisis_indicators.push(CrisisIndicator {
                        reading_id: reading.id(),
                        keyword: keyword.clone(),
                    });
                }
            }
        }
        if hit {
            findings.raise(AlertCode::CrisisDetected);
        }
    }
}

/// Contiguous low readings counted back from the newest
pub struct ConsecutiveLowRule;

impl Rule for ConsecutiveLowRule {
    fn name(&self) -> &str {
        "consecutive_low"
    }

    fn description(&self) -> &str {
        "Newest readings at or below the low-mood threshold, counted until the first higher one"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        let low = ctx.thresholds.low_mood_threshold;
        let streak = ctx
            .window
            .iter()
            .rev()
            .take_while(|r| r.mood_score() <= low)
            .count();
        if streak >= ctx.thresholds.consecutive_low_days {
            findings.raise(AlertCode::ConsecutiveLowMood);
        }
    }
}

/// Window average below the persistent-low bound
pub struct PersistentLowRule;

impl Rule for PersistentLowRule {
    fn name(&self) -> &str {
        "persistent_low"
    }

    fn description(&self) -> &str {
        "Window average below the persistent-low bound"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        if let Some(avg) = ctx.average {
            if avg < ctx.thresholds.persistent_low_average {
                findings.raise(AlertCode::PersistentLowMood);
            }
        }
    }
}

/// Declining window trend
pub struct DecliningTrendRule;

impl Rule for DecliningTrendRule {
    fn name(&self) -> &str {
        "declining_trend"
    }

    fn description(&self) -> &str {
        "Trend over the window is declining"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        if ctx.trend == MoodTrend::Declining {
            findings.raise(AlertCode::DecliningMoodTrend);
        }
    }
}

/// Stress on the newest reading
pub struct HighStressRule;

impl Rule for HighStressRule {
    fn name(&self) -> &str {
        "high_stress"
    }

    fn description(&self) -> &str {
        "Most recent stress level at or above the stress threshold"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        let stress = ctx.latest().and_then(|r| r.stress_level());
        if stress.is_some_and(|s| s >= ctx.thresholds.stress_threshold) {
            findings.raise(AlertCode::HighStress);
        }
    }
}

/// Energy on the newest reading
pub struct LowEnergyRule;

impl Rule for LowEnergyRule {
    fn name(&self) -> &str {
        "low_energy"
    }

    fn description(&self) -> &str {
        "Most recent energy level at or below the energy threshold"
    }

    fn evaluate(&self, ctx: &RuleContext<'_>, findings: &mut Findings) {
        let energy = ctx.latest().and_then(|r| r.energy_level());
        if energy.is_some_and(|e| e <= ctx.thresholds.energy_threshold) {
            findings.raise(AlertCode::LowEnergy);
        }
    }
}

/// The standard rule set, in reporting order
pub fn standard_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(CrisisKeywordRule),
        Box::new(ConsecutiveLowRule),
        Box::new(PersistentLowRule),
        Box::new(DecliningTrendRule),
        Box::new(HighStressRule),
        Box::new(LowEnergyRule),
    ]
}
