//! Crisis risk assessment plugin
//!
//! Scores chat, journal or mood-reading text against weighted keyword
//! patterns and returns a [`RiskAssessment`] with a crisis level,
//! interventions and safety resources. High and critical assessments can be
//! turned into an [`EscalationPlan`].
//!
//! Persistence of crisis events and notification delivery belong to the
//! host application.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod detector;
pub mod patterns;
pub mod resources;
pub mod types;

pub use detector::{classify_level, confidence, interventions, CrisisDetector, MAX_INTERVENTIONS};
pub use patterns::{contains_negation, default_patterns, CrisisKeywordPattern};
pub use resources::{default_resources, ResourceCatalog, ResourceKind, SafetyResource};
pub use types::{
    CrisisLevel, EscalationPlan, EscalationType, RiskAssessment, RiskFactor, TriggerSource,
};

use async_trait::async_trait;
use mindwell_core::{render_settings_banner, resolve_setting_rows, Plugin, Result};
use serde_json::json;
use std::collections::HashMap;
use tracing::info;

/// Crisis assessment plugin
pub struct CrisisPlugin;

#[async_trait]
impl Plugin for CrisisPlugin {
    fn name(&self) -> &str {
        "crisis"
    }

    fn description(&self) -> &str {
        "Weighted crisis risk assessment with safety resources"
    }

    fn priority(&self) -> i32 {
        // after mood
        10
    }

    async fn init(&self, config: HashMap<String, String>) -> Result<()> {
        let rows = resolve_setting_rows(self.config_schema().as_ref(), &config);
        println!(
            "{}",
            render_settings_banner(
                "mindwell crisis",
                "Risk scoring  ! Safety resources  ! Escalation plans",
                &rows
            )
        );

        let detector = CrisisDetector::from_env();
        info!(
            "Crisis plugin ready: {} patterns, {} resources, region {}",
            detector.patterns().len(),
            detector.catalog().all().len(),
            detector.catalog().region().unwrap_or("any")
        );
        Ok(())
    }

    fn config_schema(&self) -> Option<serde_json::Value> {
        Some(json!({
            "MINDWELL_CRISIS_REGION": {
                "type": "string",
                "default": "",
                "description": "Country code whose safety resources are preferred"
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plugin_basics() {
        let plugin = CrisisPlugin;
        assert_eq!(plugin.name(), "crisis");
        assert!(plugin.priority() > 0);
        assert!(plugin.config_schema().unwrap()["MINDWELL_CRISIS_REGION"].is_object());
        assert!(plugin.init(HashMap::new()).await.is_ok());
    }
}
