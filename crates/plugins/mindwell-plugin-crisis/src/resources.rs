//! Safety resource catalog

use crate::types::CrisisLevel;
use serde::{Deserialize, Serialize};

/// Emergency lines surfaced for urgent assessments
pub const MAX_EMERGENCY_RESOURCES: usize = 3;
/// General resources surfaced with every assessment
pub const MAX_GENERAL_RESOURCES: usize = 2;

/// Kind of contact channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// Phone line
    Hotline,
    /// SMS line
    Text,
    /// Web resource
    Website,
    /// Mobile app
    App,
}

/// A support service a user can be pointed at
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyResource {
    /// Service name
    pub name: String,
    /// Contact channel
    pub kind: ResourceKind,
    /// Number, short code or URL
    pub contact: String,
    /// Opening hours
    pub availability: String,
    /// What the service offers
    pub description: String,
    /// ISO country code the service operates in
    pub country_code: String,
    /// Surfaced first for urgent assessments
    pub is_emergency: bool,
}

impl SafetyResource {
    fn new(
        name: &str,
        kind: ResourceKind,
        contact: &str,
        availability: &str,
        description: &str,
        country_code: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            kind,
            contact: contact.to_string(),
            availability: availability.to_string(),
            description: description.to_string(),
            country_code: country_code.to_string(),
            is_emergency: false,
        }
    }

    fn emergency(mut self) -> Self {
        self.is_emergency = true;
        self
    }
}

/// Built-in resources, emergency lines first
pub fn default_resources() -> Vec<SafetyResource> {
    use ResourceKind::*;
    vec![
        SafetyResource::new(
            "988 Suicide & Crisis Lifeline",
            Hotline,
            "988",
            "24/7",
            "Free, confidential crisis counseling",
            "US",
        )
        .emergency(),
        SafetyResource::new(
            "Crisis Text Line",
            Text,
            "Text HOME to 741741",
            "24/7",
            "Crisis counseling via text",
            "US",
        )
        .emergency(),
        SafetyResource::new(
            "Samaritans",
            Hotline,
            "116 123",
            "24/7",
            "Free support for emotional distress",
            "UK",
        )
        .emergency(),
        SafetyResource::new(
            "Psychology Today Therapist Finder",
            Website,
            "https://www.psychologytoday.com/us/therapists",
            "24/7 online",
            "Find mental health professionals near you",
            "US",
        ),
        SafetyResource::new(
            "BetterHelp Online Therapy",
            Website,
            "https://www.betterhelp.com",
            "24/7 online",
            "Professional online counseling",
            "US",
        ),
        SafetyResource::new(
            "National Suicide Prevention Lifeline",
            Website,
            "https://suicidepreventionlifeline.org",
            "24/7 online",
            "Resources and support information",
            "US",
        ),
        SafetyResource::new(
            "Mind (UK)",
            Website,
            "https://www.mind.org.uk",
            "24/7 online",
            "Mental health information and support",
            "UK",
        ),
        SafetyResource::new(
            "MY3 Support Network App",
            App,
            "Download from app store",
            "Always available",
            "Create personal safety plan",
            "US",
        ),
        SafetyResource::new(
            "Safety Plan App",
            App,
            "Download from app store",
            "Always available",
            "Evidence-based safety planning",
            "US",
        ),
    ]
}

/// Resource catalog with an optional region preference
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: Vec<SafetyResource>,
    region: Option<String>,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::new(default_resources())
    }
}

impl ResourceCatalog {
    /// Catalog over the given resources
    pub fn new(resources: Vec<SafetyResource>) -> Self {
        Self {
            resources,
            region: None,
        }
    }

    /// Prefer resources for `country_code`; other regions are used only
    /// when none match
    pub fn with_region(mut self, country_code: impl Into<String>) -> Self {
        self.region = Some(country_code.into().to_uppercase());
        self
    }

    /// Configured region
    pub fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    /// Every resource in the catalog
    pub fn all(&self) -> &[SafetyResource] {
        &self.resources
    }

    /// Resources to surface for an assessment
    ///
    /// Emergency lines lead for medium and above; a couple of general
    /// resources always follow.
    pub fn relevant(&self, level: CrisisLevel) -> Vec<SafetyResource> {
        let mut out = Vec::new();
        if level.is_urgent() {
            out.extend(self.pick(true, MAX_EMERGENCY_RESOURCES));
        }
        out.extend(self.pick(false, MAX_GENERAL_RESOURCES));
        out
    }

    fn pick(&self, emergency: bool, limit: usize) -> Vec<SafetyResource> {
        let of_kind = || self.resources.iter().filter(move |r| r.is_emergency == emergency);
        let regional: Vec<&SafetyResource> = match &self.region {
            Some(region) => of_kind().filter(|r| &r.country_code == region).collect(),
            None => Vec::new(),
        };
        let chosen: Vec<&SafetyResource> = if regional.is_empty() {
            of_kind().collect()
        } else {
            regional
        };
        chosen.into_iter().take(limit).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_level_gets_general_only() {
        let resources = ResourceCatalog::default().relevant(CrisisLevel::Low);
        assert_eq!(resources.len(), 2);
        assert!(resources.iter().all(|r| !r.is_emergency));
    }

    #[test]
    fn test_urgent_level_leads_with_emergency_lines() {
        let resources = ResourceCatalog::default().relevant(CrisisLevel::High);
        assert_eq!(resources.len(), 5);
        assert!(resources[..3].iter().all(|r| r.is_emergency));
        assert_eq!(resources[0].contact, "988");
    }

    #[test]
    fn test_region_preference() {
        let catalog = ResourceCatalog::default().with_region("uk");
        let resources = catalog.relevant(CrisisLevel::Critical);
        assert_eq!(resources[0].name, "Samaritans");
        assert_eq!(resources[1].name, "Mind (UK)");
        assert_eq!(resources.len(), 2);
    }

    #[test]
    fn test_unknown_region_falls_back() {
        let catalog = ResourceCatalog::default().with_region("NZ");
        assert_eq!(catalog.relevant(CrisisLevel::Medium).len(), 5);
    }
}
