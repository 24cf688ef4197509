//! Tracker settings

use mindwell_core::{parse_bool_setting, parse_setting, Result, DEFAULT_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};

/// Default analysis window in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Settings for [`crate::MoodTracker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Readings retained per user by the in-memory store
    pub history_capacity: usize,
    /// Window used when the caller does not supply one
    pub default_window_days: u32,
    /// Return `NotFound` when analyzing a user with no stored history
    pub strict_user_lookup: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            default_window_days: DEFAULT_WINDOW_DAYS,
            strict_user_lookup: false,
        }
    }
}

impl TrackerConfig {
    /// Read `MINDWELL_HISTORY_CAPACITY`, `MINDWELL_DEFAULT_WINDOW_DAYS`
    /// and `MINDWELL_STRICT_USER_LOOKUP`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same keys as [`TrackerConfig::from_env`], read through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            history_capacity: parse_setting(
                "MINDWELL_HISTORY_CAPACITY",
                lookup("MINDWELL_HISTORY_CAPACITY"),
                defaults.history_capacity,
            )?,
            default_window_days: parse_setting(
                "MINDWELL_DEFAULT_WINDOW_DAYS",
                lookup("MINDWELL_DEFAULT_WINDOW_DAYS"),
                defaults.default_window_days,
            )?,
            strict_user_lookup: parse_bool_setting(
                "MINDWELL_STRICT_USER_LOOKUP",
                lookup("MINDWELL_STRICT_USER_LOOKUP"),
                defaults.strict_user_lookup,
            )?,
        })
    }

    /// Builder: require known users on analysis
    pub fn strict(mut self) -> Self {
        self.strict_user_lookup = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_defaults() {
        let config = TrackerConfig::default();
        assert_eq!(config.default_window_days, 7);
        assert_eq!(config.history_capacity, 100);
        assert!(!config.strict_user_lookup);
        assert!(config.strict().strict_user_lookup);
    }

    #[test]
    fn test_from_env() {
        env::set_var("MINDWELL_DEFAULT_WINDOW_DAYS", "14");
        env::set_var("MINDWELL_STRICT_USER_LOOKUP", "true");
        env::set_var("MINDWELL_HISTORY_CAPACITY", "250");
        let config = TrackerConfig::from_env().unwrap();
        env::remove_var("MINDWELL_HISTORY_CAPACITY");
        env::remove_var("MINDWELL_DEFAULT_WINDOW_DAYS");
        env::remove_var("MINDWELL_STRICT_USER_LOOKUP");

        assert_eq!(config.default_window_days, 14);
        assert_eq!(config.history_capacity, 250);
        assert!(config.strict_user_lookup);
    }

    #[test]
    fn test_partial_json() {
        let config: TrackerConfig = serde_json::from_str(r#"{"default_window_days": 30}"#).unwrap();
        assert_eq!(config.default_window_days, 30);
        assert!(!config.strict_user_lookup);
    }
}
