//! Mindwell Core
//!
//! Shared building blocks for the Mindwell mood-tracking engine:
//!
//! - Validated mood readings and the analysis types derived from them
//! - Process-wide alert thresholds, loadable from `.env` / environment / JSON
//! - The `HistoryStore` capability that evaluators read user history through
//! - The `Plugin` seam and startup settings rendering
//! - Error type and logging setup
//!
//! # Example
//!
//! ```no_run
//! use mindwell_core::*;
//!
//! fn main() -> Result<()> {
//!     load_env()?;
//!     init_logging();
//!     let thresholds = AlertThresholds::from_env()?;
//!     let reading = MoodSubmission::new("user-1", 6).with_notes("ok day").validate()?;
//!     assert!(reading.mood_score() >= 1);
//!     assert!(thresholds.consecutive_low_days >= 1);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod plugin;
pub mod types;
pub mod utils;

pub use config::{
    get_env_bool, get_env_float, get_env_int, get_env_list, get_env_or, get_required_env,
    load_env, load_env_from_path, parse_bool_setting, parse_setting, split_list, validate_env,
};
pub use error::{MindwellError, Result};
pub use plugin::{render_settings_banner, resolve_setting_rows, SettingRow};
pub use types::*;
pub use utils::{init_logging, Logger};

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use uuid::Uuid;
