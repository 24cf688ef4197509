//! Plugin types

use crate::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Plugin trait
///
/// Plugins bundle a piece of Mindwell functionality together with its
/// configuration schema so hosts can report effective settings at startup.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name (unique identifier)
    fn name(&self) -> &str;

    /// Plugin description
    fn description(&self) -> &str;

    /// Priority (higher = initialized later)
    fn priority(&self) -> i32 {
        0
    }

    /// Initialize plugin with host-supplied settings
    async fn init(&self, _config: HashMap<String, String>) -> Result<()> {
        Ok(())
    }

    /// Configuration schema: setting name -> `{type, default, description}`
    fn config_schema(&self) -> Option<serde_json::Value> {
        None
    }
}
