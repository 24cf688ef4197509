//! Plugin settings resolution and startup banner rendering

use std::collections::HashMap;

/// Effective value of one configuration setting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingRow {
    /// Setting (and environment variable) name
    pub name: String,
    /// Effective value
    pub value: String,
    /// Whether the schema default is in effect
    pub is_default: bool,
}

/// Resolve settings from a plugin's config schema
///
/// Precedence: explicit host config, then environment, then schema default.
/// Rows are sorted by name so output is stable.
pub fn resolve_setting_rows(
    schema: Option<&serde_json::Value>,
    config: &HashMap<String, String>,
) -> Vec<SettingRow> {
    let mut rows = Vec::new();
    let Some(map) = schema.and_then(|s| s.as_object()) else {
        return rows;
    };

    for (key, val) in map {
        let def = val
            .get("default")
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        let (value, is_default) = if let Some(v) = config.get(key) {
            (v.clone(), false)
        } else if let Ok(v) = std::env::var(key) {
            (v, false)
        } else {
            (def, true)
        };
        rows.push(SettingRow {
            name: key.clone(),
            value,
            is_default,
        });
    }

    rows.sort_by(|a, b| a.name.cmp(&b.name));
    rows
}

/// Pad string to width, truncating if necessary
fn pad(s: &str, w: usize) -> String {
    let mut out: String = s.chars().take(w).collect();
    let len = out.chars().count();
    if len < w {
        out.push_str(&" ".repeat(w - len));
    }
    out
}

/// Render a plugin's settings table
pub fn render_settings_banner(title: &str, tagline: &str, rows: &[SettingRow]) -> String {
    let border = format!("+{}+", "=".repeat(78));
    let rule = format!("+{}+", "-".repeat(78));
    let mut lines = vec![
        border.clone(),
        format!("|{}|", pad(&format!("  {}", title.to_uppercase()), 78)),
        format!("|{}|", pad(&format!("  {}", tagline), 78)),
        rule.clone(),
        format!(
            "|{}|{}|{}|",
            pad(" SETTING", 40),
            pad(" VALUE", 24),
            pad(" STATUS", 12)
        ),
        rule.clone(),
    ];

    if rows.is_empty() {
        lines.push(format!("|{}|", pad("  No configuration required", 78)));
    } else {
        for row in rows {
            let (icon, status) = if row.is_default {
                (" ", "default")
            } else {
                ("!", "custom")
            };
            lines.push(format!(
                "|{} {}|{}|{}|",
                icon,
                pad(&row.name, 38),
                pad(&format!(" {}", row.value), 24),
                pad(&format!(" {}", status), 12)
            ));
        }
    }

    lines.push(border);
    lines.join("\n")
}
