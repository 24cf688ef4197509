//! Configuration management and environment variable loading

use crate::{MindwellError, Result};
use std::env;
use std::path::Path;

/// Load environment variables from a .env file
///
/// Looks in the current directory and its parents. A missing file is not an
/// error; the process environment is used as-is.
///
/// # Example
///
/// ```no_run
/// use mindwell_core::load_env;
///
/// load_env().ok();
/// let level = std::env::var("MINDWELL_LOG_LEVEL").unwrap_or_default();
/// ```
pub fn load_env() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::info!("Loaded environment from: {}", path.display());
            Ok(())
        }
        Err(dotenvy::Error::LineParse(line, pos)) => Err(MindwellError::config(format!(
            "Failed to parse .env file at line {}, position {}",
            line, pos
        ))),
        Err(dotenvy::Error::Io(_)) => {
            tracing::warn!("No .env file found - using system environment variables only");
            Ok(())
        }
        Err(e) => Err(MindwellError::config(format!(
            "Failed to load .env file: {}",
            e
        ))),
    }
}

/// Load environment variables from a specific file
pub fn load_env_from_path<P: AsRef<Path>>(path: P) -> Result<()> {
    match dotenvy::from_path(path.as_ref()) {
        Ok(_) => {
            tracing::info!("Loaded environment from: {}", path.as_ref().display());
            Ok(())
        }
        Err(e) => Err(MindwellError::config(format!(
            "Failed to load {} environment file: {}",
            path.as_ref().display(),
            e
        ))),
    }
}

/// Get required environment variable
///
/// Returns an error if the variable is not set
pub fn get_required_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| {
        MindwellError::config(format!(
            "Required environment variable '{}' is not set. \
             Check your .env file or system environment.",
            key
        ))
    })
}

/// Get optional environment variable with default
pub fn get_env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get environment variable as boolean
pub fn get_env_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .ok()
        .and_then(|v| match v.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Some(true),
            "false" | "0" | "no" | "off" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

/// Get environment variable as integer
pub fn get_env_int<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Get environment variable as float
pub fn get_env_float(key: &str, default: f64) -> f64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(default)
}

/// Get a comma-separated environment variable as a list
///
/// Entries are trimmed and empty entries dropped. Returns `None` when the
/// variable is unset so callers can fall back to their own defaults.
pub fn get_env_list(key: &str) -> Option<Vec<String>> {
    env::var(key).ok().map(|v| split_list(&v))
}

/// Split a comma-separated setting, trimming entries and dropping empty ones
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Parse one named setting, or keep `default` when it is absent
///
/// Unlike the `get_env_*` helpers, a value that does not parse is a
/// `Config` error rather than a silent fallback.
pub fn parse_setting<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
{
    match raw {
        None => Ok(default),
        Some(v) => v.trim().parse::<T>().map_err(|_| {
            MindwellError::config(format!("{} has an invalid value: {:?}", key, v))
        }),
    }
}

/// Parse one named boolean setting (`true`/`1`/`yes`/`on` and their opposites)
pub fn parse_bool_setting(key: &str, raw: Option<String>, default: bool) -> Result<bool> {
    match raw {
        None => Ok(default),
        Some(v) => match v.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(MindwellError::config(format!(
                "{} has an invalid boolean value: {:?}",
                key, v
            ))),
        },
    }
}

/// Validate that required environment variables are set
pub fn validate_env(required_vars: &[&str]) -> Result<()> {
    let missing: Vec<&str> = required_vars
        .iter()
        .copied()
        .filter(|var| env::var(var).is_err())
        .collect();

    if !missing.is_empty() {
        return Err(MindwellError::config(format!(
            "Missing required environment variables: {}\n\
             Run 'cargo run --bin generate-config' to create a .env file",
            missing.join(", ")
        )));
    }

    Ok(())
}
