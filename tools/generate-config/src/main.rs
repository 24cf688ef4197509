//! Configuration Generator for Mindwell
//!
//! Writes a `.env` file with the `MINDWELL_*` settings for one of the
//! preset sensitivity profiles.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use mindwell_core::{AlertThresholds, TrendConfig, DEFAULT_CRISIS_KEYWORDS};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output file path
    #[arg(short, long, default_value = ".env")]
    output: PathBuf,

    /// Sensitivity profile
    #[arg(short, long, value_enum, default_value = "standard")]
    profile: Profile,

    /// Force overwrite if file exists
    #[arg(short, long)]
    force: bool,

    /// Print to stdout instead of writing a file
    #[arg(long)]
    print: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Profile {
    /// Default thresholds
    Standard,
    /// Earlier alerts for users who asked for closer monitoring
    Sensitive,
    /// Longer history and windows for clinician-supervised use
    Clinical,
}

/// Everything a profile sets
struct ProfileSettings {
    thresholds: AlertThresholds,
    history_capacity: usize,
    default_window_days: u32,
    strict_user_lookup: bool,
    log_level: &'static str,
}

fn profile_settings(profile: Profile) -> ProfileSettings {
    let standard = AlertThresholds::default();
    match profile {
        Profile::Standard => ProfileSettings {
            thresholds: standard,
            history_capacity: 100,
            default_window_days: 7,
            strict_user_lookup: false,
            log_level: "info",
        },
        Profile::Sensitive => ProfileSettings {
            thresholds: AlertThresholds {
                low_mood_threshold: 4,
                consecutive_low_days: 2,
                stress_threshold: 6,
                energy_threshold: 3,
                persistent_low_average: 4.0,
                trend: TrendConfig {
                    delta: 0.75,
                    ..standard.trend.clone()
                },
                ..standard
            },
            history_capacity: 100,
            default_window_days: 7,
            strict_user_lookup: false,
            log_level: "info",
        },
        Profile::Clinical => ProfileSettings {
            thresholds: AlertThresholds {
                low_mood_threshold: 4,
                consecutive_low_days: 2,
                stress_threshold: 6,
                energy_threshold: 3,
                persistent_low_average: 4.0,
                trend: TrendConfig {
                    delta: 0.5,
                    segments: 3,
                },
                ..standard
            },
            history_capacity: 365,
            default_window_days: 14,
            strict_user_lookup: true,
            log_level: "debug",
        },
    }
}

fn generate_env_content(profile: Profile, settings: &ProfileSettings) -> String {
    let t = &settings.thresholds;
    format!(
        "# ========================================\n\
         # Mindwell - Environment Configuration\n\
         # ========================================\n\
         # Generated: {}\n\
         # Profile: {:?}\n\
         \n\
         # Logging Configuration\n\
         MINDWELL_LOG_LEVEL={}\n\
         \n\
         # Alert Thresholds\n\
         MINDWELL_LOW_MOOD_THRESHOLD={}\n\
         MINDWELL_CONSECUTIVE_LOW_DAYS={}\n\
         MINDWELL_STRESS_THRESHOLD={}\n\
         MINDWELL_ENERGY_THRESHOLD={}\n\
         MINDWELL_PERSISTENT_LOW_AVERAGE={}\n\
         MINDWELL_SHORT_SLEEP_HOURS={}\n\
         MINDWELL_CRISIS_KEYWORDS=\"{}\"\n\
         MINDWELL_SCAN_EMOTIONS={}\n\
         \n\
         # Trend Classification\n\
         MINDWELL_TREND_DELTA={}\n\
         MINDWELL_TREND_SEGMENTS={}\n\
         \n\
         # History\n\
         MINDWELL_HISTORY_CAPACITY={}\n\
         MINDWELL_DEFAULT_WINDOW_DAYS={}\n\
         MINDWELL_STRICT_USER_LOOKUP={}\n\
         \n\
         # Crisis Resources (country code, empty for any)\n\
         MINDWELL_CRISIS_REGION=\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        profile,
        settings.log_level,
        t.low_mood_threshold,
        t.consecutive_low_days,
        t.stress_threshold,
        t.energy_threshold,
        t.persistent_low_average,
        t.short_sleep_hours,
        t.crisis_keywords.join(","),
        t.scan_emotions,
        t.trend.delta,
        t.trend.segments,
        settings.history_capacity,
        settings.default_window_days,
        settings.strict_user_lookup,
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = profile_settings(cli.profile);
    settings
        .thresholds
        .validate()
        .context("profile thresholds are invalid")?;
    let content = generate_env_content(cli.profile, &settings);

    if cli.print {
        print!("{}", content);
        return Ok(());
    }

    if cli.output.exists() && !cli.force {
        bail!(
            "File {:?} already exists! Use --force to overwrite",
            cli.output
        );
    }

    println!("Mindwell Configuration Generator");
    println!("{}", "-".repeat(40));
    println!("Profile: {:?}", cli.profile);
    println!(
        "Crisis keywords: {} ({} built in)",
        settings.thresholds.crisis_keywords.len(),
        DEFAULT_CRISIS_KEYWORDS.len()
    );

    fs::write(&cli.output, content)
        .with_context(|| format!("Failed to write {:?}", cli.output))?;
    println!("Configuration written to: {:?}", cli.output);

    println!();
    println!("Next Steps:");
    println!("   1. Review thresholds in {:?}", cli.output);
    match cli.profile {
        Profile::Standard => {
            println!("   2. Set MINDWELL_CRISIS_REGION to prefer local crisis lines");
        }
        Profile::Sensitive => {
            println!("   2. Sensitive profile alerts after two low readings");
            println!("   3. Set MINDWELL_CRISIS_REGION to prefer local crisis lines");
        }
        Profile::Clinical => {
            println!("   2. Clinical profile rejects analysis of unknown users");
            println!("   3. History keeps 365 readings per user; size hosts accordingly");
        }
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(content: &'a str, key: &str) -> Option<&'a str> {
        content
            .lines()
            .find_map(|line| line.strip_prefix(&format!("{}=", key)))
    }

    #[test]
    fn test_every_profile_validates() {
        for profile in [Profile::Standard, Profile::Sensitive, Profile::Clinical] {
            assert!(profile_settings(profile).thresholds.validate().is_ok());
        }
    }

    #[test]
    fn test_standard_content_matches_defaults() {
        let content = generate_env_content(Profile::Standard, &profile_settings(Profile::Standard));
        assert_eq!(value(&content, "MINDWELL_LOW_MOOD_THRESHOLD"), Some("3"));
        assert_eq!(value(&content, "MINDWELL_CONSECUTIVE_LOW_DAYS"), Some("3"));
        assert_eq!(value(&content, "MINDWELL_STRESS_THRESHOLD"), Some("7"));
        assert_eq!(value(&content, "MINDWELL_ENERGY_THRESHOLD"), Some("2"));
        assert_eq!(value(&content, "MINDWELL_HISTORY_CAPACITY"), Some("100"));
        assert_eq!(value(&content, "MINDWELL_TREND_DELTA"), Some("1"));
        let keywords = value(&content, "MINDWELL_CRISIS_KEYWORDS").unwrap();
        assert!(keywords.starts_with('"') && keywords.ends_with('"'));
        assert!(keywords.contains("hopeless"));
    }

    fn keys(content: &str) -> Vec<String> {
        content
            .lines()
            .filter(|line| !line.starts_with('#'))
            .filter_map(|line| line.split_once('=').map(|(k, _)| k.to_string()))
            .collect()
    }

    #[test]
    fn test_generated_files_load_back() {
        let dir = tempfile::tempdir().unwrap();
        for profile in [Profile::Standard, Profile::Sensitive, Profile::Clinical] {
            let settings = profile_settings(profile);
            let content = generate_env_content(profile, &settings);
            let path = dir.path().join(format!("{:?}.env", profile));
            fs::write(&path, &content).unwrap();

            for key in keys(&content) {
                std::env::remove_var(key);
            }
            mindwell_core::load_env_from_path(&path).unwrap();
            let loaded = AlertThresholds::from_env().unwrap();
            assert_eq!(loaded, settings.thresholds, "{:?}", profile);
            assert!(loaded.crisis_keywords.iter().any(|k| k == "can't go on"));
        }
        for key in keys(&generate_env_content(
            Profile::Standard,
            &profile_settings(Profile::Standard),
        )) {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn test_clinical_content() {
        let content = generate_env_content(Profile::Clinical, &profile_settings(Profile::Clinical));
        assert_eq!(value(&content, "MINDWELL_STRICT_USER_LOOKUP"), Some("true"));
        assert_eq!(value(&content, "MINDWELL_DEFAULT_WINDOW_DAYS"), Some("14"));
        assert_eq!(value(&content, "MINDWELL_LOG_LEVEL"), Some("debug"));
    }
}
